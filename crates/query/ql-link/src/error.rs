//! Link-resolution diagnostics

use miette::Diagnostic;
use thiserror::Error;

/// Why a link target failed to resolve, or resolved with a caveat
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum LinkError {
    /// Target text the grammar cannot parse
    #[error("malformed link target `{target}`")]
    #[diagnostic(code(link::malformed_target))]
    MalformedTarget { target: String },

    /// No entity matches the target anywhere in the search order
    #[error("cannot resolve link target `{target}`")]
    #[diagnostic(code(link::not_found))]
    NotFound { target: String },

    /// Several same-named functions matched and no signature disambiguated;
    /// the first match was used
    #[error("link target `{target}` is ambiguous; using the first of {candidates} overloads")]
    #[diagnostic(
        code(link::ambiguous_reference),
        help("add a parameter-type signature to pick one overload")
    )]
    AmbiguousReference { target: String, candidates: usize },
}
