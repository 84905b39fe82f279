//! Structural diagnostics emitted by the resolution passes
//!
//! Every problem found while resolving is non-fatal: the pass records a
//! diagnostic and keeps going, leaving the unresolved reference in place.

use miette::Diagnostic;
use ql_span::FileSpan;
use thiserror::Error;

/// One structural problem found during resolution
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum ResolveError {
    /// A base-class path that no class in the tree matches
    #[error("cannot resolve base class `{base}` of `{class}`")]
    #[diagnostic(
        code(resolve::unresolved_base_class),
        help("the base class is documented by name only")
    )]
    UnresolvedBaseClass {
        /// The deriving class
        class: String,
        /// The base-class path, as written
        base: String,
        /// Where the deriving class was declared
        location: Option<FileSpan>,
    },

    /// A UI type naming itself (directly) as its base
    #[error("UI type `{qml_type}` inherits itself")]
    #[diagnostic(code(resolve::inheritance_cycle))]
    InheritanceCycle {
        qml_type: String,
        location: Option<FileSpan>,
    },

    /// A UI base-type name that no tree in the forest defines
    #[error("cannot resolve base type `{base}` of UI type `{qml_type}`")]
    #[diagnostic(code(resolve::unresolved_qml_base))]
    UnresolvedQmlBase {
        qml_type: String,
        /// The base-type name, as written in the comment
        base: String,
        location: Option<FileSpan>,
    },

    /// A property role hint naming a function the enclosing aggregate does
    /// not have (or whose access/status disqualifies it)
    #[error("property `{property}` names `{function}` as its {role}, but no matching function exists")]
    #[diagnostic(
        code(resolve::unresolved_property_function),
        help("access functions must share the property's access level and status")
    )]
    UnresolvedPropertyFunction {
        property: String,
        function: String,
        /// Human-readable role name (getter/setter/resetter/notifier)
        role: &'static str,
        location: Option<FileSpan>,
    },

    /// A reimplements marker whose target cannot be found in the base chain
    #[error("`{function}` is marked as reimplementing `{target}`, which cannot be found")]
    #[diagnostic(code(resolve::unresolved_reimplements))]
    UnresolvedReimplements {
        function: String,
        /// The marker text, as written
        target: String,
        location: Option<FileSpan>,
    },

    /// Two overloads of one name documenting the same signature
    #[error("`{function}` has more than one document for the same signature")]
    #[diagnostic(code(resolve::duplicate_overload_doc))]
    DuplicateOverloadDoc {
        /// Qualified name of the later, duplicate function
        function: String,
        location: Option<FileSpan>,
    },

    /// An associated host-language class a UI type names but the tree lacks
    #[error("UI type `{qml_type}` is implemented by unknown class `{class}`")]
    #[diagnostic(code(resolve::unresolved_cpp_class))]
    UnresolvedCppClass {
        qml_type: String,
        class: String,
        location: Option<FileSpan>,
    },
}

/// Collector for non-fatal diagnostics across a pass run
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<ResolveError>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: ResolveError) {
        self.diagnostics.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolveError> {
        self.diagnostics.iter()
    }

    pub fn into_vec(self) -> Vec<ResolveError> {
        self.diagnostics
    }
}
