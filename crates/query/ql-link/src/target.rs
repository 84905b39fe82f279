//! Link-target grammar
//!
//! A target is a `::`-separated path, optionally followed by a
//! parenthesized parameter-type signature, optionally followed by a
//! `#fragment`: `Widget::show(bool)#details`.

use crate::error::LinkError;
use ql_model::Parameters;

/// A parsed link target
#[derive(Debug, Clone, PartialEq)]
pub struct LinkTarget {
    /// Path segments, in order
    pub path: Vec<String>,
    /// Parameter types, when a signature was given. `Some` with an empty
    /// list means an explicit `()`.
    pub parameters: Option<Parameters>,
    pub fragment: Option<String>,
}

impl LinkTarget {
    /// Parses `text` against the target grammar.
    pub fn parse(text: &str) -> Result<Self, LinkError> {
        let malformed = || LinkError::MalformedTarget {
            target: text.to_string(),
        };

        let (body, fragment) = match text.split_once('#') {
            Some((body, fragment)) if !fragment.is_empty() => {
                (body, Some(fragment.to_string()))
            }
            Some(_) => return Err(malformed()),
            None => (text, None),
        };

        let (path_text, parameters) = match body.find('(') {
            Some(open) => {
                let inner = body[open + 1..].strip_suffix(')').ok_or_else(malformed)?;
                (&body[..open], Some(Parameters::from_signature(inner)))
            }
            None => (body, None),
        };

        let path_text = path_text.trim();
        if path_text.is_empty() {
            return Err(malformed());
        }
        let path: Vec<String> = path_text.split("::").map(str::to_string).collect();
        if path.iter().any(String::is_empty) {
            return Err(malformed());
        }
        Ok(Self {
            path,
            parameters,
            fragment,
        })
    }

    pub fn name(&self) -> &str {
        self.path.last().map_or("", String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_grammar() {
        let target = LinkTarget::parse("Widget::show(bool, int)#details").unwrap();
        assert_eq!(target.path, vec!["Widget", "show"]);
        let parameters = target.parameters.unwrap();
        assert_eq!(parameters.count(), 2);
        assert_eq!(parameters.at(0).data_type, "bool");
        assert_eq!(target.fragment.as_deref(), Some("details"));
    }

    #[test]
    fn test_bare_name_and_empty_signature() {
        let bare = LinkTarget::parse("show").unwrap();
        assert_eq!(bare.path, vec!["show"]);
        assert!(bare.parameters.is_none());

        let explicit = LinkTarget::parse("show()").unwrap();
        assert!(explicit.parameters.unwrap().is_empty());
    }

    #[test]
    fn test_malformed_targets_rejected() {
        assert!(LinkTarget::parse("").is_err());
        assert!(LinkTarget::parse("show(").is_err());
        assert!(LinkTarget::parse("a::::b").is_err());
        assert!(LinkTarget::parse("show#").is_err());
    }
}
