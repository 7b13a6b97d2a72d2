//! Error types for loading and validating class definitions.

use thiserror::Error;

/// Errors raised while loading or validating class definitions.
///
/// Loading is fail-fast: the first error aborts the whole load and no
/// partially validated collection is ever returned.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The document is malformed: wrong element name, missing required
    /// attribute, unparsable primitive or unmatched enum member.
    #[error("invalid definition: {0}")]
    Structural(String),

    /// A cross-class invariant does not hold once every class is known.
    #[error("invalid class definitions: {0}")]
    Semantic(String),

    /// A property rule names a kind that was never registered.
    #[error("unknown rule kind '{kind}' (registered kinds: {registered})")]
    UnknownRuleKind {
        /// The requested kind.
        kind: String,
        /// Comma-separated registered kinds.
        registered: String,
    },

    /// The text is not a well-formed document.
    #[error("unreadable class definition document: {0}")]
    Document(#[from] roxmltree::Error),
}

impl DefinitionError {
    /// Create a structural (phase 1) error.
    pub fn structural(message: impl Into<String>) -> Self {
        DefinitionError::Structural(message.into())
    }

    /// Create a semantic (phase 2) error.
    pub fn semantic(message: impl Into<String>) -> Self {
        DefinitionError::Semantic(message.into())
    }

    /// Create an unknown rule kind error.
    pub fn unknown_rule_kind<'a>(
        kind: &str,
        registered: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        DefinitionError::UnknownRuleKind {
            kind: kind.to_string(),
            registered: registered.into_iter().collect::<Vec<_>>().join(", "),
        }
    }

    /// Check if this error was raised while parsing a single definition.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            DefinitionError::Structural(_)
                | DefinitionError::UnknownRuleKind { .. }
                | DefinitionError::Document(_)
        )
    }

    /// Check if this error was raised by the whole-collection checks.
    pub fn is_semantic(&self) -> bool {
        matches!(self, DefinitionError::Semantic(_))
    }

    /// The diagnostic message without the error-kind prefix.
    pub fn message(&self) -> String {
        match self {
            DefinitionError::Structural(message) | DefinitionError::Semantic(message) => {
                message.clone()
            }
            other => other.to_string(),
        }
    }

    /// Prefix the message with the class it was raised for.
    pub(crate) fn in_class(self, class: &str) -> Self {
        match self {
            DefinitionError::Structural(message) => {
                DefinitionError::Structural(format!("in class '{}': {}", class, message))
            }
            other => other,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = DefinitionError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let structural = DefinitionError::structural("missing attribute 'name'");
        assert!(structural.is_structural());
        assert!(!structural.is_semantic());
        assert_eq!(structural.message(), "missing attribute 'name'");

        let semantic = DefinitionError::semantic("class 'Customer' not found");
        assert!(semantic.is_semantic());
        assert_eq!(
            semantic.to_string(),
            "invalid class definitions: class 'Customer' not found"
        );
    }

    #[test]
    fn test_unknown_rule_kind_lists_registered() {
        let err = DefinitionError::unknown_rule_kind("email", ["date", "integer"]);
        assert!(err.is_structural());
        assert_eq!(
            err.to_string(),
            "unknown rule kind 'email' (registered kinds: date, integer)"
        );
    }

    #[test]
    fn test_in_class_prefixes_structural_only() {
        let err = DefinitionError::structural("bad").in_class("Shop.Invoice");
        assert_eq!(err.message(), "in class 'Shop.Invoice': bad");

        let err = DefinitionError::semantic("bad").in_class("Shop.Invoice");
        assert_eq!(err.message(), "bad");
    }
}
