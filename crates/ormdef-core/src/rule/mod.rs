//! Property rules.
//!
//! A rule is any value implementing [`PropRule`]. Rules are created by
//! factory functions registered under a kind name in a [`RuleRegistry`];
//! the loader looks the kind up when it reads a `rule` element.

mod builtin;
mod registry;

pub use builtin::{DateBound, DateRule, DecimalRule, GuidRule, IntegerRule, StringRule};
pub use registry::{RuleFactory, RuleRegistry};

use crate::def::PropType;
use crate::error::DefinitionError;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::fmt;
use uuid::Uuid;

/// A value checked by a rule.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleValue {
    /// No value. Rules accept it; compulsoriness is checked elsewhere.
    Null,
    /// Integer value.
    Int(i64),
    /// Decimal value.
    Decimal(Decimal),
    /// Date and time.
    Date(NaiveDateTime),
    /// String value.
    Text(String),
    /// Identifier value.
    Guid(Uuid),
}

/// The capability every property rule provides.
pub trait PropRule: fmt::Debug + Send + Sync {
    /// Kind the rule was registered under.
    fn kind(&self) -> &str;

    /// Rule name as written in the document.
    fn name(&self) -> &str;

    /// Message reported when a value breaks the rule.
    fn message(&self) -> &str;

    /// Parameters the rule was created with.
    fn parameters(&self) -> &RuleParameters;

    /// Check a value against the rule.
    fn is_valid(&self, value: &RuleValue) -> bool;
}

/// Ordered key/value parameters of a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleParameters {
    entries: Vec<(String, String)>,
}

impl RuleParameters {
    /// Create empty parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter. Returns false if the key was already present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if self.get(&key).is_some() {
            return false;
        }
        self.entries.push((key, value.into()));
        true
    }

    /// Add a parameter (builder style). A repeated key is ignored.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over parameters in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything a rule factory gets to build a rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Rule name.
    pub rule_name: &'a str,
    /// Message from the document, if any.
    pub message: Option<&'a str>,
    /// Property the rule is attached to.
    pub prop_name: &'a str,
    /// Declared type of that property.
    pub prop_type: &'a PropType,
    /// Parameters from the document.
    pub parameters: &'a RuleParameters,
}

impl RuleContext<'_> {
    /// Structural error naming the rule and property.
    pub fn error(&self, message: impl fmt::Display) -> DefinitionError {
        DefinitionError::structural(format!(
            "rule '{}' on property '{}': {}",
            self.rule_name, self.prop_name, message
        ))
    }

    /// The document message, or a generic one.
    pub fn message_or_default(&self) -> String {
        match self.message {
            Some(message) => message.to_string(),
            None => format!(
                "'{}' does not satisfy the rule '{}'",
                self.prop_name, self.rule_name
            ),
        }
    }

    /// Reject any parameter not in `allowed`.
    pub fn ensure_parameters(&self, allowed: &[&str]) -> Result<(), DefinitionError> {
        for (key, _) in self.parameters.iter() {
            if !allowed.contains(&key) {
                let valid = if allowed.is_empty() {
                    "none".to_string()
                } else {
                    allowed.join(", ")
                };
                return Err(self.error(format_args!(
                    "unknown parameter '{}'; valid parameters are: {}",
                    key, valid
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_keep_order_and_reject_repeats() {
        let mut params = RuleParameters::new();
        assert!(params.insert("min", "1"));
        assert!(params.insert("max", "9"));
        assert!(!params.insert("min", "2"));

        let keys: Vec<_> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["min", "max"]);
        assert_eq!(params.get("min"), Some("1"));
    }

    #[test]
    fn test_context_rejects_unknown_parameters() {
        let params = RuleParameters::new().with("minimum", "1");
        let ctx = RuleContext {
            rule_name: "AgeRule",
            message: None,
            prop_name: "Age",
            prop_type: &PropType::Int32,
            parameters: &params,
        };

        let err = ctx.ensure_parameters(&["min", "max"]).unwrap_err();
        assert!(err.is_structural());
        assert!(err.message().contains("'minimum'"));
        assert!(err.message().contains("min, max"));
        assert_eq!(
            ctx.message_or_default(),
            "'Age' does not satisfy the rule 'AgeRule'"
        );
    }
}
