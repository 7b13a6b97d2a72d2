//! Property definitions for classes.

use super::lookup::LookupListDef;
use super::types::{PropType, ReadWriteRule};
use crate::error::{DefinitionError, Result};
use crate::rule::PropRule;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Default value of a property, already parsed for its declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// String value.
    Text(String),
    /// Integer value.
    Int(i64),
    /// Decimal value.
    Decimal(Decimal),
    /// Floating point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// Fixed date and time.
    DateTime(NaiveDateTime),
    /// The current date, evaluated when an object is created.
    Today,
    /// The current date and time, evaluated when an object is created.
    Now,
    /// Fixed identifier.
    Guid(Uuid),
}

/// A property definition within a class.
#[derive(Debug, Clone)]
pub struct PropDef {
    /// Property name (unique within the class's effective properties).
    pub name: String,
    /// Declared value type.
    pub prop_type: PropType,
    /// Read/write rule.
    pub read_write_rule: ReadWriteRule,
    /// Default value if not provided.
    pub default: Option<DefaultValue>,
    /// Maximum length (string properties only).
    pub length: Option<usize>,
    /// Whether a value is required.
    pub compulsory: bool,
    /// Whether the database generates the value.
    pub auto_increment: bool,
    /// Label shown to users.
    pub display_name: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Column name when it differs from the property name.
    pub database_field: Option<String>,
    /// Whether the value must be kept out of logs and displays.
    pub keep_value_private: bool,
    /// Attached validation rule.
    pub rule: Option<Arc<dyn PropRule>>,
    /// Attached lookup list.
    pub lookup_list: Option<LookupListDef>,
}

impl PropDef {
    /// Create a new read/write, optional property.
    pub fn new(name: impl Into<String>, prop_type: PropType) -> Self {
        Self {
            name: name.into(),
            prop_type,
            read_write_rule: ReadWriteRule::ReadWrite,
            default: None,
            length: None,
            compulsory: false,
            auto_increment: false,
            display_name: None,
            description: None,
            database_field: None,
            keep_value_private: false,
            rule: None,
            lookup_list: None,
        }
    }

    /// Create the permissive string property used when a key names a
    /// property that no class in the inheritance chain declares.
    pub fn fallback(name: impl Into<String>) -> Self {
        Self::new(name, PropType::String)
    }

    /// Set the read/write rule.
    pub fn with_read_write_rule(mut self, rule: ReadWriteRule) -> Self {
        self.read_write_rule = rule;
        self
    }

    /// Set the default value.
    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Mark as compulsory.
    pub fn compulsory(mut self) -> Self {
        self.compulsory = true;
        self
    }

    /// Set the maximum length.
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Attach a validation rule.
    pub fn with_rule(mut self, rule: Arc<dyn PropRule>) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Attach a lookup list.
    pub fn with_lookup_list(mut self, lookup_list: LookupListDef) -> Self {
        self.lookup_list = Some(lookup_list);
        self
    }

    /// Column name of the property.
    pub fn database_field_name(&self) -> &str {
        self.database_field.as_deref().unwrap_or(&self.name)
    }

    /// Label of the property.
    pub fn display_name_or_default(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Check if this property has a default value.
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Check if the value can no longer change after it is first written.
    pub fn is_immutable_once_set(&self) -> bool {
        matches!(
            self.read_write_rule,
            ReadWriteRule::WriteOnce | ReadWriteRule::ReadOnly
        )
    }
}

/// Index of a property within its owning class's [`PropDefCollection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropId(pub usize);

/// Name-unique, insertion-ordered set of one class's own properties.
#[derive(Debug, Clone, Default)]
pub struct PropDefCollection {
    props: Vec<PropDef>,
    by_name: HashMap<String, PropId>,
}

impl PropDefCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property, rejecting a second property with the same name.
    pub fn add(&mut self, prop: PropDef) -> Result<PropId> {
        if self.by_name.contains_key(&prop.name) {
            return Err(DefinitionError::structural(format!(
                "the property '{}' is declared more than once",
                prop.name
            )));
        }
        let id = PropId(self.props.len());
        self.by_name.insert(prop.name.clone(), id);
        self.props.push(prop);
        Ok(id)
    }

    /// Get a property by name.
    pub fn get(&self, name: &str) -> Option<&PropDef> {
        self.by_name.get(name).map(|id| &self.props[id.0])
    }

    /// Get a property by id.
    pub fn by_id(&self, id: PropId) -> Option<&PropDef> {
        self.props.get(id.0)
    }

    /// Get a mutable property by id.
    pub fn by_id_mut(&mut self, id: PropId) -> Option<&mut PropDef> {
        self.props.get_mut(id.0)
    }

    /// Get the id of a property by name.
    pub fn id_of(&self, name: &str) -> Option<PropId> {
        self.by_name.get(name).copied()
    }

    /// Check if a property with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Iterate over properties in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &PropDef> {
        self.props.iter()
    }

    /// Iterate over properties with their ids in declaration order.
    pub fn iter_with_ids(&self) -> impl Iterator<Item = (PropId, &PropDef)> {
        self.props
            .iter()
            .enumerate()
            .map(|(index, prop)| (PropId(index), prop))
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.props.len()
    }

    /// Check if there are no properties.
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prop_def_builder() {
        let prop = PropDef::new("InvoiceID", PropType::Guid)
            .compulsory()
            .with_read_write_rule(ReadWriteRule::WriteOnce);

        assert_eq!(prop.name, "InvoiceID");
        assert!(prop.compulsory);
        assert!(prop.is_immutable_once_set());
        assert!(!prop.has_default());
        assert_eq!(prop.database_field_name(), "InvoiceID");
    }

    #[test]
    fn test_fallback_is_permissive_string() {
        let prop = PropDef::fallback("LegacyCode");

        assert_eq!(prop.prop_type, PropType::String);
        assert_eq!(prop.read_write_rule, ReadWriteRule::ReadWrite);
        assert!(!prop.compulsory);
    }

    #[test]
    fn test_collection_rejects_duplicates() {
        let mut props = PropDefCollection::new();
        props.add(PropDef::new("Name", PropType::String)).unwrap();

        let err = props.add(PropDef::new("Name", PropType::Int32)).unwrap_err();
        assert!(err.is_structural());
        assert!(err.message().contains("'Name'"));
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn test_collection_preserves_order() {
        let mut props = PropDefCollection::new();
        props.add(PropDef::new("B", PropType::String)).unwrap();
        props.add(PropDef::new("A", PropType::String)).unwrap();

        let names: Vec<_> = props.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(props.id_of("A"), Some(PropId(1)));
        assert!(props.get("C").is_none());
    }
}
