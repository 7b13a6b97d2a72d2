//! Class definitions.
//!
//! [`RawClassDef`] is what the class loader produces from one class element:
//! key and relationship members are still property names. [`ClassDef`] is
//! what the post-load pipeline produces once every class is known: members
//! are bound to properties and related classes by handle.

use super::collection::ClassId;
use super::key::{KeyDef, PrimaryKeyDef, RawKeyDef, RawPrimaryKeyDef};
use super::prop::PropDefCollection;
use super::relationship::{RawRelationshipDef, RelationshipDef};
use super::super_class::SuperClassDef;
use super::types::ClassName;
use super::ui::UiDefCollection;

/// A class definition as loaded from a single class element.
#[derive(Debug, Clone, Default)]
pub struct RawClassDef {
    /// Qualified class name.
    pub name: ClassName,
    /// Mapped table.
    pub table_name: Option<String>,
    /// Label shown to users.
    pub display_name: Option<String>,
    /// Type parameter distinguishing several definitions of one type.
    pub type_parameter: Option<String>,
    /// Parent class reference.
    pub super_class: Option<SuperClassDef>,
    /// Own properties.
    pub props: PropDefCollection,
    /// Alternate keys.
    pub keys: Vec<RawKeyDef>,
    /// Primary key (absent when inherited).
    pub primary_key: Option<RawPrimaryKeyDef>,
    /// Relationships.
    pub relationships: Vec<RawRelationshipDef>,
    /// UI metadata.
    pub ui_defs: UiDefCollection,
}

impl RawClassDef {
    /// Create an empty raw class definition.
    pub fn new(name: ClassName) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// Set the own properties.
    pub fn with_props(mut self, props: PropDefCollection) -> Self {
        self.props = props;
        self
    }

    /// Set the primary key.
    pub fn with_primary_key(mut self, primary_key: RawPrimaryKeyDef) -> Self {
        self.primary_key = Some(primary_key);
        self
    }

    /// Add an alternate key.
    pub fn with_key(mut self, key: RawKeyDef) -> Self {
        self.keys.push(key);
        self
    }

    /// Add a relationship.
    pub fn with_relationship(mut self, relationship: RawRelationshipDef) -> Self {
        self.relationships.push(relationship);
        self
    }

    /// Set the parent class reference.
    pub fn with_super_class(mut self, super_class: SuperClassDef) -> Self {
        self.super_class = Some(super_class);
        self
    }

    /// Set the mapped table.
    pub fn with_table(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }
}

/// A fully resolved class definition.
#[derive(Debug, Clone)]
pub struct ClassDef {
    /// Handle of this class in its collection.
    pub id: ClassId,
    /// Qualified class name.
    pub name: ClassName,
    /// Mapped table.
    pub table_name: Option<String>,
    /// Label shown to users.
    pub display_name: Option<String>,
    /// Type parameter distinguishing several definitions of one type.
    pub type_parameter: Option<String>,
    /// Parent class reference.
    pub super_class: Option<SuperClassDef>,
    /// Handle of the parent class.
    pub super_class_id: Option<ClassId>,
    /// Own properties.
    pub props: PropDefCollection,
    /// Alternate keys.
    pub keys: Vec<KeyDef>,
    /// Own primary key (absent when inherited).
    pub primary_key: Option<PrimaryKeyDef>,
    /// Own relationships.
    pub relationships: Vec<RelationshipDef>,
    /// UI metadata.
    pub ui_defs: UiDefCollection,
}

impl ClassDef {
    /// Mapped table, defaulting to the class name.
    pub fn table_name_or_default(&self) -> &str {
        self.table_name.as_deref().unwrap_or(&self.name.class_name)
    }

    /// Label, defaulting to the class name.
    pub fn display_name_or_default(&self) -> &str {
        self.display_name
            .as_deref()
            .unwrap_or(&self.name.class_name)
    }

    /// Get an own relationship by name.
    pub fn relationship(&self, name: &str) -> Option<&RelationshipDef> {
        self.relationships.iter().find(|r| r.name == name)
    }

    /// Get an alternate key by name.
    pub fn key(&self, name: &str) -> Option<&KeyDef> {
        self.keys.iter().find(|k| k.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::{PropDef, PropType, RawRelationshipDef};

    #[test]
    fn test_raw_class_builder() {
        let mut props = PropDefCollection::new();
        props
            .add(PropDef::new("InvoiceID", PropType::Guid))
            .unwrap();
        props
            .add(PropDef::new("CustomerID", PropType::Guid))
            .unwrap();

        let class = RawClassDef::new(ClassName::new("Shop", "Invoice"))
            .with_props(props)
            .with_primary_key(RawPrimaryKeyDef::object_id("InvoiceID"))
            .with_relationship(
                RawRelationshipDef::single("Customer", ClassName::new("Shop", "Customer"))
                    .with_rel_prop("CustomerID", "CustomerID"),
            )
            .with_table("tbInvoice");

        assert_eq!(class.name.to_string(), "Shop.Invoice");
        assert_eq!(class.props.len(), 2);
        assert!(class.primary_key.is_some());
        assert_eq!(class.relationships.len(), 1);
        assert_eq!(class.table_name.as_deref(), Some("tbInvoice"));
        assert!(class.super_class.is_none());
    }
}
