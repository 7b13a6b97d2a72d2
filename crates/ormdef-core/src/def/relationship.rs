//! Relationship definitions between classes.

use super::collection::{ClassId, PropRef};
use super::types::{ClassName, DeleteAction, RelationshipType};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

/// One term of a collection relationship's order-by clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// Property name to order by.
    pub property: String,
    /// Sort direction.
    pub direction: OrderDirection,
}

impl OrderBy {
    /// Create ascending order.
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: OrderDirection::Asc,
        }
    }

    /// Create descending order.
    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: OrderDirection::Desc,
        }
    }
}

/// Whether a relationship reaches one related object or a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationshipKind {
    /// At most one related object.
    Single,
    /// A collection of related objects.
    Multiple {
        /// Ordering of the collection.
        order_by: Vec<OrderBy>,
    },
}

/// Which side of a relationship physically stores the linking key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOwnership {
    /// The owning class stores the linking key as a foreign key.
    ForeignKey,
    /// The linking key is the owning class's own primary key, shared with
    /// the related class.
    PrimaryKey,
    /// The related class stores the linking key.
    Related,
}

/// A (local property, related property) pair, by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRelPropDef {
    /// Property on the owning class.
    pub own_prop: String,
    /// Property on the related class.
    pub related_prop: String,
}

impl RawRelPropDef {
    /// Create a pair.
    pub fn new(own_prop: impl Into<String>, related_prop: impl Into<String>) -> Self {
        Self {
            own_prop: own_prop.into(),
            related_prop: related_prop.into(),
        }
    }
}

/// A relationship as loaded from a single class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRelationshipDef {
    /// Relationship name (unique within the class).
    pub name: String,
    /// Qualified name of the related class.
    pub related_class: ClassName,
    /// Single or collection.
    pub kind: RelationshipKind,
    /// Relationship key pairs in declaration order.
    pub rel_props: Vec<RawRelPropDef>,
    /// Whether the owner keeps a strong reference to loaded related objects.
    pub keep_reference: bool,
    /// Action on delete of the owner.
    pub delete_action: DeleteAction,
    /// Name of the reverse relationship on the related class.
    pub reverse_name: Option<String>,
    /// Document-declared "owning side holds the foreign key" flag.
    pub owning_has_foreign_key: bool,
    /// Association strength.
    pub relationship_type: RelationshipType,
}

impl RawRelationshipDef {
    /// Create a single relationship with default settings.
    pub fn single(name: impl Into<String>, related_class: ClassName) -> Self {
        Self {
            name: name.into(),
            related_class,
            kind: RelationshipKind::Single,
            rel_props: Vec::new(),
            keep_reference: true,
            delete_action: DeleteAction::DereferenceRelated,
            reverse_name: None,
            owning_has_foreign_key: true,
            relationship_type: RelationshipType::Association,
        }
    }

    /// Create a multiple relationship with default settings.
    pub fn multiple(name: impl Into<String>, related_class: ClassName) -> Self {
        Self {
            name: name.into(),
            related_class,
            kind: RelationshipKind::Multiple {
                order_by: Vec::new(),
            },
            rel_props: Vec::new(),
            keep_reference: true,
            delete_action: DeleteAction::Prevent,
            reverse_name: None,
            owning_has_foreign_key: false,
            relationship_type: RelationshipType::Association,
        }
    }

    /// Add a key pair.
    pub fn with_rel_prop(
        mut self,
        own_prop: impl Into<String>,
        related_prop: impl Into<String>,
    ) -> Self {
        self.rel_props.push(RawRelPropDef::new(own_prop, related_prop));
        self
    }

    /// Set the reverse relationship name.
    pub fn with_reverse(mut self, reverse_name: impl Into<String>) -> Self {
        self.reverse_name = Some(reverse_name.into());
        self
    }

    /// Set the document-declared foreign key ownership flag.
    pub fn with_owning_foreign_key(mut self, owning_has_foreign_key: bool) -> Self {
        self.owning_has_foreign_key = owning_has_foreign_key;
        self
    }

    /// Set the delete action.
    pub fn with_delete_action(mut self, delete_action: DeleteAction) -> Self {
        self.delete_action = delete_action;
        self
    }
}

/// A resolved relationship key pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelPropDef {
    /// Property name on the owning class.
    pub own_prop: String,
    /// Property name on the related class.
    pub related_prop: String,
    /// Bound property in the owning class's effective set.
    pub own_ref: PropRef,
    /// Bound property in the related class's effective set.
    pub related_ref: PropRef,
}

/// Ordered set of resolved key pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelKeyDef {
    /// Pairs in declaration order.
    pub rel_props: Vec<RelPropDef>,
}

impl RelKeyDef {
    /// Local property names in declaration order.
    pub fn own_prop_names(&self) -> Vec<&str> {
        self.rel_props.iter().map(|p| p.own_prop.as_str()).collect()
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.rel_props.len()
    }

    /// Check if the key has no pairs.
    pub fn is_empty(&self) -> bool {
        self.rel_props.is_empty()
    }

    /// Iterate over pairs.
    pub fn iter(&self) -> impl Iterator<Item = &RelPropDef> {
        self.rel_props.iter()
    }
}

/// A resolved relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipDef {
    /// Relationship name (unique within the class).
    pub name: String,
    /// Qualified name of the related class.
    pub related_class: ClassName,
    /// Handle of the related class in its collection.
    pub related_class_id: ClassId,
    /// Single or collection.
    pub kind: RelationshipKind,
    /// Relationship key.
    pub rel_key: RelKeyDef,
    /// Whether the owner keeps a strong reference to loaded related objects.
    pub keep_reference: bool,
    /// Action on delete of the owner.
    pub delete_action: DeleteAction,
    /// Name of the reverse relationship on the related class.
    pub reverse_name: Option<String>,
    /// Which side stores the linking key.
    pub ownership: KeyOwnership,
    /// Association strength.
    pub relationship_type: RelationshipType,
}

impl RelationshipDef {
    /// Check if this is a collection relationship.
    pub fn is_multiple(&self) -> bool {
        matches!(self.kind, RelationshipKind::Multiple { .. })
    }

    /// Check if the owning side stores the linking key as a foreign key.
    pub fn owns_foreign_key(&self) -> bool {
        self.ownership == KeyOwnership::ForeignKey
    }

    /// Check if the linking key is the owning side's primary key.
    pub fn owns_primary_key(&self) -> bool {
        self.ownership == KeyOwnership::PrimaryKey
    }

    /// Order-by clause of a collection relationship.
    pub fn order_by(&self) -> &[OrderBy] {
        match &self.kind {
            RelationshipKind::Multiple { order_by } => order_by,
            RelationshipKind::Single => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_defaults() {
        let rel = RawRelationshipDef::single("Customer", ClassName::new("Shop", "Customer"))
            .with_rel_prop("CustomerID", "CustomerID")
            .with_reverse("Invoices");

        assert_eq!(rel.kind, RelationshipKind::Single);
        assert!(rel.owning_has_foreign_key);
        assert_eq!(rel.delete_action, DeleteAction::DereferenceRelated);
        assert_eq!(rel.reverse_name.as_deref(), Some("Invoices"));
        assert_eq!(rel.rel_props, vec![RawRelPropDef::new("CustomerID", "CustomerID")]);
    }

    #[test]
    fn test_multiple_defaults() {
        let rel = RawRelationshipDef::multiple("Invoices", ClassName::new("Shop", "Invoice"))
            .with_delete_action(DeleteAction::DeleteRelated);

        assert!(matches!(rel.kind, RelationshipKind::Multiple { .. }));
        assert!(!rel.owning_has_foreign_key);
        assert_eq!(rel.delete_action, DeleteAction::DeleteRelated);
    }

    #[test]
    fn test_order_by_builders() {
        assert_eq!(OrderBy::asc("Name").direction, OrderDirection::Asc);
        assert_eq!(OrderBy::desc("Date").direction, OrderDirection::Desc);
    }
}
