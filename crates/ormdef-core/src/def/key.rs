//! Key and primary key definitions.
//!
//! Raw keys hold the property names read from the document. Resolved keys
//! bind every member to a property of the effective property set of the
//! owning class.

use super::collection::PropRef;
use super::prop::PropDef;

/// A key as loaded from a single class, before cross-class resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawKeyDef {
    /// Key name.
    pub name: String,
    /// Skip the uniqueness check when any member is null.
    pub ignore_if_null: bool,
    /// Member property names in declaration order.
    pub prop_names: Vec<String>,
}

/// A primary key as loaded from a single class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPrimaryKeyDef {
    /// Whether this is a single identifier-typed object id.
    pub is_object_id: bool,
    /// Member property names in declaration order.
    pub prop_names: Vec<String>,
}

/// How a key member is bound after resolution.
#[derive(Debug, Clone)]
pub enum KeyBinding {
    /// Bound to a declared property of the class or one of its superclasses.
    Property(PropRef),
    /// No class in the chain declares the name; a permissive string
    /// property owned by the key stands in for it.
    Synthesized(PropDef),
}

/// One member of a resolved key.
#[derive(Debug, Clone)]
pub struct KeyMember {
    /// Property name as written in the document.
    pub name: String,
    /// Resolved binding.
    pub binding: KeyBinding,
}

impl KeyMember {
    /// The bound property reference, if the member is not synthesized.
    pub fn prop_ref(&self) -> Option<PropRef> {
        match &self.binding {
            KeyBinding::Property(prop_ref) => Some(*prop_ref),
            KeyBinding::Synthesized(_) => None,
        }
    }

    /// Check if the member had to be synthesized.
    pub fn is_synthesized(&self) -> bool {
        matches!(self.binding, KeyBinding::Synthesized(_))
    }
}

/// A resolved alternate key.
#[derive(Debug, Clone)]
pub struct KeyDef {
    /// Key name.
    pub name: String,
    /// Skip the uniqueness check when any member is null.
    pub ignore_if_null: bool,
    /// Members in declaration order.
    pub members: Vec<KeyMember>,
}

/// A resolved primary key.
#[derive(Debug, Clone)]
pub struct PrimaryKeyDef {
    /// Whether this is a single identifier-typed object id.
    pub is_object_id: bool,
    /// Members in declaration order.
    pub members: Vec<KeyMember>,
}

impl RawKeyDef {
    /// Create a raw key.
    pub fn new(
        name: impl Into<String>,
        prop_names: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            ignore_if_null: false,
            prop_names: prop_names.into_iter().map(Into::into).collect(),
        }
    }
}

impl RawPrimaryKeyDef {
    /// Create an object-id primary key over a single property.
    pub fn object_id(prop_name: impl Into<String>) -> Self {
        Self {
            is_object_id: true,
            prop_names: vec![prop_name.into()],
        }
    }

    /// Create a composite (non object-id) primary key.
    pub fn composite(prop_names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            is_object_id: false,
            prop_names: prop_names.into_iter().map(Into::into).collect(),
        }
    }
}

impl KeyDef {
    /// Member names in declaration order.
    pub fn prop_names(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.name.as_str()).collect()
    }

    /// Check if the key contains a member with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m.name == name)
    }
}

impl PrimaryKeyDef {
    /// Member names in declaration order.
    pub fn prop_names(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.name.as_str()).collect()
    }

    /// Check if the key contains a member with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m.name == name)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the key has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::{ClassId, PropId, PropType};

    fn member(name: &str, prop: usize) -> KeyMember {
        KeyMember {
            name: name.into(),
            binding: KeyBinding::Property(PropRef::new(ClassId(0), PropId(prop))),
        }
    }

    #[test]
    fn test_raw_key_builders() {
        let key = RawKeyDef::new("UniqueCode", ["Code", "Region"]);
        assert_eq!(key.prop_names, vec!["Code", "Region"]);
        assert!(!key.ignore_if_null);

        let pk = RawPrimaryKeyDef::object_id("InvoiceID");
        assert!(pk.is_object_id);
        assert_eq!(pk.prop_names.len(), 1);

        let pk = RawPrimaryKeyDef::composite(["OrderID", "LineNo"]);
        assert!(!pk.is_object_id);
    }

    #[test]
    fn test_primary_key_members() {
        let pk = PrimaryKeyDef {
            is_object_id: false,
            members: vec![
                member("OrderID", 0),
                KeyMember {
                    name: "LineNo".into(),
                    binding: KeyBinding::Synthesized(PropDef::new("LineNo", PropType::String)),
                },
            ],
        };

        assert_eq!(pk.prop_names(), vec!["OrderID", "LineNo"]);
        assert!(pk.contains("LineNo"));
        assert!(pk.members[1].is_synthesized());
        assert_eq!(pk.members[1].prop_ref(), None);
        assert_eq!(
            pk.members[0].prop_ref(),
            Some(PropRef::new(ClassId(0), PropId(0)))
        );
    }
}
