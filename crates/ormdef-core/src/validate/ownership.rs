//! Foreign key ownership inference.

use crate::def::{ClassDefCollection, KeyOwnership, RelationshipDef};
use std::collections::BTreeSet;
use tracing::debug;

/// Settle which side of each relationship stores the linking key.
///
/// Multiple relationships always hold the foreign key. A single
/// relationship holding the foreign key switches to holding the primary
/// key when its own properties are exactly the owner's primary key.
/// Returns the number of relationships switched to primary key ownership.
pub(crate) fn infer_key_ownership(classes: &mut ClassDefCollection) -> usize {
    let mut shared = 0;
    let ids: Vec<_> = classes.ids().collect();
    for id in ids {
        let pk_names: Vec<String> = classes
            .primary_key_of(id)
            .map(|pk| pk.prop_names().into_iter().map(str::to_string).collect())
            .unwrap_or_default();
        let class = match classes.by_id_mut(id) {
            Some(class) => class,
            None => continue,
        };
        for relationship in &mut class.relationships {
            if relationship.is_multiple() {
                relationship.ownership = KeyOwnership::ForeignKey;
            } else if relationship.owns_foreign_key() && shares_primary_key(relationship, &pk_names)
            {
                debug!(
                    class = %class.name,
                    relationship = %relationship.name,
                    "Relationship shares the primary key"
                );
                relationship.ownership = KeyOwnership::PrimaryKey;
                shared += 1;
            }
        }
    }
    shared
}

/// Check if the own properties of a relationship are exactly the primary
/// key properties, in any order.
fn shares_primary_key(relationship: &RelationshipDef, pk_names: &[String]) -> bool {
    let own: BTreeSet<&str> = relationship
        .rel_key
        .iter()
        .map(|pair| pair.own_prop.as_str())
        .collect();
    let pk: BTreeSet<&str> = pk_names.iter().map(String::as_str).collect();
    !pk.is_empty() && relationship.rel_key.len() == pk_names.len() && own == pk
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::{
        ClassId, ClassName, DeleteAction, PropId, PropRef, RelKeyDef, RelPropDef,
        RelationshipKind, RelationshipType,
    };

    fn single(own_props: &[&str]) -> RelationshipDef {
        RelationshipDef {
            name: "Link".into(),
            related_class: ClassName::new("Test", "Other"),
            related_class_id: ClassId(1),
            kind: RelationshipKind::Single,
            rel_key: RelKeyDef {
                rel_props: own_props
                    .iter()
                    .map(|p| RelPropDef {
                        own_prop: p.to_string(),
                        related_prop: p.to_string(),
                        own_ref: PropRef::new(ClassId(0), PropId(0)),
                        related_ref: PropRef::new(ClassId(1), PropId(0)),
                    })
                    .collect(),
            },
            keep_reference: true,
            delete_action: DeleteAction::DereferenceRelated,
            reverse_name: None,
            ownership: KeyOwnership::ForeignKey,
            relationship_type: RelationshipType::Association,
        }
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_exact_match_in_any_order() {
        let pk = names(&["A", "B"]);
        assert!(shares_primary_key(&single(&["B", "A"]), &pk));
        assert!(shares_primary_key(&single(&["A", "B"]), &pk));
    }

    #[test]
    fn test_subset_and_superset_do_not_match() {
        let pk = names(&["A", "B"]);
        assert!(!shares_primary_key(&single(&["A"]), &pk));
        assert!(!shares_primary_key(&single(&["A", "B", "C"]), &pk));
        assert!(!shares_primary_key(&single(&["A", "C"]), &pk));
        assert!(!shares_primary_key(&single(&[]), &[]));
    }

    #[test]
    fn test_repeated_own_property_does_not_cover_key() {
        let pk = names(&["OrderID", "LineNo"]);
        assert!(!shares_primary_key(&single(&["OrderID", "OrderID"]), &pk));
    }
}
