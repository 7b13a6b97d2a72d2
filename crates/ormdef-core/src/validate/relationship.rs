//! Relationship checks shared by the post-load pipeline and the validator.

use super::effective::{ClassGraph, EffectivePropertyCache};
use crate::def::{ClassDefCollection, ClassId, ClassName, PropRef, RelationshipDef};
use crate::error::{DefinitionError, Result};
use std::collections::BTreeSet;

/// Resolve the related class of a relationship.
pub(crate) fn resolve_related_class<G: ClassGraph + ?Sized>(
    graph: &G,
    owner: ClassId,
    relationship: &str,
    related: &ClassName,
) -> Result<ClassId> {
    graph.class_id(related).ok_or_else(|| {
        DefinitionError::semantic(format!(
            "the relationship '{}' of class '{}' refers to the class '{}', which is not defined",
            relationship,
            graph.class_name(owner),
            related
        ))
    })
}

/// Resolve one relationship property pair against the effective property
/// sets of the owning and the related class.
pub(crate) fn resolve_rel_prop<G: ClassGraph + ?Sized>(
    graph: &G,
    cache: &mut EffectivePropertyCache,
    owner: ClassId,
    related: ClassId,
    relationship: &str,
    own_prop: &str,
    related_prop: &str,
) -> Result<(PropRef, PropRef)> {
    let own_ref = cache.get(graph, owner).get(own_prop).ok_or_else(|| {
        DefinitionError::semantic(format!(
            "the relationship '{}' of class '{}' uses the property '{}', which class '{}' does not have",
            relationship,
            graph.class_name(owner),
            own_prop,
            graph.class_name(owner)
        ))
    })?;
    let related_ref = cache.get(graph, related).get(related_prop).ok_or_else(|| {
        DefinitionError::semantic(format!(
            "the relationship '{}' of class '{}' uses the related property '{}', which class '{}' does not have",
            relationship,
            graph.class_name(owner),
            related_prop,
            graph.class_name(related)
        ))
    })?;
    Ok((own_ref, related_ref))
}

/// Resolve every pair of a relationship already held in a collection,
/// returning the related class.
pub(crate) fn check_resolution(
    classes: &ClassDefCollection,
    cache: &mut EffectivePropertyCache,
    owner: ClassId,
    relationship: &RelationshipDef,
) -> Result<ClassId> {
    let related =
        resolve_related_class(classes, owner, &relationship.name, &relationship.related_class)?;
    for pair in relationship.rel_key.iter() {
        resolve_rel_prop(
            classes,
            cache,
            owner,
            related,
            &relationship.name,
            &pair.own_prop,
            &pair.related_prop,
        )?;
    }
    Ok(related)
}

/// Check the reverse relationship of `relationship`, if it names one.
///
/// The reverse must exist on the related class (or one of its ancestors)
/// and relate back to the owner's inheritance line. Its pairs must mirror
/// the forward pairs as a set, and two single relationships may not both
/// hold the foreign key.
pub(crate) fn check_reverse(
    classes: &ClassDefCollection,
    owner: ClassId,
    related: ClassId,
    relationship: &RelationshipDef,
) -> Result<()> {
    let reverse_name = match &relationship.reverse_name {
        Some(name) => name,
        None => return Ok(()),
    };
    let owner_name = &classes.class(owner).name;
    let related_name = &classes.class(related).name;

    let (_, reverse) = classes
        .find_relationship(related, reverse_name)
        .ok_or_else(|| {
            DefinitionError::semantic(format!(
                "the relationship '{}' of class '{}' names the reverse relationship '{}', which class '{}' does not define",
                relationship.name, owner_name, reverse_name, related_name
            ))
        })?;

    let points_back = match classes.id_of(&reverse.related_class) {
        Some(target) => {
            target == owner
                || classes.super_class_chain(owner).contains(&target)
                || classes.super_class_chain(target).contains(&owner)
        }
        None => false,
    };
    if !points_back {
        return Err(DefinitionError::semantic(format!(
            "the relationship '{}' of class '{}' names the reverse relationship '{}' of class '{}', \
             which relates to '{}' instead of '{}'",
            relationship.name,
            owner_name,
            reverse.name,
            related_name,
            reverse.related_class,
            owner_name
        )));
    }

    let forward: BTreeSet<(&str, &str)> = relationship
        .rel_key
        .iter()
        .map(|p| (p.own_prop.as_str(), p.related_prop.as_str()))
        .collect();
    let mirrored: BTreeSet<(&str, &str)> = reverse
        .rel_key
        .iter()
        .map(|p| (p.related_prop.as_str(), p.own_prop.as_str()))
        .collect();
    if forward != mirrored || relationship.rel_key.len() != reverse.rel_key.len() {
        return Err(DefinitionError::semantic(format!(
            "the relationship '{}' of class '{}' and its reverse relationship '{}' of class '{}' \
             do not have mirrored relationship properties: {} does not mirror {}",
            relationship.name,
            owner_name,
            reverse.name,
            related_name,
            describe_pairs(relationship),
            describe_pairs(reverse)
        )));
    }

    if !relationship.is_multiple()
        && !reverse.is_multiple()
        && relationship.owns_foreign_key()
        && reverse.owns_foreign_key()
    {
        return Err(DefinitionError::semantic(format!(
            "the relationship '{}' of class '{}' and its reverse relationship '{}' of class '{}' \
             both declare that they hold the foreign key; set owningHasForeignKey=\"false\" on one of them",
            relationship.name, owner_name, reverse.name, related_name
        )));
    }
    Ok(())
}

fn describe_pairs(relationship: &RelationshipDef) -> String {
    let pairs: Vec<String> = relationship
        .rel_key
        .iter()
        .map(|p| format!("({}, {})", p.own_prop, p.related_prop))
        .collect();
    format!("[{}]", pairs.join(", "))
}
