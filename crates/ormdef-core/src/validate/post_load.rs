//! The whole-collection pipeline run once every class has been parsed.
//!
//! Passes, in order:
//!
//! 1. superclass resolution and cycle detection,
//! 2. effective property resolution for every class,
//! 3. key and relationship binding against the effective property sets,
//! 4. reverse relationship checks,
//! 5. foreign key ownership inference,
//! 6. primary key checks.
//!
//! One [`EffectivePropertyCache`] serves passes 2 and 3 and is dropped with
//! the call.

use super::effective::{ClassGraph, EffectiveProperties, EffectivePropertyCache};
use super::ownership::infer_key_ownership;
use super::primary_key::check_primary_keys;
use super::relationship::{check_reverse, resolve_related_class, resolve_rel_prop};
use crate::config::LoaderConfig;
use crate::def::{
    ClassDef, ClassDefCollection, ClassId, ClassName, KeyBinding, KeyDef, KeyMember,
    KeyOwnership, PrimaryKeyDef, PropDef, PropDefCollection, RawClassDef, RawRelationshipDef,
    RelKeyDef, RelPropDef, RelationshipDef,
};
use crate::error::{DefinitionError, Result};
use std::collections::HashMap;
use tracing::{debug, warn};

impl ClassDefCollection {
    /// Build a validated collection from phase-1 class definitions.
    pub fn from_raw(raws: Vec<RawClassDef>, config: &LoaderConfig) -> Result<Self> {
        run(raws, config)
    }
}

/// Phase-1 classes with their parents resolved.
struct RawGraph<'a> {
    raws: &'a [RawClassDef],
    index: HashMap<ClassName, ClassId>,
    parents: Vec<Option<ClassId>>,
}

impl ClassGraph for RawGraph<'_> {
    fn class_count(&self) -> usize {
        self.raws.len()
    }

    fn class_name(&self, id: ClassId) -> &ClassName {
        &self.raws[id.0].name
    }

    fn class_id(&self, name: &ClassName) -> Option<ClassId> {
        self.index.get(name).copied()
    }

    fn super_class_id(&self, id: ClassId) -> Option<ClassId> {
        self.parents[id.0]
    }

    fn own_props(&self, id: ClassId) -> &PropDefCollection {
        &self.raws[id.0].props
    }
}

/// Keys and relationships of one class, bound by handle.
struct Bound {
    keys: Vec<KeyDef>,
    primary_key: Option<PrimaryKeyDef>,
    relationships: Vec<RelationshipDef>,
}

pub(crate) fn run(raws: Vec<RawClassDef>, config: &LoaderConfig) -> Result<ClassDefCollection> {
    let index = index_classes(&raws)?;
    let parents = resolve_super_classes(&raws, &index)?;
    check_inheritance_cycles(&raws, &parents)?;
    debug!(classes = raws.len(), "Resolved superclasses");

    let graph = RawGraph {
        raws: &raws,
        index,
        parents,
    };
    let mut cache = EffectivePropertyCache::new(raws.len());
    cache.resolve_all(&graph);
    debug!(classes = cache.resolved(), "Resolved effective properties");

    let mut bound = Vec::with_capacity(raws.len());
    for (index, raw) in raws.iter().enumerate() {
        bound.push(bind_class(&graph, &mut cache, ClassId(index), raw, config)?);
    }
    debug!("Bound keys and relationships");

    let RawGraph { parents, .. } = graph;
    let mut classes = ClassDefCollection::new();
    for ((raw, bound), parent) in raws.into_iter().zip(bound).zip(parents) {
        classes.insert(ClassDef {
            id: ClassId(0),
            name: raw.name,
            table_name: raw.table_name,
            display_name: raw.display_name,
            type_parameter: raw.type_parameter,
            super_class: raw.super_class,
            super_class_id: parent,
            props: raw.props,
            keys: bound.keys,
            primary_key: bound.primary_key,
            relationships: bound.relationships,
            ui_defs: raw.ui_defs,
        })?;
    }

    let ids: Vec<_> = classes.ids().collect();
    for id in ids {
        for relationship in &classes.class(id).relationships {
            check_reverse(&classes, id, relationship.related_class_id, relationship)?;
        }
    }
    debug!("Checked reverse relationships");

    let shared = infer_key_ownership(&mut classes);
    debug!(shared_primary_keys = shared, "Inferred foreign key ownership");

    check_primary_keys(&mut classes, config)?;
    debug!("Checked primary keys");

    Ok(classes)
}

fn index_classes(raws: &[RawClassDef]) -> Result<HashMap<ClassName, ClassId>> {
    let mut index = HashMap::with_capacity(raws.len());
    for (i, raw) in raws.iter().enumerate() {
        if index.insert(raw.name.clone(), ClassId(i)).is_some() {
            return Err(DefinitionError::semantic(format!(
                "the class '{}' is defined more than once",
                raw.name
            )));
        }
    }
    Ok(index)
}

fn resolve_super_classes(
    raws: &[RawClassDef],
    index: &HashMap<ClassName, ClassId>,
) -> Result<Vec<Option<ClassId>>> {
    raws.iter()
        .map(|raw| match &raw.super_class {
            None => Ok(None),
            Some(super_class) => index.get(&super_class.class).copied().map(Some).ok_or_else(|| {
                DefinitionError::semantic(format!(
                    "the class '{}' inherits from '{}', which is not defined",
                    raw.name, super_class.class
                ))
            }),
        })
        .collect()
}

fn check_inheritance_cycles(raws: &[RawClassDef], parents: &[Option<ClassId>]) -> Result<()> {
    for start in 0..raws.len() {
        let mut path = vec![start];
        let mut current = parents[start];
        while let Some(ClassId(parent)) = current {
            if let Some(pos) = path.iter().position(|&p| p == parent) {
                if pos != 0 {
                    // The cycle is reported from its own members.
                    break;
                }
                path.push(parent);
                let names: Vec<String> = path.iter().map(|&i| raws[i].name.to_string()).collect();
                return Err(DefinitionError::semantic(format!(
                    "the class '{}' inherits from itself: {}",
                    raws[start].name,
                    names.join(" -> ")
                )));
            }
            path.push(parent);
            current = parents[parent];
        }
    }
    Ok(())
}

fn bind_class(
    graph: &RawGraph<'_>,
    cache: &mut EffectivePropertyCache,
    id: ClassId,
    raw: &RawClassDef,
    config: &LoaderConfig,
) -> Result<Bound> {
    let effective = cache.get(graph, id);

    let mut keys = Vec::with_capacity(raw.keys.len());
    for key in &raw.keys {
        let label = format!("key '{}'", key.name);
        keys.push(KeyDef {
            name: key.name.clone(),
            ignore_if_null: key.ignore_if_null,
            members: bind_members(&effective, &raw.name, &label, &key.prop_names, config)?,
        });
    }

    let primary_key = match &raw.primary_key {
        Some(pk) => Some(PrimaryKeyDef {
            is_object_id: pk.is_object_id,
            members: bind_members(&effective, &raw.name, "primary key", &pk.prop_names, config)?,
        }),
        None => None,
    };

    let mut relationships = Vec::with_capacity(raw.relationships.len());
    for relationship in &raw.relationships {
        relationships.push(bind_relationship(graph, cache, id, relationship)?);
    }

    Ok(Bound {
        keys,
        primary_key,
        relationships,
    })
}

fn bind_members(
    effective: &EffectiveProperties,
    class_name: &ClassName,
    label: &str,
    prop_names: &[String],
    config: &LoaderConfig,
) -> Result<Vec<KeyMember>> {
    prop_names
        .iter()
        .map(|name| {
            let binding = match effective.get(name) {
                Some(prop_ref) => KeyBinding::Property(prop_ref),
                None if config.strict_key_properties => {
                    return Err(DefinitionError::semantic(format!(
                        "the {} of class '{}' uses the property '{}', which the class does not have",
                        label, class_name, name
                    )));
                }
                None => {
                    warn!(
                        class = %class_name,
                        key = label,
                        property = %name,
                        "Key property not found; using a string property in its place"
                    );
                    KeyBinding::Synthesized(PropDef::fallback(name.as_str()))
                }
            };
            Ok(KeyMember {
                name: name.clone(),
                binding,
            })
        })
        .collect()
}

fn bind_relationship(
    graph: &RawGraph<'_>,
    cache: &mut EffectivePropertyCache,
    owner: ClassId,
    raw: &RawRelationshipDef,
) -> Result<RelationshipDef> {
    let related = resolve_related_class(graph, owner, &raw.name, &raw.related_class)?;
    let mut rel_props = Vec::with_capacity(raw.rel_props.len());
    for pair in &raw.rel_props {
        let (own_ref, related_ref) = resolve_rel_prop(
            graph,
            cache,
            owner,
            related,
            &raw.name,
            &pair.own_prop,
            &pair.related_prop,
        )?;
        rel_props.push(RelPropDef {
            own_prop: pair.own_prop.clone(),
            related_prop: pair.related_prop.clone(),
            own_ref,
            related_ref,
        });
    }
    Ok(RelationshipDef {
        name: raw.name.clone(),
        related_class: raw.related_class.clone(),
        related_class_id: related,
        kind: raw.kind.clone(),
        rel_key: RelKeyDef { rel_props },
        keep_reference: raw.keep_reference,
        delete_action: raw.delete_action,
        reverse_name: raw.reverse_name.clone(),
        ownership: if raw.owning_has_foreign_key {
            KeyOwnership::ForeignKey
        } else {
            KeyOwnership::Related
        },
        relationship_type: raw.relationship_type,
    })
}
