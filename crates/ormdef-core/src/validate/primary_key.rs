//! Primary key presence and object id checks.

use crate::config::LoaderConfig;
use crate::def::{ClassDefCollection, KeyBinding, PropType, ReadWriteRule};
use crate::error::{DefinitionError, Result};

/// Check that every class has a primary key and settle object id keys.
///
/// The property of an object id primary key must be a `Guid`; it is made
/// compulsory and write-once, even when inherited.
pub(crate) fn check_primary_keys(
    classes: &mut ClassDefCollection,
    config: &LoaderConfig,
) -> Result<()> {
    let ids: Vec<_> = classes.ids().collect();
    for id in ids {
        let class = classes.class(id);
        if config.require_primary_key && classes.primary_key_of(id).is_none() {
            return Err(DefinitionError::semantic(format!(
                "the class '{}' has no primary key and does not inherit one",
                class.name
            )));
        }
        let pk = match &class.primary_key {
            Some(pk) if pk.is_object_id => pk,
            _ => continue,
        };
        if pk.len() != 1 {
            return Err(DefinitionError::semantic(format!(
                "the object id primary key of class '{}' must have exactly one property, but has {}",
                class.name,
                pk.len()
            )));
        }
        let member = &pk.members[0];
        let (prop_ref, prop_type) = match &member.binding {
            KeyBinding::Property(prop_ref) => (
                Some(*prop_ref),
                classes.prop(*prop_ref).map(|p| p.prop_type.clone()),
            ),
            KeyBinding::Synthesized(prop) => (None, Some(prop.prop_type.clone())),
        };
        if prop_type != Some(PropType::Guid) {
            return Err(DefinitionError::semantic(format!(
                "the object id property '{}' of class '{}' must be of type Guid, but is {}",
                member.name,
                class.name,
                prop_type.map_or_else(|| "undefined".to_string(), |t| t.to_string())
            )));
        }
        if let Some(prop) = prop_ref.and_then(|r| classes.prop_mut(r)) {
            prop.compulsory = true;
            prop.read_write_rule = ReadWriteRule::WriteOnce;
        }
    }
    Ok(())
}
