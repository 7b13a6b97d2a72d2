//! Key and primary key loaders.
//!
//! Members are kept as property names; they are bound to properties once
//! the effective property sets of every class are known.

use super::reader::Element;
use super::LoadContext;
use crate::def::{RawKeyDef, RawPrimaryKeyDef};
use crate::error::Result;

/// Load a `key` element. An unnamed key is named after its properties.
pub(crate) fn load_key(el: Element<'_, '_>, ctx: &LoadContext<'_>) -> Result<RawKeyDef> {
    el.expect_tag("key")?;
    let prop_names = load_prop_names(el)?;
    let name = match el.attr("name") {
        Some(name) => name.to_string(),
        None => prop_names.join("_"),
    };
    let ignore_if_null = el.bool_attr("ignoreIfNull", false)?;
    Ok(ctx.factory.create_key_def(name, ignore_if_null, prop_names))
}

/// Load a `primaryKey` element.
pub(crate) fn load_primary_key(
    el: Element<'_, '_>,
    ctx: &LoadContext<'_>,
) -> Result<RawPrimaryKeyDef> {
    el.expect_tag("primaryKey")?;
    let prop_names = load_prop_names(el)?;
    let is_object_id = el.bool_attr("isObjectID", true)?;
    if is_object_id && prop_names.len() != 1 {
        return Err(el.error(format_args!(
            "an object id primary key must have exactly one property, but has {}; \
             set isObjectID=\"false\" for a composite key",
            prop_names.len()
        )));
    }
    Ok(ctx.factory.create_primary_key_def(is_object_id, prop_names))
}

fn load_prop_names(el: Element<'_, '_>) -> Result<Vec<String>> {
    el.ensure_children(&["prop"])?;
    let mut names: Vec<String> = Vec::new();
    for prop in el.children() {
        prop.ensure_children(&[])?;
        let name = prop.required_attr("name")?;
        if names.iter().any(|n| n == name) {
            return Err(prop.error(format_args!("the property '{}' is listed twice", name)));
        }
        names.push(name.to_string());
    }
    if names.is_empty() {
        return Err(el.error("at least one <prop> element is required"));
    }
    Ok(names)
}
