//! Superclass reference loader.

use super::reader::Element;
use super::LoadContext;
use crate::def::{ClassName, InheritanceStrategy, SuperClassDef};
use crate::error::Result;

/// Load a `superClass` element. The assembly defaults to that of the
/// inheriting class.
pub(crate) fn load_super_class(
    el: Element<'_, '_>,
    ctx: &LoadContext<'_>,
) -> Result<SuperClassDef> {
    el.expect_tag("superClass")?;
    el.ensure_children(&[])?;
    let class = ClassName::new(
        el.attr("assembly").unwrap_or(ctx.assembly),
        el.required_attr("class")?,
    );
    let strategy = el.enum_attr("orMapping", InheritanceStrategy::default())?;
    let super_class = ctx.factory.create_super_class_def(
        class,
        strategy,
        el.string_attr("id"),
        el.string_attr("discriminator"),
    );
    super_class
        .check_strategy_fields()
        .map_err(|message| el.error(message))?;
    Ok(super_class)
}
