//! Lookup list loaders.

use super::reader::Element;
use super::LoadContext;
use crate::def::{ClassName, LookupItem, LookupListDef, DEFAULT_LOOKUP_TIMEOUT_MS};
use crate::error::Result;

/// Tags of the lookup list elements.
pub(crate) const LOOKUP_LIST_TAGS: &[&str] =
    &["simpleLookupList", "databaseLookupList", "businessObjectLookupList"];

/// Load any lookup list element.
pub(crate) fn load_lookup_list(
    el: Element<'_, '_>,
    ctx: &LoadContext<'_>,
) -> Result<LookupListDef> {
    match el.tag() {
        "simpleLookupList" => load_simple(el, ctx),
        "databaseLookupList" => load_database(el, ctx),
        "businessObjectLookupList" => load_business_object(el, ctx),
        _ => Err(el.error(format_args!(
            "expected one of: {}",
            LOOKUP_LIST_TAGS.join(", ")
        ))),
    }
}

/// Items come from `item` children (`display`, optional `value`) or from a
/// `|`-separated `options` attribute whose entries are their own values.
fn load_simple(el: Element<'_, '_>, ctx: &LoadContext<'_>) -> Result<LookupListDef> {
    el.ensure_children(&["item"])?;
    let mut items = Vec::new();
    if let Some(options) = el.attr("options") {
        items.extend(
            options
                .split('|')
                .map(str::trim)
                .filter(|option| !option.is_empty())
                .map(|option| LookupItem::new(option, option)),
        );
    }
    for item in el.children() {
        item.ensure_children(&[])?;
        let display = item.required_attr("display")?;
        let value = item.attr("value").unwrap_or(display);
        items.push(LookupItem::new(display, value));
    }
    if items.is_empty() {
        return Err(el.error("a simple lookup list needs an 'options' attribute or <item> elements"));
    }
    Ok(ctx.factory.create_simple_lookup_list(items))
}

fn load_database(el: Element<'_, '_>, ctx: &LoadContext<'_>) -> Result<LookupListDef> {
    el.ensure_children(&[])?;
    let sql = el.required_attr("sql")?.to_string();
    let timeout = el
        .parse_attr::<u64>("timeout", "timeout in milliseconds")?
        .unwrap_or(DEFAULT_LOOKUP_TIMEOUT_MS);
    let limit_to_list = el.bool_attr("limitToList", false)?;
    let class = el
        .attr("lookupClassName")
        .map(|class| ClassName::new(el.attr("assembly").unwrap_or(ctx.assembly), class));
    Ok(ctx
        .factory
        .create_database_lookup_list(sql, timeout, limit_to_list, class))
}

fn load_business_object(el: Element<'_, '_>, ctx: &LoadContext<'_>) -> Result<LookupListDef> {
    el.ensure_children(&[])?;
    let class = ClassName::new(
        el.attr("assembly").unwrap_or(ctx.assembly),
        el.required_attr("class")?,
    );
    let timeout = el
        .parse_attr::<u64>("timeout", "timeout in milliseconds")?
        .unwrap_or(DEFAULT_LOOKUP_TIMEOUT_MS);
    Ok(ctx.factory.create_business_object_lookup_list(
        class,
        el.string_attr("criteria"),
        el.string_attr("sort"),
        timeout,
        el.bool_attr("limitToList", false)?,
    ))
}
