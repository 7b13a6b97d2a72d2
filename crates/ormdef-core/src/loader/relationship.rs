//! Relationship loader.

use super::reader::Element;
use super::LoadContext;
use crate::def::{
    ClassName, DeleteAction, OrderBy, RawRelPropDef, RawRelationshipDef, RelationshipType,
};
use crate::error::Result;
use tracing::warn;

/// Load a `relationship` element.
///
/// `type` selects `single` or `multiple`. Pairs are `relatedProperty`
/// children naming an own `property` and a `relatedProperty` of the
/// related class.
pub(crate) fn load_relationship(
    el: Element<'_, '_>,
    ctx: &LoadContext<'_>,
) -> Result<RawRelationshipDef> {
    el.expect_tag("relationship")?;
    el.ensure_children(&["relatedProperty"])?;

    let name = el.required_attr("name")?.to_string();
    let related_class = ClassName::new(
        el.attr("relatedAssembly").unwrap_or(ctx.assembly),
        el.required_attr("relatedClass")?,
    );
    let rel_props = load_rel_props(el, ctx)?;
    let keep_reference = el.bool_attr("keepReference", true)?;
    let reverse_name = el.string_attr("reverseRelationship");
    let relationship_type = el.enum_attr("relationshipType", RelationshipType::default())?;

    match el.required_attr("type")? {
        "single" => {
            if el.attr("orderBy").is_some() {
                return Err(el.error("'orderBy' is only valid on multiple relationships"));
            }
            Ok(ctx.factory.create_single_relationship_def(
                name,
                related_class,
                rel_props,
                keep_reference,
                el.enum_attr("deleteAction", DeleteAction::DereferenceRelated)?,
                reverse_name,
                el.bool_attr("owningHasForeignKey", true)?,
                relationship_type,
            ))
        }
        "multiple" => {
            if el.attr("owningHasForeignKey").is_some() {
                warn!(
                    relationship = %name,
                    "Ignoring owningHasForeignKey; multiple relationships always hold the foreign key"
                );
            }
            let order_by = match el.attr("orderBy") {
                Some(raw) => parse_order_by(raw).map_err(|message| el.error(message))?,
                None => Vec::new(),
            };
            Ok(ctx.factory.create_multiple_relationship_def(
                name,
                related_class,
                rel_props,
                keep_reference,
                order_by,
                el.enum_attr("deleteAction", DeleteAction::Prevent)?,
                reverse_name,
                el.bool_attr("owningHasForeignKey", false)?,
                relationship_type,
            ))
        }
        other => Err(el.error(format_args!(
            "attribute 'type' value '{}' is not a relationship type; valid values are: single, multiple",
            other
        ))),
    }
}

fn load_rel_props(el: Element<'_, '_>, ctx: &LoadContext<'_>) -> Result<Vec<RawRelPropDef>> {
    let mut rel_props: Vec<RawRelPropDef> = Vec::new();
    for pair in el.children() {
        pair.ensure_children(&[])?;
        let own_prop = pair.required_attr("property")?;
        if rel_props.iter().any(|p| p.own_prop == own_prop) {
            return Err(pair.error(format_args!(
                "the property '{}' is used by more than one <relatedProperty>",
                own_prop
            )));
        }
        rel_props.push(ctx.factory.create_rel_prop_def(
            own_prop.to_string(),
            pair.required_attr("relatedProperty")?.to_string(),
        ));
    }
    if rel_props.is_empty() {
        return Err(el.error("at least one <relatedProperty> element is required"));
    }
    Ok(rel_props)
}

/// Parse `Name, Date DESC` into order-by terms.
fn parse_order_by(raw: &str) -> Result<Vec<OrderBy>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(|term| {
            let mut words = term.split_whitespace();
            let property = words.next().unwrap_or_default();
            match (words.next(), words.next()) {
                (None, _) | (Some("ASC"), None) => Ok(OrderBy::asc(property)),
                (Some("DESC"), None) => Ok(OrderBy::desc(property)),
                _ => Err(format!(
                    "order-by term '{}' must be a property name optionally followed by ASC or DESC",
                    term
                )),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::OrderDirection;

    #[test]
    fn test_parse_order_by() {
        let terms = parse_order_by("Name, Date DESC ,Code ASC").unwrap();
        let parsed: Vec<_> = terms
            .iter()
            .map(|t| (t.property.as_str(), t.direction))
            .collect();
        assert_eq!(
            parsed,
            vec![
                ("Name", OrderDirection::Asc),
                ("Date", OrderDirection::Desc),
                ("Code", OrderDirection::Asc),
            ]
        );
        assert!(parse_order_by("Name descending").is_err());
        assert!(parse_order_by("Name DESC extra").is_err());
    }
}
