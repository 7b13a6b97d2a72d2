//! Property rule loader.

use super::reader::Element;
use super::LoadContext;
use crate::def::PropType;
use crate::error::Result;
use crate::rule::{PropRule, RuleContext, RuleParameters, RuleRegistry};
use std::sync::Arc;

/// Load a `rule` element attached to a property.
///
/// The rule kind comes from the `kind` attribute, or from the property type
/// when absent. Parameters are `add` children with `key` and `value`.
pub(crate) fn load_rule(
    el: Element<'_, '_>,
    ctx: &LoadContext<'_>,
    prop_name: &str,
    prop_type: &PropType,
) -> Result<Arc<dyn PropRule>> {
    el.expect_tag("rule")?;
    el.ensure_children(&["add"])?;
    let name = el.required_attr("name")?;
    let message = el.attr("message");

    let mut parameters = RuleParameters::new();
    for add in el.children() {
        add.ensure_children(&[])?;
        let key = add.required_attr("key")?;
        let value = add.attr("value").unwrap_or_default();
        if !parameters.insert(key, value) {
            return Err(add.error(format_args!(
                "the parameter '{}' is given more than once",
                key
            )));
        }
    }

    let kind = match el.attr("kind") {
        Some(kind) => kind,
        None => RuleRegistry::builtin_kind_for(prop_type).ok_or_else(|| {
            el.error(format_args!(
                "no built-in rule applies to properties of type {}; set the 'kind' attribute",
                prop_type
            ))
        })?,
    };

    let rule_ctx = RuleContext {
        rule_name: name,
        message,
        prop_name,
        prop_type,
        parameters: &parameters,
    };
    ctx.rules.create(kind, &rule_ctx)
}
