//! Property loader.

use super::lookup::{load_lookup_list, LOOKUP_LIST_TAGS};
use super::reader::{parse_date_time, Element};
use super::rule::load_rule;
use super::LoadContext;
use crate::def::{DefaultValue, PropDef, PropType, ReadWriteRule};
use crate::error::Result;
use crate::factory::PropSpec;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

/// Load a `property` element with its optional rule and lookup list.
pub(crate) fn load_property(el: Element<'_, '_>, ctx: &LoadContext<'_>) -> Result<PropDef> {
    el.expect_tag("property")?;
    let mut allowed = vec!["rule"];
    allowed.extend_from_slice(LOOKUP_LIST_TAGS);
    el.ensure_children(&allowed)?;

    let name = el.required_attr("name")?;
    let type_name = el.attr("type").unwrap_or("String");
    let prop_type = PropType::resolve(type_name, el.attr("assembly")).ok_or_else(|| {
        el.error(format_args!(
            "unknown type '{}'; built-in types are: {}",
            type_name,
            PropType::builtin_names()
        ))
    })?;

    let length = el.parse_attr::<usize>("length", "length")?;
    if length.is_some() && !prop_type.is_string() {
        return Err(el.error(format_args!(
            "the 'length' attribute is only valid on String properties, not {}",
            prop_type
        )));
    }
    let auto_increment = el.bool_attr("autoIncrementing", false)?;
    if auto_increment && !prop_type.is_integer() {
        return Err(el.error(format_args!(
            "the 'autoIncrementing' attribute is only valid on integer properties, not {}",
            prop_type
        )));
    }
    let default = match el.attr("default") {
        Some(raw) => Some(parse_default(raw, &prop_type).ok_or_else(|| {
            el.error(format_args!(
                "default value '{}' is not a valid {}",
                raw, prop_type
            ))
        })?),
        None => None,
    };

    let mut prop = ctx.factory.create_prop_def(PropSpec {
        name: name.to_string(),
        prop_type,
        read_write_rule: el.enum_attr("readWriteRule", ReadWriteRule::default())?,
        default,
        length,
        compulsory: el.bool_attr("compulsory", false)?,
        auto_increment,
        display_name: el.string_attr("displayName"),
        description: el.string_attr("description"),
        database_field: el.string_attr("databaseField"),
        keep_value_private: el.bool_attr("keepValuePrivate", false)?,
    });

    for child in el.children() {
        if child.tag() == "rule" {
            if prop.rule.is_some() {
                return Err(child.error("a property takes at most one rule"));
            }
            let rule = load_rule(child, ctx, &prop.name, &prop.prop_type)?;
            prop.rule = Some(rule);
        } else {
            if prop.lookup_list.is_some() {
                return Err(child.error("a property takes at most one lookup list"));
            }
            prop.lookup_list = Some(load_lookup_list(child, ctx)?);
        }
    }
    Ok(prop)
}

/// Parse a default value for a declared type.
fn parse_default(raw: &str, prop_type: &PropType) -> Option<DefaultValue> {
    let value = raw.trim();
    match prop_type {
        PropType::String | PropType::ByteArray | PropType::Custom { .. } => {
            Some(DefaultValue::Text(raw.to_string()))
        }
        PropType::Int32 => value
            .parse::<i32>()
            .ok()
            .map(|v| DefaultValue::Int(i64::from(v))),
        PropType::Int64 => value.parse::<i64>().ok().map(DefaultValue::Int),
        PropType::Decimal => Decimal::from_str(value).ok().map(DefaultValue::Decimal),
        PropType::Double => value.parse::<f64>().ok().map(DefaultValue::Float),
        PropType::Boolean => match value {
            "true" => Some(DefaultValue::Bool(true)),
            "false" => Some(DefaultValue::Bool(false)),
            _ => None,
        },
        PropType::DateTime => {
            if value.eq_ignore_ascii_case("today") {
                Some(DefaultValue::Today)
            } else if value.eq_ignore_ascii_case("now") {
                Some(DefaultValue::Now)
            } else {
                parse_date_time(value).map(DefaultValue::DateTime)
            }
        }
        PropType::Guid => Uuid::parse_str(value).ok().map(DefaultValue::Guid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_by_type() {
        assert_eq!(
            parse_default("42", &PropType::Int32),
            Some(DefaultValue::Int(42))
        );
        assert_eq!(parse_default("5000000000", &PropType::Int32), None);
        assert_eq!(
            parse_default("5000000000", &PropType::Int64),
            Some(DefaultValue::Int(5_000_000_000))
        );
        assert_eq!(
            parse_default("12.50", &PropType::Decimal),
            Some(DefaultValue::Decimal(Decimal::new(1250, 2)))
        );
        assert_eq!(
            parse_default("Today", &PropType::DateTime),
            Some(DefaultValue::Today)
        );
        assert_eq!(parse_default("yes", &PropType::Boolean), None);
        assert!(parse_default("not-a-guid", &PropType::Guid).is_none());
        assert_eq!(
            parse_default(" padded ", &PropType::String),
            Some(DefaultValue::Text(" padded ".into()))
        );
    }
}
