//! Built-in rule kinds.
//!
//! Absent bounds default to the extremes of the value type rather than to
//! zero, so a rule with only `max` set still accepts negative values.

use super::{PropRule, RuleContext, RuleParameters, RuleValue};
use crate::def::PropType;
use crate::error::Result;
use crate::loader::parse_date_time;
use chrono::{Local, NaiveDate, NaiveDateTime};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

/// Integer range rule.
#[derive(Debug)]
pub struct IntegerRule {
    name: String,
    message: String,
    parameters: RuleParameters,
    min: i64,
    max: i64,
}

impl IntegerRule {
    /// Registered kind.
    pub const KIND: &'static str = "integer";

    /// Build from a rule context. Parameters: `min`, `max`.
    pub fn from_context(ctx: &RuleContext<'_>) -> Result<Box<dyn PropRule>> {
        ctx.ensure_parameters(&["min", "max"])?;
        let (type_min, type_max) = match ctx.prop_type {
            PropType::Int32 => (i64::from(i32::MIN), i64::from(i32::MAX)),
            _ => (i64::MIN, i64::MAX),
        };
        let bound = |key: &str, default: i64| -> Result<i64> {
            match ctx.parameters.get(key) {
                None => Ok(default),
                Some(raw) => {
                    let value = raw.trim().parse::<i64>().map_err(|_| {
                        ctx.error(format_args!(
                            "parameter '{}' value '{}' is not a valid integer",
                            key, raw
                        ))
                    })?;
                    if value < type_min || value > type_max {
                        return Err(ctx.error(format_args!(
                            "parameter '{}' value '{}' is outside the range of {}",
                            key, raw, ctx.prop_type
                        )));
                    }
                    Ok(value)
                }
            }
        };
        let min = bound("min", type_min)?;
        let max = bound("max", type_max)?;
        if min > max {
            return Err(ctx.error(format_args!("min {} is greater than max {}", min, max)));
        }
        Ok(Box::new(Self {
            name: ctx.rule_name.to_string(),
            message: ctx.message_or_default(),
            parameters: ctx.parameters.clone(),
            min,
            max,
        }))
    }

    /// Lower bound.
    pub fn min(&self) -> i64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> i64 {
        self.max
    }
}

impl PropRule for IntegerRule {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn parameters(&self) -> &RuleParameters {
        &self.parameters
    }

    fn is_valid(&self, value: &RuleValue) -> bool {
        match value {
            RuleValue::Null => true,
            RuleValue::Int(i) => (self.min..=self.max).contains(i),
            _ => false,
        }
    }
}

/// Decimal range rule.
#[derive(Debug)]
pub struct DecimalRule {
    name: String,
    message: String,
    parameters: RuleParameters,
    min: Decimal,
    max: Decimal,
}

impl DecimalRule {
    /// Registered kind.
    pub const KIND: &'static str = "decimal";

    /// Build from a rule context. Parameters: `min`, `max`.
    pub fn from_context(ctx: &RuleContext<'_>) -> Result<Box<dyn PropRule>> {
        ctx.ensure_parameters(&["min", "max"])?;
        let bound = |key: &str, default: Decimal| -> Result<Decimal> {
            match ctx.parameters.get(key) {
                None => Ok(default),
                Some(raw) => Decimal::from_str(raw.trim()).map_err(|_| {
                    ctx.error(format_args!(
                        "parameter '{}' value '{}' is not a valid decimal",
                        key, raw
                    ))
                }),
            }
        };
        let min = bound("min", Decimal::MIN)?;
        let max = bound("max", Decimal::MAX)?;
        if min > max {
            return Err(ctx.error(format_args!("min {} is greater than max {}", min, max)));
        }
        Ok(Box::new(Self {
            name: ctx.rule_name.to_string(),
            message: ctx.message_or_default(),
            parameters: ctx.parameters.clone(),
            min,
            max,
        }))
    }

    /// Lower bound.
    pub fn min(&self) -> Decimal {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> Decimal {
        self.max
    }
}

impl PropRule for DecimalRule {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn parameters(&self) -> &RuleParameters {
        &self.parameters
    }

    fn is_valid(&self, value: &RuleValue) -> bool {
        let value = match value {
            RuleValue::Null => return true,
            RuleValue::Decimal(d) => *d,
            RuleValue::Int(i) => Decimal::from(*i),
            _ => return false,
        };
        value >= self.min && value <= self.max
    }
}

/// One bound of a date rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    /// A fixed date and time.
    Fixed(NaiveDateTime),
    /// The current date, evaluated when the rule runs.
    Today,
    /// The current date and time, evaluated when the rule runs.
    Now,
}

impl DateBound {
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("today") {
            Some(DateBound::Today)
        } else if raw.eq_ignore_ascii_case("now") {
            Some(DateBound::Now)
        } else {
            parse_date_time(raw).map(DateBound::Fixed)
        }
    }

    fn allows_at_or_after(
        self,
        value: NaiveDateTime,
        today: NaiveDate,
        now: NaiveDateTime,
    ) -> bool {
        match self {
            DateBound::Fixed(bound) => value >= bound,
            DateBound::Today => value.date() >= today,
            DateBound::Now => value >= now,
        }
    }

    fn allows_at_or_before(
        self,
        value: NaiveDateTime,
        today: NaiveDate,
        now: NaiveDateTime,
    ) -> bool {
        match self {
            DateBound::Fixed(bound) => value <= bound,
            DateBound::Today => value.date() <= today,
            DateBound::Now => value <= now,
        }
    }
}

/// Date range rule.
#[derive(Debug)]
pub struct DateRule {
    name: String,
    message: String,
    parameters: RuleParameters,
    min: DateBound,
    max: DateBound,
}

impl DateRule {
    /// Registered kind.
    pub const KIND: &'static str = "date";

    /// Build from a rule context. Parameters: `min`, `max`.
    pub fn from_context(ctx: &RuleContext<'_>) -> Result<Box<dyn PropRule>> {
        ctx.ensure_parameters(&["min", "max"])?;
        let bound = |key: &str, default: NaiveDateTime| -> Result<DateBound> {
            match ctx.parameters.get(key) {
                None => Ok(DateBound::Fixed(default)),
                Some(raw) => DateBound::parse(raw).ok_or_else(|| {
                    ctx.error(format_args!(
                        "parameter '{}' value '{}' is not a valid date (use yyyy-mm-dd, yyyy-mm-ddThh:mm:ss, Today or Now)",
                        key, raw
                    ))
                }),
            }
        };
        let min = bound("min", NaiveDateTime::MIN)?;
        let max = bound("max", NaiveDateTime::MAX)?;
        if let (DateBound::Fixed(lo), DateBound::Fixed(hi)) = (min, max) {
            if lo > hi {
                return Err(ctx.error(format_args!("min {} is later than max {}", lo, hi)));
            }
        }
        Ok(Box::new(Self {
            name: ctx.rule_name.to_string(),
            message: ctx.message_or_default(),
            parameters: ctx.parameters.clone(),
            min,
            max,
        }))
    }

    /// Lower bound.
    pub fn min(&self) -> DateBound {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> DateBound {
        self.max
    }
}

impl PropRule for DateRule {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn parameters(&self) -> &RuleParameters {
        &self.parameters
    }

    fn is_valid(&self, value: &RuleValue) -> bool {
        let value = match value {
            RuleValue::Null => return true,
            RuleValue::Date(d) => *d,
            _ => return false,
        };
        let now = Local::now().naive_local();
        let today = now.date();
        self.min.allows_at_or_after(value, today, now)
            && self.max.allows_at_or_before(value, today, now)
    }
}

/// String length and pattern rule.
#[derive(Debug)]
pub struct StringRule {
    name: String,
    message: String,
    parameters: RuleParameters,
    min_length: usize,
    max_length: Option<usize>,
    pattern: Option<Regex>,
    pattern_message: Option<String>,
}

impl StringRule {
    /// Registered kind.
    pub const KIND: &'static str = "string";

    /// Build from a rule context. Parameters: `minLength`, `maxLength`
    /// (`-1` for unbounded), `patternMatch`, `patternMatchMessage`.
    pub fn from_context(ctx: &RuleContext<'_>) -> Result<Box<dyn PropRule>> {
        ctx.ensure_parameters(&["minLength", "maxLength", "patternMatch", "patternMatchMessage"])?;
        let length = |key: &str| -> Result<Option<usize>> {
            match ctx.parameters.get(key).map(str::trim) {
                None | Some("-1") => Ok(None),
                Some(raw) => raw.parse::<usize>().map(Some).map_err(|_| {
                    ctx.error(format_args!(
                        "parameter '{}' value '{}' is not a valid length",
                        key, raw
                    ))
                }),
            }
        };
        let min_length = length("minLength")?.unwrap_or(0);
        let max_length = length("maxLength")?;
        if let Some(max) = max_length {
            if min_length > max {
                return Err(ctx.error(format_args!(
                    "minLength {} is greater than maxLength {}",
                    min_length, max
                )));
            }
        }
        let pattern = match ctx.parameters.get("patternMatch") {
            None => None,
            Some(raw) => Some(Regex::new(raw).map_err(|e| {
                ctx.error(format_args!("patternMatch '{}' is not a valid pattern: {}", raw, e))
            })?),
        };
        Ok(Box::new(Self {
            name: ctx.rule_name.to_string(),
            message: ctx.message_or_default(),
            parameters: ctx.parameters.clone(),
            min_length,
            max_length,
            pattern,
            pattern_message: ctx.parameters.get("patternMatchMessage").map(str::to_string),
        }))
    }

    /// Minimum length in characters.
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Maximum length in characters, if bounded.
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Message for values that do not match the pattern.
    pub fn pattern_message(&self) -> Option<&str> {
        self.pattern_message.as_deref()
    }
}

impl PropRule for StringRule {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn parameters(&self) -> &RuleParameters {
        &self.parameters
    }

    fn is_valid(&self, value: &RuleValue) -> bool {
        let text = match value {
            RuleValue::Null => return true,
            RuleValue::Text(text) => text,
            _ => return false,
        };
        let length = text.chars().count();
        if length < self.min_length || self.max_length.is_some_and(|max| length > max) {
            return false;
        }
        self.pattern.as_ref().map_or(true, |p| p.is_match(text))
    }
}

/// Identifier rule: the value must be a non-nil identifier.
#[derive(Debug)]
pub struct GuidRule {
    name: String,
    message: String,
    parameters: RuleParameters,
}

impl GuidRule {
    /// Registered kind.
    pub const KIND: &'static str = "guid";

    /// Build from a rule context. Takes no parameters.
    pub fn from_context(ctx: &RuleContext<'_>) -> Result<Box<dyn PropRule>> {
        ctx.ensure_parameters(&[])?;
        Ok(Box::new(Self {
            name: ctx.rule_name.to_string(),
            message: ctx.message_or_default(),
            parameters: ctx.parameters.clone(),
        }))
    }
}

impl PropRule for GuidRule {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn parameters(&self) -> &RuleParameters {
        &self.parameters
    }

    fn is_valid(&self, value: &RuleValue) -> bool {
        match value {
            RuleValue::Null => true,
            RuleValue::Guid(id) => !id.is_nil(),
            RuleValue::Text(text) => Uuid::parse_str(text).is_ok_and(|id| !id.is_nil()),
            _ => false,
        }
    }
}
