//! Lookup list definitions attached to properties.

use super::types::ClassName;

/// Default timeout for lookup lists that query a data source.
pub const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 10_000;

/// One display/value entry of a simple lookup list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupItem {
    /// Text shown to the user.
    pub display: String,
    /// Stored value.
    pub value: String,
}

impl LookupItem {
    /// Create an item.
    pub fn new(display: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            value: value.into(),
        }
    }
}

/// A source of allowed values for a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupListDef {
    /// Fixed items written in the document.
    Simple {
        /// Items in declaration order.
        items: Vec<LookupItem>,
    },
    /// Items produced by a database query.
    Database {
        /// Query returning value/display rows.
        sql: String,
        /// Cache timeout in milliseconds.
        timeout_ms: u64,
        /// Whether values outside the list are rejected.
        limit_to_list: bool,
        /// Class whose objects the values identify.
        class: Option<ClassName>,
    },
    /// Items produced by loading objects of a class.
    BusinessObject {
        /// Class whose objects make up the list.
        class: ClassName,
        /// Filter criteria.
        criteria: Option<String>,
        /// Sort clause.
        sort: Option<String>,
        /// Cache timeout in milliseconds.
        timeout_ms: u64,
        /// Whether values outside the list are rejected.
        limit_to_list: bool,
    },
}

impl LookupListDef {
    /// Short kind name used in summaries.
    pub fn kind_name(&self) -> &'static str {
        match self {
            LookupListDef::Simple { .. } => "simple",
            LookupListDef::Database { .. } => "database",
            LookupListDef::BusinessObject { .. } => "businessObject",
        }
    }
}
