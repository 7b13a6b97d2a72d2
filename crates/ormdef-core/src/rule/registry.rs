//! Registry mapping rule kinds to rule factories.

use super::builtin::{DateRule, DecimalRule, GuidRule, IntegerRule, StringRule};
use super::{PropRule, RuleContext};
use crate::def::PropType;
use crate::error::{DefinitionError, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Builds a rule from its document context.
pub type RuleFactory = fn(&RuleContext<'_>) -> Result<Box<dyn PropRule>>;

/// Kind-to-factory registry, filled at start-up and read at load time.
#[derive(Clone)]
pub struct RuleRegistry {
    factories: BTreeMap<String, RuleFactory>,
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.kinds()).finish()
    }
}

impl RuleRegistry {
    /// Create a registry with no kinds.
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Create a registry holding the built-in kinds.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(IntegerRule::KIND, IntegerRule::from_context);
        registry.register(DecimalRule::KIND, DecimalRule::from_context);
        registry.register(DateRule::KIND, DateRule::from_context);
        registry.register(StringRule::KIND, StringRule::from_context);
        registry.register(GuidRule::KIND, GuidRule::from_context);
        registry
    }

    /// Register a factory under a kind, returning the one it replaces.
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        factory: RuleFactory,
    ) -> Option<RuleFactory> {
        self.factories.insert(kind.into(), factory)
    }

    /// Check if a kind is registered.
    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    /// Registered kinds in sorted order.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// The built-in kind used for a property type when the document names none.
    pub fn builtin_kind_for(prop_type: &PropType) -> Option<&'static str> {
        match prop_type {
            PropType::Int32 | PropType::Int64 => Some(IntegerRule::KIND),
            PropType::Decimal | PropType::Double => Some(DecimalRule::KIND),
            PropType::DateTime => Some(DateRule::KIND),
            PropType::String => Some(StringRule::KIND),
            PropType::Guid => Some(GuidRule::KIND),
            PropType::Boolean | PropType::ByteArray | PropType::Custom { .. } => None,
        }
    }

    /// Create a rule of the given kind.
    pub fn create(&self, kind: &str, ctx: &RuleContext<'_>) -> Result<Arc<dyn PropRule>> {
        let factory = self
            .factories
            .get(kind)
            .ok_or_else(|| DefinitionError::unknown_rule_kind(kind, self.kinds()))?;
        factory(ctx).map(Arc::from)
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
