//! Superclass references.

use super::types::{ClassName, InheritanceStrategy};

/// Reference to a parent class plus the inheritance mapping strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuperClassDef {
    /// Qualified name of the parent class.
    pub class: ClassName,
    /// Inheritance mapping strategy.
    pub strategy: InheritanceStrategy,
    /// Linking id column (class table inheritance only).
    pub id: Option<String>,
    /// Discriminator column (single table inheritance only).
    pub discriminator: Option<String>,
}

impl SuperClassDef {
    /// Create a class table inheritance reference.
    pub fn new(class: ClassName) -> Self {
        Self {
            class,
            strategy: InheritanceStrategy::ClassTableInheritance,
            id: None,
            discriminator: None,
        }
    }

    /// Create a single table inheritance reference.
    pub fn single_table(class: ClassName, discriminator: impl Into<String>) -> Self {
        Self {
            class,
            strategy: InheritanceStrategy::SingleTableInheritance,
            id: None,
            discriminator: Some(discriminator.into()),
        }
    }

    /// Check the strategy-specific field rules.
    ///
    /// The linking id is only legal with class table inheritance; the
    /// discriminator is required with, and only with, single table
    /// inheritance.
    pub fn check_strategy_fields(&self) -> Result<(), String> {
        if self.id.is_some() && self.strategy != InheritanceStrategy::ClassTableInheritance {
            return Err(format!(
                "the 'id' attribute is only valid with ClassTableInheritance, but '{}' uses {:?}",
                self.class, self.strategy
            ));
        }
        match (self.strategy, &self.discriminator) {
            (InheritanceStrategy::SingleTableInheritance, None) => Err(format!(
                "SingleTableInheritance of '{}' requires a 'discriminator' attribute",
                self.class
            )),
            (InheritanceStrategy::SingleTableInheritance, Some(_)) | (_, None) => Ok(()),
            (strategy, Some(_)) => Err(format!(
                "the 'discriminator' attribute is only valid with SingleTableInheritance, but '{}' uses {:?}",
                self.class, strategy
            )),
        }
    }
}
