//! Standalone relationship validation.

use super::effective::EffectivePropertyCache;
use super::relationship::{check_resolution, check_reverse};
use crate::def::ClassDefCollection;
use crate::error::{DefinitionError, Result};
use tracing::debug;

/// Outcome of a validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether every check passed.
    pub valid: bool,
    /// The first failure, if any.
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Re-runs the relationship checks against an already built collection.
///
/// Superclass links must resolve inside the collection. Every relationship
/// must name an existing class, every relationship property must exist in
/// the effective property set of its side, and reverse relationships must
/// point back at each other with mirrored pairs, without both holding the
/// foreign key. Keys, ownership and primary keys are not touched.
pub struct ClassDefValidator<'a> {
    classes: &'a ClassDefCollection,
}

impl<'a> ClassDefValidator<'a> {
    pub fn new(classes: &'a ClassDefCollection) -> Self {
        Self { classes }
    }

    /// Run the checks, stopping at the first failure.
    pub fn check(&self) -> Result<()> {
        self.check_super_classes()?;
        let mut cache = EffectivePropertyCache::new(self.classes.len());
        let mut checked = 0usize;
        for class in self.classes.iter() {
            for relationship in &class.relationships {
                let related = check_resolution(self.classes, &mut cache, class.id, relationship)?;
                check_reverse(self.classes, class.id, related, relationship)?;
                checked += 1;
            }
        }
        debug!(relationships = checked, "Validated relationships");
        Ok(())
    }

    /// Every superclass link must land inside the collection, by handle or
    /// by name.
    fn check_super_classes(&self) -> Result<()> {
        for class in self.classes.iter() {
            if let Some(parent) = class.super_class_id {
                if self.classes.by_id(parent).is_none() {
                    return Err(DefinitionError::semantic(format!(
                        "the class '{}' refers to superclass handle {}, but the collection holds {} classes",
                        class.name,
                        parent.0,
                        self.classes.len()
                    )));
                }
                continue;
            }
            if let Some(super_class) = &class.super_class {
                if !self.classes.contains(&super_class.class) {
                    return Err(DefinitionError::semantic(format!(
                        "the class '{}' inherits from '{}', which is not defined",
                        class.name, super_class.class
                    )));
                }
            }
        }
        Ok(())
    }

    /// Run the checks and report the outcome as a value.
    pub fn validate(&self) -> ValidationResult {
        match self.check() {
            Ok(()) => ValidationResult::valid(),
            Err(e) => ValidationResult::invalid(e.message()),
        }
    }
}
