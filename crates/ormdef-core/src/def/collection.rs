//! The class definition registry.

use super::class::ClassDef;
use super::key::PrimaryKeyDef;
use super::prop::{PropDef, PropId};
use super::relationship::RelationshipDef;
use super::types::ClassName;
use crate::error::{DefinitionError, Result};
use crate::validate::{EffectiveProperties, EffectivePropertyCache};
use std::collections::HashMap;
use std::rc::Rc;

/// Stable handle of a class within one [`ClassDefCollection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub usize);

/// Non-owning reference to a property of some class in the same collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropRef {
    /// Class declaring the property.
    pub class: ClassId,
    /// Property within that class.
    pub prop: PropId,
}

impl PropRef {
    /// Create a property reference.
    pub fn new(class: ClassId, prop: PropId) -> Self {
        Self { class, prop }
    }
}

/// Registry of the class definitions loaded from one document.
///
/// Lookups go by qualified name; iteration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct ClassDefCollection {
    classes: Vec<ClassDef>,
    by_name: HashMap<ClassName, ClassId>,
}

impl ClassDefCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class, assigning it the next handle.
    pub fn insert(&mut self, mut class: ClassDef) -> Result<ClassId> {
        if self.by_name.contains_key(&class.name) {
            return Err(DefinitionError::semantic(format!(
                "the class '{}' is defined more than once",
                class.name
            )));
        }
        let id = ClassId(self.classes.len());
        class.id = id;
        self.by_name.insert(class.name.clone(), id);
        self.classes.push(class);
        Ok(id)
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Iterate over classes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ClassDef> {
        self.classes.iter()
    }

    /// Iterate over class handles in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = ClassId> {
        (0..self.classes.len()).map(ClassId)
    }

    /// Get a class by qualified name.
    pub fn get(&self, name: &ClassName) -> Option<&ClassDef> {
        self.id_of(name).map(|id| &self.classes[id.0])
    }

    /// Get a class handle by qualified name.
    pub fn id_of(&self, name: &ClassName) -> Option<ClassId> {
        self.by_name.get(name).copied()
    }

    /// Get a class by module and class name.
    pub fn find(&self, assembly: &str, class_name: &str) -> Option<&ClassDef> {
        self.get(&ClassName::new(assembly, class_name))
    }

    /// Get a class by its unqualified name, if exactly one module declares it.
    pub fn find_by_class_name(&self, class_name: &str) -> Option<&ClassDef> {
        let mut matches = self
            .classes
            .iter()
            .filter(|c| c.name.class_name == class_name);
        match (matches.next(), matches.next()) {
            (Some(class), None) => Some(class),
            _ => None,
        }
    }

    /// Check if a class with this name exists.
    pub fn contains(&self, name: &ClassName) -> bool {
        self.by_name.contains_key(name)
    }

    /// Get a class by handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not come from this collection.
    pub fn class(&self, id: ClassId) -> &ClassDef {
        &self.classes[id.0]
    }

    /// Get a class by handle, if it exists.
    pub fn by_id(&self, id: ClassId) -> Option<&ClassDef> {
        self.classes.get(id.0)
    }

    /// Get a mutable class by handle, if it exists.
    pub fn by_id_mut(&mut self, id: ClassId) -> Option<&mut ClassDef> {
        self.classes.get_mut(id.0)
    }

    /// Get a referenced property.
    pub fn prop(&self, prop_ref: PropRef) -> Option<&PropDef> {
        self.classes
            .get(prop_ref.class.0)
            .and_then(|c| c.props.by_id(prop_ref.prop))
    }

    /// Get a mutable referenced property.
    pub fn prop_mut(&mut self, prop_ref: PropRef) -> Option<&mut PropDef> {
        self.classes
            .get_mut(prop_ref.class.0)
            .and_then(|c| c.props.by_id_mut(prop_ref.prop))
    }

    /// Handle of the parent class.
    ///
    /// A `super_class_id` outside this collection is ignored. Falls back to a
    /// lookup by name for classes assembled by hand without a valid handle.
    pub fn parent_of(&self, id: ClassId) -> Option<ClassId> {
        let class = self.by_id(id)?;
        let handle = class.super_class_id.filter(|parent| parent.0 < self.len());
        handle.or_else(|| {
            class
                .super_class
                .as_ref()
                .and_then(|s| self.id_of(&s.class))
        })
    }

    /// Ancestors of a class, nearest first.
    ///
    /// Stops at a missing handle or a repeated class, so a malformed
    /// collection never loops.
    pub fn super_class_chain(&self, id: ClassId) -> Vec<ClassId> {
        let mut chain = Vec::new();
        let mut current = self.parent_of(id);
        while let Some(parent) = current {
            if parent == id || chain.contains(&parent) {
                break;
            }
            chain.push(parent);
            current = self.parent_of(parent);
        }
        chain
    }

    /// The primary key of a class, walking up the chain when inherited.
    pub fn primary_key_of(&self, id: ClassId) -> Option<&PrimaryKeyDef> {
        std::iter::once(id)
            .chain(self.super_class_chain(id))
            .filter_map(|c| self.by_id(c))
            .find_map(|c| c.primary_key.as_ref())
    }

    /// Find a relationship declared on a class or one of its ancestors.
    pub fn find_relationship(
        &self,
        id: ClassId,
        name: &str,
    ) -> Option<(ClassId, &RelationshipDef)> {
        std::iter::once(id)
            .chain(self.super_class_chain(id))
            .filter_map(|c| self.by_id(c))
            .find_map(|c| c.relationship(name).map(|r| (c.id, r)))
    }

    /// The effective property set of a class: its own properties plus every
    /// inherited property it does not redeclare.
    pub fn effective_properties(&self, id: ClassId) -> Rc<EffectiveProperties> {
        EffectivePropertyCache::new(self.len()).get(self, id)
    }
}
