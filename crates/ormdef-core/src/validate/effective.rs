//! Effective property resolution.
//!
//! The effective property set of a class is its own properties plus every
//! property of its superclass chain that it does not redeclare. Results are
//! memoized in an [`EffectivePropertyCache`] that lives for one pass over
//! one collection and is indexed by [`ClassId`].

use crate::def::{ClassDefCollection, ClassId, ClassName, PropDefCollection, PropRef};
use std::collections::HashMap;
use std::rc::Rc;

/// Read access to a set of classes linked by handle.
///
/// Implemented by the phase-1 arena in the post-load pipeline and by
/// [`ClassDefCollection`], so resolution code runs against either.
pub trait ClassGraph {
    /// Number of classes.
    fn class_count(&self) -> usize;

    /// Qualified name of a class.
    fn class_name(&self, id: ClassId) -> &ClassName;

    /// Handle of a class by qualified name.
    fn class_id(&self, name: &ClassName) -> Option<ClassId>;

    /// Handle of the parent class, if any.
    fn super_class_id(&self, id: ClassId) -> Option<ClassId>;

    /// Properties declared by the class itself.
    fn own_props(&self, id: ClassId) -> &PropDefCollection;
}

/// The resolved property set of one class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectiveProperties {
    entries: Vec<(String, PropRef)>,
    index: HashMap<String, usize>,
}

impl EffectiveProperties {
    fn push(&mut self, name: &str, prop_ref: PropRef) {
        if self.index.contains_key(name) {
            return;
        }
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push((name.to_string(), prop_ref));
    }

    /// Get the property a name resolves to.
    pub fn get(&self, name: &str) -> Option<PropRef> {
        self.index.get(name).map(|&i| self.entries[i].1)
    }

    /// Check if a name resolves.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Property names, own properties first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Iterate over names and the properties they resolve to.
    pub fn iter(&self) -> impl Iterator<Item = (&str, PropRef)> {
        self.entries.iter().map(|(name, r)| (name.as_str(), *r))
    }

    /// Number of resolvable names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no name resolves.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Pass-scoped memo of effective property sets.
#[derive(Debug, Default)]
pub struct EffectivePropertyCache {
    slots: Vec<Option<Rc<EffectiveProperties>>>,
}

impl EffectivePropertyCache {
    /// Create a cache for a graph of `class_count` classes.
    pub fn new(class_count: usize) -> Self {
        Self {
            slots: vec![None; class_count],
        }
    }

    /// Number of classes resolved so far.
    pub fn resolved(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Resolve every class of the graph.
    pub fn resolve_all<G: ClassGraph + ?Sized>(&mut self, graph: &G) {
        for index in 0..graph.class_count() {
            self.get(graph, ClassId(index));
        }
    }

    /// The effective property set of a class, computing and memoizing it
    /// and every unresolved ancestor on first use.
    pub fn get<G: ClassGraph + ?Sized>(
        &mut self,
        graph: &G,
        id: ClassId,
    ) -> Rc<EffectiveProperties> {
        if self.slots.len() < graph.class_count() {
            self.slots.resize(graph.class_count(), None);
        }
        if id.0 >= graph.class_count() {
            return Rc::new(EffectiveProperties::default());
        }
        if let Some(Some(cached)) = self.slots.get(id.0) {
            return Rc::clone(cached);
        }

        // Collect the unresolved part of the chain, nearest first.
        let mut pending = vec![id];
        let mut current = graph.super_class_id(id);
        while let Some(parent) = current {
            let unresolved = matches!(self.slots.get(parent.0), Some(None));
            if !unresolved || pending.contains(&parent) {
                break;
            }
            pending.push(parent);
            current = graph.super_class_id(parent);
        }

        let mut result = Rc::new(EffectiveProperties::default());
        for &class in pending.iter().rev() {
            let mut props = EffectiveProperties::default();
            for (prop_id, prop) in graph.own_props(class).iter_with_ids() {
                props.push(&prop.name, PropRef::new(class, prop_id));
            }
            let inherited = graph
                .super_class_id(class)
                .and_then(|parent| self.slots.get(parent.0).cloned().flatten());
            if let Some(inherited) = inherited {
                for (name, prop_ref) in inherited.iter() {
                    props.push(name, prop_ref);
                }
            }
            result = Rc::new(props);
            self.slots[class.0] = Some(Rc::clone(&result));
        }
        result
    }
}

impl ClassGraph for ClassDefCollection {
    fn class_count(&self) -> usize {
        self.len()
    }

    fn class_name(&self, id: ClassId) -> &ClassName {
        &self.class(id).name
    }

    fn class_id(&self, name: &ClassName) -> Option<ClassId> {
        self.id_of(name)
    }

    fn super_class_id(&self, id: ClassId) -> Option<ClassId> {
        self.parent_of(id)
    }

    fn own_props(&self, id: ClassId) -> &PropDefCollection {
        &self.class(id).props
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::{PropDef, PropId, PropType};

    struct Graph {
        names: Vec<ClassName>,
        parents: Vec<Option<ClassId>>,
        props: Vec<PropDefCollection>,
    }

    impl Graph {
        fn new() -> Self {
            Self {
                names: Vec::new(),
                parents: Vec::new(),
                props: Vec::new(),
            }
        }

        fn class(mut self, name: &str, parent: Option<usize>, props: &[&str]) -> Self {
            let mut collection = PropDefCollection::new();
            for prop in props {
                collection.add(PropDef::new(*prop, PropType::String)).unwrap();
            }
            self.names.push(ClassName::new("Test", name));
            self.parents.push(parent.map(ClassId));
            self.props.push(collection);
            self
        }
    }

    impl ClassGraph for Graph {
        fn class_count(&self) -> usize {
            self.names.len()
        }

        fn class_name(&self, id: ClassId) -> &ClassName {
            &self.names[id.0]
        }

        fn class_id(&self, name: &ClassName) -> Option<ClassId> {
            self.names.iter().position(|n| n == name).map(ClassId)
        }

        fn super_class_id(&self, id: ClassId) -> Option<ClassId> {
            self.parents[id.0]
        }

        fn own_props(&self, id: ClassId) -> &PropDefCollection {
            &self.props[id.0]
        }
    }

    fn chain() -> Graph {
        Graph::new()
            .class("Leaf", Some(1), &["Code", "Extra"])
            .class("Middle", Some(2), &["Code", "Name"])
            .class("Root", None, &["ID", "Name"])
    }

    #[test]
    fn test_own_properties_shadow_inherited() {
        let graph = chain();
        let mut cache = EffectivePropertyCache::new(graph.class_count());

        let leaf = cache.get(&graph, ClassId(0));
        let names: Vec<_> = leaf.names().collect();
        assert_eq!(names, vec!["Code", "Extra", "Name", "ID"]);
        assert_eq!(leaf.get("Code"), Some(PropRef::new(ClassId(0), PropId(0))));
        assert_eq!(leaf.get("Name"), Some(PropRef::new(ClassId(1), PropId(1))));
        assert_eq!(leaf.get("ID"), Some(PropRef::new(ClassId(2), PropId(0))));
        assert_eq!(cache.resolved(), 3);
    }

    #[test]
    fn test_resolution_is_order_independent() {
        let graph = chain();

        let mut top_down = EffectivePropertyCache::new(3);
        top_down.get(&graph, ClassId(2));
        top_down.get(&graph, ClassId(1));
        let a = top_down.get(&graph, ClassId(0));

        let mut bottom_up = EffectivePropertyCache::new(3);
        let b = bottom_up.get(&graph, ClassId(0));
        let again = bottom_up.get(&graph, ClassId(0));

        assert_eq!(*a, *b);
        assert!(Rc::ptr_eq(&b, &again));
    }

    #[test]
    fn test_effective_equals_own_plus_parent_effective() {
        let graph = chain();
        let mut cache = EffectivePropertyCache::new(3);
        cache.resolve_all(&graph);

        for index in 0..graph.class_count() {
            let id = ClassId(index);
            let effective = cache.get(&graph, id);
            let mut expected: Vec<String> =
                graph.own_props(id).iter().map(|p| p.name.clone()).collect();
            if let Some(parent) = graph.super_class_id(id) {
                for name in cache.get(&graph, parent).names() {
                    if !expected.iter().any(|n| n == name) {
                        expected.push(name.to_string());
                    }
                }
            }
            let actual: Vec<String> = effective.names().map(str::to_string).collect();
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_cycle_terminates() {
        let graph = Graph::new()
            .class("A", Some(1), &["X"])
            .class("B", Some(0), &["Y"]);
        let mut cache = EffectivePropertyCache::new(2);

        let a = cache.get(&graph, ClassId(0));
        assert!(a.contains("X"));
        assert!(a.contains("Y"));
    }

    #[test]
    fn test_parent_outside_graph_is_skipped() {
        let graph = Graph::new().class("Lost", Some(5), &["X"]);
        let mut cache = EffectivePropertyCache::new(1);

        let lost = cache.get(&graph, ClassId(0));
        assert_eq!(lost.names().collect::<Vec<_>>(), vec!["X"]);
        assert!(cache.get(&graph, ClassId(3)).is_empty());
    }
}
