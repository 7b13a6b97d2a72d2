//! Class collection loader.

use super::class::ClassLoader;
use super::reader::{parse_document, Element};
use crate::config::LoaderConfig;
use crate::def::{ClassDefCollection, RawClassDef};
use crate::error::Result;
use crate::factory::{DefClassFactory, DefaultDefClassFactory};
use crate::rule::{RuleFactory, RuleRegistry};
use std::collections::HashSet;
use tracing::info;

/// Loads a `classes` document into a validated [`ClassDefCollection`].
///
/// Loading runs in two phases. Every `class` element is first parsed on its
/// own; then the post-load pipeline resolves inheritance, binds keys and
/// relationships and checks the cross-class invariants. The first error
/// aborts the load.
pub struct ClassDefsLoader<'f> {
    factory: &'f dyn DefClassFactory,
    rules: RuleRegistry,
    config: LoaderConfig,
}

impl Default for ClassDefsLoader<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassDefsLoader<'static> {
    /// Create a loader with the default factory, the built-in rule kinds and
    /// the default configuration.
    pub fn new() -> Self {
        Self {
            factory: &DefaultDefClassFactory,
            rules: RuleRegistry::with_builtins(),
            config: LoaderConfig::default(),
        }
    }
}

impl<'f> ClassDefsLoader<'f> {
    /// Use a custom definition factory.
    pub fn with_factory<'g>(self, factory: &'g dyn DefClassFactory) -> ClassDefsLoader<'g> {
        ClassDefsLoader {
            factory,
            rules: self.rules,
            config: self.config,
        }
    }

    /// Replace the rule registry.
    pub fn with_rules(mut self, rules: RuleRegistry) -> Self {
        self.rules = rules;
        self
    }

    /// Register an additional rule kind.
    pub fn with_rule_kind(mut self, kind: impl Into<String>, factory: RuleFactory) -> Self {
        self.rules.register(kind, factory);
        self
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: LoaderConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// The active rule registry.
    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    /// Run phase 1 only: parse every class without cross-class checks.
    pub fn load_raw(&self, xml: &str) -> Result<Vec<RawClassDef>> {
        let document = parse_document(xml)?;
        let root = Element::root(&document);
        root.expect_tag("classes")?;
        root.ensure_children(&["class"])?;

        let loader = ClassLoader::new(self.factory, &self.rules);
        let mut seen = HashSet::new();
        let mut raws = Vec::new();
        for el in root.children() {
            let raw = loader.load(el)?;
            if !seen.insert(raw.name.clone()) {
                return Err(el.error(format_args!(
                    "the class '{}' is defined more than once",
                    raw.name
                )));
            }
            raws.push(raw);
        }
        Ok(raws)
    }

    /// Load and validate a document.
    pub fn load(&self, xml: &str) -> Result<ClassDefCollection> {
        let raws = self.load_raw(xml)?;
        info!(classes = raws.len(), "Parsed class definitions");

        let classes = ClassDefCollection::from_raw(raws, &self.config)?;
        let relationships: usize = classes.iter().map(|c| c.relationships.len()).sum();
        info!(
            classes = classes.len(),
            relationships,
            "Loaded class definitions"
        );
        Ok(classes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_must_be_classes() {
        let err = ClassDefsLoader::new().load("<class />").unwrap_err();
        assert!(err.is_structural());
        assert!(err.message().contains("expected a <classes> element"));
    }

    #[test]
    fn test_empty_document_loads() {
        let classes = ClassDefsLoader::new().load("<classes />").unwrap();
        assert!(classes.is_empty());
    }

    #[test]
    fn test_duplicate_class_is_structural() {
        let xml = r#"<classes>
            <class name="A" assembly="Shop">
              <property name="ID" type="Guid" /><primaryKey><prop name="ID" /></primaryKey>
            </class>
            <class name="A" assembly="Shop">
              <property name="ID" type="Guid" /><primaryKey><prop name="ID" /></primaryKey>
            </class>
          </classes>"#;
        let err = ClassDefsLoader::new().load_raw(xml).unwrap_err();
        assert!(err.is_structural());
        assert!(err.message().contains("'Shop.A' is defined more than once"));
    }
}
