//! Class loader.

use super::key::{load_key, load_primary_key};
use super::property::load_property;
use super::reader::{parse_document, Element};
use super::relationship::load_relationship;
use super::super_class::load_super_class;
use super::ui::load_ui;
use super::LoadContext;
use crate::def::{
    ClassName, PropDefCollection, RawClassDef, RawKeyDef, RawRelationshipDef, UiDefCollection,
};
use crate::error::Result;
use crate::factory::DefClassFactory;
use crate::rule::RuleRegistry;
use tracing::debug;

const CHILD_TAGS: &[&str] = &[
    "superClass",
    "property",
    "key",
    "primaryKey",
    "relationship",
    "ui",
];

/// Loads one `class` element into a [`RawClassDef`].
pub struct ClassLoader<'a> {
    factory: &'a dyn DefClassFactory,
    rules: &'a RuleRegistry,
}

impl<'a> ClassLoader<'a> {
    /// Create a class loader.
    pub fn new(factory: &'a dyn DefClassFactory, rules: &'a RuleRegistry) -> Self {
        Self { factory, rules }
    }

    /// Load a document whose root element is a single `class`.
    pub fn load_xml(&self, xml: &str) -> Result<RawClassDef> {
        let document = parse_document(xml)?;
        self.load(Element::root(&document))
    }

    /// Load a `class` element.
    pub fn load(&self, el: Element<'_, '_>) -> Result<RawClassDef> {
        el.expect_tag("class")?;
        let name = el.required_attr("name")?;
        let assembly = el.required_attr("assembly")?;
        let class_name = ClassName::new(assembly, name);
        let ctx = LoadContext {
            factory: self.factory,
            rules: self.rules,
            assembly,
        };
        self.load_body(el, &ctx, class_name.clone())
            .map_err(|e| e.in_class(&class_name.to_string()))
    }

    fn load_body(
        &self,
        el: Element<'_, '_>,
        ctx: &LoadContext<'_>,
        class_name: ClassName,
    ) -> Result<RawClassDef> {
        el.ensure_children(CHILD_TAGS)?;
        let children_of = |tag: &'static str| el.children().filter(move |c| c.tag() == tag);

        let super_class_el = single(el, children_of("superClass"), "superClass")?;
        let primary_key_el = single(el, children_of("primaryKey"), "primaryKey")?;

        let mut props = PropDefCollection::new();
        for child in children_of("property") {
            let prop = load_property(child, ctx)?;
            let prop_name = prop.name.clone();
            props.add(prop).map_err(|_| {
                child.error(format_args!(
                    "the property '{}' is declared more than once",
                    prop_name
                ))
            })?;
        }
        if props.is_empty() && super_class_el.is_none() {
            return Err(el.error(
                "a class needs at least one <property> unless it has a <superClass>",
            ));
        }

        let super_class = match super_class_el {
            Some(child) => Some(load_super_class(child, ctx)?),
            None => None,
        };

        let mut keys: Vec<RawKeyDef> = Vec::new();
        for child in children_of("key") {
            let key = load_key(child, ctx)?;
            if keys.iter().any(|k| k.name == key.name) {
                return Err(child.error(format_args!(
                    "the key '{}' is declared more than once",
                    key.name
                )));
            }
            keys.push(key);
        }

        let primary_key = match primary_key_el {
            Some(child) => Some(load_primary_key(child, ctx)?),
            None if super_class.is_some() => None,
            None => {
                return Err(el.error(
                    "a class needs a <primaryKey> unless it inherits one through <superClass>",
                ))
            }
        };

        let mut relationships: Vec<RawRelationshipDef> = Vec::new();
        for child in children_of("relationship") {
            let relationship = load_relationship(child, ctx)?;
            if relationships.iter().any(|r| r.name == relationship.name) {
                return Err(child.error(format_args!(
                    "the relationship '{}' is declared more than once",
                    relationship.name
                )));
            }
            relationships.push(relationship);
        }

        let mut ui_defs = UiDefCollection::new();
        for child in children_of("ui") {
            if let Err(duplicate) = ui_defs.add(load_ui(child, ctx)?) {
                return Err(child.error(format_args!(
                    "the ui definition '{}' is declared more than once",
                    duplicate.name
                )));
            }
        }

        debug!(
            class = %class_name,
            properties = props.len(),
            keys = keys.len(),
            relationships = relationships.len(),
            "Loaded class"
        );

        Ok(self.factory.create_class_def(
            class_name,
            el.string_attr("table"),
            el.string_attr("displayName"),
            el.string_attr("typeParameter"),
            props,
            keys,
            primary_key,
            relationships,
            super_class,
            ui_defs,
        ))
    }
}

/// The only element of an iterator, failing if there are several.
fn single<'a, 'input>(
    parent: Element<'a, 'input>,
    mut matches: impl Iterator<Item = Element<'a, 'input>>,
    tag: &str,
) -> Result<Option<Element<'a, 'input>>> {
    let first = matches.next();
    match matches.next() {
        Some(extra) => Err(extra.error(format_args!(
            "<{}> takes at most one <{}>",
            parent.tag(),
            tag
        ))),
        None => Ok(first),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::{DeleteAction, PropType, RelationshipKind};
    use crate::factory::DefaultDefClassFactory;

    fn load(xml: &str) -> Result<RawClassDef> {
        let rules = RuleRegistry::with_builtins();
        ClassLoader::new(&DefaultDefClassFactory, &rules).load_xml(xml)
    }

    #[test]
    fn test_load_class() {
        let class = load(
            r#"<class name="Invoice" assembly="Shop" table="tbInvoice">
                 <property name="InvoiceID" type="Guid" />
                 <property name="Number" length="20" compulsory="true">
                   <rule name="NumberFormat">
                     <add key="patternMatch" value="^INV-[0-9]+$" />
                   </rule>
                 </property>
                 <property name="CustomerID" type="Guid" />
                 <key name="ByNumber"><prop name="Number" /></key>
                 <primaryKey><prop name="InvoiceID" /></primaryKey>
                 <relationship name="Customer" type="single" relatedClass="Customer">
                   <relatedProperty property="CustomerID" relatedProperty="CustomerID" />
                 </relationship>
               </class>"#,
        )
        .unwrap();

        assert_eq!(class.name, ClassName::new("Shop", "Invoice"));
        assert_eq!(class.table_name.as_deref(), Some("tbInvoice"));
        assert_eq!(class.props.len(), 3);
        let number = class.props.get("Number").unwrap();
        assert_eq!(number.prop_type, PropType::String);
        assert_eq!(number.length, Some(20));
        assert_eq!(number.rule.as_ref().unwrap().kind(), "string");
        assert_eq!(class.keys[0].prop_names, vec!["Number"]);
        assert!(class.primary_key.as_ref().unwrap().is_object_id);

        let relationship = &class.relationships[0];
        assert_eq!(relationship.kind, RelationshipKind::Single);
        assert_eq!(relationship.related_class, ClassName::new("Shop", "Customer"));
        assert_eq!(relationship.delete_action, DeleteAction::DereferenceRelated);
    }

    #[test]
    fn test_name_and_assembly_required() {
        let err = load(r#"<class assembly="Shop"><property name="A" /></class>"#).unwrap_err();
        assert!(err.message().contains("'name'"));

        let err = load(r#"<class name="A"><property name="A" /></class>"#).unwrap_err();
        assert!(err.message().contains("'assembly'"));
    }

    #[test]
    fn test_errors_name_the_class() {
        let err = load(
            r#"<class name="Invoice" assembly="Shop">
                 <property name="InvoiceID" type="Guid" readWriteRule="readwrite" />
                 <primaryKey><prop name="InvoiceID" /></primaryKey>
               </class>"#,
        )
        .unwrap_err();
        assert!(err.is_structural());
        let message = err.message();
        assert!(message.starts_with("in class 'Shop.Invoice': <property> at 2:"));
        assert!(message.contains("ReadWrite, ReadOnly, WriteOnly, WriteOnce, ReadManyWriteNew"));
    }

    #[test]
    fn test_unknown_child_rejected() {
        let err = load(
            r#"<class name="A" assembly="Shop">
                 <property name="ID" type="Guid" />
                 <primaryKey><prop name="ID" /></primaryKey>
                 <index name="X" />
               </class>"#,
        )
        .unwrap_err();
        assert!(err.message().contains("<index>"));
        assert!(err.message().contains("valid elements are: superClass, property"));
    }

    #[test]
    fn test_primary_key_optional_only_with_super_class() {
        let err = load(r#"<class name="A" assembly="Shop"><property name="ID" /></class>"#)
            .unwrap_err();
        assert!(err.message().contains("<primaryKey>"));

        let class = load(
            r#"<class name="B" assembly="Shop"><superClass class="A" /></class>"#,
        )
        .unwrap();
        assert!(class.primary_key.is_none());
        assert!(class.props.is_empty());
        assert_eq!(
            class.super_class.unwrap().class,
            ClassName::new("Shop", "A")
        );
    }

    #[test]
    fn test_duplicate_property_rejected() {
        let err = load(
            r#"<class name="A" assembly="Shop">
                 <property name="ID" type="Guid" />
                 <property name="ID" />
                 <primaryKey><prop name="ID" /></primaryKey>
               </class>"#,
        )
        .unwrap_err();
        assert!(err.message().contains("'ID' is declared more than once"));
    }
}
