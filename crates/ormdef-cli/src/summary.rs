//! Serializable summaries of loaded classes.

use ormdef_core::def::{KeyOwnership, NamedEnum};
use ormdef_core::{ClassDef, ClassDefCollection, PropDef, RelationshipDef};
use serde::Serialize;

/// What the checker reports about one class.
#[derive(Debug, Clone, Serialize)]
pub struct ClassSummary {
    pub name: String,
    pub table: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub super_class: Option<String>,
    pub primary_key: Vec<String>,
    pub object_id: bool,
    pub properties: Vec<PropertySummary>,
    /// Own plus inherited properties.
    pub effective_properties: usize,
    pub keys: Vec<KeySummary>,
    pub relationships: Vec<RelationshipSummary>,
    pub ui_defs: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertySummary {
    pub name: String,
    #[serde(rename = "type")]
    pub prop_type: String,
    pub compulsory: bool,
    pub read_write: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup_list: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeySummary {
    pub name: String,
    pub properties: Vec<String>,
    /// Members no class declares.
    pub synthesized: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RelationshipSummary {
    pub name: String,
    pub related_class: String,
    pub multiple: bool,
    pub ownership: &'static str,
    pub pairs: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse: Option<String>,
    pub delete_action: &'static str,
}

impl ClassSummary {
    pub fn new(classes: &ClassDefCollection, class: &ClassDef) -> Self {
        let primary_key = classes.primary_key_of(class.id);
        Self {
            name: class.name.to_string(),
            table: class.table_name_or_default().to_string(),
            super_class: class.super_class.as_ref().map(|s| s.class.to_string()),
            primary_key: primary_key
                .map(|pk| pk.prop_names().into_iter().map(String::from).collect())
                .unwrap_or_default(),
            object_id: primary_key.map(|pk| pk.is_object_id).unwrap_or(false),
            properties: class.props.iter().map(PropertySummary::new).collect(),
            effective_properties: classes.effective_properties(class.id).len(),
            keys: class
                .keys
                .iter()
                .map(|key| KeySummary {
                    name: key.name.clone(),
                    properties: key.prop_names().into_iter().map(String::from).collect(),
                    synthesized: key
                        .members
                        .iter()
                        .filter(|m| m.is_synthesized())
                        .map(|m| m.name.clone())
                        .collect(),
                })
                .collect(),
            relationships: class
                .relationships
                .iter()
                .map(RelationshipSummary::new)
                .collect(),
            ui_defs: class.ui_defs.iter().map(|ui| ui.name.clone()).collect(),
        }
    }
}

impl PropertySummary {
    fn new(prop: &PropDef) -> Self {
        Self {
            name: prop.name.clone(),
            prop_type: prop.prop_type.to_string(),
            compulsory: prop.compulsory,
            read_write: prop.read_write_rule.name(),
            rule: prop.rule.as_ref().map(|r| r.kind().to_string()),
            lookup_list: prop.lookup_list.as_ref().map(|l| l.kind_name()),
        }
    }
}

impl RelationshipSummary {
    fn new(relationship: &RelationshipDef) -> Self {
        Self {
            name: relationship.name.clone(),
            related_class: relationship.related_class.to_string(),
            multiple: relationship.is_multiple(),
            ownership: ownership_name(relationship.ownership),
            pairs: relationship
                .rel_key
                .iter()
                .map(|p| (p.own_prop.clone(), p.related_prop.clone()))
                .collect(),
            reverse: relationship.reverse_name.clone(),
            delete_action: relationship.delete_action.name(),
        }
    }
}

fn ownership_name(ownership: KeyOwnership) -> &'static str {
    match ownership {
        KeyOwnership::ForeignKey => "foreign key",
        KeyOwnership::PrimaryKey => "primary key",
        KeyOwnership::Related => "related",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ormdef_core::load_class_defs;

    const DOC: &str = r#"<classes>
      <class name="Invoice" assembly="Shop">
        <property name="InvoiceID" type="Guid" />
        <property name="CustomerID" type="Guid" />
        <property name="Number" compulsory="true" />
        <primaryKey><prop name="InvoiceID" /></primaryKey>
        <key><prop name="Number" /></key>
        <relationship name="Customer" type="single" relatedClass="Customer" reverseRelationship="Invoices">
          <relatedProperty property="CustomerID" relatedProperty="CustomerID" />
        </relationship>
      </class>
      <class name="Customer" assembly="Shop">
        <property name="CustomerID" type="Guid" />
        <primaryKey><prop name="CustomerID" /></primaryKey>
        <relationship name="Invoices" type="multiple" relatedClass="Invoice" reverseRelationship="Customer">
          <relatedProperty property="CustomerID" relatedProperty="CustomerID" />
        </relationship>
      </class>
    </classes>"#;

    #[test]
    fn test_summary_of_loaded_class() {
        let classes = load_class_defs(DOC).unwrap();
        let invoice = classes.find("Shop", "Invoice").unwrap();
        let summary = ClassSummary::new(&classes, invoice);

        assert_eq!(summary.name, "Shop.Invoice");
        assert_eq!(summary.primary_key, vec!["InvoiceID".to_string()]);
        assert!(summary.object_id);
        assert_eq!(summary.properties.len(), 3);
        assert_eq!(summary.effective_properties, 3);
        assert_eq!(summary.keys[0].properties, vec!["Number".to_string()]);
        assert!(summary.keys[0].synthesized.is_empty());

        let customer = &summary.relationships[0];
        assert_eq!(customer.related_class, "Shop.Customer");
        assert!(!customer.multiple);
        assert_eq!(customer.ownership, "foreign key");
        assert_eq!(customer.reverse.as_deref(), Some("Invoices"));
    }
}
