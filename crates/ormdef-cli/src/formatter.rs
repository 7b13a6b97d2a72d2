//! Output formatters for load results.

use crate::summary::ClassSummary;
use clap::ValueEnum;
use comfy_table::Table;

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format
    Table,
    /// JSON format
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Trait for formatting output.
pub trait Formatter {
    /// Format the loaded classes.
    fn format_classes(&self, classes: &[ClassSummary]) -> String;

    /// Format an error message.
    fn format_error(&self, error: &str) -> String;
}

/// Create a formatter for the given output format.
pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// Table formatter using comfy-table.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_classes(&self, classes: &[ClassSummary]) -> String {
        if classes.is_empty() {
            return "No classes".to_string();
        }
        if let [class] = classes {
            return format_class_detail(class);
        }

        let mut table = Table::new();
        table.set_header(vec![
            "Class",
            "Table",
            "Super Class",
            "Primary Key",
            "Properties",
            "Relationships",
        ]);
        for class in classes {
            table.add_row(vec![
                class.name.clone(),
                class.table.clone(),
                class.super_class.clone().unwrap_or_default(),
                class.primary_key.join(", "),
                format!("{} ({})", class.properties.len(), class.effective_properties),
                class.relationships.len().to_string(),
            ]);
        }
        format!("{}\n{} class(es) loaded", table, classes.len())
    }

    fn format_error(&self, error: &str) -> String {
        format!("Error: {}", error)
    }
}

/// Describe one class with a table per section.
fn format_class_detail(class: &ClassSummary) -> String {
    let mut output = format!("Class {} (table {})", class.name, class.table);
    if let Some(super_class) = &class.super_class {
        output.push_str(&format!(", inherits from {}", super_class));
    }
    if !class.primary_key.is_empty() {
        let kind = if class.object_id { "object id" } else { "composite" };
        output.push_str(&format!(
            "\nPrimary key ({}): {}",
            kind,
            class.primary_key.join(", ")
        ));
    }

    let mut props = Table::new();
    props.set_header(vec!["Property", "Type", "Compulsory", "Read/Write", "Rule"]);
    for prop in &class.properties {
        props.add_row(vec![
            prop.name.clone(),
            prop.prop_type.clone(),
            prop.compulsory.to_string(),
            prop.read_write.to_string(),
            prop.rule.clone().unwrap_or_default(),
        ]);
    }
    output.push_str(&format!("\n\n{}", props));

    if !class.keys.is_empty() {
        let mut keys = Table::new();
        keys.set_header(vec!["Key", "Properties", "Synthesized"]);
        for key in &class.keys {
            keys.add_row(vec![
                key.name.clone(),
                key.properties.join(", "),
                key.synthesized.join(", "),
            ]);
        }
        output.push_str(&format!("\n\n{}", keys));
    }

    if !class.relationships.is_empty() {
        let mut rels = Table::new();
        rels.set_header(vec!["Relationship", "Related Class", "Kind", "Key", "Pairs", "Reverse"]);
        for rel in &class.relationships {
            let pairs: Vec<String> = rel
                .pairs
                .iter()
                .map(|(own, related)| format!("{} -> {}", own, related))
                .collect();
            rels.add_row(vec![
                rel.name.clone(),
                rel.related_class.clone(),
                if rel.multiple { "multiple" } else { "single" }.to_string(),
                rel.ownership.to_string(),
                pairs.join(", "),
                rel.reverse.clone().unwrap_or_default(),
            ]);
        }
        output.push_str(&format!("\n\n{}", rels));
    }

    output
}

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_classes(&self, classes: &[ClassSummary]) -> String {
        serde_json::to_string_pretty(classes).unwrap_or_else(|_| "[]".to_string())
    }

    fn format_error(&self, error: &str) -> String {
        serde_json::json!({
            "error": error
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ormdef_core::load_class_defs;

    fn summaries(xml: &str) -> Vec<ClassSummary> {
        let classes = load_class_defs(xml).unwrap();
        classes
            .iter()
            .map(|class| ClassSummary::new(&classes, class))
            .collect()
    }

    const DOC: &str = r#"<classes>
      <class name="Party" assembly="Crm">
        <property name="PartyID" type="Guid" />
        <property name="Name" />
        <primaryKey><prop name="PartyID" /></primaryKey>
      </class>
      <class name="Person" assembly="Crm">
        <superClass class="Party" />
        <property name="BirthDate" type="DateTime" />
      </class>
    </classes>"#;

    #[test]
    fn test_table_lists_every_class() {
        let output = TableFormatter.format_classes(&summaries(DOC));
        assert!(output.contains("Crm.Party"));
        assert!(output.contains("Crm.Person"));
        assert!(output.contains("2 class(es) loaded"));
    }

    #[test]
    fn test_table_describes_single_class() {
        let all = summaries(DOC);
        let person: Vec<ClassSummary> =
            all.into_iter().filter(|c| c.name == "Crm.Person").collect();
        let output = TableFormatter.format_classes(&person);
        assert!(output.contains("inherits from Crm.Party"));
        assert!(output.contains("Primary key (object id): PartyID"));
        assert!(output.contains("BirthDate"));
    }

    #[test]
    fn test_json_output_parses() {
        let output = JsonFormatter.format_classes(&summaries(DOC));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[1]["super_class"], "Crm.Party");
        assert_eq!(value[1]["effective_properties"], 3);
        assert_eq!(value[0]["properties"][0]["type"], "Guid");
    }

    #[test]
    fn test_error_formats() {
        assert_eq!(TableFormatter.format_error("bad"), "Error: bad");
        assert_eq!(JsonFormatter.format_error("bad"), r#"{"error":"bad"}"#);
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
