//! UI metadata attached to classes.
//!
//! The loader only records this metadata; the form and grid generators
//! that consume it live elsewhere.

use super::types::{Alignment, FilterMode};
use std::collections::HashMap;

/// Name of the UI definition used when none is given.
pub const DEFAULT_UI_NAME: &str = "default";

/// Ordered name/value parameters of a UI element.
pub type UiParameters = Vec<(String, String)>;

/// A column of a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridColumnDef {
    /// Column heading.
    pub heading: Option<String>,
    /// Property shown in the column.
    pub property: String,
    /// Control type of the cells.
    pub control_type: Option<String>,
    /// Whether cells are editable.
    pub editable: bool,
    /// Width in pixels.
    pub width: u32,
    /// Horizontal alignment.
    pub alignment: Alignment,
    /// Extra parameters.
    pub parameters: UiParameters,
}

/// One property of a grid filter.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterPropertyDef {
    /// Filtered property.
    pub property: String,
    /// Label shown beside the filter control.
    pub label: Option<String>,
    /// Filter control type.
    pub filter_type: String,
    /// Extra parameters.
    pub parameters: UiParameters,
}

/// Filter shown above a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterDef {
    /// Filter or search.
    pub mode: FilterMode,
    /// Number of control columns.
    pub columns: u32,
    /// Filtered properties.
    pub properties: Vec<FilterPropertyDef>,
}

/// Grid (list) layout of a class.
#[derive(Debug, Clone, PartialEq)]
pub struct GridDef {
    /// Property the grid is initially sorted by.
    pub sort_column: Option<String>,
    /// Columns in display order.
    pub columns: Vec<GridColumnDef>,
    /// Optional filter.
    pub filter: Option<FilterDef>,
}

/// A field of a form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormFieldDef {
    /// Label shown beside the control.
    pub label: Option<String>,
    /// Property edited by the field.
    pub property: String,
    /// Control type.
    pub control_type: Option<String>,
    /// Mapper binding the control to the property.
    pub mapper_type: Option<String>,
    /// Whether the field is editable.
    pub editable: bool,
    /// Tool tip text.
    pub tool_tip: Option<String>,
    /// Extra parameters.
    pub parameters: UiParameters,
}

/// A column of fields within a form tab.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayoutDef {
    /// Width in pixels, if fixed.
    pub width: Option<u32>,
    /// Fields top to bottom.
    pub fields: Vec<FormFieldDef>,
}

/// A tab of a form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormTabDef {
    /// Tab caption.
    pub name: String,
    /// Columns left to right.
    pub columns: Vec<ColumnLayoutDef>,
}

/// Form (detail) layout of a class.
#[derive(Debug, Clone, PartialEq)]
pub struct FormDef {
    /// Window title.
    pub title: Option<String>,
    /// Width in pixels.
    pub width: Option<u32>,
    /// Height in pixels.
    pub height: Option<u32>,
    /// Tabs in display order.
    pub tabs: Vec<FormTabDef>,
}

impl FormDef {
    /// Iterate over every field of every tab.
    pub fn fields(&self) -> impl Iterator<Item = &FormFieldDef> {
        self.tabs
            .iter()
            .flat_map(|tab| tab.columns.iter())
            .flat_map(|column| column.fields.iter())
    }
}

/// A named grid/form pair.
#[derive(Debug, Clone, PartialEq)]
pub struct UiDef {
    /// UI definition name.
    pub name: String,
    /// Grid layout.
    pub grid: Option<GridDef>,
    /// Form layout.
    pub form: Option<FormDef>,
}

/// Name-unique set of a class's UI definitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiDefCollection {
    defs: Vec<UiDef>,
    by_name: HashMap<String, usize>,
}

impl UiDefCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a UI definition. Returns it back if the name is taken.
    pub fn add(&mut self, def: UiDef) -> Result<(), UiDef> {
        if self.by_name.contains_key(&def.name) {
            return Err(def);
        }
        self.by_name.insert(def.name.clone(), self.defs.len());
        self.defs.push(def);
        Ok(())
    }

    /// Get a UI definition by name.
    pub fn get(&self, name: &str) -> Option<&UiDef> {
        self.by_name.get(name).map(|&index| &self.defs[index])
    }

    /// Get the default UI definition.
    pub fn default_def(&self) -> Option<&UiDef> {
        self.get(DEFAULT_UI_NAME)
    }

    /// Iterate in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &UiDef> {
        self.defs.iter()
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Check if there are no definitions.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ui(name: &str) -> UiDef {
        UiDef {
            name: name.into(),
            grid: None,
            form: None,
        }
    }

    #[test]
    fn test_collection_names_unique() {
        let mut defs = UiDefCollection::new();
        assert!(defs.add(ui(DEFAULT_UI_NAME)).is_ok());
        assert!(defs.add(ui("admin")).is_ok());
        assert!(defs.add(ui("admin")).is_err());

        assert_eq!(defs.len(), 2);
        assert!(defs.default_def().is_some());
    }

    #[test]
    fn test_form_fields_flatten() {
        let field = |property: &str| FormFieldDef {
            label: None,
            property: property.into(),
            control_type: None,
            mapper_type: None,
            editable: true,
            tool_tip: None,
            parameters: Vec::new(),
        };
        let form = FormDef {
            title: None,
            width: None,
            height: None,
            tabs: vec![FormTabDef {
                name: "Main".into(),
                columns: vec![
                    ColumnLayoutDef {
                        width: None,
                        fields: vec![field("Name")],
                    },
                    ColumnLayoutDef {
                        width: Some(200),
                        fields: vec![field("Code"), field("Notes")],
                    },
                ],
            }],
        };

        let names: Vec<_> = form.fields().map(|f| f.property.as_str()).collect();
        assert_eq!(names, vec!["Name", "Code", "Notes"]);
    }
}
