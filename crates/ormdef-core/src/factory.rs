//! Definition factory.
//!
//! Loaders never build definitions themselves; they parse primitive values
//! from the document and hand them to a [`DefClassFactory`]. Every method
//! has a default implementation producing the standard definition types, so
//! an embedding application overrides only the kinds it wants to customize.
//!
//! Factories are shared by reference for the duration of one load and must
//! not rely on interior state shared with other loads.

use crate::def::{
    Alignment, ClassName, ColumnLayoutDef, DefaultValue, DeleteAction, FilterDef, FilterMode,
    FilterPropertyDef, FormDef, FormFieldDef, FormTabDef, GridColumnDef, GridDef,
    InheritanceStrategy, LookupItem, LookupListDef, OrderBy, PropDef, PropDefCollection, PropType,
    RawClassDef, RawKeyDef, RawPrimaryKeyDef, RawRelPropDef, RawRelationshipDef, ReadWriteRule,
    RelationshipKind, RelationshipType, SuperClassDef, UiDef, UiDefCollection, UiParameters,
};

/// Parsed attributes of a property element.
///
/// Grouped into one value because a property carries more attributes than
/// any other definition kind.
#[derive(Debug, Clone, PartialEq)]
pub struct PropSpec {
    pub name: String,
    pub prop_type: PropType,
    pub read_write_rule: ReadWriteRule,
    pub default: Option<DefaultValue>,
    pub length: Option<usize>,
    pub compulsory: bool,
    pub auto_increment: bool,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub database_field: Option<String>,
    pub keep_value_private: bool,
}

impl PropSpec {
    /// A property with every optional attribute at its default.
    pub fn new(name: impl Into<String>, prop_type: PropType) -> Self {
        Self {
            name: name.into(),
            prop_type,
            read_write_rule: ReadWriteRule::default(),
            default: None,
            length: None,
            compulsory: false,
            auto_increment: false,
            display_name: None,
            description: None,
            database_field: None,
            keep_value_private: false,
        }
    }
}

/// Creates every definition object the loaders produce.
pub trait DefClassFactory {
    fn create_prop_def(&self, spec: PropSpec) -> PropDef {
        let mut prop = PropDef::new(spec.name, spec.prop_type);
        prop.read_write_rule = spec.read_write_rule;
        prop.default = spec.default;
        prop.length = spec.length;
        prop.compulsory = spec.compulsory;
        prop.auto_increment = spec.auto_increment;
        prop.display_name = spec.display_name;
        prop.description = spec.description;
        prop.database_field = spec.database_field;
        prop.keep_value_private = spec.keep_value_private;
        prop
    }

    fn create_key_def(
        &self,
        name: String,
        ignore_if_null: bool,
        prop_names: Vec<String>,
    ) -> RawKeyDef {
        RawKeyDef {
            name,
            ignore_if_null,
            prop_names,
        }
    }

    fn create_primary_key_def(
        &self,
        is_object_id: bool,
        prop_names: Vec<String>,
    ) -> RawPrimaryKeyDef {
        RawPrimaryKeyDef {
            is_object_id,
            prop_names,
        }
    }

    fn create_rel_prop_def(&self, own_prop: String, related_prop: String) -> RawRelPropDef {
        RawRelPropDef {
            own_prop,
            related_prop,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn create_single_relationship_def(
        &self,
        name: String,
        related_class: ClassName,
        rel_props: Vec<RawRelPropDef>,
        keep_reference: bool,
        delete_action: DeleteAction,
        reverse_name: Option<String>,
        owning_has_foreign_key: bool,
        relationship_type: RelationshipType,
    ) -> RawRelationshipDef {
        RawRelationshipDef {
            name,
            related_class,
            kind: RelationshipKind::Single,
            rel_props,
            keep_reference,
            delete_action,
            reverse_name,
            owning_has_foreign_key,
            relationship_type,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn create_multiple_relationship_def(
        &self,
        name: String,
        related_class: ClassName,
        rel_props: Vec<RawRelPropDef>,
        keep_reference: bool,
        order_by: Vec<OrderBy>,
        delete_action: DeleteAction,
        reverse_name: Option<String>,
        owning_has_foreign_key: bool,
        relationship_type: RelationshipType,
    ) -> RawRelationshipDef {
        RawRelationshipDef {
            name,
            related_class,
            kind: RelationshipKind::Multiple { order_by },
            rel_props,
            keep_reference,
            delete_action,
            reverse_name,
            owning_has_foreign_key,
            relationship_type,
        }
    }

    fn create_super_class_def(
        &self,
        class: ClassName,
        strategy: InheritanceStrategy,
        id: Option<String>,
        discriminator: Option<String>,
    ) -> SuperClassDef {
        SuperClassDef {
            class,
            strategy,
            id,
            discriminator,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn create_class_def(
        &self,
        name: ClassName,
        table_name: Option<String>,
        display_name: Option<String>,
        type_parameter: Option<String>,
        props: PropDefCollection,
        keys: Vec<RawKeyDef>,
        primary_key: Option<RawPrimaryKeyDef>,
        relationships: Vec<RawRelationshipDef>,
        super_class: Option<SuperClassDef>,
        ui_defs: UiDefCollection,
    ) -> RawClassDef {
        RawClassDef {
            name,
            table_name,
            display_name,
            type_parameter,
            super_class,
            props,
            keys,
            primary_key,
            relationships,
            ui_defs,
        }
    }

    fn create_simple_lookup_list(&self, items: Vec<LookupItem>) -> LookupListDef {
        LookupListDef::Simple { items }
    }

    fn create_database_lookup_list(
        &self,
        sql: String,
        timeout_ms: u64,
        limit_to_list: bool,
        class: Option<ClassName>,
    ) -> LookupListDef {
        LookupListDef::Database {
            sql,
            timeout_ms,
            limit_to_list,
            class,
        }
    }

    fn create_business_object_lookup_list(
        &self,
        class: ClassName,
        criteria: Option<String>,
        sort: Option<String>,
        timeout_ms: u64,
        limit_to_list: bool,
    ) -> LookupListDef {
        LookupListDef::BusinessObject {
            class,
            criteria,
            sort,
            timeout_ms,
            limit_to_list,
        }
    }

    fn create_ui_def(&self, name: String, grid: Option<GridDef>, form: Option<FormDef>) -> UiDef {
        UiDef { name, grid, form }
    }

    fn create_grid_def(
        &self,
        sort_column: Option<String>,
        columns: Vec<GridColumnDef>,
        filter: Option<FilterDef>,
    ) -> GridDef {
        GridDef {
            sort_column,
            columns,
            filter,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn create_grid_column_def(
        &self,
        heading: Option<String>,
        property: String,
        control_type: Option<String>,
        editable: bool,
        width: u32,
        alignment: Alignment,
        parameters: UiParameters,
    ) -> GridColumnDef {
        GridColumnDef {
            heading,
            property,
            control_type,
            editable,
            width,
            alignment,
            parameters,
        }
    }

    fn create_filter_def(
        &self,
        mode: FilterMode,
        columns: u32,
        properties: Vec<FilterPropertyDef>,
    ) -> FilterDef {
        FilterDef {
            mode,
            columns,
            properties,
        }
    }

    fn create_filter_property_def(
        &self,
        property: String,
        label: Option<String>,
        filter_type: String,
        parameters: UiParameters,
    ) -> FilterPropertyDef {
        FilterPropertyDef {
            property,
            label,
            filter_type,
            parameters,
        }
    }

    fn create_form_def(
        &self,
        title: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
        tabs: Vec<FormTabDef>,
    ) -> FormDef {
        FormDef {
            title,
            width,
            height,
            tabs,
        }
    }

    fn create_form_tab_def(&self, name: String, columns: Vec<ColumnLayoutDef>) -> FormTabDef {
        FormTabDef { name, columns }
    }

    fn create_column_layout_def(
        &self,
        width: Option<u32>,
        fields: Vec<FormFieldDef>,
    ) -> ColumnLayoutDef {
        ColumnLayoutDef { width, fields }
    }

    #[allow(clippy::too_many_arguments)]
    fn create_form_field_def(
        &self,
        label: Option<String>,
        property: String,
        control_type: Option<String>,
        mapper_type: Option<String>,
        editable: bool,
        tool_tip: Option<String>,
        parameters: UiParameters,
    ) -> FormFieldDef {
        FormFieldDef {
            label,
            property,
            control_type,
            mapper_type,
            editable,
            tool_tip,
            parameters,
        }
    }
}

/// The factory producing the standard definition types.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDefClassFactory;

impl DefClassFactory for DefaultDefClassFactory {}

#[cfg(test)]
mod tests {
    use super::*;

    struct UppercaseTables;

    impl DefClassFactory for UppercaseTables {
        #[allow(clippy::too_many_arguments)]
        fn create_class_def(
            &self,
            name: ClassName,
            table_name: Option<String>,
            display_name: Option<String>,
            type_parameter: Option<String>,
            props: PropDefCollection,
            keys: Vec<RawKeyDef>,
            primary_key: Option<RawPrimaryKeyDef>,
            relationships: Vec<RawRelationshipDef>,
            super_class: Option<SuperClassDef>,
            ui_defs: UiDefCollection,
        ) -> RawClassDef {
            let table = table_name.unwrap_or_else(|| name.class_name.clone());
            DefaultDefClassFactory.create_class_def(
                name,
                Some(table.to_uppercase()),
                display_name,
                type_parameter,
                props,
                keys,
                primary_key,
                relationships,
                super_class,
                ui_defs,
            )
        }
    }

    #[test]
    fn test_default_prop_def() {
        let mut spec = PropSpec::new("Total", PropType::Decimal);
        spec.compulsory = true;
        spec.database_field = Some("total_amount".into());

        let prop = DefaultDefClassFactory.create_prop_def(spec);
        assert_eq!(prop.name, "Total");
        assert!(prop.compulsory);
        assert_eq!(prop.database_field_name(), "total_amount");
        assert!(prop.rule.is_none());
    }

    #[test]
    fn test_override_one_kind() {
        let factory: &dyn DefClassFactory = &UppercaseTables;
        let class = factory.create_class_def(
            ClassName::new("Shop", "Invoice"),
            None,
            None,
            None,
            PropDefCollection::new(),
            Vec::new(),
            None,
            Vec::new(),
            None,
            UiDefCollection::new(),
        );
        assert_eq!(class.table_name.as_deref(), Some("INVOICE"));

        let key = factory.create_key_def("Code".into(), true, vec!["Code".into()]);
        assert!(key.ignore_if_null);
    }
}
