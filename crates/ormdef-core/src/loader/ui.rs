//! UI metadata loader.

use super::reader::Element;
use super::LoadContext;
use crate::def::{
    Alignment, ColumnLayoutDef, FilterDef, FilterMode, FilterPropertyDef, FormDef, FormFieldDef,
    FormTabDef, GridColumnDef, GridDef, UiDef, UiParameters, DEFAULT_UI_NAME,
};
use crate::error::Result;

const DEFAULT_COLUMN_WIDTH: u32 = 100;
const DEFAULT_TAB_NAME: &str = "default";

/// Load a `ui` element holding at most one grid and one form.
pub(crate) fn load_ui(el: Element<'_, '_>, ctx: &LoadContext<'_>) -> Result<UiDef> {
    el.expect_tag("ui")?;
    el.ensure_children(&["grid", "form"])?;
    let name = el.attr("name").unwrap_or(DEFAULT_UI_NAME).to_string();

    let mut grid = None;
    let mut form = None;
    for child in el.children() {
        if child.tag() == "grid" {
            if grid.is_some() {
                return Err(child.error("a ui definition takes at most one grid"));
            }
            grid = Some(load_grid(child, ctx)?);
        } else {
            if form.is_some() {
                return Err(child.error("a ui definition takes at most one form"));
            }
            form = Some(load_form(child, ctx)?);
        }
    }
    Ok(ctx.factory.create_ui_def(name, grid, form))
}

fn load_grid(el: Element<'_, '_>, ctx: &LoadContext<'_>) -> Result<GridDef> {
    el.ensure_children(&["column", "filter"])?;
    let mut columns = Vec::new();
    let mut filter = None;
    for child in el.children() {
        if child.tag() == "column" {
            columns.push(load_grid_column(child, ctx)?);
        } else {
            if filter.is_some() {
                return Err(child.error("a grid takes at most one filter"));
            }
            filter = Some(load_filter(child, ctx)?);
        }
    }
    Ok(ctx
        .factory
        .create_grid_def(el.string_attr("sortColumn"), columns, filter))
}

fn load_grid_column(el: Element<'_, '_>, ctx: &LoadContext<'_>) -> Result<GridColumnDef> {
    Ok(ctx.factory.create_grid_column_def(
        el.string_attr("heading"),
        el.required_attr("property")?.to_string(),
        el.string_attr("type"),
        el.bool_attr("editable", true)?,
        el.parse_attr::<u32>("width", "width in pixels")?
            .unwrap_or(DEFAULT_COLUMN_WIDTH),
        el.enum_attr("alignment", Alignment::default())?,
        load_parameters(el)?,
    ))
}

fn load_filter(el: Element<'_, '_>, ctx: &LoadContext<'_>) -> Result<FilterDef> {
    el.ensure_children(&["filterProperty"])?;
    let mode = el.enum_attr("filterMode", FilterMode::default())?;
    let columns = el.parse_attr::<u32>("columns", "column count")?.unwrap_or(0);
    let mut properties = Vec::new();
    for child in el.children() {
        properties.push(load_filter_property(child, ctx)?);
    }
    Ok(ctx.factory.create_filter_def(mode, columns, properties))
}

fn load_filter_property(
    el: Element<'_, '_>,
    ctx: &LoadContext<'_>,
) -> Result<FilterPropertyDef> {
    Ok(ctx.factory.create_filter_property_def(
        el.required_attr("name")?.to_string(),
        el.string_attr("label"),
        el.attr("filterType").unwrap_or("StringTextBoxFilter").to_string(),
        load_parameters(el)?,
    ))
}

/// Fields and column layouts placed directly under a form go into an
/// implicit tab; fields placed directly under a tab go into an implicit
/// column.
fn load_form(el: Element<'_, '_>, ctx: &LoadContext<'_>) -> Result<FormDef> {
    el.ensure_children(&["tab", "columnLayout", "field"])?;
    let has_tabs = el.children().any(|child| child.tag() == "tab");
    let tabs = if has_tabs {
        if let Some(stray) = el.children().find(|child| child.tag() != "tab") {
            return Err(stray.error(
                "a form with tabs cannot also hold fields or column layouts directly",
            ));
        }
        el.children()
            .map(|tab| load_tab(tab, ctx))
            .collect::<Result<Vec<_>>>()?
    } else {
        let columns = load_columns(el, ctx)?;
        vec![ctx
            .factory
            .create_form_tab_def(DEFAULT_TAB_NAME.to_string(), columns)]
    };
    Ok(ctx.factory.create_form_def(
        el.string_attr("title"),
        el.parse_attr::<u32>("width", "width in pixels")?,
        el.parse_attr::<u32>("height", "height in pixels")?,
        tabs,
    ))
}

fn load_tab(el: Element<'_, '_>, ctx: &LoadContext<'_>) -> Result<FormTabDef> {
    el.ensure_children(&["columnLayout", "field"])?;
    let name = el.attr("name").unwrap_or(DEFAULT_TAB_NAME).to_string();
    let columns = load_columns(el, ctx)?;
    Ok(ctx.factory.create_form_tab_def(name, columns))
}

/// Column layouts of a form or tab, wrapping loose fields in one column.
fn load_columns(el: Element<'_, '_>, ctx: &LoadContext<'_>) -> Result<Vec<ColumnLayoutDef>> {
    let has_layouts = el.children().any(|child| child.tag() == "columnLayout");
    if !has_layouts {
        let fields = el
            .children()
            .map(|field| load_field(field, ctx))
            .collect::<Result<Vec<_>>>()?;
        return Ok(vec![ctx.factory.create_column_layout_def(None, fields)]);
    }
    if let Some(stray) = el.children().find(|child| child.tag() != "columnLayout") {
        return Err(stray.error(
            "fields cannot be mixed with column layouts; move them into a <columnLayout>",
        ));
    }
    el.children()
        .map(|layout| -> Result<ColumnLayoutDef> {
            layout.ensure_children(&["field"])?;
            let fields = layout
                .children()
                .map(|field| load_field(field, ctx))
                .collect::<Result<Vec<_>>>()?;
            Ok(ctx.factory.create_column_layout_def(
                layout.parse_attr::<u32>("width", "width in pixels")?,
                fields,
            ))
        })
        .collect()
}

fn load_field(el: Element<'_, '_>, ctx: &LoadContext<'_>) -> Result<FormFieldDef> {
    el.expect_tag("field")?;
    Ok(ctx.factory.create_form_field_def(
        el.string_attr("label"),
        el.required_attr("property")?.to_string(),
        el.string_attr("type"),
        el.string_attr("mapperType"),
        el.bool_attr("editable", true)?,
        el.string_attr("toolTipText"),
        load_parameters(el)?,
    ))
}

/// `parameter` children with `name` and `value`.
fn load_parameters(el: Element<'_, '_>) -> Result<UiParameters> {
    el.ensure_children(&["parameter"])?;
    el.children()
        .map(|parameter| -> Result<(String, String)> {
            parameter.ensure_children(&[])?;
            Ok((
                parameter.required_attr("name")?.to_string(),
                parameter.attr("value").unwrap_or_default().to_string(),
            ))
        })
        .collect()
}
