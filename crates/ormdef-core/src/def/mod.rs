//! Definition model for mapped classes.
//!
//! Every definition is built once by a loader (through a
//! [`DefClassFactory`](crate::factory::DefClassFactory)) and afterwards only
//! touched by the post-load pipeline.

mod class;
mod collection;
mod key;
mod lookup;
mod prop;
mod relationship;
mod super_class;
mod types;
mod ui;

pub use class::{ClassDef, RawClassDef};
pub use collection::{ClassDefCollection, ClassId, PropRef};
pub use key::{KeyBinding, KeyDef, KeyMember, PrimaryKeyDef, RawKeyDef, RawPrimaryKeyDef};
pub use lookup::{LookupItem, LookupListDef, DEFAULT_LOOKUP_TIMEOUT_MS};
pub use prop::{DefaultValue, PropDef, PropDefCollection, PropId};
pub use relationship::{
    KeyOwnership, OrderBy, OrderDirection, RawRelPropDef, RawRelationshipDef, RelKeyDef,
    RelPropDef, RelationshipDef, RelationshipKind,
};
pub use super_class::SuperClassDef;
pub use types::{
    Alignment, ClassName, DeleteAction, FilterMode, InheritanceStrategy, NamedEnum, PropType,
    ReadWriteRule, RelationshipType, SYSTEM_ASSEMBLY,
};
pub use ui::{
    ColumnLayoutDef, FilterDef, FilterPropertyDef, FormDef, FormFieldDef, FormTabDef,
    GridColumnDef, GridDef, UiDef, UiDefCollection, UiParameters, DEFAULT_UI_NAME,
};
