//! Document loaders.
//!
//! One loader per definition kind, composed by [`ClassLoader`] for a single
//! class and by [`ClassDefsLoader`] for a whole document.

mod class;
mod class_defs;
mod key;
mod lookup;
mod property;
mod reader;
mod relationship;
mod rule;
mod super_class;
mod ui;

pub use class::ClassLoader;
pub use class_defs::ClassDefsLoader;
pub use reader::{parse_date_time, parse_document, Element};

use crate::def::ClassDefCollection;
use crate::error::Result;
use crate::factory::DefClassFactory;
use crate::rule::RuleRegistry;

/// What every leaf loader needs besides its element.
#[derive(Clone, Copy)]
pub(crate) struct LoadContext<'a> {
    pub factory: &'a dyn DefClassFactory,
    pub rules: &'a RuleRegistry,
    /// Assembly of the class being loaded; default for class references.
    pub assembly: &'a str,
}

/// Load and validate a document with the default loader.
pub fn load_class_defs(xml: &str) -> Result<ClassDefCollection> {
    ClassDefsLoader::new().load(xml)
}
