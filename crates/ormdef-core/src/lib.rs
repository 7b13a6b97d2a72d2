//! ORMDEF Core - Class definition loading and validation.
//!
//! This crate turns a class definition document into a validated,
//! cross-linked [`ClassDefCollection`]: classes, their properties, keys,
//! inheritance links and relationships.
//!
//! # Document Format
//!
//! ```text
//! <classes>
//!   <class name="Invoice" assembly="Shop" table="tbInvoice">
//!     <property name="InvoiceID" type="Guid" />
//!     <property name="CustomerID" type="Guid" />
//!     <primaryKey><prop name="InvoiceID" /></primaryKey>
//!     <relationship name="Customer" type="single" relatedClass="Customer"
//!                   reverseRelationship="Invoices">
//!       <relatedProperty property="CustomerID" relatedProperty="CustomerID" />
//!     </relationship>
//!   </class>
//! </classes>
//! ```
//!
//! # Usage
//!
//! ```rust
//! use ormdef_core::{ClassDefsLoader, LoaderConfig};
//!
//! let xml = r#"
//!     <classes>
//!       <class name="Customer" assembly="Shop">
//!         <property name="CustomerID" type="Guid" />
//!         <property name="Name" compulsory="true" />
//!         <primaryKey><prop name="CustomerID" /></primaryKey>
//!       </class>
//!     </classes>"#;
//!
//! let classes = ClassDefsLoader::new()
//!     .with_config(LoaderConfig::default().with_strict_key_properties(true))
//!     .load(xml)
//!     .unwrap();
//! assert!(classes.find("Shop", "Customer").is_some());
//! ```

pub mod config;
pub mod def;
pub mod error;
pub mod factory;
pub mod loader;
pub mod rule;
pub mod validate;

pub use config::LoaderConfig;
pub use def::{
    ClassDef, ClassDefCollection, ClassId, ClassName, KeyDef, KeyOwnership, PrimaryKeyDef,
    PropDef, PropDefCollection, PropRef, PropType, RawClassDef, RelationshipDef,
    RelationshipKind, SuperClassDef,
};
pub use error::{DefinitionError, Result};
pub use factory::{DefClassFactory, DefaultDefClassFactory, PropSpec};
pub use loader::{load_class_defs, ClassDefsLoader, ClassLoader};
pub use rule::{PropRule, RuleContext, RuleParameters, RuleRegistry, RuleValue};
pub use validate::{ClassDefValidator, EffectiveProperties, ValidationResult};
