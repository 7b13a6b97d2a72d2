//! Whole-collection checks.
//!
//! [`ClassDefCollection::from_raw`](crate::def::ClassDefCollection::from_raw)
//! runs the full post-load pipeline over phase-1 definitions;
//! [`ClassDefValidator`] re-runs the relationship checks over any collection.

mod effective;
mod ownership;
mod post_load;
mod primary_key;
mod relationship;
mod validator;

pub use effective::{ClassGraph, EffectiveProperties, EffectivePropertyCache};
pub use validator::{ClassDefValidator, ValidationResult};
