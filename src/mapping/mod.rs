//! Mapping builder module.
//!
//! This module validates user-supplied `ELEMENT_ID:PROPERTY` bindings
//! against a parsed network model, generates the default output set, and
//! assembles the bridge configuration.

pub mod builder;
pub mod types;

// Re-export commonly used types for convenience
pub use builder::MappingBuilder;
pub use types::{Direction, MappingEntry, MappingError, ObjectType};
