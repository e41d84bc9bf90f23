//! Mapping type definitions.
//!
//! This file contains the object types, binding directions, property
//! compatibility tables, and the entry record shared by the builder and the
//! configuration artifact.

use serde::{Deserialize, Serialize};

/// Name of the reserved first input slot
pub const ELAPSED_TIME_NAME: &str = "ElapsedTime";

/// Property of the reserved first input slot
pub const ELAPSED_TIME_PROPERTY: &str = "ELAPSEDTIME";

/// Coarse element category used to select the valid property set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ObjectType {
    /// Junction, reservoir or tank
    Node,
    /// Pipe, pump or valve
    Link,
    /// Time pattern
    Pattern,
    /// Simulation-wide value (elapsed time)
    System,
}

impl ObjectType {
    /// Get the string representation written to the configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Node => "NODE",
            ObjectType::Link => "LINK",
            ObjectType::Pattern => "PATTERN",
            ObjectType::System => "SYSTEM",
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a binding feeds the simulator or reads from it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Input => "input",
            Direction::Output => "output",
        }
    }

    /// Properties the bridge accepts for an object type in this direction
    pub fn valid_properties(&self, object_type: ObjectType) -> &'static [&'static str] {
        match (self, object_type) {
            (Direction::Input, ObjectType::Node) => &["DEMAND"],
            (Direction::Input, ObjectType::Link) => &["STATUS", "SETTING"],
            (Direction::Input, ObjectType::Pattern) => &["MULTIPLIER"],
            (Direction::Input, ObjectType::System) => &[ELAPSED_TIME_PROPERTY],
            (Direction::Output, ObjectType::Node) => {
                &["PRESSURE", "HEAD", "DEMAND", "TANKLEVEL", "QUALITY"]
            }
            (Direction::Output, ObjectType::Link) => {
                &["FLOW", "VELOCITY", "HEADLOSS", "STATUS", "SETTING", "QUALITY"]
            }
            (Direction::Output, ObjectType::Pattern | ObjectType::System) => &[],
        }
    }

    /// Exact, case-sensitive property check
    pub fn is_valid_property(&self, object_type: ObjectType, property: &str) -> bool {
        self.valid_properties(object_type).contains(&property)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One input or output slot of the bridge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Position of the entry in its list
    pub index: usize,
    /// Element ID, or "ElapsedTime" for the reserved input
    pub name: String,
    pub object_type: ObjectType,
    pub property: String,
}

impl MappingEntry {
    pub fn new(index: usize, name: impl Into<String>, object_type: ObjectType, property: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            object_type,
            property: property.into(),
        }
    }

    /// The reserved input at index 0
    pub fn elapsed_time() -> Self {
        Self::new(0, ELAPSED_TIME_NAME, ObjectType::System, ELAPSED_TIME_PROPERTY)
    }
}

/// Errors raised while validating a user-supplied binding
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error("Invalid {direction} specification '{spec}'. Expected format: ELEMENT_ID:PROPERTY")]
    InvalidSpecFormat { direction: Direction, spec: String },

    #[error("Element '{element}' not found in EPANET model")]
    UnknownElement { element: String },

    #[error("Property '{property}' is not valid for {object_type} {direction}s")]
    InvalidProperty {
        direction: Direction,
        object_type: ObjectType,
        property: String,
    },
}
