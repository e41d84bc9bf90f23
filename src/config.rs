//! Bridge configuration record, logging levels, and structural validation.

use serde::{Deserialize, Serialize};

use crate::mapping::{Direction, MappingEntry, ObjectType};

/// Schema version written to every configuration
pub const CONFIG_VERSION: &str = "1.0";

/// Default file name the bridge looks for in its working directory
pub const DEFAULT_OUTPUT_FILE: &str = "EpanetBridge.json";

/// Logging level of the bridge at simulation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoggingLevel {
    /// No log file
    #[value(name = "OFF")]
    #[serde(alias = "NONE")]
    Off,
    /// Errors only
    #[value(name = "ERROR")]
    Error,
    /// Errors and lifecycle messages
    #[default]
    #[value(name = "INFO")]
    Info,
    /// Everything, including per-call values
    #[value(name = "DEBUG")]
    Debug,
}

/// Bridge configuration that mirrors the generated JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeConfig {
    pub version: String,
    #[serde(default)]
    pub logging_level: LoggingLevel,
    /// Base name of the EPANET model the mapping was generated from
    pub inp_file: String,
    /// MD5 of the model file, or "unknown"
    pub inp_file_hash: String,
    /// Hydraulic timestep in seconds
    pub hydraulic_timestep: u64,
    #[serde(rename = "_comment", default)]
    pub comment: String,
    pub input_count: usize,
    pub output_count: usize,
    pub inputs: Vec<MappingEntry>,
    pub outputs: Vec<MappingEntry>,
}

impl BridgeConfig {
    /// Operator note repeating the timestep the driver must use
    pub fn timestep_comment(hydraulic_timestep: u64) -> String {
        format!(
            "IMPORTANT: Set GoldSim Basic Time Step to match hydraulic_timestep ({} seconds)",
            hydraulic_timestep
        )
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.version.is_empty() {
            return Err(ValidationError::InvalidHeader("version is empty".to_string()));
        }

        if self.input_count != self.inputs.len() {
            return Err(ValidationError::CountMismatch {
                list: Direction::Input,
                declared: self.input_count,
                actual: self.inputs.len(),
            });
        }
        if self.output_count != self.outputs.len() {
            return Err(ValidationError::CountMismatch {
                list: Direction::Output,
                declared: self.output_count,
                actual: self.outputs.len(),
            });
        }

        // Index 0 is always the elapsed time input
        match self.inputs.first() {
            Some(first) if *first == MappingEntry::elapsed_time() => {}
            _ => {
                return Err(ValidationError::InvalidEntry {
                    list: Direction::Input,
                    position: 0,
                    reason: "first input must be ElapsedTime/SYSTEM/ELAPSEDTIME".to_string(),
                })
            }
        }

        for (position, entry) in self.inputs.iter().enumerate().skip(1) {
            if entry.object_type == ObjectType::System {
                return Err(ValidationError::InvalidEntry {
                    list: Direction::Input,
                    position,
                    reason: "SYSTEM inputs are only allowed at index 0".to_string(),
                });
            }
            Self::validate_entry(Direction::Input, position, entry)?;
        }

        for (position, entry) in self.outputs.iter().enumerate() {
            Self::validate_entry(Direction::Output, position, entry)?;
        }

        Ok(())
    }

    fn validate_entry(list: Direction, position: usize, entry: &MappingEntry) -> Result<(), ValidationError> {
        let invalid = |reason: String| ValidationError::InvalidEntry { list, position, reason };

        if entry.index != position {
            return Err(invalid(format!("index {} does not match its position", entry.index)));
        }
        if entry.name.is_empty() {
            return Err(invalid("name is empty".to_string()));
        }
        if !list.is_valid_property(entry.object_type, &entry.property) {
            return Err(invalid(format!(
                "property '{}' is not valid for object_type '{}'",
                entry.property, entry.object_type
            )));
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid configuration: {0}")]
    InvalidHeader(String),
    #[error("Argument count mismatch: JSON specifies {declared} {list}s but array contains {actual} entries")]
    CountMismatch {
        list: Direction,
        declared: usize,
        actual: usize,
    },
    #[error("Invalid {list}[{position}]: {reason}")]
    InvalidEntry {
        list: Direction,
        position: usize,
        reason: String,
    },
}
