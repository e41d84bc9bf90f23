//! Mapping builder.
//!
//! Accumulates validated input and output bindings against a parsed
//! [`NetworkModel`] and assembles the final [`BridgeConfig`].

use std::path::Path;

use log::debug;

use crate::config::{BridgeConfig, LoggingLevel, CONFIG_VERSION};
use crate::inp_parser::NetworkModel;
use crate::utils::hash::md5_file_digest;

use super::types::{Direction, MappingEntry, MappingError, ObjectType};

/// Append-only accumulator of bridge bindings for one network model
#[derive(Debug)]
pub struct MappingBuilder<'a> {
    model: &'a NetworkModel,
    inputs: Vec<MappingEntry>,
    outputs: Vec<MappingEntry>,
}

impl<'a> MappingBuilder<'a> {
    pub fn new(model: &'a NetworkModel) -> Self {
        Self {
            model,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// User inputs added so far, excluding the reserved ElapsedTime slot
    pub fn inputs(&self) -> &[MappingEntry] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[MappingEntry] {
        &self.outputs
    }

    /// Add an input binding from an `ELEMENT_ID:PROPERTY` specification.
    ///
    /// Input indices start at 1; index 0 is reserved for ElapsedTime.
    pub fn add_input(&mut self, spec: &str) -> Result<&MappingEntry, MappingError> {
        let (name, object_type, property) = self.resolve(spec, Direction::Input)?;
        let index = self.inputs.len() + 1;
        self.inputs.push(MappingEntry::new(index, name, object_type, property));
        debug!("Added input {}: {}:{} ({})", index, name, property, object_type);
        Ok(&self.inputs[self.inputs.len() - 1])
    }

    /// Add an output binding from an `ELEMENT_ID:PROPERTY` specification
    pub fn add_output(&mut self, spec: &str) -> Result<&MappingEntry, MappingError> {
        let (name, object_type, property) = self.resolve(spec, Direction::Output)?;
        let index = self.outputs.len();
        self.outputs.push(MappingEntry::new(index, name, object_type, property));
        debug!("Added output {}: {}:{} ({})", index, name, property, object_type);
        Ok(&self.outputs[self.outputs.len() - 1])
    }

    /// Append the default output set.
    ///
    /// Order: tank levels, junction pressures, link flows, then (with
    /// `include_quality`) node qualities and link qualities. Consumers index
    /// outputs by position, so this order must not change.
    pub fn generate_default_outputs(&mut self, include_quality: bool) {
        let model = self.model;

        for tank in &model.tanks {
            self.push_output(tank, ObjectType::Node, "TANKLEVEL");
        }
        for junction in &model.junctions {
            self.push_output(junction, ObjectType::Node, "PRESSURE");
        }
        for link in model.links() {
            self.push_output(link, ObjectType::Link, "FLOW");
        }

        if include_quality {
            for node in model.nodes() {
                self.push_output(node, ObjectType::Node, "QUALITY");
            }
            for link in model.links() {
                self.push_output(link, ObjectType::Link, "QUALITY");
            }
        }

        debug!("Generated {} default outputs", self.outputs.len());
    }

    /// Assemble the configuration record for the given source file.
    ///
    /// The source file is re-read from disk to compute its content hash.
    pub fn build_configuration(&self, inp_path: &Path, logging_level: LoggingLevel) -> BridgeConfig {
        let mut inputs = Vec::with_capacity(self.inputs.len() + 1);
        inputs.push(MappingEntry::elapsed_time());
        inputs.extend(self.inputs.iter().cloned());

        let inp_file = inp_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| inp_path.display().to_string());

        let hydraulic_timestep = self.model.hydraulic_timestep;

        BridgeConfig {
            version: CONFIG_VERSION.to_string(),
            logging_level,
            inp_file,
            inp_file_hash: md5_file_digest(inp_path),
            hydraulic_timestep,
            comment: BridgeConfig::timestep_comment(hydraulic_timestep),
            input_count: inputs.len(),
            output_count: self.outputs.len(),
            inputs,
            outputs: self.outputs.clone(),
        }
    }

    fn push_output(&mut self, name: &str, object_type: ObjectType, property: &str) {
        let index = self.outputs.len();
        self.outputs.push(MappingEntry::new(index, name, object_type, property));
    }

    fn resolve<'s>(
        &self,
        spec: &'s str,
        direction: Direction,
    ) -> Result<(&'s str, ObjectType, &'s str), MappingError> {
        let parts: Vec<&str> = spec.split(':').collect();
        let [element, property] = parts.as_slice() else {
            return Err(MappingError::InvalidSpecFormat {
                direction,
                spec: spec.to_string(),
            });
        };

        let object_type = self
            .model
            .object_type_of(element)
            .ok_or_else(|| MappingError::UnknownElement {
                element: element.to_string(),
            })?;

        if !direction.is_valid_property(object_type, property) {
            return Err(MappingError::InvalidProperty {
                direction,
                object_type,
                property: property.to_string(),
            });
        }

        Ok((*element, object_type, *property))
    }
}
