//! Mapping generation orchestrator.
//!
//! This module coordinates one generation run, from reading the EPANET
//! model through writing the bridge configuration file.

use crate::config::{BridgeConfig, LoggingLevel, DEFAULT_OUTPUT_FILE};
use crate::config_loader::write_config;
use crate::inp_parser::{parse_inp_file, NetworkModel};
use crate::mapping::MappingBuilder;
use crate::utils::validation::{validate_hydraulic_timestep, validate_quality_request};
use color_eyre::eyre::{Result, WrapErr};
use log::{info, warn};
use std::path::PathBuf;

/// Everything needed for one generation run
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// EPANET model to read
    pub inp_file: PathBuf,
    /// `ELEMENT_ID:PROPERTY` input specifications
    pub inputs: Vec<String>,
    /// `ELEMENT_ID:PROPERTY` output specifications; empty selects the defaults
    pub outputs: Vec<String>,
    /// Destination of the JSON configuration
    pub output_file: PathBuf,
    /// Add QUALITY outputs to the default output set
    pub include_quality: bool,
    pub logging_level: LoggingLevel,
}

impl GenerateRequest {
    pub fn new(inp_file: impl Into<PathBuf>) -> Self {
        Self {
            inp_file: inp_file.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            include_quality: false,
            logging_level: LoggingLevel::default(),
        }
    }
}

/// Generate and write the bridge configuration for a request
pub fn generate_mapping(request: &GenerateRequest) -> Result<BridgeConfig> {
    info!("Parsing EPANET model: {:?}", request.inp_file);
    let model = parse_inp_file(&request.inp_file)?;
    log_model_summary(&model);

    if let Err(e) = validate_hydraulic_timestep(model.hydraulic_timestep) {
        warn!("{}", e);
    }

    let mut builder = MappingBuilder::new(&model);

    if !request.inputs.is_empty() {
        info!("Adding {} custom inputs", request.inputs.len());
        for spec in &request.inputs {
            builder.add_input(spec)?;
        }
    }

    if !request.outputs.is_empty() {
        info!("Adding {} custom outputs", request.outputs.len());
        for spec in &request.outputs {
            builder.add_output(spec)?;
        }
    } else {
        info!("Generating default outputs (all tanks, junctions, links)");
        builder.generate_default_outputs(request.include_quality);
    }

    if let Err(e) = validate_quality_request(request.include_quality, model.quality_enabled) {
        warn!("{}", e);
    }

    info!("Generated configuration:");
    info!("  Inputs: {} (including ElapsedTime)", builder.inputs().len() + 1);
    info!("  Outputs: {}", builder.outputs().len());

    let config = builder.build_configuration(&request.inp_file, request.logging_level);

    write_config(&config, &request.output_file)
        .wrap_err_with(|| format!("Failed to generate '{}'", request.output_file.display()))?;

    Ok(config)
}

fn log_model_summary(model: &NetworkModel) {
    info!("  Found {} junctions", model.junctions.len());
    info!("  Found {} reservoirs", model.reservoirs.len());
    info!("  Found {} tanks", model.tanks.len());
    info!("  Found {} pipes", model.pipes.len());
    info!("  Found {} pumps", model.pumps.len());
    info!("  Found {} valves", model.valves.len());
    info!("  Found {} patterns", model.patterns.len());
    info!("  Hydraulic timestep: {} seconds", model.hydraulic_timestep);
    info!(
        "  Water quality simulation: {}",
        if model.quality_enabled { "ENABLED" } else { "DISABLED" }
    );
}
