use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use epanet_mapgen::config::{LoggingLevel, DEFAULT_OUTPUT_FILE};
use epanet_mapgen::config_loader;
use epanet_mapgen::orchestrator::{generate_mapping, GenerateRequest};

/// Generate EPANET-GoldSim Bridge JSON configuration from an EPANET .inp file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Examples:
  # Generate with default outputs (all tanks, junctions, links)
  epanet-mapgen network.inp

  # Generate with custom inputs and outputs
  epanet-mapgen network.inp --input TANK_1:DEMAND --output JUNCTION_5:PRESSURE

  # Generate with water quality outputs
  epanet-mapgen network.inp --quality")]
struct Args {
    /// Path to EPANET .inp file
    inp_file: PathBuf,

    /// Add an input mapping (can be used multiple times)
    #[arg(long = "input", value_name = "ELEMENT:PROPERTY")]
    inputs: Vec<String>,

    /// Add an output mapping (can be used multiple times)
    #[arg(long = "output", value_name = "ELEMENT:PROPERTY")]
    outputs: Vec<String>,

    /// Output JSON filename
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    output_file: PathBuf,

    /// Include water quality outputs for all nodes/links
    #[arg(long)]
    quality: bool,

    /// Logging level written for the bridge
    #[arg(long, value_enum, default_value_t = LoggingLevel::Info)]
    logging_level: LoggingLevel,

    /// Reload and validate the written configuration
    #[arg(long)]
    verify: bool,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let request = GenerateRequest {
        inp_file: args.inp_file,
        inputs: args.inputs,
        outputs: args.outputs,
        output_file: args.output_file,
        include_quality: args.quality,
        logging_level: args.logging_level,
    };

    let config = generate_mapping(&request)?;

    if args.verify {
        config_loader::load_config(&request.output_file)
            .wrap_err_with(|| format!("Verification of '{}' failed", request.output_file.display()))?;
        info!("Verified configuration: {:?}", request.output_file);
    }

    info!("SUCCESS: Configuration file generated successfully!");
    info!(
        "IMPORTANT: Set GoldSim Basic Time Step to {} seconds",
        config.hydraulic_timestep
    );
    Ok(())
}
