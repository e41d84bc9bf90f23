//! # epanet-mapgen - Mapping generator for the EPANET-GoldSim bridge
//!
//! This library reads an EPANET network description (`.inp`) and produces
//! the JSON configuration that tells the bridge which GoldSim inputs and
//! outputs map onto which network elements and properties.
//!
//! ## Overview
//!
//! Generation is a one-shot, offline step. The `.inp` file is parsed once
//! into an immutable [`inp_parser::NetworkModel`], user bindings are
//! validated against it, and a single JSON file is written. Any validation
//! error aborts the run before anything is written.
//!
//! ## Architecture
//!
//! - `inp_parser`: Section-aware `.inp` reader (element IDs, timestep, quality mode)
//! - `mapping`: Binding validation, property tables, default output generation
//! - `config`: The configuration record and its invariants
//! - `config_loader`: JSON writing and reading
//! - `orchestrator`: One complete generation run
//! - `utils`: Duration parsing, content hashing, model sanity checks
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use epanet_mapgen::orchestrator::{generate_mapping, GenerateRequest};
//!
//! let mut request = GenerateRequest::new("network.inp");
//! request.inputs.push("TANK_1:DEMAND".to_string());
//! request.outputs.push("JUNCTION_5:PRESSURE".to_string());
//!
//! let config = generate_mapping(&request)?;
//! println!("Set the GoldSim time step to {} seconds", config.hydraulic_timestep);
//! # Ok::<(), color_eyre::eyre::Error>(())
//! ```
//!
//! ## Output Format
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "logging_level": "INFO",
//!   "inp_file": "network.inp",
//!   "inp_file_hash": "5d41402abc4b2a76b9719d911017c592",
//!   "hydraulic_timestep": 300,
//!   "_comment": "IMPORTANT: Set GoldSim Basic Time Step to match hydraulic_timestep (300 seconds)",
//!   "input_count": 2,
//!   "output_count": 1,
//!   "inputs": [
//!     { "index": 0, "name": "ElapsedTime", "object_type": "SYSTEM", "property": "ELAPSEDTIME" },
//!     { "index": 1, "name": "TANK_1", "object_type": "NODE", "property": "DEMAND" }
//!   ],
//!   "outputs": [
//!     { "index": 0, "name": "JUNCTION_5", "object_type": "NODE", "property": "PRESSURE" }
//!   ]
//! }
//! ```
//!
//! ## Error Handling
//!
//! Each module reports its failures through a `thiserror` enum
//! ([`inp_parser::InpError`], [`mapping::MappingError`],
//! [`config_loader::ConfigError`]). The orchestrator returns
//! `color_eyre::Result` so the binary can report them with context.

pub mod config;
pub mod config_loader;
pub mod inp_parser;
pub mod mapping;
pub mod orchestrator;
pub mod utils;
