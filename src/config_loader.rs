//! Writing and loading bridge configuration files.

use crate::config::{BridgeConfig, ValidationError};
use log::info;
use std::ffi::OsString;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Errors that can occur while writing or reading a bridge configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to write output file '{}': {source}", .path.display())]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration file '{}' could not be read: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Validate and write a configuration as 2-space indented JSON.
///
/// The document goes to a sibling `.tmp` file first and is renamed over the
/// destination, so readers see either the previous file or the complete new one.
pub fn write_config(config: &BridgeConfig, output_path: &Path) -> Result<(), ConfigError> {
    config.validate()?;

    let mut json = serde_json::to_string_pretty(config)?;
    json.push('\n');

    let temp_path = temp_path_for(output_path);
    let written = fs::write(&temp_path, json).and_then(|()| fs::rename(&temp_path, output_path));
    if let Err(source) = written {
        // Nothing to clean up if the temp file was never created
        let _ = fs::remove_file(&temp_path);
        return Err(ConfigError::OutputWriteFailure {
            path: output_path.to_path_buf(),
            source,
        });
    }

    info!("Wrote configuration to: {:?}", output_path);
    Ok(())
}

fn temp_path_for(output_path: &Path) -> PathBuf {
    let mut name = output_path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    output_path.with_file_name(name)
}

/// Load and validate a bridge configuration from a JSON file
pub fn load_config(config_path: &Path) -> Result<BridgeConfig, ConfigError> {
    info!("Loading configuration from: {:?}", config_path);

    // Open the configuration file
    let file = File::open(config_path).map_err(|source| ConfigError::Read {
        path: config_path.to_path_buf(),
        source,
    })?;

    // Parse the JSON content
    let config: BridgeConfig =
        serde_json::from_reader(std::io::BufReader::new(file)).map_err(|source| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source,
        })?;

    // Validate the configuration
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LoggingLevel, CONFIG_VERSION};
    use crate::mapping::{MappingEntry, ObjectType};
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn sample_config() -> BridgeConfig {
        BridgeConfig {
            version: CONFIG_VERSION.to_string(),
            logging_level: LoggingLevel::Error,
            inp_file: "net.inp".to_string(),
            inp_file_hash: "900150983cd24fb0d6963f7d28e17f72".to_string(),
            hydraulic_timestep: 3600,
            comment: BridgeConfig::timestep_comment(3600),
            input_count: 1,
            output_count: 1,
            inputs: vec![MappingEntry::elapsed_time()],
            outputs: vec![MappingEntry::new(0, "TANK_1", ObjectType::Node, "TANKLEVEL")],
        }
    }

    #[test]
    fn test_write_and_load_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("EpanetBridge.json");

        let config = sample_config();
        write_config(&config, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("{\n  \"version\": \"1.0\","));
        assert!(content.contains("\n    {\n      \"index\": 0,"));

        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_config_is_not_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("EpanetBridge.json");

        let mut config = sample_config();
        config.output_count = 7;

        assert!(matches!(write_config(&config, &path), Err(ConfigError::Invalid(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_unwritable_destination() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("EpanetBridge.json");

        let err = write_config(&sample_config(), &path).unwrap_err();
        assert!(matches!(err, ConfigError::OutputWriteFailure { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("EpanetBridge.json");
        fs::write(&path, "stale").unwrap();

        let config = sample_config();
        write_config(&config, &path).unwrap();

        assert_eq!(load_config(&path).unwrap(), config);
        assert!(!dir.path().join("EpanetBridge.json.tmp").exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_rename_keeps_previous_file() {
        let dir = tempdir().unwrap();
        // A directory at the destination makes the rename fail after the temp write
        let path = dir.path().join("EpanetBridge.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let err = write_config(&sample_config(), &path).unwrap_err();
        assert!(matches!(err, ConfigError::OutputWriteFailure { .. }));
        assert!(path.join("keep").exists());
        assert!(!dir.path().join("EpanetBridge.json.tmp").exists());
    }

    #[test]
    fn test_load_minimal_bridge_file() {
        // logging_level and _comment are optional for the bridge
        let json = r#"{
  "version": "1.0",
  "inp_file": "net.inp",
  "inp_file_hash": "unknown",
  "hydraulic_timestep": 300,
  "input_count": 1,
  "output_count": 0,
  "inputs": [{"index": 0, "name": "ElapsedTime", "object_type": "SYSTEM", "property": "ELAPSEDTIME"}],
  "outputs": []
}"#;
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", json).unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.logging_level, LoggingLevel::Info);
        assert!(config.outputs.is_empty());
    }

    #[test]
    fn test_load_invalid_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{{ not json").unwrap();

        assert!(matches!(load_config(temp_file.path()), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/nonexistent/EpanetBridge.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
