//! Model sanity checks.
//!
//! These checks never abort a run. Callers log the returned message as a
//! warning and continue.

/// Validate that the hydraulic timestep is in the range the bridge expects
///
/// Checks for:
/// - Timesteps below one second
/// - Timesteps above one hour
///
/// # Arguments
/// * `seconds` - The hydraulic timestep read from the model
///
/// # Returns
/// * `Ok(())` if the timestep is between 1 and 3600 seconds
/// * `Err(String)` with a warning message otherwise
///
/// # Examples
/// ```
/// use epanet_mapgen::utils::validation::validate_hydraulic_timestep;
///
/// assert!(validate_hydraulic_timestep(300).is_ok());
/// assert!(validate_hydraulic_timestep(0).is_err());
/// assert!(validate_hydraulic_timestep(7200).is_err());
/// ```
pub fn validate_hydraulic_timestep(seconds: u64) -> Result<(), String> {
    if seconds < 1 {
        return Err(format!("Hydraulic timestep ({}s) is less than 1 second", seconds));
    }
    if seconds > 3600 {
        return Err(format!("Hydraulic timestep ({}s) is greater than 1 hour", seconds));
    }
    Ok(())
}

/// Validate that requested quality outputs can carry real values
///
/// # Arguments
/// * `quality_requested` - Whether quality outputs were requested
/// * `quality_enabled` - Whether the model runs a water quality simulation
///
/// # Returns
/// * `Ok(())` if quality outputs were not requested or the model supports them
/// * `Err(String)` with a warning message otherwise
pub fn validate_quality_request(quality_requested: bool, quality_enabled: bool) -> Result<(), String> {
    if quality_requested && !quality_enabled {
        return Err("Quality outputs requested but water quality simulation is not enabled in the EPANET model. \
                    Quality outputs will be included but will return zero values during simulation. \
                    To enable water quality, add 'Quality CHEMICAL' (or AGE/TRACE) to the [OPTIONS] section."
            .to_string());
    }
    Ok(())
}
