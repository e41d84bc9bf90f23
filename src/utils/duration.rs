//! Duration parsing utilities.
//!
//! This module parses EPANET clock-style durations (e.g., "0:05",
//! "1:00:00") into seconds.

/// Parse an EPANET clock duration (`H:MM` or `H:MM:SS`) to seconds
///
/// Every part must be a non-negative integer. Any other number of
/// colon-separated parts is rejected.
///
/// # Arguments
/// * `duration` - The duration string to parse
///
/// # Returns
/// * `Ok(u64)` - The duration in seconds if parsing succeeds
/// * `Err(String)` - An error message if parsing fails
///
/// # Examples
/// ```
/// use epanet_mapgen::utils::duration::parse_clock_duration;
///
/// assert_eq!(parse_clock_duration("0:05"), Ok(300));
/// assert_eq!(parse_clock_duration("1:00:00"), Ok(3600));
/// assert!(parse_clock_duration("abc").is_err());
/// ```
pub fn parse_clock_duration(duration: &str) -> Result<u64, String> {
    let parts: Vec<&str> = duration.trim().split(':').collect();

    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m] => (parse_part(h, duration)?, parse_part(m, duration)?, 0),
        [h, m, s] => (
            parse_part(h, duration)?,
            parse_part(m, duration)?,
            parse_part(s, duration)?,
        ),
        _ => return Err(format!("Invalid clock duration format: {}", duration)),
    };

    hours
        .checked_mul(3600)
        .and_then(|total| total.checked_add(minutes.checked_mul(60)?))
        .and_then(|total| total.checked_add(seconds))
        .ok_or_else(|| format!("Clock duration out of range: {}", duration))
}

fn parse_part(part: &str, duration: &str) -> Result<u64, String> {
    part.parse::<u64>()
        .map_err(|_| format!("Invalid number '{}' in clock duration: {}", part, duration))
}
