//! Shared utilities: duration parsing, content hashing, model sanity checks.

pub mod duration;
pub mod hash;
pub mod validation;

pub use duration::parse_clock_duration;
pub use hash::{md5_file_digest, UNKNOWN_HASH};
pub use validation::{validate_hydraulic_timestep, validate_quality_request};
