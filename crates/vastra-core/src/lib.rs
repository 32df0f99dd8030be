//! VastraVaani Core — configuration, data directories, the shared error type
//! and the timestamp format every response uses.

pub mod config;
pub mod error;

/// Local time as `2025-06-01T10:00:00.123456`, the shape response
/// `timestamp` fields carry.
pub fn local_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

pub use config::{ApiKeys, AuthConfig, DataPaths, VastraConfig};
pub use error::{Error, Result};
