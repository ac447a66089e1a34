//! services/cli/src/error.rs
//!
//! Defines the primary error type for the entire `cli` service.

use crate::config::ConfigError;

/// The primary error type for the `cli` service.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents a standard Input/Output error (e.g. creating the data
    /// directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An unknown or malformed command line.
    #[error("Usage error: {0}")]
    Usage(String),
}
