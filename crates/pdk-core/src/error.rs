//! Core error types for pdk-core.
//!
//! Analytics errors never leave the telemetry barrier; they exist so the
//! reporting path can log something meaningful. Config errors are logged and
//! replaced by defaults. Only [`CoreError`] reaches the user.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pdk-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Errors running the external PDK program
    #[error("{0}")]
    Exec(#[from] ExecError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Could not determine or create the configuration directory
    #[error("Cannot access configuration directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Failures of a single analytics report attempt.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// The backend could not be reached or the request timed out
    #[error("analytics transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("analytics backend rejected hit (HTTP {status})")]
    Rejected { status: u16 },
}

/// Errors starting or waiting on the external PDK program.
#[derive(Error, Debug)]
pub enum ExecError {
    /// The program does not exist or is not on PATH
    #[error("PDK executable '{program}' not found; install the PDK or set PDK_EXECUTABLE")]
    NotFound { program: String },

    /// Any other spawn or wait failure
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl ExecError {
    pub(crate) fn from_io(program: &str, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound {
                program: program.to_string(),
            }
        } else {
            Self::Spawn {
                program: program.to_string(),
                source,
            }
        }
    }
}
