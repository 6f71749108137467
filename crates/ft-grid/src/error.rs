//! Snapshot-specific error types.

use ft_core::FtError;
use std::path::PathBuf;
use thiserror::Error;

/// Snapshot construction, indexing and loading errors.
#[derive(Error, Debug)]
pub enum GridError {
    /// Two zones in one snapshot share a key.
    #[error("Zone '{key}' appears more than once in the snapshot")]
    DuplicateZone { key: String },

    /// A zone lists an exchange with itself.
    #[error("Zone '{key}' has an exchange with itself")]
    SelfExchange { key: String },

    /// A production or exchange value is NaN or infinite.
    #[error("Zone '{key}' has a non-finite value for {field}: {value}")]
    NonFinite {
        key: String,
        field: String,
        value: f64,
    },

    /// Zone key is empty.
    #[error("Zone at position {position} has an empty key")]
    EmptyKey { position: usize },

    #[error("Failed to read snapshot file: {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] FtError),
}

pub type GridResult<T> = Result<T, GridError>;

