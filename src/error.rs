use std::path::PathBuf;

use thiserror::Error;

use crate::domain::error::ValidationError;
use crate::domain::PriceSourceKind;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors loading a market snapshot from disk.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("no snapshot paths configured")]
    NoSources,

    #[error("failed to read {market} snapshot {path}: {source}")]
    Read {
        market: PriceSourceKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {market} snapshot: {source}")]
    Parse {
        market: PriceSourceKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("{market} snapshot reported success=false")]
    Unsuccessful { market: PriceSourceKind },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid chest request: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
