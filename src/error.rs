//! Error types for plot loading, classification and queries

use thiserror::Error;

/// Result type for plot operations
pub type Result<T> = std::result::Result<T, PlotError>;

/// Grave plot errors
#[derive(Error, Debug)]
pub enum PlotError {
    /// Input was not a usable GeoJSON document. Fatal for that load only.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A query has no answer over zero elements.
    #[error("No data available: {0}")]
    EmptyData(String),

    #[error("Graveyard not found: {name}")]
    NotFound { name: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlotError {
    pub fn decode(msg: impl Into<String>) -> Self {
        PlotError::Decode(msg.into())
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        PlotError::NotFound { name: name.into() }
    }

    /// Empty-data and lookup misses are reported to the user as "no data"
    /// rather than aborting the caller.
    pub fn is_no_data(&self) -> bool {
        matches!(self, PlotError::EmptyData(_) | PlotError::NotFound { .. })
    }
}
