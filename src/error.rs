//! Error types for Holocell.

use thiserror::Error;

/// Holocell error types.
#[derive(Error, Debug)]
pub enum HolocellError {
    /// Raw hypervector data of the wrong length
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Engine configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Engine configuration could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Population is at capacity; the cell was not inserted
    #[error("Population full: capacity {capacity}")]
    PopulationFull { capacity: usize },

    /// A cell's continuous state became NaN or infinite
    #[error("Non-finite state in cell '{concept}'")]
    NonFiniteState { concept: String },

    /// The evolution thread could not be spawned
    #[error("Failed to spawn evolution thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Result type alias for Holocell operations.
pub type Result<T> = std::result::Result<T, HolocellError>;
