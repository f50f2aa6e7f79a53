//! Error types for the fee_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for fee_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A value outside its closed set (frequency, month, tier, service type)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Rate table validation error
    #[error("Rate table error: {0}")]
    Tables(String),

    /// Roster file management error
    #[error("Roster error: {0}")]
    Roster(String),
}
