//! Error types for Wifisense

use thiserror::Error;

/// Errors that can occur at the edges of the simulator (configuration, parsing, encoding).
///
/// Generators and the classifier never fail.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unknown {kind} value: {value:?}")]
    UnknownValue { kind: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
