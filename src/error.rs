//! Engine error types

use thiserror::Error;

/// Errors surfaced by the loan engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// A request field failed validation before any scoring ran
    #[error("invalid {field}: {message}")]
    Validation {
        /// Name of the offending request field
        field: &'static str,
        /// What the field must satisfy
        message: String,
    },

    /// A model or encoder artifact is missing, malformed, or incoherent
    #[error("artifact error: {0}")]
    Artifact(String),

    /// Inference failed (feature mismatch, unknown column, ...)
    #[error("model error: {0}")]
    Model(String),

    /// I/O failure while reading artifacts or batch input
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed JSON artifact
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Malformed CSV input
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl EngineError {
    /// Shorthand for a field validation failure
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        EngineError::Validation {
            field,
            message: message.into(),
        }
    }
}
