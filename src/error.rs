//! Error types for AgentBTO
//!
//! Every malformed numeric argument surfaces as a single `InvalidInput` kind
//! naming the offending field. The remaining variants cover the ambient
//! layers (settings, audit log, output formats).

use thiserror::Error;

/// The main error type for AgentBTO operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    /// A caller-supplied value was missing, non-numeric, negative or otherwise unusable
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Output rendering errors (YAML, CSV, tables)
    #[error("Export error: {0}")]
    Export(String),
}

impl AgentError {
    /// Create an `InvalidInput` error for a named field
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an `InvalidInput` error for a required field that was not supplied
    pub fn missing(field: impl Into<String>) -> Self {
        Self::invalid(field, "value is required")
    }

    /// Check if this is an input validation error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// The field an `InvalidInput` error refers to
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AgentError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AgentError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for AgentBTO operations
pub type AgentResult<T> = Result<T, AgentError>;
