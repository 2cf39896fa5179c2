//! Error types for schema adaptation and diagram rendering.

use thiserror::Error;

/// Main error type for the diagram pipeline.
#[derive(Error, Debug)]
pub enum DiagramError {
    /// Invalid or contradictory caller input (filters, options, source selection)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The selected schema source family cannot list its tables
    #[error("Not supported: {0}")]
    Unsupported(String),

    /// IO error (reading source documents)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DiagramError {
    /// Create a Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        DiagramError::Configuration(message.into())
    }

    /// Whether this error stems from invalid caller input
    pub fn is_configuration(&self) -> bool {
        matches!(self, DiagramError::Configuration(_))
    }
}

/// Result type alias for the diagram pipeline.
pub type Result<T> = std::result::Result<T, DiagramError>;
