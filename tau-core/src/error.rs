//! Error types for tau operations

/// Result type for tau operations
pub type Result<T> = std::result::Result<T, TauError>;

/// Error types for the tau evaluation core
#[derive(Debug, thiserror::Error)]
pub enum TauError {
    /// A record failed construction-time validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requested task id is not present in the task store
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for TauError {
    fn from(s: String) -> Self {
        TauError::Other(s)
    }
}

impl From<&str> for TauError {
    fn from(s: &str) -> Self {
        TauError::Other(s.to_string())
    }
}

impl From<anyhow::Error> for TauError {
    fn from(err: anyhow::Error) -> Self {
        TauError::Other(err.to_string())
    }
}
