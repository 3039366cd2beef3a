use crate::engine::lock::LockReason;
use thiserror::Error;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A record is in a state the engine refuses to interpret,
    /// e.g. a fight with a partially populated outcome
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A record references an entity that does not exist or does not match
    #[error("Missing reference: {0}")]
    MissingReference(String),

    /// Pick submission rejected because the fight is locked
    #[error("Picks are locked: {0}")]
    Locked(LockReason),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Check if error is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }

    /// Check if error is a lock rejection
    pub fn is_locked(&self) -> bool {
        matches!(self, AppError::Locked(_))
    }
}
