use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrackError>;

#[derive(Debug, Error)]
pub enum TrackError {
    #[error("Issue with ID {0} not found")]
    IssueNotFound(u64),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid issue field '{field}': {value}")]
    InvalidField { field: String, value: String },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl TrackError {
    /// Returns `true` for a missing issue.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::IssueNotFound(_))
    }

    /// Returns `true` if the operation may succeed when retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageError(_) | Self::IoError(_))
    }
}
