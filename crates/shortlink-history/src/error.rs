use thiserror::Error;

/// Result type for durable storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("history storage unavailable: {0}")]
    Io(String),
    #[error("history serialization failed: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value.to_string())
    }
}
