use thiserror::Error;

/// Message surfaced next to the input when a candidate URL is rejected.
pub const INVALID_URL_MESSAGE: &str = "Please enter a valid URL.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("url cannot be empty")]
    Empty,
    #[error("url could not be parsed: {0}")]
    Malformed(String),
    #[error("url must have a scheme and host: {0}")]
    MissingHost(String),
}

impl ValidationError {
    /// The message shown to the user, regardless of the underlying reason.
    pub fn user_message(&self) -> &'static str {
        INVALID_URL_MESSAGE
    }
}
