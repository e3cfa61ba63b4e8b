use shortlink_client::RequestFailure;
use shortlink_core::ValidationError;
use thiserror::Error;

/// User-visible, non-fatal failures of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("invalid url: {0}")]
    Validation(#[from] ValidationError),
    #[error("request failed: {0}")]
    Request(#[from] RequestFailure),
}
