use thiserror::Error;

/// Errors raised while setting up a client.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("failed to build http client: {0}")]
    Build(String),
}

/// Why a shorten request did not produce a short URL.
///
/// All variants are terminal for the submission that produced them; the
/// client never retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestFailure {
    #[error("shorten service unreachable: {0}")]
    Transport(String),
    #[error("shorten request timed out")]
    Timeout,
    #[error("shorten service returned status {status}")]
    Status { status: u16, body: String },
    #[error("shorten response could not be decoded: {0}")]
    Decode(String),
    #[error("shorten service returned an empty short url")]
    EmptyShortUrl,
}
