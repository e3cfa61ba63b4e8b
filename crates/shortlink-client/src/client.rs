use crate::error::RequestFailure;
use async_trait::async_trait;

/// Result of a single shorten request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Shortened {
        original_url: String,
        short_url: String,
    },
    Failed {
        reason: RequestFailure,
    },
}

impl Outcome {
    pub fn failed(reason: RequestFailure) -> Self {
        Self::Failed { reason }
    }

    pub fn is_shortened(&self) -> bool {
        matches!(self, Outcome::Shortened { .. })
    }
}

#[async_trait]
pub trait ShortenClient: Send + Sync + 'static {
    /// Asks the remote service to shorten `original_url`.
    ///
    /// Issues exactly one request per call. Transport problems are reported
    /// as [`Outcome::Failed`], never as a panic or an `Err`.
    async fn shorten(&self, original_url: &str) -> Outcome;
}

#[async_trait]
impl<T: ShortenClient + ?Sized> ShortenClient for std::sync::Arc<T> {
    async fn shorten(&self, original_url: &str) -> Outcome {
        (**self).shorten(original_url).await
    }
}
