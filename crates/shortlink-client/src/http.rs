use crate::client::{Outcome, ShortenClient};
use crate::error::{ClientError, RequestFailure};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace, warn};
use typed_builder::TypedBuilder;

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const SHORTEN_PATH: &str = "shorten";

/// Configures an [`HttpShortenClient`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct HttpClientSettings {
    /// Base URL of the shortening service, e.g. `https://sho.rt`.
    #[builder(setter(into))]
    pub base_url: String,
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
}

#[derive(Debug, Serialize)]
struct ShortenRequest<'a> {
    original_url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ShortenResponse {
    short_url: String,
    #[serde(default)]
    original_url: Option<String>,
}

/// [`ShortenClient`] that talks JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpShortenClient {
    http: reqwest::Client,
    endpoint: String,
    base_url: String,
}

fn map_reqwest_error(err: reqwest::Error) -> RequestFailure {
    if err.is_timeout() {
        RequestFailure::Timeout
    } else if err.is_decode() {
        RequestFailure::Decode(err.to_string())
    } else {
        RequestFailure::Transport(err.to_string())
    }
}

impl HttpShortenClient {
    pub fn new(settings: HttpClientSettings) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        let base_url = settings.base_url.trim_end_matches('/').to_string();
        Ok(Self {
            http,
            endpoint: format!("{base_url}/{SHORTEN_PATH}"),
            base_url,
        })
    }

    /// The configured base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(&self, original_url: &str) -> Result<(String, String), RequestFailure> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&ShortenRequest { original_url })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RequestFailure::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        let decoded: ShortenResponse =
            serde_json::from_slice(&body).map_err(|e| RequestFailure::Decode(e.to_string()))?;

        if decoded.short_url.is_empty() {
            return Err(RequestFailure::EmptyShortUrl);
        }

        let original = decoded
            .original_url
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| original_url.to_string());
        Ok((original, decoded.short_url))
    }
}

#[async_trait]
impl ShortenClient for HttpShortenClient {
    async fn shorten(&self, original_url: &str) -> Outcome {
        trace!(endpoint = %self.endpoint, url = %original_url, "sending shorten request");

        match self.send(original_url).await {
            Ok((original_url, short_url)) => {
                debug!(url = %original_url, short_url = %short_url, "url shortened");
                Outcome::Shortened {
                    original_url,
                    short_url,
                }
            }
            Err(reason) => {
                warn!(url = %original_url, error = %reason, "shorten request failed");
                Outcome::failed(reason)
            }
        }
    }
}
