//! Client for the remote shortening endpoint.
//!
//! [`ShortenClient`] is the seam the controller talks to;
//! [`HttpShortenClient`] is the reqwest-backed implementation that issues
//! `POST {base_url}/shorten`.

pub mod client;
pub mod error;
pub mod http;

pub use client::{Outcome, ShortenClient};
pub use error::{ClientError, RequestFailure};
pub use http::{HttpClientSettings, HttpShortenClient, DEFAULT_TIMEOUT};
