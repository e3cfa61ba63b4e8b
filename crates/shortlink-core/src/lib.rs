//! Core types for the shortlink client.
//!
//! This crate holds the pieces shared by the history cache, the HTTP client
//! and the controller: the [`ShortenedRecord`] value, URL validation, the
//! relative-age formatter and the injectable [`Clock`].

pub mod age;
pub mod clock;
pub mod error;
pub mod record;
pub mod validate;

pub use age::format_age;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::ValidationError;
pub use record::ShortenedRecord;
pub use validate::{check_url, validate_url};
