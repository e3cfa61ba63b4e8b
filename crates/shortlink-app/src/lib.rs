//! Controller layer of the shortlink client.
//!
//! [`ShortenerController`] drives a submission through validation, the
//! remote [`ShortenClient`](shortlink_client::ShortenClient) and the
//! [`HistoryStore`](shortlink_history::HistoryStore), and exposes a
//! snapshot of what a front end should display. [`AgeTicker`] re-renders
//! the age labels on a fixed cadence.

pub mod controller;
pub mod error;
pub mod ticker;
pub mod view;

pub use controller::{ShortenerController, SubmitReport};
pub use error::AppError;
pub use ticker::{AgeTicker, TickerHandle, DEFAULT_REFRESH_INTERVAL, MIN_REFRESH_INTERVAL};
pub use view::{HistoryRow, Notification, Phase, UiState};
