use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::age::format_elapsed;

/// One past conversion kept in the local history.
///
/// Records are immutable once created. The JSON shape (`original_url`,
/// `short_url`, `timestamp` in epoch milliseconds) is what ends up in the
/// durable history slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortenedRecord {
    /// The URL the user submitted. Used as the deduplication key.
    pub original_url: String,
    /// Opaque token returned by the remote service.
    pub short_url: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl ShortenedRecord {
    pub fn new(
        original_url: impl Into<String>,
        short_url: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            original_url: original_url.into(),
            short_url: short_url.into(),
            timestamp: created_at.as_millisecond(),
        }
    }

    /// Milliseconds elapsed between creation and `now`. Negative when the
    /// record claims to come from the future.
    pub fn elapsed_millis(&self, now: Timestamp) -> i64 {
        now.as_millisecond().saturating_sub(self.timestamp)
    }

    /// Relative age label such as `"3 hours ago"`.
    pub fn age_label(&self, now: Timestamp) -> String {
        format_elapsed(self.elapsed_millis(now))
    }

    /// The link presented to the user: `{base_url}/{short_url}`.
    pub fn display_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.short_url)
    }
}
