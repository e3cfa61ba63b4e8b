use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use shortlink_core::ShortenedRecord;

/// Result of inserting a record into a [`HistoryCollection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The record was prepended. `evicted` is the oldest record dropped to
    /// stay within capacity, if any.
    Inserted { evicted: Option<ShortenedRecord> },
    /// A record with the same `original_url` is already present; nothing
    /// changed.
    Duplicate,
}

impl InsertOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted { .. })
    }
}

/// Ordered history, most recent first.
///
/// Order reflects insertion only and is never re-sorted by timestamp.
/// No two records share an `original_url`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryCollection {
    records: Vec<ShortenedRecord>,
}

impl HistoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ShortenedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ShortenedRecord> {
        self.records.iter()
    }

    pub fn contains(&self, original_url: &str) -> bool {
        self.records.iter().any(|r| r.original_url == original_url)
    }

    /// Prepends `record` unless its `original_url` is already present.
    ///
    /// At most one record, the last, is evicted per insert.
    pub fn insert(&mut self, record: ShortenedRecord, capacity: usize) -> InsertOutcome {
        if self.contains(&record.original_url) {
            return InsertOutcome::Duplicate;
        }

        self.records.insert(0, record);
        let evicted = if self.records.len() > capacity {
            self.records.pop()
        } else {
            None
        };

        InsertOutcome::Inserted { evicted }
    }

    /// Drops every record whose age at `now` is at least `retention`.
    /// Returns how many were removed.
    pub fn prune(&mut self, now: Timestamp, retention: SignedDuration) -> usize {
        let retention_ms = i64::try_from(retention.as_millis()).unwrap_or(i64::MAX);
        let before = self.records.len();
        self.records
            .retain(|record| record.elapsed_millis(now) < retention_ms);
        before - self.records.len()
    }

    /// Removes duplicates (keeping the first, most recent, occurrence) and
    /// trims to `capacity`. Used when adopting a collection decoded from
    /// storage that may have been written by something else.
    pub(crate) fn normalize(&mut self, capacity: usize) -> usize {
        let before = self.records.len();
        let mut seen = std::collections::HashSet::new();
        self.records
            .retain(|record| seen.insert(record.original_url.clone()));
        self.records.truncate(capacity);
        before - self.records.len()
    }
}

impl<'a> IntoIterator for &'a HistoryCollection {
    type Item = &'a ShortenedRecord;
    type IntoIter = std::slice::Iter<'a, ShortenedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl From<Vec<ShortenedRecord>> for HistoryCollection {
    fn from(records: Vec<ShortenedRecord>) -> Self {
        Self { records }
    }
}
