use crate::collection::{HistoryCollection, InsertOutcome};
use crate::error::StorageError;
use crate::storage::HistoryStorage;
use jiff::SignedDuration;
use shortlink_core::{Clock, ShortenedRecord, SystemClock};
use tracing::{debug, trace, warn};
use typed_builder::TypedBuilder;

/// Maximum number of records kept.
pub const DEFAULT_CAPACITY: usize = 5;

/// Records at least this old are dropped on load and prune.
pub const DEFAULT_RETENTION: SignedDuration = SignedDuration::from_hours(7 * 24);

/// Configures a [`HistoryStore`].
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct HistorySettings {
    #[builder(default = DEFAULT_CAPACITY)]
    pub capacity: usize,
    #[builder(default = DEFAULT_RETENTION)]
    pub retention: SignedDuration,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Owner of the history collection and its durable slot.
///
/// Every state-changing operation persists before returning. Storage errors
/// are logged and swallowed; the in-memory collection stays authoritative
/// for the lifetime of the store.
pub struct HistoryStore<S, C = SystemClock> {
    storage: S,
    clock: C,
    settings: HistorySettings,
    collection: HistoryCollection,
}

impl<S: HistoryStorage, C: Clock> HistoryStore<S, C> {
    /// Creates a store with an explicit clock and settings. The collection
    /// starts empty until [`load`](Self::load) is called.
    pub fn with_clock(storage: S, clock: C, settings: HistorySettings) -> Self {
        Self {
            storage,
            clock,
            settings,
            collection: HistoryCollection::new(),
        }
    }

    /// Creates a store and immediately loads it.
    pub async fn open(storage: S, clock: C, settings: HistorySettings) -> Self {
        let mut store = Self::with_clock(storage, clock, settings);
        store.load().await;
        store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn collection(&self) -> &HistoryCollection {
        &self.collection
    }

    pub fn records(&self) -> &[ShortenedRecord] {
        self.collection.records()
    }

    /// Replaces the in-memory collection with the durable one, then prunes.
    ///
    /// A missing, unreadable or undecodable slot yields an empty collection.
    pub async fn load(&mut self) -> &HistoryCollection {
        let mut loaded = match self.read_slot().await {
            Ok(Some(collection)) => collection,
            Ok(None) => {
                trace!("no stored history");
                HistoryCollection::new()
            }
            Err(e) => {
                warn!(error = %e, "failed to load history, starting empty");
                HistoryCollection::new()
            }
        };

        let dropped = loaded.normalize(self.settings.capacity);
        let expired = self.prune_collection(&mut loaded);
        if dropped + expired > 0 {
            self.persist(&loaded).await;
        }

        self.collection = loaded;
        debug!(records = self.collection.len(), "history loaded");
        &self.collection
    }

    /// Inserts `record` following the history rules (dedupe by
    /// `original_url`, prepend, evict one when over capacity).
    ///
    /// Persists only when the collection changed. The new collection is
    /// only adopted once the write has finished, so a cancelled insert
    /// leaves the in-memory view untouched.
    pub async fn insert(&mut self, record: ShortenedRecord) -> InsertOutcome {
        let url = record.original_url.clone();
        let mut next = self.collection.clone();
        let outcome = next.insert(record, self.settings.capacity);

        match &outcome {
            InsertOutcome::Duplicate => {
                debug!(url = %url, "url already in history");
            }
            InsertOutcome::Inserted { evicted } => {
                if let Some(evicted) = evicted {
                    debug!(url = %evicted.original_url, "evicted oldest history entry");
                }
                self.persist(&next).await;
                self.collection = next;
                debug!(url = %url, records = self.collection.len(), "added history entry");
            }
        }

        outcome
    }

    /// Empties the history and erases the durable slot.
    pub async fn clear(&mut self) {
        if let Err(e) = self.storage.remove().await {
            warn!(error = %e, "failed to remove stored history");
        }
        self.collection = HistoryCollection::new();
        debug!("history cleared");
    }

    /// Drops records past the retention window as of the clock's current
    /// time. Returns how many were removed.
    pub async fn prune(&mut self) -> usize {
        let mut next = self.collection.clone();
        let removed = self.prune_collection(&mut next);
        if removed > 0 {
            self.persist(&next).await;
            self.collection = next;
        }
        removed
    }

    fn prune_collection(&self, collection: &mut HistoryCollection) -> usize {
        let removed = collection.prune(self.clock.now(), self.settings.retention);
        if removed > 0 {
            debug!(removed, "pruned expired history entries");
        }
        removed
    }

    async fn read_slot(&self) -> crate::Result<Option<HistoryCollection>> {
        match self.storage.read().await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn persist(&self, collection: &HistoryCollection) {
        if let Err(e) = self.write_slot(collection).await {
            warn!(error = %e, "failed to persist history");
        }
    }

    async fn write_slot(&self, collection: &HistoryCollection) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(collection)?;
        self.storage.write(&encoded).await
    }
}
