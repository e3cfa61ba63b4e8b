use crate::error::Result;
use crate::storage::HistoryStorage;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// In-memory slot.
///
/// Clones share the same slot, which lets a test keep a handle to inspect
/// what the store persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot that already holds `contents`.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(contents.into()))),
        }
    }

    /// Returns a copy of the current slot contents.
    pub fn contents(&self) -> Option<String> {
        self.slot.lock().clone()
    }
}

#[async_trait]
impl HistoryStorage for MemoryStorage {
    async fn read(&self) -> Result<Option<String>> {
        Ok(self.slot.lock().clone())
    }

    async fn write(&self, contents: &str) -> Result<()> {
        *self.slot.lock() = Some(contents.to_owned());
        Ok(())
    }

    async fn remove(&self) -> Result<()> {
        self.slot.lock().take();
        Ok(())
    }
}
