pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::Result;
use async_trait::async_trait;

/// A single named durable slot holding the encoded history.
///
/// Implementations only move opaque strings around; encoding and decoding
/// of the collection is the store's business.
#[async_trait]
pub trait HistoryStorage: Send + Sync + 'static {
    /// Reads the slot. Returns `Ok(None)` if nothing has been written yet.
    async fn read(&self) -> Result<Option<String>>;

    /// Overwrites the slot with `contents`.
    async fn write(&self, contents: &str) -> Result<()>;

    /// Deletes the slot. It is not an error if the slot does not exist.
    async fn remove(&self) -> Result<()>;
}
