//! Bounded, deduplicated, self-expiring history of shortened URLs.
//!
//! [`HistoryStore`] owns a [`HistoryCollection`] and mirrors it into a single
//! durable slot behind the [`HistoryStorage`] trait. Storage failures never
//! escape the store: the history is a convenience, not a system of record.

pub mod collection;
pub mod error;
pub mod storage;
pub mod store;

pub use collection::{HistoryCollection, InsertOutcome};
pub use error::{Result, StorageError};
pub use storage::{FileStorage, HistoryStorage, MemoryStorage};
pub use store::{HistorySettings, HistoryStore, DEFAULT_CAPACITY, DEFAULT_RETENTION};
