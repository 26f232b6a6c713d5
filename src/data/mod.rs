//! History storage module
//!
//! Stores signal history records for later analysis

mod memory;
mod parquet;

pub use memory::MemoryHistoryStore;
pub use self::parquet::{history_schema, ParquetHistoryStore};

use crate::history::HistoryRecord;
use crate::momentum::Region;
use async_trait::async_trait;

/// Trait for history persistence
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Persist a new record. Records are never updated after this call.
    async fn append(&self, record: &HistoryRecord) -> anyhow::Result<()>;

    /// Records for one region ordered newest first, optionally limited
    async fn recent(&self, region: Region, limit: Option<usize>)
        -> anyhow::Result<Vec<HistoryRecord>>;
}
