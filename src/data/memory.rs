//! In-memory history store

use super::HistoryStore;
use crate::history::HistoryRecord;
use crate::momentum::Region;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// History store held in process memory
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    records: RwLock<Vec<HistoryRecord>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total records across all regions
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn append(&self, record: &HistoryRecord) -> anyhow::Result<()> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id == record.id) {
            anyhow::bail!("History record {} already exists", record.id);
        }
        records.push(record.clone());
        Ok(())
    }

    async fn recent(
        &self,
        region: Region,
        limit: Option<usize>,
    ) -> anyhow::Result<Vec<HistoryRecord>> {
        let records = self.records.read().await;
        let mut selected: Vec<HistoryRecord> = records
            .iter()
            .filter(|r| r.region == region)
            .cloned()
            .collect();

        selected.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        if let Some(limit) = limit {
            selected.truncate(limit);
        }

        Ok(selected)
    }
}
