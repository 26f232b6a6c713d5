//! Parquet-backed history store
//!
//! Every record is written to its own file and never rewritten. Reading a
//! region scans its files and returns a consistent, newest-first copy.
//! Files that cannot be read are logged and skipped.

use super::HistoryStore;
use crate::history::HistoryRecord;
use crate::momentum::{Region, RoleMap};
use arrow::array::{ArrayRef, Float64Array, StringArray, TimestampMicrosecondArray};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;
use chrono::DateTime;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

/// History record schema
pub fn history_schema() -> Schema {
    Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new(
            "timestamp",
            DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into())),
            false,
        ),
        Field::new("region", DataType::Utf8, false),
        Field::new("equity1_mom", DataType::Float64, false),
        Field::new("equity2_mom", DataType::Float64, false),
        Field::new("bond_mom", DataType::Float64, false),
        Field::new("threshold_mom", DataType::Float64, false),
        Field::new("signal", DataType::Utf8, false),
    ])
}

/// Append-only store of one Parquet file per history record
#[derive(Debug, Clone)]
pub struct ParquetHistoryStore {
    output_dir: PathBuf,
}

impl ParquetHistoryStore {
    /// Create a store rooted at `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Ensure output directory exists
    pub fn ensure_dir(&self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    fn region_prefix(region: Region) -> String {
        format!("history_{}_", region)
    }

    /// File path for a record
    pub fn file_path(&self, record: &HistoryRecord) -> PathBuf {
        let id = record.id.simple().to_string();
        let filename = format!(
            "{}{}_{}.parquet",
            Self::region_prefix(record.region),
            record.timestamp.format("%Y%m%d_%H%M%S"),
            &id[..8]
        );
        self.output_dir.join(filename)
    }

    /// Write one record to a new file. Fails if the file already exists.
    pub fn write_record(&self, record: &HistoryRecord) -> anyhow::Result<PathBuf> {
        self.ensure_dir()?;

        let path = self.file_path(record);
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)?;

        let schema = Arc::new(history_schema());
        let props = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build();

        let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec![record.id.to_string()])) as ArrayRef,
                Arc::new(
                    TimestampMicrosecondArray::from(vec![record.timestamp.timestamp_micros()])
                        .with_timezone("UTC"),
                ) as ArrayRef,
                Arc::new(StringArray::from(vec![record.region.as_str()])) as ArrayRef,
                Arc::new(Float64Array::from(vec![record.momentum.equity1])) as ArrayRef,
                Arc::new(Float64Array::from(vec![record.momentum.equity2])) as ArrayRef,
                Arc::new(Float64Array::from(vec![record.momentum.bond])) as ArrayRef,
                Arc::new(Float64Array::from(vec![record.momentum.threshold])) as ArrayRef,
                Arc::new(StringArray::from(vec![record.signal.as_str()])) as ArrayRef,
            ],
        )?;

        writer.write(&batch)?;
        writer.close()?;

        tracing::debug!(path = ?path, region = %record.region, signal = %record.signal, "Wrote history record");

        Ok(path)
    }

    /// Read every record stored in one file
    pub fn read_file(path: &Path) -> anyhow::Result<Vec<HistoryRecord>> {
        let file = File::open(path)?;
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

        let mut records = Vec::new();

        for batch_result in reader {
            let batch = batch_result?;

            let ids = string_column(&batch, 0, "id")?;
            let timestamps = batch
                .column(1)
                .as_any()
                .downcast_ref::<TimestampMicrosecondArray>()
                .ok_or_else(|| anyhow::anyhow!("Invalid timestamp column"))?;
            let regions = string_column(&batch, 2, "region")?;
            let equity1 = float_column(&batch, 3, "equity1_mom")?;
            let equity2 = float_column(&batch, 4, "equity2_mom")?;
            let bond = float_column(&batch, 5, "bond_mom")?;
            let threshold = float_column(&batch, 6, "threshold_mom")?;
            let signals = string_column(&batch, 7, "signal")?;

            for i in 0..batch.num_rows() {
                let timestamp = DateTime::from_timestamp_micros(timestamps.value(i))
                    .ok_or_else(|| anyhow::anyhow!("Invalid timestamp"))?;

                records.push(HistoryRecord {
                    id: Uuid::from_str(ids.value(i))?,
                    timestamp,
                    region: Region::from_str(regions.value(i))?,
                    momentum: RoleMap::new(
                        equity1.value(i),
                        equity2.value(i),
                        bond.value(i),
                        threshold.value(i),
                    ),
                    signal: signals.value(i).to_string(),
                });
            }
        }

        Ok(records)
    }

    /// Records for a region, newest first, optionally limited
    pub fn read_region(
        &self,
        region: Region,
        limit: Option<usize>,
    ) -> anyhow::Result<Vec<HistoryRecord>> {
        if !self.output_dir.exists() {
            return Ok(Vec::new());
        }

        let prefix = Self::region_prefix(region);
        let mut records = Vec::new();

        for entry in fs::read_dir(&self.output_dir)? {
            let path = entry?.path();
            let matches = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(&prefix) && n.ends_with(".parquet"))
                .unwrap_or(false);
            if !matches {
                continue;
            }

            match Self::read_file(&path) {
                Ok(file_records) => {
                    records.extend(file_records.into_iter().filter(|r| r.region == region))
                }
                Err(e) => {
                    tracing::warn!(path = ?path, error = %e, "Skipping unreadable history file");
                }
            }
        }

        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        if let Some(limit) = limit {
            records.truncate(limit);
        }

        Ok(records)
    }
}

fn string_column<'a>(
    batch: &'a RecordBatch,
    index: usize,
    name: &str,
) -> anyhow::Result<&'a StringArray> {
    batch
        .column(index)
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| anyhow::anyhow!("Invalid {} column", name))
}

fn float_column<'a>(
    batch: &'a RecordBatch,
    index: usize,
    name: &str,
) -> anyhow::Result<&'a Float64Array> {
    batch
        .column(index)
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| anyhow::anyhow!("Invalid {} column", name))
}

#[async_trait]
impl HistoryStore for ParquetHistoryStore {
    async fn append(&self, record: &HistoryRecord) -> anyhow::Result<()> {
        let store = self.clone();
        let record = record.clone();
        tokio::task::spawn_blocking(move || store.write_record(&record).map(|_| ())).await?
    }

    async fn recent(
        &self,
        region: Region,
        limit: Option<usize>,
    ) -> anyhow::Result<Vec<HistoryRecord>> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.read_region(region, limit)).await?
    }
}
