//! Sinks for acquired filing records.
//!
//! [`JsonLinesSink`] appends one JSON object per record to a file and is what the
//! command-line loader uses. [`MemorySink`] keeps records in memory for embedding
//! and tests.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::Mutex;

use super::error::Result;
use super::record::FilingRecord;
use super::traits::FilingSink;

/// Appends records to a JSON Lines file.
///
/// The file is opened once (created if missing, never truncated) and writes are
/// buffered; [`flush`](FilingSink::flush) pushes them to disk. Call
/// [`close`](JsonLinesSink::close) at shutdown.
#[derive(Debug)]
pub struct JsonLinesSink {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl JsonLinesSink {
    /// Opens `path` for appending, creating parent directories as needed.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        tracing::info!(path = %path.display(), "Opened record sink");

        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flushes outstanding records and releases the file.
    pub async fn close(self) -> Result<()> {
        let mut writer = self.writer.into_inner();
        writer.flush().await?;
        writer.into_inner().sync_all().await?;
        tracing::info!(path = %self.path.display(), "Closed record sink");
        Ok(())
    }
}

#[async_trait]
impl FilingSink for JsonLinesSink {
    async fn insert(&self, record: FilingRecord) -> Result<()> {
        let mut line = serde_json::to_vec(&record)?;
        line.push(b'\n');
        let mut writer = self.writer.lock().await;
        writer.write_all(&line).await?;
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        self.writer.lock().await.flush().await?;
        Ok(())
    }
}

/// Keeps every inserted record in memory, in insertion order.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<FilingRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of the records inserted so far.
    pub async fn records(&self) -> Vec<FilingRecord> {
        self.records.lock().await.clone()
    }

    pub fn into_records(self) -> Vec<FilingRecord> {
        self.records.into_inner()
    }
}

#[async_trait]
impl FilingSink for MemorySink {
    async fn insert(&self, record: FilingRecord) -> Result<()> {
        self.records.lock().await.push(record);
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        Ok(())
    }
}
