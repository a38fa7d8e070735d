//! Append-only record of deleted contacts.
//!
//! One human-readable line per successful deletion. Writing the log is best
//! effort: the service reports failures through `tracing` but never undoes the
//! delete because of them.

use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::io;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use crate::domain::ContactId;

/// A single deletion, as written to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionRecord {
    pub id: ContactId,
    pub name: String,
    pub deleted_at: DateTime<Local>,
}

impl DeletionRecord {
    /// Record a deletion happening now.
    pub fn now(id: ContactId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            deleted_at: Local::now(),
        }
    }

    /// The log line for this record, newline included.
    pub fn to_line(&self) -> String {
        format!(
            "[{}] Contact \"{}\" (ID {}) was deleted.\n",
            self.deleted_at.format("%Y-%m-%d %H:%M:%S"),
            self.name,
            self.id
        )
    }
}

/// Sink for deletion records.
#[async_trait]
pub trait DeletionLog: Send + Sync {
    async fn record(&self, record: &DeletionRecord) -> io::Result<()>;
}

/// Appends deletion records to a text file, creating it and its parent
/// directories on first use.
#[derive(Debug, Clone)]
pub struct FileDeletionLog {
    path: PathBuf,
}

impl FileDeletionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DeletionLog for FileDeletionLog {
    async fn record(&self, record: &DeletionRecord) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(record.to_line().as_bytes()).await?;
        file.flush().await
    }
}

/// Discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDeletionLog;

#[async_trait]
impl DeletionLog for NoopDeletionLog {
    async fn record(&self, _record: &DeletionRecord) -> io::Result<()> {
        Ok(())
    }
}
