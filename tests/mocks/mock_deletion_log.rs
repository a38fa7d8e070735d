use async_trait::async_trait;
use contact_book_server::deletion_log::{DeletionLog, DeletionRecord};
use std::io;
use std::sync::{Arc, Mutex};

/// Deletion log that keeps records in memory, optionally failing every write.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockDeletionLog {
    records: Arc<Mutex<Vec<DeletionRecord>>>,
    broken: bool,
}

#[allow(dead_code)]
impl MockDeletionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A log whose every write fails.
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn records(&self) -> Vec<DeletionRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeletionLog for MockDeletionLog {
    async fn record(&self, record: &DeletionRecord) -> io::Result<()> {
        if self.broken {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "log is read-only"));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}
