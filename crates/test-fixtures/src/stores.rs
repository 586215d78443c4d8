//! Ledger double with injectable failures.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use tally_core::errors::StorageError;
use tally_core::models::FeedbackRecord;
use tally_core::traits::IFeedbackStore;
use tally_storage::InMemoryFeedbackStore;

/// Wraps a real store; fails the next N appends or every read on demand.
pub struct FlakyStore {
    inner: Arc<dyn IFeedbackStore>,
    failing_appends: AtomicU32,
    failing_reads: AtomicBool,
    append_calls: AtomicU32,
}

impl FlakyStore {
    pub fn new(inner: Arc<dyn IFeedbackStore>) -> Self {
        Self {
            inner,
            failing_appends: AtomicU32::new(0),
            failing_reads: AtomicBool::new(false),
            append_calls: AtomicU32::new(0),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryFeedbackStore::new()))
    }

    /// Fail the next `n` append calls.
    pub fn fail_next_appends(&self, n: u32) {
        self.failing_appends.store(n, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, failing: bool) {
        self.failing_reads.store(failing, Ordering::SeqCst);
    }

    pub fn append_calls(&self) -> u32 {
        self.append_calls.load(Ordering::SeqCst)
    }

    fn read_guard(&self) -> Result<(), StorageError> {
        if self.failing_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable {
                reason: "injected read failure".to_string(),
            });
        }
        Ok(())
    }
}

impl IFeedbackStore for FlakyStore {
    fn append(&self, record: &FeedbackRecord) -> Result<(), StorageError> {
        self.append_calls.fetch_add(1, Ordering::SeqCst);
        let should_fail = self
            .failing_appends
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(StorageError::Sqlite {
                message: "injected append failure: database is locked".to_string(),
            });
        }
        self.inner.append(record)
    }

    fn records_for_pattern(
        &self,
        merchant_pattern: &str,
    ) -> Result<Vec<FeedbackRecord>, StorageError> {
        self.read_guard()?;
        self.inner.records_for_pattern(merchant_pattern)
    }

    fn all_records(&self) -> Result<Vec<FeedbackRecord>, StorageError> {
        self.read_guard()?;
        self.inner.all_records()
    }

    fn count(&self) -> Result<usize, StorageError> {
        self.inner.count()
    }
}
