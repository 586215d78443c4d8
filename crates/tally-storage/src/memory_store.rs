//! Non-persistent ledger.

use std::collections::HashSet;
use std::sync::RwLock;

use tally_core::errors::StorageError;
use tally_core::models::FeedbackRecord;
use tally_core::traits::IFeedbackStore;

#[derive(Debug, Default)]
struct Ledger {
    records: Vec<FeedbackRecord>,
    ids: HashSet<String>,
}

/// Append-only ledger held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryFeedbackStore {
    inner: RwLock<Ledger>,
}

impl InMemoryFeedbackStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> StorageError {
        StorageError::Unavailable {
            reason: "in-memory ledger lock poisoned".to_string(),
        }
    }
}

impl IFeedbackStore for InMemoryFeedbackStore {
    fn append(&self, record: &FeedbackRecord) -> Result<(), StorageError> {
        let mut ledger = self.inner.write().map_err(|_| Self::poisoned())?;
        if !ledger.ids.insert(record.id.clone()) {
            return Err(StorageError::AppendRejected {
                reason: format!("duplicate record id {}", record.id),
            });
        }
        ledger.records.push(record.clone());
        Ok(())
    }

    fn records_for_pattern(
        &self,
        merchant_pattern: &str,
    ) -> Result<Vec<FeedbackRecord>, StorageError> {
        let ledger = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(ledger
            .records
            .iter()
            .filter(|r| r.merchant_pattern == merchant_pattern)
            .cloned()
            .collect())
    }

    fn all_records(&self) -> Result<Vec<FeedbackRecord>, StorageError> {
        let ledger = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(ledger.records.clone())
    }

    fn count(&self) -> Result<usize, StorageError> {
        let ledger = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(ledger.records.len())
    }
}
