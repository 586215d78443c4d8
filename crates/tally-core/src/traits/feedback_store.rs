use crate::errors::StorageError;
use crate::models::FeedbackRecord;

/// Append-only ledger of user feedback.
///
/// Implementations must be safe under concurrent writers and must never
/// update or delete an appended record.
pub trait IFeedbackStore: Send + Sync {
    /// Append one record. Appending the same record id twice is rejected.
    fn append(&self, record: &FeedbackRecord) -> Result<(), StorageError>;

    /// All records for one merchant pattern, oldest first.
    fn records_for_pattern(&self, merchant_pattern: &str)
        -> Result<Vec<FeedbackRecord>, StorageError>;

    /// Every record in the ledger, oldest first.
    fn all_records(&self) -> Result<Vec<FeedbackRecord>, StorageError>;

    /// Number of records in the ledger.
    fn count(&self) -> Result<usize, StorageError>;
}
