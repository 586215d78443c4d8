/// Feedback ledger errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("append rejected: {reason}")]
    AppendRejected { reason: String },

    #[error("feedback store unavailable: {reason}")]
    Unavailable { reason: String },
}
