//! # tally-storage
//!
//! Implementations of [`IFeedbackStore`](tally_core::traits::IFeedbackStore).
//!
//! - [`SqliteFeedbackStore`]: file-backed or in-memory SQLite ledger with
//!   `user_version` migrations. UPDATE and DELETE are refused by triggers.
//! - [`InMemoryFeedbackStore`]: a `RwLock<Vec<_>>` ledger for tests and
//!   embedding without persistence.

pub mod memory_store;
pub mod migrations;
pub mod pragmas;
pub mod rows;
pub mod sqlite_store;

pub use memory_store::InMemoryFeedbackStore;
pub use sqlite_store::SqliteFeedbackStore;

use tally_core::errors::StorageError;

pub(crate) fn to_storage_err(e: impl std::fmt::Display) -> StorageError {
    StorageError::Sqlite {
        message: e.to_string(),
    }
}
