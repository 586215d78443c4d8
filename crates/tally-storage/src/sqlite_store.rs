//! SQLite-backed feedback ledger.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::Connection;
use tally_core::errors::StorageError;
use tally_core::models::FeedbackRecord;
use tally_core::traits::IFeedbackStore;

use crate::migrations;
use crate::pragmas::apply_pragmas;
use crate::rows::{self, SELECT_COLUMNS};
use crate::to_storage_err;

/// Single serialized connection. Appends are individual INSERTs, so
/// concurrent writers queue on the mutex and each record lands exactly once.
pub struct SqliteFeedbackStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteFeedbackStore {
    /// Open (or create) a ledger file, apply pragmas, run migrations.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|e| StorageError::Unavailable {
            reason: format!("{}: {e}", path.display()),
        })?;
        apply_pragmas(&conn)?;
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open a throwaway in-memory ledger.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(to_storage_err)?;
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Schema version after migrations.
    pub fn schema_version(&self) -> Result<u32, StorageError> {
        self.with_conn(migrations::current_version)
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let guard = self.conn.lock().map_err(|_| StorageError::Unavailable {
            reason: "ledger lock poisoned".to_string(),
        })?;
        f(&guard)
    }
}

impl IFeedbackStore for SqliteFeedbackStore {
    fn append(&self, record: &FeedbackRecord) -> Result<(), StorageError> {
        self.with_conn(|conn| rows::insert_record(conn, record))
    }

    fn records_for_pattern(
        &self,
        merchant_pattern: &str,
    ) -> Result<Vec<FeedbackRecord>, StorageError> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM feedback_records WHERE merchant_pattern = ?1 ORDER BY seq"
        );
        self.with_conn(|conn| rows::query_records(conn, &sql, [merchant_pattern]))
    }

    fn all_records(&self) -> Result<Vec<FeedbackRecord>, StorageError> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM feedback_records ORDER BY seq");
        self.with_conn(|conn| rows::query_records(conn, &sql, []))
    }

    fn count(&self) -> Result<usize, StorageError> {
        self.with_conn(|conn| {
            let n: i64 = conn
                .query_row("SELECT COUNT(*) FROM feedback_records", [], |row| row.get(0))
                .map_err(to_storage_err)?;
            Ok(usize::try_from(n).unwrap_or(0))
        })
    }
}
