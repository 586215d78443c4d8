//! PRAGMA configuration applied to every ledger connection.

use rusqlite::Connection;
use tally_core::errors::StorageError;

use crate::to_storage_err;

/// WAL journal, NORMAL sync, 5s busy timeout.
pub fn apply_pragmas(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        ",
    )
    .map_err(to_storage_err)
}
