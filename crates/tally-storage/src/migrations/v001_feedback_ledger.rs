//! v001: feedback_records ledger with append-only triggers.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS feedback_records (
    seq               INTEGER PRIMARY KEY AUTOINCREMENT,
    id                TEXT NOT NULL UNIQUE,
    transaction_id    TEXT NOT NULL,
    original_tag      TEXT,
    corrected_tag     TEXT,
    original_type     TEXT CHECK (original_type IN ('FIXED', 'VARIABLE')),
    corrected_type    TEXT CHECK (corrected_type IN ('FIXED', 'VARIABLE')),
    merchant_pattern  TEXT NOT NULL,
    feedback_type     TEXT NOT NULL CHECK (feedback_type IN ('correction', 'acceptance', 'manual')),
    confidence_before REAL NOT NULL,
    created_at        TEXT NOT NULL
);

CREATE TRIGGER IF NOT EXISTS feedback_records_no_update
BEFORE UPDATE ON feedback_records
BEGIN
    SELECT RAISE(ABORT, 'feedback_records is append-only');
END;

CREATE TRIGGER IF NOT EXISTS feedback_records_no_delete
BEFORE DELETE ON feedback_records
BEGIN
    SELECT RAISE(ABORT, 'feedback_records is append-only');
END;
";
