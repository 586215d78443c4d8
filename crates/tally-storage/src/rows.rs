//! Row ↔ [`FeedbackRecord`] mapping.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use tally_core::errors::StorageError;
use tally_core::models::{ExpenseType, FeedbackRecord, FeedbackType};
use tally_core::Confidence;

use crate::to_storage_err;

pub(crate) const SELECT_COLUMNS: &str = "id, transaction_id, original_tag, corrected_tag, \
     original_type, corrected_type, merchant_pattern, feedback_type, confidence_before, created_at";

pub fn insert_record(conn: &Connection, record: &FeedbackRecord) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO feedback_records (
            id, transaction_id, original_tag, corrected_tag, original_type,
            corrected_type, merchant_pattern, feedback_type, confidence_before, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            record.id,
            record.transaction_id,
            record.original_tag,
            record.corrected_tag,
            record.original_type.map(ExpenseType::as_str),
            record.corrected_type.map(ExpenseType::as_str),
            record.merchant_pattern,
            record.feedback_type.as_str(),
            record.confidence_before.value(),
            record.created_at.to_rfc3339(),
        ],
    )
    .map_err(|e| match e {
        rusqlite::Error::SqliteFailure(err, msg)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            StorageError::AppendRejected {
                reason: msg.unwrap_or_else(|| format!("constraint violation for {}", record.id)),
            }
        }
        other => to_storage_err(other),
    })?;
    Ok(())
}

/// Raw column values, converted after the rusqlite borrow ends.
struct RawRow {
    id: String,
    transaction_id: String,
    original_tag: Option<String>,
    corrected_tag: Option<String>,
    original_type: Option<String>,
    corrected_type: Option<String>,
    merchant_pattern: String,
    feedback_type: String,
    confidence_before: f64,
    created_at: String,
}

fn read_raw(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok(RawRow {
        id: row.get(0)?,
        transaction_id: row.get(1)?,
        original_tag: row.get(2)?,
        corrected_tag: row.get(3)?,
        original_type: row.get(4)?,
        corrected_type: row.get(5)?,
        merchant_pattern: row.get(6)?,
        feedback_type: row.get(7)?,
        confidence_before: row.get(8)?,
        created_at: row.get(9)?,
    })
}

fn parse_type(value: Option<String>, id: &str) -> Result<Option<ExpenseType>, StorageError> {
    match value {
        None => Ok(None),
        Some(s) => ExpenseType::parse(&s)
            .map(Some)
            .ok_or_else(|| to_storage_err(format!("record {id}: bad expense type {s:?}"))),
    }
}

fn into_record(raw: RawRow) -> Result<FeedbackRecord, StorageError> {
    let feedback_type = FeedbackType::parse(&raw.feedback_type).ok_or_else(|| {
        to_storage_err(format!("record {}: bad feedback type {:?}", raw.id, raw.feedback_type))
    })?;
    let created_at = DateTime::parse_from_rfc3339(&raw.created_at)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("record {}: bad created_at: {e}", raw.id)))?;
    Ok(FeedbackRecord {
        original_type: parse_type(raw.original_type, &raw.id)?,
        corrected_type: parse_type(raw.corrected_type, &raw.id)?,
        id: raw.id,
        transaction_id: raw.transaction_id,
        original_tag: raw.original_tag,
        corrected_tag: raw.corrected_tag,
        merchant_pattern: raw.merchant_pattern,
        feedback_type,
        confidence_before: Confidence::new(raw.confidence_before),
        created_at,
    })
}

pub fn query_records(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<FeedbackRecord>, StorageError> {
    let mut stmt = conn.prepare_cached(sql).map_err(to_storage_err)?;
    let raws = stmt
        .query_map(params, read_raw)
        .map_err(to_storage_err)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(to_storage_err)?;
    raws.into_iter().map(into_record).collect()
}
