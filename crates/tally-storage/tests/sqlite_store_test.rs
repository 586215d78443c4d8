use std::sync::Arc;
use std::thread;

use chrono::{TimeZone, Utc};
use tally_core::errors::StorageError;
use tally_core::models::{ExpenseType, FeedbackRecord, FeedbackType};
use tally_core::traits::IFeedbackStore;
use tally_storage::SqliteFeedbackStore;

fn correction(tx: &str, pattern: &str) -> FeedbackRecord {
    FeedbackRecord::correction(tx, pattern)
        .tag(Some("divers"), Some("restaurant"))
        .expense_type(None, Some(ExpenseType::Variable))
        .confidence_before(0.2)
}

#[test]
fn migrations_reach_latest_version() {
    let store = SqliteFeedbackStore::open_in_memory().unwrap();
    assert_eq!(store.schema_version().unwrap(), 2);
}

#[test]
fn records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let original = correction("t1", "chez paul restaurant").at(at);

    {
        let store = SqliteFeedbackStore::open(&path).unwrap();
        store.append(&original).unwrap();
    }

    let store = SqliteFeedbackStore::open(&path).unwrap();
    let back = store.records_for_pattern("chez paul restaurant").unwrap();
    assert_eq!(back, vec![original]);
    assert_eq!(store.schema_version().unwrap(), 2);
}

#[test]
fn all_fields_round_trip() {
    let store = SqliteFeedbackStore::open_in_memory().unwrap();
    let acceptance = FeedbackRecord::acceptance("t9", "netflix")
        .tag(Some("streaming"), None)
        .expense_type(Some(ExpenseType::Fixed), None)
        .confidence_before(0.95);
    store.append(&acceptance).unwrap();
    let back = store.all_records().unwrap();
    assert_eq!(back.len(), 1);
    assert_eq!(back[0].feedback_type, FeedbackType::Acceptance);
    assert_eq!(back[0].original_type, Some(ExpenseType::Fixed));
    assert_eq!(back[0].corrected_tag, None);
    assert_eq!(back[0].confidence_before.value(), 0.95);
}

#[test]
fn ledger_refuses_update_and_delete() {
    let store = SqliteFeedbackStore::open_in_memory().unwrap();
    store.append(&correction("t1", "chez paul")).unwrap();

    let update = store.with_conn(|conn| {
        conn.execute("UPDATE feedback_records SET corrected_tag = 'bar'", [])
            .map_err(|e| StorageError::Sqlite { message: e.to_string() })
    });
    assert!(update.is_err());

    let delete = store.with_conn(|conn| {
        conn.execute("DELETE FROM feedback_records", [])
            .map_err(|e| StorageError::Sqlite { message: e.to_string() })
    });
    assert!(delete.is_err());
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn duplicate_record_id_is_rejected() {
    let store = SqliteFeedbackStore::open_in_memory().unwrap();
    let r = correction("t1", "chez paul");
    store.append(&r).unwrap();
    assert!(matches!(
        store.append(&r),
        Err(StorageError::AppendRejected { .. })
    ));
}

#[test]
fn concurrent_appends_all_land() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteFeedbackStore::open(&dir.path().join("ledger.db")).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..25 {
                    store
                        .append(&correction(&format!("w{worker}-{i}"), "uber"))
                        .unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(store.count().unwrap(), 200);
    assert_eq!(store.records_for_pattern("uber").unwrap().len(), 200);
}
