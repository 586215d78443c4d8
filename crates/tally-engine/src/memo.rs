//! Bounded memo of classification results.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::sync::Cache;
use tally_core::models::{ClassificationResult, Transaction};

/// Entries expire this long after insertion, so learned results pick up
/// read-time decay.
const ENTRY_TTL: Duration = Duration::from_secs(3600);

/// Keys are blake3 hashes of the normalized label, amount, date and history.
/// Capacity zero disables the memo.
///
/// Each entry carries the generation it was computed under. An entry from
/// an older generation is never served, even if it was inserted after
/// [`ClassificationMemo::invalidate_all`].
pub struct ClassificationMemo {
    cache: Option<Cache<String, (u64, ClassificationResult)>>,
    generation: AtomicU64,
}

impl ClassificationMemo {
    pub fn new(max_entries: u64) -> Self {
        let cache = (max_entries > 0).then(|| {
            Cache::builder()
                .max_capacity(max_entries)
                .time_to_live(ENTRY_TTL)
                .build()
        });
        Self {
            cache,
            generation: AtomicU64::new(0),
        }
    }

    pub fn key(merchant_pattern: &str, transaction: &Transaction) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(merchant_pattern.as_bytes());
        hasher.update(&[0]);
        hasher.update(&transaction.amount.to_bits().to_le_bytes());
        hasher.update(transaction.date.to_string().as_bytes());
        hasher.update(&[0]);
        for h in &transaction.history {
            hasher.update(&h.amount.to_bits().to_le_bytes());
            hasher.update(h.date.to_string().as_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }

    /// Current generation. Read it before computing a result to insert.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn get(&self, key: &str) -> Option<ClassificationResult> {
        let (generation, result) = self.cache.as_ref()?.get(key)?;
        (generation == self.generation()).then_some(result)
    }

    /// Insert a result computed under `generation`.
    pub fn insert(&self, key: String, generation: u64, result: ClassificationResult) {
        if let Some(cache) = &self.cache {
            if generation == self.generation() {
                cache.insert(key, (generation, result));
            }
        }
    }

    pub fn invalidate_all(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        if let Some(cache) = &self.cache {
            cache.invalidate_all();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.cache.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tally_core::models::HistoricalOccurrence;

    fn tx(amount: f64) -> Transaction {
        Transaction::new("t1", "NETFLIX", amount, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
    }

    #[test]
    fn key_covers_amount_and_history() {
        let a = ClassificationMemo::key("netflix", &tx(12.99));
        assert_eq!(a, ClassificationMemo::key("netflix", &tx(12.99)));
        assert_ne!(a, ClassificationMemo::key("netflix", &tx(13.99)));
        assert_ne!(a, ClassificationMemo::key("spotify", &tx(12.99)));

        let with_history = tx(12.99).with_history(vec![HistoricalOccurrence::new(
            12.99,
            NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(),
        )]);
        assert_ne!(a, ClassificationMemo::key("netflix", &with_history));

        let mut later = tx(12.99);
        later.date = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        assert_ne!(a, ClassificationMemo::key("netflix", &later));
    }

    #[test]
    fn zero_capacity_disables() {
        let memo = ClassificationMemo::new(0);
        memo.insert("k".to_string(), 0, ClassificationResult::default_variable("x"));
        assert!(!memo.is_enabled());
        assert!(memo.get("k").is_none());
    }

    #[test]
    fn invalidate_clears_entries() {
        let memo = ClassificationMemo::new(10);
        memo.insert("k".to_string(), memo.generation(), ClassificationResult::default_variable("x"));
        assert!(memo.get("k").is_some());
        memo.invalidate_all();
        assert!(memo.get("k").is_none());
    }

    #[test]
    fn result_computed_before_invalidation_is_not_served() {
        let memo = ClassificationMemo::new(10);
        let before = memo.generation();
        memo.invalidate_all();
        memo.insert("k".to_string(), before, ClassificationResult::default_variable("stale"));
        assert!(memo.get("k").is_none());

        memo.insert("k".to_string(), memo.generation(), ClassificationResult::default_variable("fresh"));
        assert_eq!(memo.get("k").map(|r| r.primary_reason), Some("fresh".to_string()));
    }
}
