//! Transaction builders.

use chrono::{Duration, NaiveDate};
use tally_core::models::{HistoricalOccurrence, Transaction};

/// # Panics
/// Panics on an invalid calendar date.
pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_else(|| panic!("invalid date {y}-{m}-{d}"))
}

/// A transaction dated 2024-06-15 with no history.
pub fn tx(id: &str, label: &str, amount: f64) -> Transaction {
    Transaction::new(id, label, amount, day(2024, 6, 15))
}

/// `n` prior occurrences of `amount`, 30 days apart, ending 30 days before `before`.
pub fn monthly_history(amount: f64, n: usize, before: NaiveDate) -> Vec<HistoricalOccurrence> {
    (1..=n)
        .rev()
        .map(|i| HistoricalOccurrence::new(amount, before - Duration::days(30 * i as i64)))
        .collect()
}

/// `n` transactions cycling over the golden curated merchants.
pub fn known_merchant_transactions(n: usize) -> Vec<Transaction> {
    let golden = crate::known_merchant_labels();
    (0..n)
        .map(|i| {
            let g = &golden[i % golden.len()];
            tx(&format!("known-{i}"), &g.label, g.amount)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monthly_history_is_ascending_and_regular() {
        let h = monthly_history(9.99, 3, day(2024, 6, 15));
        assert_eq!(h.len(), 3);
        assert!(h.windows(2).all(|w| (w[1].date - w[0].date).num_days() == 30));
        assert_eq!(h[2].date, day(2024, 5, 16));
    }

    #[test]
    fn known_transactions_cycle() {
        let txs = known_merchant_transactions(50);
        assert_eq!(txs.len(), 50);
        assert_eq!(txs[0].id, "known-0");
    }
}
