use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::InputError;

/// A prior occurrence of the same merchant, supplied by the storage collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalOccurrence {
    pub amount: f64,
    pub date: NaiveDate,
}

impl HistoricalOccurrence {
    pub fn new(amount: f64, date: NaiveDate) -> Self {
        Self { amount, date }
    }
}

/// A raw bank transaction. Immutable input to the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Raw bank label, e.g. `"PRLV SEPA NETFLIX SARL 12.99 EUR"`.
    pub label: String,
    pub amount: f64,
    pub date: NaiveDate,
    /// Prior occurrences of the same merchant, oldest first or in any order.
    #[serde(default)]
    pub history: Vec<HistoricalOccurrence>,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        amount: f64,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            amount,
            date,
            history: Vec::new(),
        }
    }

    /// Attach merchant history.
    pub fn with_history(mut self, history: Vec<HistoricalOccurrence>) -> Self {
        self.history = history;
        self
    }

    /// Reject inputs that cannot be classified at all.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.id.trim().is_empty() {
            return Err(InputError::MissingTransactionId);
        }
        if self.label.trim().is_empty() {
            return Err(InputError::MissingLabel {
                transaction_id: self.id.clone(),
            });
        }
        if !self.amount.is_finite() {
            return Err(InputError::MalformedAmount {
                transaction_id: self.id.clone(),
                value: self.amount.to_string(),
            });
        }
        Ok(())
    }

    /// Amounts of the history plus this transaction, as absolute values.
    pub fn amount_series(&self) -> Vec<f64> {
        self.history
            .iter()
            .map(|h| h.amount.abs())
            .chain(std::iter::once(self.amount.abs()))
            .filter(|a| a.is_finite())
            .collect()
    }

    /// Dates of the history plus this transaction, sorted ascending.
    pub fn date_series(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .history
            .iter()
            .map(|h| h.date)
            .chain(std::iter::once(self.date))
            .collect();
        dates.sort();
        dates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn validate_rejects_blank_label() {
        let tx = Transaction::new("t1", "   ", 10.0, day(1));
        assert!(matches!(
            tx.validate(),
            Err(InputError::MissingLabel { .. })
        ));
    }

    #[test]
    fn validate_rejects_non_finite_amount() {
        let tx = Transaction::new("t1", "NETFLIX", f64::NAN, day(1));
        assert!(matches!(
            tx.validate(),
            Err(InputError::MalformedAmount { .. })
        ));
    }

    #[test]
    fn series_include_current_transaction() {
        let tx = Transaction::new("t1", "EDF", -42.0, day(20)).with_history(vec![
            HistoricalOccurrence::new(-41.0, day(10)),
            HistoricalOccurrence::new(-40.0, day(1)),
        ]);
        assert_eq!(tx.amount_series(), vec![41.0, 40.0, 42.0]);
        assert_eq!(tx.date_series(), vec![day(1), day(10), day(20)]);
    }
}
