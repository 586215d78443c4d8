//! Correction counts per suggested `(tag, type)` pair.
//!
//! Pairs the user keeps correcting get a bounded confidence penalty on
//! future identical suggestions.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tally_core::config::LearningConfig;
use tally_core::models::{ExpenseType, FeedbackRecord};

/// What the engine originally suggested. `tag: None` keys type-only
/// classifications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrectionKey {
    pub tag: Option<String>,
    pub expense_type: Option<ExpenseType>,
}

impl CorrectionKey {
    pub fn new(tag: Option<&str>, expense_type: Option<ExpenseType>) -> Self {
        Self {
            tag: tag.map(str::to_string),
            expense_type,
        }
    }

    pub fn for_type(expense_type: ExpenseType) -> Self {
        Self::new(None, Some(expense_type))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionCounts {
    pub corrections: u64,
    pub acceptances: u64,
}

impl CorrectionCounts {
    pub fn total(&self) -> u64 {
        self.corrections + self.acceptances
    }

    pub fn rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.corrections as f64 / self.total() as f64
        }
    }
}

/// A confidence reduction to apply to a suggestion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penalty {
    pub amount: f64,
    pub correction_rate: f64,
    pub corrections: u64,
    floor: f64,
}

impl Penalty {
    /// Lower a confidence by the penalty without pushing it under the floor.
    pub fn apply(&self, confidence: f64) -> f64 {
        if confidence <= self.floor {
            return confidence;
        }
        (confidence - self.amount).max(self.floor)
    }

    pub fn explanation(&self) -> String {
        format!(
            "confidence reduced by {:.2}: corrected {} times ({:.0}% of feedback)",
            self.amount,
            self.corrections,
            self.correction_rate * 100.0
        )
    }
}

#[derive(Debug, Default)]
pub struct CorrectionTracker {
    counts: DashMap<CorrectionKey, CorrectionCounts>,
}

impl CorrectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&self, key: CorrectionKey, corrected: bool) {
        let mut entry = self.counts.entry(key).or_default();
        if corrected {
            entry.corrections += 1;
        } else {
            entry.acceptances += 1;
        }
    }

    /// Count one feedback record against what was originally suggested.
    pub fn observe(&self, record: &FeedbackRecord) {
        if let Some(tag) = record.original_tag.as_deref() {
            let corrected = record.is_correction()
                && (record.final_tag() != Some(tag) || record.final_type() != record.original_type);
            self.bump(CorrectionKey::new(Some(tag), record.original_type), corrected);
        }
        if let Some(original_type) = record.original_type {
            let corrected = record.final_type() != Some(original_type);
            self.bump(CorrectionKey::for_type(original_type), corrected);
        }
    }

    pub fn counts(&self, key: &CorrectionKey) -> CorrectionCounts {
        self.counts.get(key).map(|c| *c).unwrap_or_default()
    }

    /// Penalty for a key once it has enough corrections at a high enough rate.
    pub fn penalty(&self, key: &CorrectionKey, config: &LearningConfig) -> Option<Penalty> {
        let counts = self.counts(key);
        let rate = counts.rate();
        if counts.corrections < config.penalty_min_corrections || rate <= config.penalty_min_rate {
            return None;
        }
        Some(Penalty {
            amount: (rate * config.max_penalty).min(config.max_penalty),
            correction_rate: rate,
            corrections: counts.corrections,
            floor: config.penalty_floor,
        })
    }

    pub fn clear(&self) {
        self.counts.clear();
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corrected(tx: &str) -> FeedbackRecord {
        FeedbackRecord::correction(tx, "some shop")
            .tag(Some("divers"), Some("restaurant"))
            .expense_type(Some(ExpenseType::Variable), None)
    }

    #[test]
    fn no_penalty_below_three_corrections() {
        let tracker = CorrectionTracker::new();
        tracker.observe(&corrected("t1"));
        tracker.observe(&corrected("t2"));
        let key = CorrectionKey::new(Some("divers"), Some(ExpenseType::Variable));
        assert!(tracker.penalty(&key, &LearningConfig::default()).is_none());
    }

    #[test]
    fn frequent_corrections_are_penalized_and_bounded() {
        let tracker = CorrectionTracker::new();
        for i in 0..4 {
            tracker.observe(&corrected(&format!("t{i}")));
        }
        let key = CorrectionKey::new(Some("divers"), Some(ExpenseType::Variable));
        let penalty = tracker.penalty(&key, &LearningConfig::default()).unwrap();
        assert!((penalty.amount - 0.3).abs() < 1e-12);
        assert!((penalty.apply(0.4) - 0.1).abs() < 1e-12);
        assert_eq!(penalty.apply(0.2), 0.05);
        assert_eq!(penalty.apply(0.03), 0.03);
    }

    #[test]
    fn acceptances_dilute_the_rate() {
        let tracker = CorrectionTracker::new();
        for i in 0..3 {
            tracker.observe(&corrected(&format!("c{i}")));
        }
        for i in 0..3 {
            tracker.observe(
                &FeedbackRecord::acceptance(format!("a{i}"), "some shop")
                    .tag(Some("divers"), None)
                    .expense_type(Some(ExpenseType::Variable), None),
            );
        }
        let key = CorrectionKey::new(Some("divers"), Some(ExpenseType::Variable));
        assert_eq!(tracker.counts(&key).rate(), 0.5);
        assert!(tracker.penalty(&key, &LearningConfig::default()).is_none());
    }

    #[test]
    fn type_corrections_are_tracked_separately() {
        let tracker = CorrectionTracker::new();
        for i in 0..3 {
            tracker.observe(
                &FeedbackRecord::correction(format!("t{i}"), "acme gym")
                    .expense_type(Some(ExpenseType::Variable), Some(ExpenseType::Fixed)),
            );
        }
        let penalty = tracker.penalty(
            &CorrectionKey::for_type(ExpenseType::Variable),
            &LearningConfig::default(),
        );
        assert!(penalty.is_some());
        // Only the originally suggested type is keyed.
        let counts = tracker.counts(&CorrectionKey::for_type(ExpenseType::Fixed));
        assert_eq!(counts.total(), 0);
    }
}
