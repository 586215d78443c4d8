use std::time::Duration;

use serde::{Deserialize, Serialize};
use tally_core::constants::HIGH_CONFIDENCE;
use tally_core::models::{ClassificationResult, SuggestionSource, TagSuggestion};

/// Outcome for one input transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    pub transaction_id: String,
    pub suggestion: TagSuggestion,
    pub classification: ClassificationResult,
    /// Set when the item could not be processed normally and got a fallback.
    pub error: Option<String>,
}

impl BatchEntry {
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Aggregate figures for a finished batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_processed: usize,
    /// Mean suggestion confidence; zero for an empty batch.
    pub average_confidence: f64,
    pub high_confidence_count: usize,
    pub research_count: usize,
    pub fallback_count: usize,
    pub failed_count: usize,
    pub elapsed: Duration,
}

impl BatchSummary {
    pub fn from_entries(entries: &[BatchEntry], elapsed: Duration) -> Self {
        let total = entries.len();
        let confidences = entries.iter().map(|e| e.suggestion.confidence.value());
        let average_confidence = if total == 0 {
            0.0
        } else {
            confidences.clone().sum::<f64>() / total as f64
        };
        Self {
            total_processed: total,
            average_confidence,
            high_confidence_count: confidences.filter(|c| *c > HIGH_CONFIDENCE).count(),
            research_count: entries
                .iter()
                .filter(|e| e.suggestion.source == SuggestionSource::Research)
                .count(),
            fallback_count: entries.iter().filter(|e| e.suggestion.fallback_used).count(),
            failed_count: entries.iter().filter(|e| e.is_failed()).count(),
            elapsed,
        }
    }

    /// Items per second over the whole batch.
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        self.total_processed as f64 / secs
    }
}

/// One entry per input transaction, in input order, plus the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub results: Vec<BatchEntry>,
    pub summary: BatchSummary,
}

impl BatchResult {
    /// First entry for a transaction id.
    pub fn get(&self, transaction_id: &str) -> Option<&BatchEntry> {
        self.results
            .iter()
            .find(|e| e.transaction_id == transaction_id)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
