use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tally_core::models::LearnedPattern;

/// Learned-pattern statistics for `get_stats()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearningStats {
    pub total_patterns: usize,
    pub mean_confidence: f64,
    pub patterns_by_tag: BTreeMap<String, usize>,
    pub total_feedback_records: usize,
    /// Sorted by merchant pattern.
    pub patterns: Vec<LearnedPattern>,
}

impl LearningStats {
    pub fn from_patterns(mut patterns: Vec<LearnedPattern>, total_feedback_records: usize) -> Self {
        patterns.sort_by(|a, b| a.merchant_pattern.cmp(&b.merchant_pattern));
        let mut patterns_by_tag = BTreeMap::new();
        for p in &patterns {
            if let Some(tag) = &p.learned_tag {
                *patterns_by_tag.entry(tag.clone()).or_insert(0) += 1;
            }
        }
        let mean_confidence = if patterns.is_empty() {
            0.0
        } else {
            patterns.iter().map(|p| p.confidence_score.value()).sum::<f64>() / patterns.len() as f64
        };
        Self {
            total_patterns: patterns.len(),
            mean_confidence,
            patterns_by_tag,
            total_feedback_records,
            patterns,
        }
    }
}
