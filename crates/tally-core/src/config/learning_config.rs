use serde::{Deserialize, Serialize};

use super::defaults;

/// Feedback learning configuration: promotion, confidence, penalties, decay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Distinct correction records needed before a pattern is promoted.
    pub min_records_for_promotion: usize,
    pub base_confidence: f64,
    /// Confidence added per supporting correction.
    pub confidence_step: f64,
    /// Cap on the count-driven part of the confidence.
    pub count_confidence_cap: f64,
    /// Multiplier applied to the success rate.
    pub success_boost: f64,
    /// Hard cap on learned confidence.
    pub confidence_cap: f64,
    /// Multiplier applied to partial (substring) matches.
    pub partial_match_factor: f64,
    pub partial_match_min_len: usize,
    pub penalty_min_corrections: u64,
    pub penalty_min_rate: f64,
    pub max_penalty: f64,
    pub penalty_floor: f64,
    /// Days a pattern keeps full confidence without reinforcement.
    pub decay_grace_days: i64,
    pub decay_half_life_days: f64,
    /// Decayed patterns below this are ignored by lookups.
    pub min_effective_confidence: f64,
    /// Retries after a failed ledger append before surfacing the error.
    pub store_retry_attempts: u32,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            min_records_for_promotion: defaults::DEFAULT_MIN_RECORDS_FOR_PROMOTION,
            base_confidence: defaults::DEFAULT_BASE_LEARNED_CONFIDENCE,
            confidence_step: defaults::DEFAULT_CONFIDENCE_STEP,
            count_confidence_cap: defaults::DEFAULT_COUNT_CONFIDENCE_CAP,
            success_boost: defaults::DEFAULT_SUCCESS_BOOST,
            confidence_cap: defaults::DEFAULT_LEARNED_CONFIDENCE_CAP,
            partial_match_factor: defaults::DEFAULT_PARTIAL_MATCH_FACTOR,
            partial_match_min_len: defaults::DEFAULT_PARTIAL_MATCH_MIN_LEN,
            penalty_min_corrections: defaults::DEFAULT_PENALTY_MIN_CORRECTIONS,
            penalty_min_rate: defaults::DEFAULT_PENALTY_MIN_RATE,
            max_penalty: defaults::DEFAULT_MAX_PENALTY,
            penalty_floor: defaults::DEFAULT_PENALTY_FLOOR,
            decay_grace_days: defaults::DEFAULT_DECAY_GRACE_DAYS,
            decay_half_life_days: defaults::DEFAULT_DECAY_HALF_LIFE_DAYS,
            min_effective_confidence: defaults::DEFAULT_MIN_EFFECTIVE_CONFIDENCE,
            store_retry_attempts: defaults::DEFAULT_STORE_RETRY_ATTEMPTS,
        }
    }
}
