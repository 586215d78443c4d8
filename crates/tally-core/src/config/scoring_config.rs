use serde::{Deserialize, Serialize};

use super::defaults;

/// Fixed weights of the five ensemble signals. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalWeights {
    pub keyword: f64,
    pub merchant: f64,
    pub amount_stability: f64,
    pub ngram: f64,
    pub frequency: f64,
}

impl SignalWeights {
    pub fn sum(&self) -> f64 {
        self.keyword + self.merchant + self.amount_stability + self.ngram + self.frequency
    }
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            keyword: defaults::DEFAULT_KEYWORD_WEIGHT,
            merchant: defaults::DEFAULT_MERCHANT_WEIGHT,
            amount_stability: defaults::DEFAULT_AMOUNT_WEIGHT,
            ngram: defaults::DEFAULT_NGRAM_WEIGHT,
            frequency: defaults::DEFAULT_FREQUENCY_WEIGHT,
        }
    }
}

/// Ensemble scorer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: SignalWeights,
    /// Composite above `+threshold` is FIXED, below `-threshold` VARIABLE.
    pub decision_threshold: f64,
    /// Available-weight coverage needed for an unshrunk composite.
    pub min_coverage: f64,
    /// Coefficient of variation at or below which amounts are "stable".
    pub stable_cv: f64,
    /// Coefficient of variation at or above which amounts are "unstable".
    pub unstable_cv: f64,
    pub expected_period_days: i64,
    pub period_tolerance_days: i64,
    /// History items required before amount/frequency signals fire.
    pub min_history: usize,
    pub substring_merchant_score: f64,
    /// Strength of a payment-method marker as contextual evidence.
    pub payment_marker_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: SignalWeights::default(),
            decision_threshold: defaults::DEFAULT_DECISION_THRESHOLD,
            min_coverage: defaults::DEFAULT_MIN_COVERAGE,
            stable_cv: defaults::DEFAULT_STABLE_CV,
            unstable_cv: defaults::DEFAULT_UNSTABLE_CV,
            expected_period_days: defaults::DEFAULT_EXPECTED_PERIOD_DAYS,
            period_tolerance_days: defaults::DEFAULT_PERIOD_TOLERANCE_DAYS,
            min_history: defaults::DEFAULT_MIN_HISTORY,
            substring_merchant_score: defaults::DEFAULT_SUBSTRING_MERCHANT_SCORE,
            payment_marker_weight: defaults::DEFAULT_PAYMENT_MARKER_WEIGHT,
        }
    }
}
