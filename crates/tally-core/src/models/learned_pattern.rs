use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::confidence::Confidence;
use crate::models::ExpenseType;

/// A merchant-specific rule derived from accumulated feedback.
///
/// Always recomputed from the FeedbackRecords sharing `merchant_pattern`;
/// never edited by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnedPattern {
    pub merchant_pattern: String,
    pub learned_tag: Option<String>,
    pub learned_expense_type: Option<ExpenseType>,
    /// Stored confidence, before read-time decay.
    pub confidence_score: Confidence,
    /// Number of feedback records seen for this merchant.
    pub usage_count: u64,
    /// Corrections agreeing with the learned value.
    pub supporting_count: u64,
    /// Fraction of post-promotion feedback that kept the learned value.
    pub success_rate: f64,
    pub promoted_at: DateTime<Utc>,
    /// Timestamp of the newest record agreeing with the learned value.
    pub last_reinforced_at: DateTime<Utc>,
}
