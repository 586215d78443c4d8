use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::TallyResult;
use crate::models::ExpenseType;

/// What an external merchant lookup found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchFinding {
    pub tag: String,
    pub confidence: f64,
    pub expense_type: Option<ExpenseType>,
    pub alternatives: Vec<String>,
    /// Free-form provenance, e.g. the directory that answered.
    pub note: String,
}

/// Optional, rate-limited external merchant research capability.
///
/// Only invoked when a caller explicitly opts in. Implementations own their
/// network access and rate limiting; the resolver bounds each call with a
/// timeout and treats any error as a stage miss.
#[async_trait]
pub trait IMerchantResearch: Send + Sync {
    /// Short name used in logs and degradation events.
    fn name(&self) -> &str;

    /// Look up a normalized merchant pattern.
    async fn research(&self, merchant_pattern: &str, amount: f64)
        -> TallyResult<Option<ResearchFinding>>;
}
