use serde::{Deserialize, Serialize};
use std::fmt;

use crate::confidence::Confidence;

/// Whether an expense recurs predictably or is discretionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExpenseType {
    /// Recurring, predictable charge (subscription, utility, rent).
    Fixed,
    /// Discretionary, irregular spending.
    Variable,
}

impl ExpenseType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "FIXED",
            Self::Variable => "VARIABLE",
        }
    }

    /// Parse a loosely formatted type name (`"fixed"`, `"FIXED"`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FIXED" => Some(Self::Fixed),
            "VARIABLE" => Some(Self::Variable),
            _ => None,
        }
    }
}

impl fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five independent signals of the ensemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Keyword,
    MerchantPattern,
    AmountStability,
    NgramContext,
    Frequency,
}

impl SignalKind {
    pub const ALL: [SignalKind; 5] = [
        SignalKind::Keyword,
        SignalKind::MerchantPattern,
        SignalKind::AmountStability,
        SignalKind::NgramContext,
        SignalKind::Frequency,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::MerchantPattern => "merchant_pattern",
            Self::AmountStability => "amount_stability",
            Self::NgramContext => "ngram_context",
            Self::Frequency => "frequency",
        }
    }
}

/// One signal's share of a composite decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributingFactor {
    pub signal: SignalKind,
    /// Raw signal score in [-1, +1], positive leaning FIXED.
    pub score: f64,
    pub weight: f64,
    /// `weight × score`, before normalization over available signals.
    pub contribution: f64,
    /// What matched, e.g. `keyword "netflix" (+1.00)`.
    pub detail: String,
}

/// Where a classification came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationSource {
    Ensemble,
    LearnedExact,
    LearnedPartial,
    Default,
}

/// FIXED/VARIABLE decision with confidence and explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub expense_type: ExpenseType,
    pub confidence: Confidence,
    pub primary_reason: String,
    /// Ranked by absolute contribution, strongest first.
    pub contributing_factors: Vec<ContributingFactor>,
    pub matched_patterns: Vec<String>,
    pub source: ClassificationSource,
    /// Weighted composite in [-1, +1]; zero for learned and default results.
    pub composite_score: f64,
}

impl ClassificationResult {
    /// Low-confidence VARIABLE result returned instead of failing.
    pub fn default_variable(reason: impl Into<String>) -> Self {
        Self {
            expense_type: ExpenseType::Variable,
            confidence: Confidence::new(Confidence::FAILURE),
            primary_reason: reason.into(),
            contributing_factors: Vec::new(),
            matched_patterns: Vec::new(),
            source: ClassificationSource::Default,
            composite_score: 0.0,
        }
    }

    /// Flattened human-readable reasons, primary reason first.
    pub fn reasons(&self) -> Vec<String> {
        std::iter::once(self.primary_reason.clone())
            .chain(self.contributing_factors.iter().map(|f| f.detail.clone()))
            .collect()
    }
}
