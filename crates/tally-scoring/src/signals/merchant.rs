use tally_core::config::ScoringConfig;
use tally_core::models::{ExpenseType, SignalKind};
use tally_knowledge::{KnowledgeBase, MatchKind};

use super::{ScoringInput, SignalScore};

/// Curated merchant list lookup: whole-word matches vote ±1.0, in-token
/// substring matches vote at `substring_merchant_score`.
pub fn calculate(
    input: &ScoringInput<'_>,
    kb: &KnowledgeBase,
    config: &ScoringConfig,
) -> Option<SignalScore> {
    let found = kb.best_merchant(&input.features.merchant_pattern)?;
    let strength = match found.kind {
        MatchKind::Exact | MatchKind::Token => 1.0,
        MatchKind::Substring => config.substring_merchant_score,
    };
    let score = match found.rule.expense_type {
        ExpenseType::Fixed => strength,
        ExpenseType::Variable => -strength,
    };
    let how = match found.kind {
        MatchKind::Exact => "exact",
        MatchKind::Token => "word",
        MatchKind::Substring => "substring",
    };
    let detail = format!(
        "known merchant '{}' ({how} match, {})",
        found.rule.pattern, found.rule.expense_type
    );
    Some(
        SignalScore::new(SignalKind::MerchantPattern, score, detail)
            .with_matched(vec![found.rule.pattern.clone()]),
    )
}
