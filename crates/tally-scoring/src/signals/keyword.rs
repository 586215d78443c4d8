use tally_core::models::{ExpenseType, SignalKind};
use tally_knowledge::KnowledgeBase;

use super::{ScoringInput, SignalScore};

/// Weighted keyword lookup over tokens and n-grams.
///
/// `(Σ fixed weights − Σ variable weights) / max(Σ all weights, 1.0)`,
/// so one strong keyword is enough for a full-strength vote while weak
/// or conflicting keywords pull towards zero.
pub fn calculate(input: &ScoringInput<'_>, kb: &KnowledgeBase) -> Option<SignalScore> {
    let mut fixed = 0.0;
    let mut variable = 0.0;
    let mut hits: Vec<String> = Vec::new();

    for term in input.features.tokens.iter().chain(input.features.ngrams.iter()) {
        match kb.keyword(term) {
            Some((ExpenseType::Fixed, w)) => fixed += w,
            Some((ExpenseType::Variable, w)) => variable += w,
            None => continue,
        }
        hits.push(term.clone());
    }

    if hits.is_empty() {
        return None;
    }

    let score = (fixed - variable) / (fixed + variable).max(1.0);
    let detail = format!("keyword {} matched: {}", super::lean_word(score), hits.join(", "));
    Some(SignalScore::new(SignalKind::Keyword, score, detail).with_matched(hits))
}
