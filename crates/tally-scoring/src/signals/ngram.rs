use tally_core::config::ScoringConfig;
use tally_core::models::{ExpenseType, SignalKind};
use tally_knowledge::KnowledgeBase;

use super::{ScoringInput, SignalScore};

/// Contextual phrases plus the payment-method marker.
///
/// Phrase hits vote one each; the marker votes with
/// `context_lean × payment_marker_weight`. The score is the net vote
/// divided by the total vote mass.
pub fn calculate(
    input: &ScoringInput<'_>,
    kb: &KnowledgeBase,
    config: &ScoringConfig,
) -> Option<SignalScore> {
    let mut net = 0.0;
    let mut mass = 0.0;
    let mut hits: Vec<String> = Vec::new();
    let mut notes: Vec<String> = Vec::new();

    for gram in &input.features.ngrams {
        let Some(direction) = kb.phrase(gram) else {
            continue;
        };
        net += match direction {
            ExpenseType::Fixed => 1.0,
            ExpenseType::Variable => -1.0,
        };
        mass += 1.0;
        notes.push(format!("'{gram}'"));
        hits.push(gram.clone());
    }

    if let Some(method) = input.features.payment_method {
        let lean = method.context_lean() * config.payment_marker_weight;
        if lean != 0.0 {
            net += lean;
            mass += lean.abs();
            notes.push(format!("{} payment", method.as_str()));
        }
    }

    if mass == 0.0 {
        return None;
    }

    let score = net / mass;
    let detail = format!("context {}: {}", super::lean_word(score), notes.join(", "));
    Some(SignalScore::new(SignalKind::NgramContext, score, detail).with_matched(hits))
}
