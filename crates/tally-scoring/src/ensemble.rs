//! [`EnsembleScorer`]: combines the five signals into one decision.

use std::sync::Arc;

use tally_core::config::ScoringConfig;
use tally_core::models::{
    ClassificationResult, ClassificationSource, ContributingFactor, ExpenseType, SignalKind,
    Transaction,
};
use tally_core::Confidence;
use tally_features::MerchantFeatures;
use tally_knowledge::KnowledgeBase;
use tracing::debug;

use crate::signals::{self, ScoringInput, SignalScore};

/// Stateless apart from the shared knowledge base; safe to share across threads.
#[derive(Debug, Clone)]
pub struct EnsembleScorer {
    knowledge: Arc<KnowledgeBase>,
    config: ScoringConfig,
}

impl EnsembleScorer {
    pub fn new(knowledge: Arc<KnowledgeBase>, config: ScoringConfig) -> Self {
        Self { knowledge, config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn knowledge(&self) -> &Arc<KnowledgeBase> {
        &self.knowledge
    }

    fn weight(&self, signal: SignalKind) -> f64 {
        let w = &self.config.weights;
        match signal {
            SignalKind::Keyword => w.keyword,
            SignalKind::MerchantPattern => w.merchant,
            SignalKind::AmountStability => w.amount_stability,
            SignalKind::NgramContext => w.ngram,
            SignalKind::Frequency => w.frequency,
        }
    }

    /// Run every signal. Abstaining signals are omitted.
    pub fn signals(&self, features: &MerchantFeatures, tx: &Transaction) -> Vec<SignalScore> {
        let amounts = tx.amount_series();
        let dates = tx.date_series();
        let input = ScoringInput {
            features,
            amounts: &amounts,
            dates: &dates,
        };
        let kb = self.knowledge.as_ref();
        [
            signals::keyword::calculate(&input, kb),
            signals::merchant::calculate(&input, kb, &self.config),
            signals::amount::calculate(&input, &self.config),
            signals::ngram::calculate(&input, kb, &self.config),
            signals::frequency::calculate(&input, &self.config),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Classify one transaction whose label has already been through feature extraction.
    pub fn score(&self, features: &MerchantFeatures, tx: &Transaction) -> ClassificationResult {
        let votes = self.signals(features, tx);
        let coverage: f64 = votes.iter().map(|v| self.weight(v.signal)).sum();

        if coverage <= 0.0 {
            debug!(merchant = %features.merchant_pattern, "no signal had evidence");
            return ClassificationResult::default_variable(
                "no classification evidence, defaulting to VARIABLE",
            );
        }

        // Less voting weight than `min_coverage` shrinks the composite towards zero.
        let scale = (coverage / self.config.min_coverage).min(1.0);

        let mut factors: Vec<ContributingFactor> = votes
            .iter()
            .map(|v| {
                let weight = self.weight(v.signal);
                ContributingFactor {
                    signal: v.signal,
                    score: v.score,
                    weight,
                    contribution: weight * v.score / coverage * scale,
                    detail: v.detail.clone(),
                }
            })
            .collect();
        let composite = signals::clamp_unit(factors.iter().map(|f| f.contribution).sum());
        factors.sort_by(|a, b| b.contribution.abs().total_cmp(&a.contribution.abs()));

        let mut matched_patterns: Vec<String> = Vec::new();
        for m in votes.iter().flat_map(|v| v.matched.iter()) {
            if !matched_patterns.contains(m) {
                matched_patterns.push(m.clone());
            }
        }

        let threshold = self.config.decision_threshold;
        let lead = factors.first().map(|f| f.detail.as_str()).unwrap_or_default();
        let (expense_type, confidence, primary_reason) = if composite > threshold {
            (
                ExpenseType::Fixed,
                composite,
                format!("FIXED (score {composite:+.2}): {lead}"),
            )
        } else if composite < -threshold {
            (
                ExpenseType::Variable,
                composite.abs(),
                format!("VARIABLE (score {composite:+.2}): {lead}"),
            )
        } else {
            // A FIXED lean that did not clear the threshold says nothing in favour of VARIABLE.
            let confidence = if composite < 0.0 {
                composite.abs().max(Confidence::FAILURE)
            } else {
                Confidence::FAILURE
            };
            (
                ExpenseType::Variable,
                confidence,
                format!("ambiguous evidence (score {composite:+.2}), defaulting to VARIABLE"),
            )
        };

        debug!(
            merchant = %features.merchant_pattern,
            composite,
            coverage,
            expense_type = %expense_type,
            "ensemble scored"
        );

        ClassificationResult {
            expense_type,
            confidence: Confidence::new(confidence),
            primary_reason,
            contributing_factors: factors,
            matched_patterns,
            source: ClassificationSource::Ensemble,
            composite_score: composite,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tally_core::models::HistoricalOccurrence;
    use tally_features::FeatureExtractor;

    use super::*;

    fn scorer() -> EnsembleScorer {
        EnsembleScorer::new(
            Arc::new(KnowledgeBase::builtin().unwrap()),
            ScoringConfig::default(),
        )
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn classify(label: &str, amount: f64) -> ClassificationResult {
        let tx = Transaction::new("t", label, amount, day(2024, 6, 1));
        scorer().score(&FeatureExtractor::new().extract(label), &tx)
    }

    #[test]
    fn netflix_is_fixed_without_history() {
        let r = classify("NETFLIX SARL 12.99 EUR", 12.99);
        assert_eq!(r.expense_type, ExpenseType::Fixed);
        assert!(r.confidence.value() >= 0.9);
        assert!(r.matched_patterns.contains(&"netflix".to_string()));
    }

    #[test]
    fn mcdonalds_is_variable() {
        let r = classify("MCDONALDS PARIS 8.50", 8.5);
        assert_eq!(r.expense_type, ExpenseType::Variable);
        assert!(r.composite_score < -0.6);
    }

    #[test]
    fn unknown_merchant_defaults_low() {
        let r = classify("XYZCORP 47.00", 47.0);
        assert_eq!(r.expense_type, ExpenseType::Variable);
        assert_eq!(r.source, ClassificationSource::Default);
        assert!(r.confidence.value() < 0.5);
    }

    #[test]
    fn factors_ranked_by_magnitude() {
        let r = classify("CB MCDONALDS PARIS", 9.2);
        let mags: Vec<f64> = r
            .contributing_factors
            .iter()
            .map(|f| f.contribution.abs())
            .collect();
        assert!(mags.windows(2).all(|w| w[0] >= w[1]));
        let sum: f64 = r.contributing_factors.iter().map(|f| f.contribution).sum();
        assert!((sum - r.composite_score).abs() < 1e-9);
    }

    #[test]
    fn stable_monthly_history_makes_unknown_merchant_fixed() {
        let tx = Transaction::new("t", "PRLV SEPA ACME GYM CLUB", -29.0, day(2024, 4, 1))
            .with_history(vec![
                HistoricalOccurrence::new(-29.0, day(2024, 1, 1)),
                HistoricalOccurrence::new(-29.0, day(2024, 1, 31)),
                HistoricalOccurrence::new(-29.0, day(2024, 3, 2)),
            ]);
        let features = FeatureExtractor::new().extract(&tx.label);
        let r = scorer().score(&features, &tx);
        assert_eq!(r.expense_type, ExpenseType::Fixed, "{r:?}");
        assert!(r
            .contributing_factors
            .iter()
            .any(|f| f.signal == SignalKind::AmountStability && f.score == 1.0));
    }

    #[test]
    fn lone_weak_signal_stays_ambiguous() {
        // Only the card marker votes: coverage 0.15 shrinks the composite.
        let r = classify("CB ZZQX", 5.0);
        assert_eq!(r.expense_type, ExpenseType::Variable);
        assert!(r.composite_score.abs() <= 0.6);
    }

    #[test]
    fn fixed_lean_below_threshold_reports_floor_confidence() {
        let r = classify("VIR ZZQX", 5.0);
        assert!(r.composite_score > 0.0);
        assert_eq!(r.expense_type, ExpenseType::Variable);
        assert_eq!(r.confidence.value(), Confidence::FAILURE);
    }
}
