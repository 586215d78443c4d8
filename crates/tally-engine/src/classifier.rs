//! Single-transaction FIXED/VARIABLE classification.
//!
//! Order: memo, learned pattern carrying an expense type, ensemble. The
//! correction penalty for the chosen type is applied last.

use std::sync::Arc;

use tally_batch::ItemClassifier;
use tally_core::errors::TallyResult;
use tally_core::models::{ClassificationResult, ClassificationSource, RequestStage, Transaction};
use tally_core::Confidence;
use tally_features::FeatureExtractor;
use tally_learning::{LearnedMatch, LearnedMatchKind, LearningEngine};
use tally_scoring::EnsembleScorer;
use tracing::debug;

use crate::memo::ClassificationMemo;

pub struct Classifier {
    extractor: FeatureExtractor,
    scorer: EnsembleScorer,
    learning: Arc<LearningEngine>,
    memo: ClassificationMemo,
}

impl Classifier {
    pub fn new(scorer: EnsembleScorer, learning: Arc<LearningEngine>, memo_capacity: u64) -> Self {
        Self {
            extractor: FeatureExtractor::new(),
            scorer,
            learning,
            memo: ClassificationMemo::new(memo_capacity),
        }
    }

    pub fn scorer(&self) -> &EnsembleScorer {
        &self.scorer
    }

    /// Drop memoized results; learned state changed.
    pub fn invalidate(&self) {
        self.memo.invalidate_all();
    }

    pub fn classify(&self, transaction: &Transaction) -> TallyResult<ClassificationResult> {
        transaction.validate()?;
        let features = self.extractor.extract(&transaction.label);

        let key = ClassificationMemo::key(&features.merchant_pattern, transaction);
        let generation = self.memo.generation();
        if let Some(hit) = self.memo.get(&key) {
            return Ok(hit);
        }

        let learned = self
            .learning
            .lookup(&features.merchant_pattern)
            .and_then(|m| learned_result(&m));
        let mut result = match learned {
            Some(result) => {
                debug!(
                    transaction_id = %transaction.id,
                    merchant_pattern = %features.merchant_pattern,
                    stage = ?RequestStage::LearnedMatch,
                    "classified from learned pattern"
                );
                result
            }
            None => {
                let result = self.scorer.score(&features, transaction);
                debug!(
                    transaction_id = %transaction.id,
                    stage = ?RequestStage::EnsembleScored,
                    composite = result.composite_score,
                    "classified by ensemble"
                );
                result
            }
        };

        if let Some(penalty) = self.learning.penalty_for(None, Some(result.expense_type)) {
            result.confidence = Confidence::new(penalty.apply(result.confidence.value()));
            result.primary_reason = format!("{}; {}", result.primary_reason, penalty.explanation());
        }

        self.memo.insert(key, generation, result.clone());
        Ok(result)
    }
}

impl ItemClassifier for Classifier {
    fn classify(&self, transaction: &Transaction) -> TallyResult<ClassificationResult> {
        Classifier::classify(self, transaction)
    }
}

/// Type-bearing learned patterns override the ensemble.
fn learned_result(hit: &LearnedMatch) -> Option<ClassificationResult> {
    let expense_type = hit.pattern.learned_expense_type?;
    let source = match hit.kind {
        LearnedMatchKind::Exact => ClassificationSource::LearnedExact,
        LearnedMatchKind::Partial => ClassificationSource::LearnedPartial,
    };
    Some(ClassificationResult {
        expense_type,
        confidence: Confidence::new(hit.confidence),
        primary_reason: format!(
            "learned {} from {} user corrections on '{}'",
            expense_type.as_str(),
            hit.pattern.supporting_count,
            hit.pattern.merchant_pattern
        ),
        contributing_factors: Vec::new(),
        matched_patterns: vec![hit.pattern.merchant_pattern.clone()],
        source,
        composite_score: 0.0,
    })
}
