//! TagSuggestionResolver: runs the strategy chain and post-processes the
//! winning suggestion.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tally_core::config::ResolverConfig;
use tally_core::models::{TagSuggestion, Transaction};
use tally_core::traits::IMerchantResearch;
use tally_core::Confidence;
use tally_features::{FeatureExtractor, MerchantFeatures};
use tally_knowledge::KnowledgeBase;
use tally_learning::LearningEngine;
use tally_observability::PerformanceMonitor;
use tracing::debug;

use crate::context::ResolveContext;
use crate::strategies::{
    HeuristicResolver, KnownPatternResolver, LearnedPatternResolver, ResearchResolver,
    StageOutcome, TagResolver,
};

/// Ordered fallback chain for tag suggestions.
pub struct TagSuggestionResolver {
    extractor: FeatureExtractor,
    chain: Vec<Box<dyn TagResolver>>,
    heuristic: HeuristicResolver,
    learning: Arc<LearningEngine>,
    has_research: bool,
}

impl TagSuggestionResolver {
    pub fn new(
        knowledge: Arc<KnowledgeBase>,
        learning: Arc<LearningEngine>,
        research: Option<Arc<dyn IMerchantResearch>>,
        monitor: Arc<PerformanceMonitor>,
        config: ResolverConfig,
    ) -> Self {
        let mut chain: Vec<Box<dyn TagResolver>> = vec![
            Box::new(KnownPatternResolver::new(
                Arc::clone(&knowledge),
                Arc::clone(&learning),
                config.known_pattern_confidence,
            )),
            Box::new(LearnedPatternResolver::new(Arc::clone(&learning))),
        ];
        let has_research = research.is_some();
        if let Some(research) = research {
            chain.push(Box::new(ResearchResolver::new(
                research,
                monitor,
                Duration::from_millis(config.research_timeout_ms),
                config.research_max_confidence,
            )));
        }
        let heuristic = HeuristicResolver::new(knowledge, config);

        Self {
            extractor: FeatureExtractor::new(),
            chain,
            heuristic,
            learning,
            has_research,
        }
    }

    /// Whether an external research capability is wired in.
    pub fn has_research(&self) -> bool {
        self.has_research
    }

    /// Names of the stages, in the order they are tried.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.chain
            .iter()
            .map(|s| s.name())
            .chain(std::iter::once(self.heuristic.name()))
            .collect()
    }

    /// Suggest a tag. Never fails; an unknown merchant gets a fallback.
    pub async fn resolve(&self, transaction: &Transaction, use_research: bool) -> TagSuggestion {
        let features = self.extractor.extract(&transaction.label);
        self.resolve_features(transaction, &features, use_research)
            .await
    }

    /// Suggest a tag from already-extracted features.
    pub async fn resolve_features(
        &self,
        transaction: &Transaction,
        features: &MerchantFeatures,
        use_research: bool,
    ) -> TagSuggestion {
        let start = Instant::now();
        let ctx = ResolveContext::new(transaction, features, use_research);

        let mut winner = None;
        let mut notes = Vec::new();
        for stage in &self.chain {
            match stage.resolve(&ctx).await {
                StageOutcome::Resolved(suggestion) => {
                    debug!(
                        transaction_id = %transaction.id,
                        stage = stage.name(),
                        tag = %suggestion.suggested_tag,
                        "tag resolved"
                    );
                    winner = Some(suggestion);
                    break;
                }
                StageOutcome::Degraded(note) => notes.push(note),
                StageOutcome::Pass => {}
            }
        }
        let mut suggestion = winner.unwrap_or_else(|| self.heuristic.suggest(&ctx));
        for note in &notes {
            suggestion.annotate(note);
        }
        self.finish(suggestion, start)
    }

    /// Heuristic-only suggestion, for items whose resolution failed outright.
    pub fn fallback(&self, transaction: &Transaction) -> TagSuggestion {
        let start = Instant::now();
        let features = self.extractor.extract(&transaction.label);
        let ctx = ResolveContext::new(transaction, &features, false);
        self.finish(self.heuristic.suggest(&ctx), start)
    }

    fn finish(&self, mut suggestion: TagSuggestion, start: Instant) -> TagSuggestion {
        let tag = Some(suggestion.suggested_tag.as_str());
        let penalty = self
            .learning
            .penalty_for(tag, suggestion.expense_type)
            .or_else(|| {
                suggestion
                    .expense_type
                    .and_then(|_| self.learning.penalty_for(tag, None))
            });
        if let Some(penalty) = penalty {
            suggestion.confidence = Confidence::new(penalty.apply(suggestion.confidence.value()));
            suggestion.annotate(&penalty.explanation());
        }
        suggestion.processing_time = start.elapsed();
        suggestion
    }
}
