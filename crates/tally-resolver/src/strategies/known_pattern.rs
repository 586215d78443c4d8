use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tally_core::models::{SuggestionSource, TagSuggestion};
use tally_knowledge::KnowledgeBase;
use tally_learning::LearningEngine;
use tracing::debug;

use super::{StageOutcome, TagResolver};
use crate::context::ResolveContext;

/// Curated merchant table lookup.
pub struct KnownPatternResolver {
    knowledge: Arc<KnowledgeBase>,
    learning: Arc<LearningEngine>,
    confidence: f64,
}

impl KnownPatternResolver {
    pub fn new(knowledge: Arc<KnowledgeBase>, learning: Arc<LearningEngine>, confidence: f64) -> Self {
        Self {
            knowledge,
            learning,
            confidence,
        }
    }
}

#[async_trait]
impl TagResolver for KnownPatternResolver {
    fn name(&self) -> &'static str {
        "known_pattern"
    }

    async fn resolve(&self, ctx: &ResolveContext<'_>) -> StageOutcome {
        self.lookup(ctx).into()
    }
}

impl KnownPatternResolver {
    fn lookup(&self, ctx: &ResolveContext<'_>) -> Option<TagSuggestion> {
        let pattern = ctx.merchant_pattern();
        let hit = self.knowledge.best_merchant(pattern)?;

        // Users overrode the curated tag for this exact merchant.
        if let Some(learned) = self.learning.lookup_exact_at(pattern, Utc::now()) {
            if learned
                .pattern
                .learned_tag
                .as_deref()
                .is_some_and(|tag| tag != hit.rule.tag)
            {
                debug!(
                    merchant_pattern = %pattern,
                    rule = %hit.rule.pattern,
                    "known pattern deferred to learned pattern"
                );
                return None;
            }
        }

        Some(
            TagSuggestion::new(
                hit.rule.tag.clone(),
                self.confidence,
                SuggestionSource::KnownPattern,
                format!("known merchant '{}'", hit.rule.pattern),
            )
            .with_alternatives(hit.rule.alternatives.iter().cloned())
            .with_expense_type(Some(hit.rule.expense_type)),
        )
    }
}
