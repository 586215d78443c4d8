use std::sync::Arc;

use async_trait::async_trait;
use tally_core::config::ResolverConfig;
use tally_core::models::{SuggestionSource, TagSuggestion};
use tally_knowledge::KnowledgeBase;

use super::{StageOutcome, TagResolver};
use crate::context::ResolveContext;

/// Last stage: context keywords, then amount bands, then the generic tag.
/// Always answers.
pub struct HeuristicResolver {
    knowledge: Arc<KnowledgeBase>,
    config: ResolverConfig,
}

impl HeuristicResolver {
    pub fn new(knowledge: Arc<KnowledgeBase>, config: ResolverConfig) -> Self {
        Self { knowledge, config }
    }

    pub fn suggest(&self, ctx: &ResolveContext<'_>) -> TagSuggestion {
        if let Some(context) = self.knowledge.context_tag(ctx.features) {
            return TagSuggestion::new(
                context.tag.clone(),
                self.config.context_fallback_confidence,
                SuggestionSource::Fallback,
                format!("label mentions '{}'", context.keyword),
            )
            .with_alternatives(context.alternatives.iter().cloned());
        }

        let amount = ctx.transaction.amount.abs();
        if let Some(band) = self.knowledge.amount_band(amount) {
            return TagSuggestion::new(
                band.tag.clone(),
                self.config.generic_fallback_confidence,
                SuggestionSource::Fallback,
                format!("amount {amount:.2} falls in the '{}' band", band.tag),
            )
            .with_alternatives(band.alternatives.iter().cloned());
        }

        TagSuggestion::new(
            self.config.generic_tag.clone(),
            self.config.generic_fallback_confidence,
            SuggestionSource::Fallback,
            "unknown merchant, generic category",
        )
    }
}

#[async_trait]
impl TagResolver for HeuristicResolver {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    async fn resolve(&self, ctx: &ResolveContext<'_>) -> StageOutcome {
        StageOutcome::Resolved(self.suggest(ctx))
    }
}
