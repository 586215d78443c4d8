use std::sync::Arc;

use async_trait::async_trait;
use tally_core::models::{SuggestionSource, TagSuggestion};
use tally_learning::{LearnedMatchKind, LearningEngine};

use super::{StageOutcome, TagResolver};
use crate::context::ResolveContext;

/// Tags promoted from user corrections.
pub struct LearnedPatternResolver {
    learning: Arc<LearningEngine>,
}

impl LearnedPatternResolver {
    pub fn new(learning: Arc<LearningEngine>) -> Self {
        Self { learning }
    }
}

#[async_trait]
impl TagResolver for LearnedPatternResolver {
    fn name(&self) -> &'static str {
        "learned_pattern"
    }

    async fn resolve(&self, ctx: &ResolveContext<'_>) -> StageOutcome {
        self.lookup(ctx).into()
    }
}

impl LearnedPatternResolver {
    fn lookup(&self, ctx: &ResolveContext<'_>) -> Option<TagSuggestion> {
        let hit = self.learning.lookup(ctx.merchant_pattern())?;
        // Type-only patterns carry no tag to suggest.
        let tag = hit.pattern.learned_tag.clone()?;
        let how = match hit.kind {
            LearnedMatchKind::Exact => "exact",
            LearnedMatchKind::Partial => "partial",
        };
        Some(
            TagSuggestion::new(
                tag,
                hit.confidence,
                SuggestionSource::LearnedPattern,
                format!(
                    "learned from {} user corrections ({how} match on '{}')",
                    hit.pattern.supporting_count, hit.pattern.merchant_pattern
                ),
            )
            .with_expense_type(hit.pattern.learned_expense_type),
        )
    }
}
