//! Tag suggestion strategies, tried in order.

pub mod heuristic;
pub mod known_pattern;
pub mod learned;
pub mod research;

pub use heuristic::HeuristicResolver;
pub use known_pattern::KnownPatternResolver;
pub use learned::LearnedPatternResolver;
pub use research::ResearchResolver;

use async_trait::async_trait;
use tally_core::models::TagSuggestion;

use crate::context::ResolveContext;

/// What one stage made of a transaction.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome {
    Resolved(TagSuggestion),
    /// Nothing to say; try the next stage.
    Pass,
    /// The stage failed. The note is carried onto the final suggestion.
    Degraded(String),
}

impl From<Option<TagSuggestion>> for StageOutcome {
    fn from(value: Option<TagSuggestion>) -> Self {
        value.map_or(Self::Pass, Self::Resolved)
    }
}

/// One stage of the suggestion chain.
///
/// Stages never fail outward; an internal error is reported as
/// [`StageOutcome::Degraded`] and the chain moves on.
#[async_trait]
pub trait TagResolver: Send + Sync {
    /// Stage name used in logs and degradation events.
    fn name(&self) -> &'static str;

    async fn resolve(&self, ctx: &ResolveContext<'_>) -> StageOutcome;
}
