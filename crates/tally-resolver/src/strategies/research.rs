use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tally_core::errors::TallyError;
use tally_core::models::{SuggestionSource, TagSuggestion};
use tally_core::traits::IMerchantResearch;
use tally_observability::tracing_setup::events;
use tally_observability::{DegradationEvent, PerformanceMonitor};

use super::{StageOutcome, TagResolver};
use crate::context::ResolveContext;

/// Component name for degradation tracking.
pub const RESEARCH_COMPONENT: &str = "merchant_research";

/// External merchant research, only when the caller opted in.
pub struct ResearchResolver {
    research: Arc<dyn IMerchantResearch>,
    monitor: Arc<PerformanceMonitor>,
    timeout: Duration,
    max_confidence: f64,
}

impl ResearchResolver {
    pub fn new(
        research: Arc<dyn IMerchantResearch>,
        monitor: Arc<PerformanceMonitor>,
        timeout: Duration,
        max_confidence: f64,
    ) -> Self {
        Self {
            research,
            monitor,
            timeout,
            max_confidence,
        }
    }

    fn degrade(&self, merchant_pattern: &str, err: &TallyError, note: &str) -> StageOutcome {
        events::resolver_stage_failed(self.name(), merchant_pattern, &err.to_string());
        self.monitor.record_degradation(DegradationEvent::new(
            RESEARCH_COMPONENT,
            err.to_string(),
            "heuristic fallback",
        ));
        StageOutcome::Degraded(note.to_string())
    }
}

#[async_trait]
impl TagResolver for ResearchResolver {
    fn name(&self) -> &'static str {
        "research"
    }

    async fn resolve(&self, ctx: &ResolveContext<'_>) -> StageOutcome {
        if !ctx.use_research {
            return StageOutcome::Pass;
        }
        let pattern = ctx.merchant_pattern();
        let lookup = self.research.research(pattern, ctx.transaction.amount);

        let finding = match tokio::time::timeout(self.timeout, lookup).await {
            Ok(Ok(Some(finding))) => {
                self.monitor.mark_recovered(RESEARCH_COMPONENT);
                finding
            }
            Ok(Ok(None)) => {
                self.monitor.mark_recovered(RESEARCH_COMPONENT);
                return StageOutcome::Pass;
            }
            Ok(Err(err)) => return self.degrade(pattern, &err, "merchant research failed"),
            Err(_) => {
                let err = TallyError::ResolverTimeout {
                    stage: self.name().to_string(),
                    timeout_ms: self.timeout.as_millis() as u64,
                };
                return self.degrade(pattern, &err, "merchant research timed out");
            }
        };

        if finding.tag.trim().is_empty() {
            return StageOutcome::Pass;
        }
        StageOutcome::Resolved(
            TagSuggestion::new(
                finding.tag,
                finding.confidence.min(self.max_confidence),
                SuggestionSource::Research,
                format!("merchant research via {}: {}", self.research.name(), finding.note),
            )
            .with_alternatives(finding.alternatives)
            .with_expense_type(finding.expense_type),
        )
    }
}
