//! BatchCoordinator: per-item isolation, ordered results, bounded fan-out.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use tally_core::config::BatchConfig;
use tally_core::errors::{InputError, TallyError, TallyResult};
use tally_core::models::{ClassificationResult, TagSuggestion, Transaction};
use tally_observability::tracing_setup::events;
use tally_observability::{DegradationEvent, Operation, PerformanceMonitor};
use tally_resolver::TagSuggestionResolver;
use tracing::{warn, Instrument};

use crate::result::{BatchEntry, BatchResult, BatchSummary};

/// Component name for per-item deadline degradations.
const ITEM_DEADLINE_COMPONENT: &str = "batch_item";

/// FIXED/VARIABLE classification of one item, supplied by the caller.
pub trait ItemClassifier: Send + Sync {
    fn classify(&self, transaction: &Transaction) -> TallyResult<ClassificationResult>;
}

pub struct BatchCoordinator {
    resolver: Arc<TagSuggestionResolver>,
    classifier: Arc<dyn ItemClassifier>,
    monitor: Arc<PerformanceMonitor>,
    config: BatchConfig,
}

impl BatchCoordinator {
    pub fn new(
        resolver: Arc<TagSuggestionResolver>,
        classifier: Arc<dyn ItemClassifier>,
        monitor: Arc<PerformanceMonitor>,
        config: BatchConfig,
    ) -> Self {
        Self {
            resolver,
            classifier,
            monitor,
            config,
        }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Process a batch. Only an oversized batch is rejected; every other
    /// problem stays inside the affected item's entry.
    pub async fn run(&self, transactions: &[Transaction], use_research: bool) -> TallyResult<BatchResult> {
        if transactions.len() > self.config.max_batch_size {
            return Err(TallyError::Input(InputError::BatchTooLarge {
                size: transactions.len(),
                max: self.config.max_batch_size,
            }));
        }

        let span = tally_observability::batch_span!(transactions.len(), use_research);
        async move {
            let start = Instant::now();
            let concurrent = use_research && self.resolver.has_research();
            let results = if concurrent {
                self.run_concurrent(transactions).await
            } else {
                self.run_sequential(transactions, use_research).await
            };
            let elapsed = start.elapsed();

            let summary = BatchSummary::from_entries(&results, elapsed);
            events::batch_completed(
                summary.total_processed,
                summary.failed_count,
                summary.research_count,
                elapsed.as_millis() as u64,
            );
            self.monitor.record(
                Operation::Batch,
                elapsed,
                (!results.is_empty()).then_some(summary.average_confidence),
            );
            Ok(BatchResult { results, summary })
        }
        .instrument(span)
        .await
    }

    async fn run_sequential(&self, transactions: &[Transaction], use_research: bool) -> Vec<BatchEntry> {
        let mut results = Vec::with_capacity(transactions.len());
        for transaction in transactions {
            results.push(self.process_item(transaction, use_research).await);
        }
        results
    }

    /// At most `research_concurrency` items in flight; output keeps input order.
    async fn run_concurrent(&self, transactions: &[Transaction]) -> Vec<BatchEntry> {
        let deadline = Duration::from_millis(self.config.item_deadline_ms);
        stream::iter(transactions)
            .map(|transaction| async move {
                match tokio::time::timeout(deadline, self.process_item(transaction, true)).await {
                    Ok(entry) => entry,
                    Err(_) => self.after_deadline(transaction, deadline).await,
                }
            })
            .buffered(self.config.research_concurrency.max(1))
            .collect()
            .await
    }

    /// The item ran past its deadline: resolve it again without research.
    async fn after_deadline(&self, transaction: &Transaction, deadline: Duration) -> BatchEntry {
        let err = TallyError::ResolverTimeout {
            stage: "batch_item".to_string(),
            timeout_ms: deadline.as_millis() as u64,
        };
        events::resolver_stage_failed(ITEM_DEADLINE_COMPONENT, &transaction.label, &err.to_string());
        self.monitor.record_degradation(DegradationEvent::new(
            ITEM_DEADLINE_COMPONENT,
            err.to_string(),
            "fast chain",
        ));
        let mut entry = self.process_item(transaction, false).await;
        entry.suggestion.annotate("research deadline exceeded");
        entry
    }

    async fn process_item(&self, transaction: &Transaction, use_research: bool) -> BatchEntry {
        if let Err(err) = transaction.validate() {
            warn!(transaction_id = %transaction.id, error = %err, "batch item rejected");
            return BatchEntry {
                transaction_id: transaction.id.clone(),
                suggestion: TagSuggestion::fallback_default(err.to_string()),
                classification: ClassificationResult::default_variable(err.to_string()),
                error: Some(err.to_string()),
            };
        }

        let suggestion = self.resolver.resolve(transaction, use_research).await;
        let (classification, error) = match self.classifier.classify(transaction) {
            Ok(result) => (result, None),
            Err(err) => {
                warn!(transaction_id = %transaction.id, error = %err, "batch item classification failed");
                (
                    ClassificationResult::default_variable(err.to_string()),
                    Some(err.to_string()),
                )
            }
        };
        BatchEntry {
            transaction_id: transaction.id.clone(),
            suggestion,
            classification,
            error,
        }
    }
}
