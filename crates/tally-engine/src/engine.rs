//! TallyEngine: owns every service and exposes the public operations.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tally_batch::{BatchCoordinator, BatchResult};
use tally_core::config::TallyConfig;
use tally_core::errors::TallyResult;
use tally_core::models::{ClassificationResult, FeedbackAck, FeedbackRecord, TagSuggestion, Transaction};
use tally_core::traits::{IFeedbackStore, IMerchantResearch};
use tally_knowledge::KnowledgeBase;
use tally_learning::LearningEngine;
use tally_observability::{Operation, PerformanceMonitor};
use tally_resolver::TagSuggestionResolver;
use tally_scoring::EnsembleScorer;
use tally_storage::{InMemoryFeedbackStore, SqliteFeedbackStore};
use tracing::{info, Instrument};

use crate::classifier::Classifier;
use crate::stats::EngineStats;

pub struct TallyEngine {
    config: TallyConfig,
    knowledge: Arc<KnowledgeBase>,
    learning: Arc<LearningEngine>,
    classifier: Arc<Classifier>,
    resolver: Arc<TagSuggestionResolver>,
    batch: BatchCoordinator,
    monitor: Arc<PerformanceMonitor>,
}

impl TallyEngine {
    /// Validate the config, load the rule base and rebuild learned
    /// patterns from the ledger.
    pub fn new(
        config: TallyConfig,
        store: Arc<dyn IFeedbackStore>,
        research: Option<Arc<dyn IMerchantResearch>>,
    ) -> TallyResult<Self> {
        config.validate()?;
        let knowledge = Arc::new(KnowledgeBase::from_config(&config.knowledge)?);
        let learning = Arc::new(LearningEngine::open(store, config.learning.clone())?);
        let monitor = Arc::new(PerformanceMonitor::new(config.monitor.clone()));

        let classifier = Arc::new(Classifier::new(
            EnsembleScorer::new(Arc::clone(&knowledge), config.scoring.clone()),
            Arc::clone(&learning),
            config.engine.classification_memo_capacity,
        ));
        let has_research = research.is_some();
        let resolver = Arc::new(TagSuggestionResolver::new(
            Arc::clone(&knowledge),
            Arc::clone(&learning),
            research,
            Arc::clone(&monitor),
            config.resolver.clone(),
        ));
        let batch = BatchCoordinator::new(
            Arc::clone(&resolver),
            classifier.clone(),
            Arc::clone(&monitor),
            config.batch.clone(),
        );

        info!(
            merchants = knowledge.merchant_count(),
            keywords = knowledge.keyword_count(),
            learned_patterns = learning.cache().len(),
            research = has_research,
            "tally engine ready"
        );

        Ok(Self {
            config,
            knowledge,
            learning,
            classifier,
            resolver,
            batch,
            monitor,
        })
    }

    /// Default config, in-memory ledger, no research.
    pub fn in_memory() -> TallyResult<Self> {
        Self::new(
            TallyConfig::default(),
            Arc::new(InMemoryFeedbackStore::new()),
            None,
        )
    }

    /// Engine over a SQLite ledger at `db_path`.
    pub fn open(
        config: TallyConfig,
        db_path: &Path,
        research: Option<Arc<dyn IMerchantResearch>>,
    ) -> TallyResult<Self> {
        let store = SqliteFeedbackStore::open(db_path)?;
        Self::new(config, Arc::new(store), research)
    }

    pub fn config(&self) -> &TallyConfig {
        &self.config
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn learning(&self) -> &LearningEngine {
        &self.learning
    }

    pub fn monitor(&self) -> &PerformanceMonitor {
        &self.monitor
    }

    /// FIXED/VARIABLE decision. Fails only on malformed input.
    pub fn classify(&self, transaction: &Transaction) -> TallyResult<ClassificationResult> {
        let _span = tally_observability::classify_span!(transaction.id).entered();
        let start = Instant::now();
        let result = self.classifier.classify(transaction)?;
        self.monitor.record(
            Operation::Classify,
            start.elapsed(),
            Some(result.confidence.value()),
        );
        Ok(result)
    }

    /// Tag suggestion through the resolver chain. Fails only on malformed
    /// input; research runs only when `use_research` is set.
    pub async fn suggest_tag(
        &self,
        transaction: &Transaction,
        use_research: bool,
    ) -> TallyResult<TagSuggestion> {
        transaction.validate()?;
        let span = tally_observability::suggest_span!(transaction.id, use_research);
        let start = Instant::now();
        let suggestion = self
            .resolver
            .resolve(transaction, use_research)
            .instrument(span)
            .await;
        self.monitor.record(
            Operation::Suggest,
            start.elapsed(),
            Some(suggestion.confidence.value()),
        );
        Ok(suggestion)
    }

    /// Tag suggestions and classifications for up to `max_batch_size` items.
    pub async fn suggest_batch(
        &self,
        transactions: &[Transaction],
        use_research: bool,
    ) -> TallyResult<BatchResult> {
        self.batch.run(transactions, use_research).await
    }

    /// Append feedback to the ledger and relearn the merchant's pattern.
    pub fn record_feedback(&self, record: FeedbackRecord) -> TallyResult<FeedbackAck> {
        let _span = tally_observability::feedback_span!(record.merchant_pattern).entered();
        let ack = self.learning.record_feedback(record)?;
        self.classifier.invalidate();
        Ok(ack)
    }

    pub fn get_stats(&self) -> TallyResult<EngineStats> {
        Ok(EngineStats {
            performance: self.monitor.snapshot(),
            learning: self.learning.stats()?,
        })
    }
}
