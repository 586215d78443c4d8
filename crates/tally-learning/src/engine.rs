//! LearningEngine: owns the ledger handle, the learned-pattern cache and
//! the correction tracker.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tally_core::config::LearningConfig;
use tally_core::errors::{StorageError, TallyError, TallyResult};
use tally_core::models::{ExpenseType, FeedbackAck, FeedbackRecord, FeedbackStage, LearnedPattern};
use tally_core::traits::IFeedbackStore;
use tally_features::normalize;
use tally_observability::tracing_setup::events;
use tracing::{debug, info, warn};

use crate::cache::LearnedPatternCache;
use crate::correction_tracker::{CorrectionKey, CorrectionTracker, Penalty};
use crate::decay;
use crate::promotion;
use crate::stats::LearningStats;

/// How a learned pattern matched a merchant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearnedMatchKind {
    Exact,
    /// The learned key and the merchant contain one another.
    Partial,
}

/// A learned pattern applicable to a merchant, with its usable confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct LearnedMatch {
    pub pattern: LearnedPattern,
    pub kind: LearnedMatchKind,
    /// Decayed, and scaled for partial matches.
    pub confidence: f64,
}

/// The feedback learning service.
///
/// One instance per process (or per test). Lookups read a snapshot of the
/// cache; ledger appends and recomputation are serialized behind
/// `recompute_lock`.
pub struct LearningEngine {
    store: Arc<dyn IFeedbackStore>,
    cache: LearnedPatternCache,
    corrections: CorrectionTracker,
    recompute_lock: Mutex<()>,
    config: LearningConfig,
}

impl LearningEngine {
    pub fn new(store: Arc<dyn IFeedbackStore>, config: LearningConfig) -> Self {
        Self {
            store,
            cache: LearnedPatternCache::new(),
            corrections: CorrectionTracker::new(),
            recompute_lock: Mutex::new(()),
            config,
        }
    }

    /// Build an engine and load every pattern already in the ledger.
    pub fn open(store: Arc<dyn IFeedbackStore>, config: LearningConfig) -> TallyResult<Self> {
        let engine = Self::new(store, config);
        engine.rebuild()?;
        Ok(engine)
    }

    pub fn config(&self) -> &LearningConfig {
        &self.config
    }

    pub fn cache(&self) -> &LearnedPatternCache {
        &self.cache
    }

    pub fn corrections(&self) -> &CorrectionTracker {
        &self.corrections
    }

    /// Append one record, then re-derive its merchant's learned pattern.
    ///
    /// The merchant pattern is normalized first, so callers may pass a raw
    /// label. A failed append is retried `store_retry_attempts` times before
    /// surfacing as [`TallyError::PatternStore`].
    pub fn record_feedback(&self, mut record: FeedbackRecord) -> TallyResult<FeedbackAck> {
        record.merchant_pattern = normalize(&record.merchant_pattern);
        record.validate()?;
        debug!(
            record_id = %record.id,
            merchant_pattern = %record.merchant_pattern,
            stage = ?record.feedback_type.stage(),
            "feedback received"
        );

        let _guard = self
            .recompute_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.append_with_retry(&record)?;
        events::feedback_recorded(
            &record.id,
            &record.merchant_pattern,
            record.feedback_type.as_str(),
        );
        self.corrections.observe(&record);

        let (stage, learned_pattern) = match self.reevaluate(&record.merchant_pattern) {
            Ok(Some(pattern)) => (FeedbackStage::PatternReevaluated, Some(pattern)),
            Ok(None) => (FeedbackStage::Recorded, None),
            Err(err) => {
                warn!(
                    merchant_pattern = %record.merchant_pattern,
                    error = %err,
                    "learned pattern recompute failed, keeping last snapshot"
                );
                (FeedbackStage::Recorded, self.cache.get(&record.merchant_pattern))
            }
        };

        Ok(FeedbackAck {
            record_id: record.id,
            merchant_pattern: record.merchant_pattern,
            stage,
            learned_pattern,
        })
    }

    fn append_with_retry(&self, record: &FeedbackRecord) -> TallyResult<()> {
        let attempts = self.config.store_retry_attempts + 1;
        let mut last_error: Option<StorageError> = None;
        for attempt in 1..=attempts {
            match self.store.append(record) {
                Ok(()) => return Ok(()),
                // A duplicate id will never succeed on retry.
                Err(e @ StorageError::AppendRejected { .. }) => {
                    return Err(TallyError::PatternStore(e));
                }
                Err(e) => {
                    warn!(
                        record_id = %record.id,
                        attempt,
                        attempts,
                        error = %e,
                        "feedback append failed"
                    );
                    last_error = Some(e);
                }
            }
        }
        Err(TallyError::PatternStore(last_error.unwrap_or(
            StorageError::Unavailable {
                reason: "no append attempt was made".to_string(),
            },
        )))
    }

    /// Recompute one merchant from the ledger and swap the result in.
    /// Caller holds `recompute_lock`.
    fn reevaluate(&self, merchant_pattern: &str) -> TallyResult<Option<LearnedPattern>> {
        let records = self
            .store
            .records_for_pattern(merchant_pattern)
            .map_err(|e| TallyError::CacheInconsistency {
                details: format!("reading records for '{merchant_pattern}': {e}"),
            })?;

        let was_learned = self.cache.get(merchant_pattern).is_some();
        match promotion::compute_pattern(merchant_pattern, &records, &self.config) {
            Some(pattern) => {
                if was_learned {
                    debug!(
                        merchant_pattern = %merchant_pattern,
                        confidence = pattern.confidence_score.value(),
                        "learned pattern recomputed"
                    );
                } else {
                    events::pattern_promoted(
                        merchant_pattern,
                        pattern.learned_tag.as_deref(),
                        pattern.confidence_score.value(),
                    );
                }
                self.cache.upsert(pattern.clone());
                Ok(Some(pattern))
            }
            None => {
                self.cache.remove(merchant_pattern);
                Ok(None)
            }
        }
    }

    /// Reload every record and recompute all patterns and correction counts.
    ///
    /// Holds `recompute_lock` from the ledger read to the swap, so feedback
    /// recorded concurrently lands either before the read or after the swap.
    pub fn rebuild(&self) -> TallyResult<usize> {
        let _guard = self
            .recompute_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let records = self.store.all_records()?;

        let mut groups: BTreeMap<&str, Vec<FeedbackRecord>> = BTreeMap::new();
        for r in &records {
            groups
                .entry(r.merchant_pattern.as_str())
                .or_default()
                .push(r.clone());
        }

        let patterns: Vec<LearnedPattern> = groups
            .par_iter()
            .filter_map(|(merchant, group)| {
                promotion::compute_pattern(merchant, group, &self.config)
            })
            .collect();

        self.corrections.clear();
        for r in &records {
            self.corrections.observe(r);
        }
        let count = patterns.len();
        self.cache.replace_all(patterns);

        info!(
            records = records.len(),
            merchants = groups.len(),
            patterns = count,
            "learned patterns rebuilt"
        );
        Ok(count)
    }

    /// Best usable learned pattern: exact beats partial.
    pub fn lookup(&self, merchant_pattern: &str) -> Option<LearnedMatch> {
        self.lookup_at(merchant_pattern, Utc::now())
    }

    pub fn lookup_at(&self, merchant_pattern: &str, now: DateTime<Utc>) -> Option<LearnedMatch> {
        self.lookup_exact_at(merchant_pattern, now)
            .or_else(|| self.lookup_partial_at(merchant_pattern, now))
    }

    pub fn lookup_exact_at(&self, merchant_pattern: &str, now: DateTime<Utc>) -> Option<LearnedMatch> {
        if merchant_pattern.is_empty() {
            return None;
        }
        let pattern = self.cache.get(merchant_pattern)?;
        let confidence = decay::effective_confidence(&pattern, now, &self.config);
        if confidence < self.config.min_effective_confidence {
            return None;
        }
        Some(LearnedMatch {
            pattern,
            kind: LearnedMatchKind::Exact,
            confidence,
        })
    }

    /// Longest learned key that contains, or is contained in, the merchant.
    pub fn lookup_partial_at(
        &self,
        merchant_pattern: &str,
        now: DateTime<Utc>,
    ) -> Option<LearnedMatch> {
        let min_len = self.config.partial_match_min_len;
        if merchant_pattern.len() < min_len {
            return None;
        }
        let snapshot = self.cache.snapshot();
        let mut candidates: Vec<&LearnedPattern> = snapshot
            .values()
            .filter(|p| {
                let key = p.merchant_pattern.as_str();
                key != merchant_pattern
                    && key.len() >= min_len
                    && (merchant_pattern.contains(key) || key.contains(merchant_pattern))
            })
            .collect();
        candidates.sort_by(|a, b| {
            b.merchant_pattern
                .len()
                .cmp(&a.merchant_pattern.len())
                .then_with(|| a.merchant_pattern.cmp(&b.merchant_pattern))
        });

        candidates.into_iter().find_map(|p| {
            let decayed = decay::effective_confidence(p, now, &self.config);
            if decayed < self.config.min_effective_confidence {
                return None;
            }
            Some(LearnedMatch {
                pattern: p.clone(),
                kind: LearnedMatchKind::Partial,
                confidence: decayed * self.config.partial_match_factor,
            })
        })
    }

    /// Penalty for suggesting `tag`/`expense_type` again, if warranted.
    pub fn penalty_for(&self, tag: Option<&str>, expense_type: Option<ExpenseType>) -> Option<Penalty> {
        self.corrections
            .penalty(&CorrectionKey::new(tag, expense_type), &self.config)
    }

    pub fn stats(&self) -> TallyResult<LearningStats> {
        let patterns: Vec<LearnedPattern> = self.cache.snapshot().values().cloned().collect();
        let total_records = self.store.count()?;
        Ok(LearningStats::from_patterns(patterns, total_records))
    }
}
