//! Doubles for the external merchant research capability.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tally_core::errors::{TallyError, TallyResult};
use tally_core::models::ExpenseType;
use tally_core::traits::{IMerchantResearch, ResearchFinding};

/// Answers from a fixed table and counts calls.
#[derive(Debug, Default)]
pub struct StaticResearch {
    findings: HashMap<String, ResearchFinding>,
    calls: AtomicUsize,
}

impl StaticResearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, merchant_pattern: &str, tag: &str, confidence: f64) -> Self {
        self.findings.insert(
            merchant_pattern.to_string(),
            ResearchFinding {
                tag: tag.to_string(),
                confidence,
                expense_type: Some(ExpenseType::Variable),
                alternatives: vec!["divers".to_string()],
                note: "static directory".to_string(),
            },
        );
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IMerchantResearch for StaticResearch {
    fn name(&self) -> &str {
        "static"
    }

    async fn research(
        &self,
        merchant_pattern: &str,
        _amount: f64,
    ) -> TallyResult<Option<ResearchFinding>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.findings.get(merchant_pattern).cloned())
    }
}

/// Sleeps before answering; tracks peak concurrency.
#[derive(Debug)]
pub struct SlowResearch {
    delay: Duration,
    tag: String,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl SlowResearch {
    pub fn new(delay: Duration, tag: &str) -> Self {
        Self {
            delay,
            tag: tag.to_string(),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IMerchantResearch for SlowResearch {
    fn name(&self) -> &str {
        "slow"
    }

    async fn research(
        &self,
        _merchant_pattern: &str,
        _amount: f64,
    ) -> TallyResult<Option<ResearchFinding>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(Some(ResearchFinding {
            tag: self.tag.clone(),
            confidence: 0.8,
            expense_type: None,
            alternatives: Vec::new(),
            note: "slow directory".to_string(),
        }))
    }
}

/// Always errors.
#[derive(Debug, Default)]
pub struct FailingResearch {
    calls: AtomicUsize,
}

impl FailingResearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IMerchantResearch for FailingResearch {
    fn name(&self) -> &str {
        "failing"
    }

    async fn research(
        &self,
        _merchant_pattern: &str,
        _amount: f64,
    ) -> TallyResult<Option<ResearchFinding>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(TallyError::Research {
            reason: "directory returned 503".to_string(),
        })
    }
}
