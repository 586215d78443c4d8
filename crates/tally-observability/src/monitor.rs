//! [`PerformanceMonitor`]: per-operation rolling latency/confidence windows.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_core::config::MonitorConfig;

use crate::degradation::{DegradationEvent, DegradationTracker};
use crate::tracing_setup::events;
use crate::window::{RollingWindow, Sample};

/// Monitored operation types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Classify,
    Suggest,
    Batch,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Classify, Operation::Suggest, Operation::Batch];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classify => "classify",
            Self::Suggest => "suggest",
            Self::Batch => "batch",
        }
    }
}

/// Raised when an operation's rolling p95 goes above its threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceAlert {
    pub operation: Operation,
    pub p95_ms: f64,
    pub threshold_ms: f64,
    pub sample_count: usize,
    pub raised_at: DateTime<Utc>,
}

/// Point-in-time view of one operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationStats {
    pub operation: Operation,
    /// Samples currently in the window.
    pub sample_count: usize,
    /// Calls observed since start.
    pub total_count: u64,
    pub p50_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub avg_confidence: Option<f64>,
    pub p95_threshold_ms: f64,
    pub alerting: bool,
}

/// Read-only snapshot for an external observability collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSnapshot {
    pub operations: Vec<OperationStats>,
    pub recent_alerts: Vec<PerformanceAlert>,
    pub total_degradations: u64,
    pub active_degradations: usize,
    pub taken_at: DateTime<Utc>,
}

impl PerformanceSnapshot {
    pub fn operation(&self, op: Operation) -> Option<&OperationStats> {
        self.operations.iter().find(|s| s.operation == op)
    }
}

#[derive(Debug)]
struct OperationState {
    window: RollingWindow,
    total: u64,
    alerting: bool,
}

#[derive(Debug)]
struct MonitorState {
    operations: HashMap<Operation, OperationState>,
    alerts: VecDeque<PerformanceAlert>,
    degradations: DegradationTracker,
}

/// Shared monitor. One short critical section per observation.
#[derive(Debug)]
pub struct PerformanceMonitor {
    config: MonitorConfig,
    state: Mutex<MonitorState>,
}

fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1_000.0
}

impl PerformanceMonitor {
    pub fn new(config: MonitorConfig) -> Self {
        let operations = Operation::ALL
            .into_iter()
            .map(|op| {
                (
                    op,
                    OperationState {
                        window: RollingWindow::new(config.window_size),
                        total: 0,
                        alerting: false,
                    },
                )
            })
            .collect();
        Self {
            state: Mutex::new(MonitorState {
                operations,
                alerts: VecDeque::new(),
                degradations: DegradationTracker::with_capacity(config.max_alerts_retained * 10),
            }),
            config,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, MonitorState> {
        // A panicked observer leaves valid counters behind; keep using them.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn threshold_ms(&self, op: Operation) -> f64 {
        match op {
            Operation::Classify => self.config.classify_p95_ms,
            Operation::Suggest => self.config.suggest_p95_ms,
            Operation::Batch => self.config.batch_p95_ms,
        }
    }

    /// Record one call. Returns an alert when the p95 newly crosses its threshold.
    pub fn record(
        &self,
        op: Operation,
        latency: Duration,
        confidence: Option<f64>,
    ) -> Option<PerformanceAlert> {
        let threshold_ms = self.threshold_ms(op);
        let min_samples = self.config.min_samples_for_alert;
        let max_alerts = self.config.max_alerts_retained;

        let mut state = self.lock();
        let entry = state.operations.get_mut(&op)?;
        entry.window.push(Sample {
            latency,
            confidence,
        });
        entry.total += 1;

        let sample_count = entry.window.len();
        let p95_ms = ms(entry.window.latency_percentile(0.95));
        let over = sample_count >= min_samples && p95_ms > threshold_ms;
        let newly_over = over && !entry.alerting;
        entry.alerting = over;

        if !newly_over {
            return None;
        }

        let alert = PerformanceAlert {
            operation: op,
            p95_ms,
            threshold_ms,
            sample_count,
            raised_at: Utc::now(),
        };
        state.alerts.push_back(alert.clone());
        while state.alerts.len() > max_alerts {
            state.alerts.pop_front();
        }
        drop(state);

        events::performance_alert(op.as_str(), p95_ms, threshold_ms);
        Some(alert)
    }

    /// Record a component failure that was absorbed by a fallback.
    pub fn record_degradation(&self, event: DegradationEvent) {
        self.lock().degradations.record(event);
    }

    pub fn mark_recovered(&self, component: &str) {
        self.lock().degradations.mark_recovered(component);
    }

    /// Degradation history (cloned).
    pub fn degradations(&self) -> DegradationTracker {
        self.lock().degradations.clone()
    }

    pub fn snapshot(&self) -> PerformanceSnapshot {
        let state = self.lock();
        let operations = Operation::ALL
            .into_iter()
            .filter_map(|op| {
                let s = state.operations.get(&op)?;
                Some(OperationStats {
                    operation: op,
                    sample_count: s.window.len(),
                    total_count: s.total,
                    p50_ms: ms(s.window.latency_percentile(0.50)),
                    p95_ms: ms(s.window.latency_percentile(0.95)),
                    p99_ms: ms(s.window.latency_percentile(0.99)),
                    avg_confidence: s.window.avg_confidence(),
                    p95_threshold_ms: self.threshold_ms(op),
                    alerting: s.alerting,
                })
            })
            .collect();
        PerformanceSnapshot {
            operations,
            recent_alerts: state.alerts.iter().cloned().collect(),
            total_degradations: state.degradations.total_recorded(),
            active_degradations: state.degradations.active_degradations().len(),
            taken_at: Utc::now(),
        }
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new(MonitorConfig::default())
    }
}
