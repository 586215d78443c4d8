//! Fixed-capacity window of latency/confidence samples.

use std::collections::VecDeque;
use std::time::Duration;

/// One observed call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub latency: Duration,
    /// `None` for calls that carry no single confidence (e.g. failures).
    pub confidence: Option<f64>,
}

/// Keeps the last `capacity` samples; the oldest is evicted first.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl RollingWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, sample: Sample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Latency at the given percentile (0.0–1.0), nearest rank.
    pub fn latency_percentile(&self, p: f64) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        let mut latencies: Vec<Duration> = self.samples.iter().map(|s| s.latency).collect();
        latencies.sort();
        let idx = ((p.clamp(0.0, 1.0) * (latencies.len() - 1) as f64).round() as usize)
            .min(latencies.len() - 1);
        latencies[idx]
    }

    /// Mean confidence over samples that carry one.
    pub fn avg_confidence(&self) -> Option<f64> {
        let values: Vec<f64> = self.samples.iter().filter_map(|s| s.confidence).collect();
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
