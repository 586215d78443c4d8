use serde::{Deserialize, Serialize};

use super::defaults;

/// Performance monitor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Samples retained per operation.
    pub window_size: usize,
    pub classify_p95_ms: f64,
    pub suggest_p95_ms: f64,
    pub batch_p95_ms: f64,
    /// Samples required in a window before alerts fire.
    pub min_samples_for_alert: usize,
    pub max_alerts_retained: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            window_size: defaults::DEFAULT_MONITOR_WINDOW,
            classify_p95_ms: defaults::DEFAULT_CLASSIFY_P95_MS,
            suggest_p95_ms: defaults::DEFAULT_SUGGEST_P95_MS,
            batch_p95_ms: defaults::DEFAULT_BATCH_P95_MS,
            min_samples_for_alert: defaults::DEFAULT_MIN_SAMPLES_FOR_ALERT,
            max_alerts_retained: defaults::DEFAULT_MAX_ALERTS_RETAINED,
        }
    }
}
