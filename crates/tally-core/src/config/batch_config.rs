use serde::{Deserialize, Serialize};

use super::defaults;

/// Batch coordinator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub max_batch_size: usize,
    /// Concurrent items in research-enabled mode.
    pub research_concurrency: usize,
    /// Per-item deadline in research-enabled mode.
    pub item_deadline_ms: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_batch_size: defaults::DEFAULT_MAX_BATCH_SIZE,
            research_concurrency: defaults::DEFAULT_RESEARCH_CONCURRENCY,
            item_deadline_ms: defaults::DEFAULT_ITEM_DEADLINE_MS,
        }
    }
}
