use serde::{Deserialize, Serialize};

use super::defaults;

/// Facade-level settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Entries kept in the classification memo. Zero disables it.
    pub classification_memo_capacity: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            classification_memo_capacity: defaults::DEFAULT_CLASSIFICATION_MEMO_CAPACITY,
        }
    }
}
