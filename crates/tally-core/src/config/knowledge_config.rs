use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the rule dictionaries come from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// TOML rule file replacing the embedded defaults. `None` uses the built-ins.
    pub rules_path: Option<PathBuf>,
}
