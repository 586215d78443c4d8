use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::GENERIC_TAG;

/// Tag suggestion resolver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub known_pattern_confidence: f64,
    pub research_timeout_ms: u64,
    /// Ceiling on confidence reported for externally researched tags.
    pub research_max_confidence: f64,
    pub context_fallback_confidence: f64,
    pub generic_fallback_confidence: f64,
    pub generic_tag: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            known_pattern_confidence: defaults::DEFAULT_KNOWN_PATTERN_CONFIDENCE,
            research_timeout_ms: defaults::DEFAULT_RESEARCH_TIMEOUT_MS,
            research_max_confidence: defaults::DEFAULT_RESEARCH_MAX_CONFIDENCE,
            context_fallback_confidence: defaults::DEFAULT_CONTEXT_FALLBACK_CONFIDENCE,
            generic_fallback_confidence: defaults::DEFAULT_GENERIC_FALLBACK_CONFIDENCE,
            generic_tag: GENERIC_TAG.to_string(),
        }
    }
}
