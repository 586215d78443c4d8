//! Configuration for every tally subsystem.
//!
//! Resolution order (highest priority first):
//! 1. Environment variables (`TALLY_*`)
//! 2. TOML config file passed to [`TallyConfig::load`]
//! 3. Compiled defaults (see [`defaults`])

pub mod batch_config;
pub mod defaults;
pub mod engine_config;
pub mod knowledge_config;
pub mod learning_config;
pub mod monitor_config;
pub mod resolver_config;
pub mod scoring_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use batch_config::BatchConfig;
pub use engine_config::EngineConfig;
pub use knowledge_config::KnowledgeConfig;
pub use learning_config::LearningConfig;
pub use monitor_config::MonitorConfig;
pub use resolver_config::ResolverConfig;
pub use scoring_config::{ScoringConfig, SignalWeights};

use crate::errors::ConfigError;

/// Tolerance used when checking that signal weights sum to 1.0.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Top-level configuration aggregating all sub-configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyConfig {
    pub scoring: ScoringConfig,
    pub learning: LearningConfig,
    pub resolver: ResolverConfig,
    pub batch: BatchConfig,
    pub monitor: MonitorConfig,
    pub knowledge: KnowledgeConfig,
    pub engine: EngineConfig,
}

impl TallyConfig {
    /// Load a TOML file over the compiled defaults, apply `TALLY_*`
    /// environment overrides, and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let mut config: TallyConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.apply_env_overrides_from(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing and embedding).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: TallyConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
                path: "<string>".to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides using the given variable lookup.
    /// Unparseable values are ignored.
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("TALLY_BATCH_MAX_SIZE").and_then(|v| v.parse().ok()) {
            self.batch.max_batch_size = v;
        }
        if let Some(v) = lookup("TALLY_RESEARCH_CONCURRENCY").and_then(|v| v.parse().ok()) {
            self.batch.research_concurrency = v;
        }
        if let Some(v) = lookup("TALLY_RESEARCH_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            self.resolver.research_timeout_ms = v;
        }
        if let Some(v) = lookup("TALLY_RULES_PATH") {
            self.knowledge.rules_path = Some(v.into());
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sum = self.scoring.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::ValidationFailed {
                field: "scoring.weights".to_string(),
                message: format!("weights must sum to 1.0, got {sum:.6}"),
            });
        }
        let w = &self.scoring.weights;
        for (name, value) in [
            ("keyword", w.keyword),
            ("merchant", w.merchant),
            ("amount_stability", w.amount_stability),
            ("ngram", w.ngram),
            ("frequency", w.frequency),
        ] {
            if value < 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: format!("scoring.weights.{name}"),
                    message: "must not be negative".to_string(),
                });
            }
        }
        check_unit_interval("scoring.decision_threshold", self.scoring.decision_threshold, false)?;
        check_unit_interval("scoring.min_coverage", self.scoring.min_coverage, false)?;
        if self.scoring.stable_cv >= self.scoring.unstable_cv {
            return Err(ConfigError::ValidationFailed {
                field: "scoring.stable_cv".to_string(),
                message: "must be below scoring.unstable_cv".to_string(),
            });
        }
        check_unit_interval("learning.confidence_cap", self.learning.confidence_cap, true)?;
        check_unit_interval(
            "learning.count_confidence_cap",
            self.learning.count_confidence_cap,
            true,
        )?;
        check_unit_interval(
            "learning.partial_match_factor",
            self.learning.partial_match_factor,
            true,
        )?;
        check_unit_interval("learning.max_penalty", self.learning.max_penalty, true)?;
        if self.learning.min_records_for_promotion == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "learning.min_records_for_promotion".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.learning.decay_half_life_days <= 0.0 {
            return Err(ConfigError::ValidationFailed {
                field: "learning.decay_half_life_days".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        check_unit_interval(
            "resolver.known_pattern_confidence",
            self.resolver.known_pattern_confidence,
            true,
        )?;
        if self.batch.max_batch_size == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "batch.max_batch_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.batch.research_concurrency == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "batch.research_concurrency".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.monitor.window_size == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "monitor.window_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

fn check_unit_interval(field: &str, value: f64, allow_zero: bool) -> Result<(), ConfigError> {
    let lower_ok = if allow_zero { value >= 0.0 } else { value > 0.0 };
    if !(lower_ok && value <= 1.0) {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: "must be within (0.0, 1.0]".to_string(),
        });
    }
    Ok(())
}
