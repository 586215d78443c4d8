use super::{ConfigError, InputError, StorageError};

/// Top-level error for every tally operation.
///
/// Only `Input` and `PatternStore` are surfaced by the public operations.
/// The remaining variants are raised inside the resolver chain or the
/// learned-pattern cache and are recovered locally.
#[derive(Debug, thiserror::Error)]
pub enum TallyError {
    #[error("input error: {0}")]
    Input(#[from] InputError),

    #[error("feedback persistence failed: {0}")]
    PatternStore(#[from] StorageError),

    #[error("resolver stage {stage} timed out after {timeout_ms}ms")]
    ResolverTimeout { stage: String, timeout_ms: u64 },

    #[error("learned pattern cache inconsistency: {details}")]
    CacheInconsistency { details: String },

    #[error("merchant research failed: {reason}")]
    Research { reason: String },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TallyError {
    /// Stable machine-readable code for collaborators.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Input(_) => "INPUT_ERROR",
            Self::PatternStore(_) => "PATTERN_STORE_ERROR",
            Self::ResolverTimeout { .. } => "RESOLVER_TIMEOUT",
            Self::CacheInconsistency { .. } => "CACHE_INCONSISTENCY",
            Self::Research { .. } => "RESEARCH_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Whether the error must reach the caller rather than degrade locally.
    pub fn is_surfaced(&self) -> bool {
        matches!(self, Self::Input(_) | Self::PatternStore(_) | Self::Config(_))
    }
}

pub type TallyResult<T> = Result<T, TallyError>;
