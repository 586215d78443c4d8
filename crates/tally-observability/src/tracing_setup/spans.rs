//! Span definitions per operation: classify, suggest, batch, feedback.

/// Create a classification span.
#[macro_export]
macro_rules! classify_span {
    ($transaction_id:expr) => {
        tracing::info_span!("tally.classify", transaction_id = %$transaction_id)
    };
}

/// Create a tag suggestion span.
#[macro_export]
macro_rules! suggest_span {
    ($transaction_id:expr, $use_research:expr) => {
        tracing::info_span!(
            "tally.suggest",
            transaction_id = %$transaction_id,
            use_research = $use_research
        )
    };
}

/// Create a batch span.
#[macro_export]
macro_rules! batch_span {
    ($size:expr, $use_research:expr) => {
        tracing::info_span!("tally.batch", size = $size, use_research = $use_research)
    };
}

/// Create a feedback span.
#[macro_export]
macro_rules! feedback_span {
    ($merchant_pattern:expr) => {
        tracing::info_span!("tally.feedback", merchant_pattern = %$merchant_pattern)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const CLASSIFY: &str = "tally.classify";
    pub const SUGGEST: &str = "tally.suggest";
    pub const BATCH: &str = "tally.batch";
    pub const FEEDBACK: &str = "tally.feedback";
}
