//! Structured log events for key classifier operations.
//!
//! Each function emits a `tracing` event with an `event` field.

/// A feedback record landed in the ledger.
pub fn feedback_recorded(record_id: &str, merchant_pattern: &str, feedback_type: &str) {
    tracing::info!(
        event = "feedback_recorded",
        record_id = %record_id,
        merchant_pattern = %merchant_pattern,
        feedback_type = %feedback_type,
        "feedback recorded"
    );
}

/// A merchant pattern crossed the promotion threshold or was recomputed.
pub fn pattern_promoted(merchant_pattern: &str, learned_tag: Option<&str>, confidence: f64) {
    tracing::info!(
        event = "pattern_promoted",
        merchant_pattern = %merchant_pattern,
        learned_tag = ?learned_tag,
        confidence = confidence,
        "learned pattern promoted"
    );
}

/// A resolver stage errored or timed out; the chain moved on.
pub fn resolver_stage_failed(stage: &str, merchant_pattern: &str, error: &str) {
    tracing::warn!(
        event = "resolver_stage_failed",
        stage = %stage,
        merchant_pattern = %merchant_pattern,
        error = %error,
        "resolver stage failed"
    );
}

/// A rolling p95 exceeded its threshold.
pub fn performance_alert(operation: &str, p95_ms: f64, threshold_ms: f64) {
    tracing::warn!(
        event = "performance_alert",
        operation = %operation,
        p95_ms = p95_ms,
        threshold_ms = threshold_ms,
        "latency threshold exceeded"
    );
}

/// A component failed and a fallback was used.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

/// A batch finished.
pub fn batch_completed(total: usize, failed: usize, research: usize, elapsed_ms: u64) {
    tracing::info!(
        event = "batch_completed",
        total = total,
        failed = failed,
        research = research,
        elapsed_ms = elapsed_ms,
        "batch completed"
    );
}
