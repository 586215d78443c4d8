//! v002: lookup index for per-merchant recomputation.

pub const MIGRATION_SQL: &str = "
CREATE INDEX IF NOT EXISTS idx_feedback_merchant
    ON feedback_records(merchant_pattern, seq);
CREATE INDEX IF NOT EXISTS idx_feedback_created
    ON feedback_records(created_at);
";
