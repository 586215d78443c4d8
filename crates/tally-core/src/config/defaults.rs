// Single source of truth for all default values.

// --- Scoring ---
pub const DEFAULT_KEYWORD_WEIGHT: f64 = 0.35;
pub const DEFAULT_MERCHANT_WEIGHT: f64 = 0.20;
pub const DEFAULT_AMOUNT_WEIGHT: f64 = 0.20;
pub const DEFAULT_NGRAM_WEIGHT: f64 = 0.15;
pub const DEFAULT_FREQUENCY_WEIGHT: f64 = 0.10;
pub const DEFAULT_DECISION_THRESHOLD: f64 = 0.6;
pub const DEFAULT_MIN_COVERAGE: f64 = 0.5;
pub const DEFAULT_STABLE_CV: f64 = 0.05;
pub const DEFAULT_UNSTABLE_CV: f64 = 0.30;
pub const DEFAULT_EXPECTED_PERIOD_DAYS: i64 = 30;
pub const DEFAULT_PERIOD_TOLERANCE_DAYS: i64 = 5;
pub const DEFAULT_MIN_HISTORY: usize = 2;
pub const DEFAULT_SUBSTRING_MERCHANT_SCORE: f64 = 0.7;
pub const DEFAULT_PAYMENT_MARKER_WEIGHT: f64 = 0.5;

// --- Learning ---
pub const DEFAULT_MIN_RECORDS_FOR_PROMOTION: usize = 2;
pub const DEFAULT_BASE_LEARNED_CONFIDENCE: f64 = 0.5;
pub const DEFAULT_CONFIDENCE_STEP: f64 = 0.1;
pub const DEFAULT_COUNT_CONFIDENCE_CAP: f64 = 0.95;
pub const DEFAULT_SUCCESS_BOOST: f64 = 0.2;
pub const DEFAULT_LEARNED_CONFIDENCE_CAP: f64 = 0.98;
pub const DEFAULT_PARTIAL_MATCH_FACTOR: f64 = 0.7;
pub const DEFAULT_PARTIAL_MATCH_MIN_LEN: usize = 3;
pub const DEFAULT_PENALTY_MIN_CORRECTIONS: u64 = 3;
pub const DEFAULT_PENALTY_MIN_RATE: f64 = 0.5;
pub const DEFAULT_MAX_PENALTY: f64 = 0.3;
pub const DEFAULT_PENALTY_FLOOR: f64 = 0.05;
pub const DEFAULT_DECAY_GRACE_DAYS: i64 = 90;
pub const DEFAULT_DECAY_HALF_LIFE_DAYS: f64 = 180.0;
pub const DEFAULT_MIN_EFFECTIVE_CONFIDENCE: f64 = 0.3;
pub const DEFAULT_STORE_RETRY_ATTEMPTS: u32 = 1;

// --- Resolver ---
pub const DEFAULT_KNOWN_PATTERN_CONFIDENCE: f64 = 0.95;
pub const DEFAULT_RESEARCH_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_RESEARCH_MAX_CONFIDENCE: f64 = 0.85;
pub const DEFAULT_CONTEXT_FALLBACK_CONFIDENCE: f64 = 0.4;
pub const DEFAULT_GENERIC_FALLBACK_CONFIDENCE: f64 = 0.2;

// --- Batch ---
pub const DEFAULT_MAX_BATCH_SIZE: usize = 200;
pub const DEFAULT_RESEARCH_CONCURRENCY: usize = 10;
pub const DEFAULT_ITEM_DEADLINE_MS: u64 = 5_000;

// --- Monitor ---
pub const DEFAULT_MONITOR_WINDOW: usize = 100;
pub const DEFAULT_CLASSIFY_P95_MS: f64 = 5.0;
pub const DEFAULT_SUGGEST_P95_MS: f64 = 50.0;
pub const DEFAULT_BATCH_P95_MS: f64 = 20_000.0;
pub const DEFAULT_MIN_SAMPLES_FOR_ALERT: usize = 20;
pub const DEFAULT_MAX_ALERTS_RETAINED: usize = 100;

// --- Engine ---
pub const DEFAULT_CLASSIFICATION_MEMO_CAPACITY: u64 = 10_000;
