/// Tally system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generic tag used when nothing better is known about a merchant.
pub const GENERIC_TAG: &str = "divers";

/// Confidence reported by the structured default result on total failure.
pub const FAILURE_CONFIDENCE: f64 = 0.1;

/// Maximum number of alternative tags carried by a suggestion.
pub const MAX_ALTERNATIVE_TAGS: usize = 3;

/// Hard cap on the confidence of any learned pattern.
pub const LEARNED_CONFIDENCE_CAP: f64 = 0.98;

/// Confidence above which a result counts as high confidence in summaries.
pub const HIGH_CONFIDENCE: f64 = 0.8;
