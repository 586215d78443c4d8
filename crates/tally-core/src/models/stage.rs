use serde::{Deserialize, Serialize};

/// Lifecycle of a single classify/suggest request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStage {
    Received,
    Normalized,
    PatternLookup,
    LearnedMatch,
    EnsembleScored,
    ResultEmitted,
}

/// Lifecycle of a feedback submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedbackStage {
    Suggested,
    Accepted,
    Corrected,
    Recorded,
    PatternReevaluated,
}
