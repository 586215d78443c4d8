use tally_core::config::ScoringConfig;
use tally_core::models::SignalKind;

use super::{ScoringInput, SignalScore};

/// Regularity of the interval between occurrences.
///
/// `2 · (share of intervals within expected_period ± tolerance) − 1`:
/// all intervals monthly → +1, none → −1.
pub fn calculate(input: &ScoringInput<'_>, config: &ScoringConfig) -> Option<SignalScore> {
    if input.dates.len() < config.min_history + 1 {
        return None;
    }
    let intervals: Vec<i64> = input
        .dates
        .windows(2)
        .map(|w| (w[1] - w[0]).num_days())
        .collect();
    let regular = intervals
        .iter()
        .filter(|d| (**d - config.expected_period_days).abs() <= config.period_tolerance_days)
        .count();
    let share = regular as f64 / intervals.len() as f64;
    let score = 2.0 * share - 1.0;
    let detail = format!(
        "{regular}/{} intervals within {}±{} days",
        intervals.len(),
        config.expected_period_days,
        config.period_tolerance_days
    );
    Some(SignalScore::new(SignalKind::Frequency, score, detail))
}
