//! Read-time decay of learned patterns that stopped being reinforced.

use chrono::{DateTime, Utc};
use tally_core::config::LearningConfig;
use tally_core::models::LearnedPattern;

/// Decay factor: 1.0 during the grace period, then halves every
/// `decay_half_life_days`. Whole days only, so results are stable within a day.
pub fn factor(last_reinforced_at: DateTime<Utc>, now: DateTime<Utc>, config: &LearningConfig) -> f64 {
    let age_days = (now - last_reinforced_at).num_days().max(0);
    let overdue = age_days - config.decay_grace_days;
    if overdue <= 0 || config.decay_half_life_days <= 0.0 {
        return 1.0;
    }
    0.5_f64.powf(overdue as f64 / config.decay_half_life_days)
}

/// Stored confidence after decay.
pub fn effective_confidence(
    pattern: &LearnedPattern,
    now: DateTime<Utc>,
    config: &LearningConfig,
) -> f64 {
    let f = factor(pattern.last_reinforced_at, now, config);
    if f >= 1.0 {
        pattern.confidence_score.value()
    } else {
        pattern.confidence_score.value() * f
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn no_decay_within_grace_period() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let config = LearningConfig::default();
        assert_eq!(factor(t0, t0 + Duration::days(90), &config), 1.0);
    }

    #[test]
    fn halves_after_one_half_life_past_grace() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let config = LearningConfig::default();
        let f = factor(t0, t0 + Duration::days(90 + 180), &config);
        assert!((f - 0.5).abs() < 1e-12);
    }

    #[test]
    fn future_timestamps_do_not_boost() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(factor(t0 + Duration::days(3), t0, &LearningConfig::default()), 1.0);
    }
}
