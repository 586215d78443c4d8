use tally_core::config::ScoringConfig;
use tally_core::models::SignalKind;

use super::{ScoringInput, SignalScore};

/// Amount stability from the coefficient of variation.
///
/// CV ≤ `stable_cv` → +1, CV ≥ `unstable_cv` → −1, linear in between.
/// Needs at least `min_history` prior occurrences.
pub fn calculate(input: &ScoringInput<'_>, config: &ScoringConfig) -> Option<SignalScore> {
    if input.amounts.len() < config.min_history + 1 {
        return None;
    }
    let cv = coefficient_of_variation(input.amounts)?;
    let score = interpolate(cv, config.stable_cv, config.unstable_cv);
    let detail = format!(
        "amount variation {:.1}% over {} occurrences",
        cv * 100.0,
        input.amounts.len()
    );
    Some(SignalScore::new(SignalKind::AmountStability, score, detail))
}

/// Population CV. `None` when the mean is zero.
pub fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if mean.abs() < f64::EPSILON {
        return None;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some(variance.sqrt() / mean.abs())
}

fn interpolate(cv: f64, stable: f64, unstable: f64) -> f64 {
    if cv <= stable {
        1.0
    } else if cv >= unstable {
        -1.0
    } else {
        1.0 - 2.0 * (cv - stable) / (unstable - stable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cv_of_constant_series_is_zero() {
        assert_eq!(coefficient_of_variation(&[9.99, 9.99, 9.99]), Some(0.0));
    }

    #[test]
    fn cv_of_zero_mean_is_undefined() {
        assert_eq!(coefficient_of_variation(&[0.0, 0.0]), None);
    }

    #[test]
    fn interpolation_is_linear_between_bounds() {
        assert_eq!(interpolate(0.01, 0.05, 0.30), 1.0);
        assert_eq!(interpolate(0.50, 0.05, 0.30), -1.0);
        assert!((interpolate(0.175, 0.05, 0.30)).abs() < 1e-12);
    }
}
