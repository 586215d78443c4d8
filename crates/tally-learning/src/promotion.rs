//! Derive a [`LearnedPattern`] from the feedback records of one merchant.

use std::collections::HashSet;

use tally_core::config::LearningConfig;
use tally_core::models::{FeedbackRecord, LearnedPattern};
use tally_core::Confidence;

/// Recompute the learned pattern for `merchant_pattern` from its records,
/// oldest first. `None` until enough distinct corrections exist.
///
/// - learned tag/type: most frequent corrected value, ties to the most recent
/// - confidence: `min(count_cap, base + step·count) + boost·success_rate`,
///   capped at `confidence_cap`
/// - success rate: share of records after promotion whose final value is the
///   learned one
pub fn compute_pattern(
    merchant_pattern: &str,
    records: &[FeedbackRecord],
    config: &LearningConfig,
) -> Option<LearnedPattern> {
    let records = distinct_by_id(records);

    let corrections: Vec<(usize, &FeedbackRecord)> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.is_correction())
        .map(|(i, r)| (i, *r))
        .collect();

    let min_records = config.min_records_for_promotion.max(1);
    let (promoting_index, promoting_record) = *corrections.get(min_records - 1)?;

    let learned_tag = majority(
        corrections
            .iter()
            .filter_map(|(i, r)| r.final_tag().map(|t| (*i, t.to_string()))),
    );
    let learned_type = majority(
        corrections
            .iter()
            .filter_map(|(i, r)| r.final_type().map(|t| (*i, t))),
    );
    if learned_tag.is_none() && learned_type.is_none() {
        return None;
    }

    let supports = |r: &FeedbackRecord| -> bool {
        match (&learned_tag, learned_type) {
            (Some((tag, _)), _) => r.final_tag() == Some(tag.as_str()),
            (None, Some((ty, _))) => r.final_type() == Some(ty),
            (None, None) => false,
        }
    };

    let supporting_count = learned_tag
        .as_ref()
        .map(|(_, n)| *n)
        .or(learned_type.map(|(_, n)| n))
        .unwrap_or(0);

    let subsequent = &records[promoting_index + 1..];
    let success_rate = if subsequent.is_empty() {
        0.0
    } else {
        subsequent.iter().filter(|r| supports(r)).count() as f64 / subsequent.len() as f64
    };

    let confidence = learned_confidence(supporting_count, success_rate, config);

    let last_reinforced_at = records
        .iter()
        .rev()
        .find(|r| supports(r))
        .map_or(promoting_record.created_at, |r| r.created_at);

    Some(LearnedPattern {
        merchant_pattern: merchant_pattern.to_string(),
        learned_tag: learned_tag.map(|(t, _)| t),
        learned_expense_type: learned_type.map(|(t, _)| t),
        confidence_score: Confidence::new(confidence),
        usage_count: records.len() as u64,
        supporting_count: supporting_count as u64,
        success_rate,
        promoted_at: promoting_record.created_at,
        last_reinforced_at,
    })
}

/// Count-driven confidence plus the success boost, capped.
pub fn learned_confidence(count: usize, success_rate: f64, config: &LearningConfig) -> f64 {
    let from_count = (config.base_confidence + config.confidence_step * count as f64)
        .min(config.count_confidence_cap);
    let boosted = from_count + config.success_boost * success_rate.clamp(0.0, 1.0);
    boosted.min(config.confidence_cap).clamp(0.0, 1.0)
}

fn distinct_by_id(records: &[FeedbackRecord]) -> Vec<&FeedbackRecord> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());
    records.iter().filter(|r| seen.insert(r.id.as_str())).collect()
}

/// Most frequent value; ties go to the value seen most recently.
fn majority<T: PartialEq>(values: impl Iterator<Item = (usize, T)>) -> Option<(T, usize)> {
    // (value, count, last index)
    let mut tally: Vec<(T, usize, usize)> = Vec::new();
    for (idx, value) in values {
        match tally.iter_mut().find(|(v, _, _)| *v == value) {
            Some(entry) => {
                entry.1 += 1;
                entry.2 = idx;
            }
            None => tally.push((value, 1, idx)),
        }
    }
    tally
        .into_iter()
        .max_by_key(|(_, count, last)| (*count, *last))
        .map(|(v, count, _)| (v, count))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use tally_core::models::ExpenseType;

    use super::*;

    fn correction(tx: &str, from: &str, to: &str, day: i64) -> FeedbackRecord {
        FeedbackRecord::correction(tx, "chez paul restaurant")
            .tag(Some(from), Some(to))
            .at(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap() + Duration::days(day))
    }

    #[test]
    fn one_correction_is_not_enough() {
        let records = vec![correction("t1", "divers", "restaurant", 0)];
        assert!(compute_pattern("chez paul restaurant", &records, &LearningConfig::default()).is_none());
    }

    #[test]
    fn second_correction_promotes_at_point_seven() {
        let records = vec![
            correction("t1", "divers", "restaurant", 0),
            correction("t2", "divers", "restaurant", 7),
        ];
        let p = compute_pattern("chez paul restaurant", &records, &LearningConfig::default()).unwrap();
        assert_eq!(p.learned_tag.as_deref(), Some("restaurant"));
        assert_eq!(p.supporting_count, 2);
        assert_eq!(p.usage_count, 2);
        assert_eq!(p.success_rate, 0.0);
        assert!((p.confidence_score.value() - 0.7).abs() < 1e-12);
        assert_eq!(p.promoted_at, records[1].created_at);
    }

    #[test]
    fn the_same_record_twice_counts_once() {
        let r = correction("t1", "divers", "restaurant", 0);
        let records = vec![r.clone(), r];
        assert!(compute_pattern("chez paul restaurant", &records, &LearningConfig::default()).is_none());
    }

    #[test]
    fn acceptances_do_not_promote() {
        let records: Vec<FeedbackRecord> = (0..3)
            .map(|i| {
                FeedbackRecord::acceptance(format!("t{i}"), "netflix").tag(Some("streaming"), None)
            })
            .collect();
        assert!(compute_pattern("netflix", &records, &LearningConfig::default()).is_none());
    }

    #[test]
    fn majority_ties_go_to_most_recent() {
        let records = vec![
            correction("t1", "divers", "bar", 0),
            correction("t2", "divers", "restaurant", 1),
        ];
        let p = compute_pattern("chez paul restaurant", &records, &LearningConfig::default()).unwrap();
        assert_eq!(p.learned_tag.as_deref(), Some("restaurant"));
        assert_eq!(p.supporting_count, 1);
    }

    #[test]
    fn retained_suggestions_raise_success_rate() {
        let mut records = vec![
            correction("t1", "divers", "restaurant", 0),
            correction("t2", "divers", "restaurant", 1),
        ];
        records.push(
            FeedbackRecord::acceptance("t3", "chez paul restaurant")
                .tag(Some("restaurant"), None)
                .at(Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap()),
        );
        let p = compute_pattern("chez paul restaurant", &records, &LearningConfig::default()).unwrap();
        assert_eq!(p.success_rate, 1.0);
        assert_eq!(p.usage_count, 3);
        assert!((p.confidence_score.value() - 0.9).abs() < 1e-12);
        assert_eq!(p.last_reinforced_at, records[2].created_at);
    }

    #[test]
    fn type_only_feedback_learns_a_type() {
        let records: Vec<FeedbackRecord> = (0..2)
            .map(|i| {
                FeedbackRecord::correction(format!("t{i}"), "acme gym")
                    .expense_type(Some(ExpenseType::Variable), Some(ExpenseType::Fixed))
            })
            .collect();
        let p = compute_pattern("acme gym", &records, &LearningConfig::default()).unwrap();
        assert_eq!(p.learned_tag, None);
        assert_eq!(p.learned_expense_type, Some(ExpenseType::Fixed));
    }

    #[test]
    fn confidence_is_capped() {
        let config = LearningConfig::default();
        assert_eq!(learned_confidence(50, 1.0, &config), 0.98);
        assert_eq!(learned_confidence(50, 0.0, &config), 0.95);
    }
}
