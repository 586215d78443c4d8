use std::sync::Arc;

use proptest::prelude::*;
use tally_core::config::LearningConfig;
use tally_core::models::FeedbackRecord;
use tally_learning::LearningEngine;
use tally_storage::InMemoryFeedbackStore;

fn engine() -> LearningEngine {
    LearningEngine::new(Arc::new(InMemoryFeedbackStore::new()), LearningConfig::default())
}

proptest! {
    #[test]
    fn repeating_a_correction_never_lowers_confidence(n in 2usize..15) {
        let engine = engine();
        let mut previous = 0.0;
        for i in 0..n {
            let ack = engine
                .record_feedback(
                    FeedbackRecord::correction(format!("t{i}"), "chez paul")
                        .tag(Some("divers"), Some("restaurant")),
                )
                .unwrap();
            if let Some(p) = ack.learned_pattern {
                let c = p.confidence_score.value();
                prop_assert!(c >= previous);
                prop_assert!(c <= 0.98);
                previous = c;
            }
        }
        prop_assert!(previous >= 0.7);
    }

    #[test]
    fn no_pattern_before_two_distinct_records(
        merchants in prop::collection::vec(prop::sample::select(vec!["alpha", "bravo", "charlie"]), 1..12)
    ) {
        let engine = engine();
        let mut seen: std::collections::HashMap<&str, usize> = Default::default();
        for (i, m) in merchants.iter().enumerate() {
            engine
                .record_feedback(
                    FeedbackRecord::correction(format!("t{i}"), *m).tag(None, Some("tag")),
                )
                .unwrap();
            *seen.entry(*m).or_default() += 1;
        }
        for (m, count) in seen {
            prop_assert_eq!(engine.cache().get(m).is_some(), count >= 2);
        }
    }
}
