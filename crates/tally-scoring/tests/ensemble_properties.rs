use std::sync::Arc;

use chrono::NaiveDate;
use proptest::prelude::*;
use tally_core::config::ScoringConfig;
use tally_core::models::{ExpenseType, HistoricalOccurrence, Transaction};
use tally_features::FeatureExtractor;
use tally_knowledge::KnowledgeBase;
use tally_scoring::EnsembleScorer;

fn scorer() -> EnsembleScorer {
    EnsembleScorer::new(
        Arc::new(KnowledgeBase::builtin().unwrap()),
        ScoringConfig::default(),
    )
}

fn label_strategy() -> impl Strategy<Value = String> {
    let words = prop::sample::select(vec![
        "NETFLIX", "CB", "PRLV", "SEPA", "MCDONALDS", "EDF", "ABONNEMENT", "MENSUEL", "UBER",
        "EATS", "PARIS", "RESTAURANT", "XYZCORP", "12.99", "EUR", "LOYER", "VIR", "FAST", "FOOD",
    ]);
    prop::collection::vec(words, 0..6).prop_map(|w| w.join(" "))
}

fn history_strategy() -> impl Strategy<Value = Vec<HistoricalOccurrence>> {
    prop::collection::vec((0.0f64..500.0, 0u32..400), 0..8).prop_map(|items| {
        items
            .into_iter()
            .map(|(amount, offset)| {
                let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
                    + chrono::Duration::days(i64::from(offset));
                HistoricalOccurrence::new(amount, date)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn confidence_is_always_a_probability(
        label in label_strategy(),
        amount in -10_000.0f64..10_000.0,
        history in history_strategy(),
    ) {
        let tx = Transaction::new("p", label.clone(), amount, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
            .with_history(history);
        let r = scorer().score(&FeatureExtractor::new().extract(&label), &tx);
        prop_assert!((0.0..=1.0).contains(&r.confidence.value()));
        prop_assert!((-1.0..=1.0).contains(&r.composite_score));
    }

    #[test]
    fn ambiguous_composite_is_variable(
        label in label_strategy(),
        amount in 0.0f64..1_000.0,
        history in history_strategy(),
    ) {
        let tx = Transaction::new("p", label.clone(), amount, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
            .with_history(history);
        let r = scorer().score(&FeatureExtractor::new().extract(&label), &tx);
        if r.composite_score.abs() < 0.6 {
            prop_assert_eq!(r.expense_type, ExpenseType::Variable);
        }
        if r.expense_type == ExpenseType::Fixed {
            prop_assert!(r.composite_score > 0.6);
        }
    }

    #[test]
    fn scoring_is_deterministic(label in label_strategy(), amount in 0.0f64..1_000.0) {
        let tx = Transaction::new("p", label.clone(), amount, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        let features = FeatureExtractor::new().extract(&label);
        let s = scorer();
        prop_assert_eq!(s.score(&features, &tx), s.score(&features, &tx));
    }
}
