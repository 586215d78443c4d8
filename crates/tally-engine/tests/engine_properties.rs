use proptest::prelude::*;
use tally_core::models::ExpenseType;
use tally_engine::TallyEngine;
use test_fixtures::{day, monthly_history, tx};

const WORDS: &[&str] = &[
    "cb", "prlv", "sepa", "netflix", "mcdonalds", "abonnement", "mensuel", "uber", "eats",
    "restaurant", "zzqx", "assurance", "carrefour", "loyer", "12.99", "paris", "vir",
];

fn label() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 1..6).prop_map(|w| w.join(" "))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn confidence_stays_in_unit_interval(
        label in label(),
        amount in 0.01f64..5_000.0,
        history in 0usize..6,
    ) {
        let engine = TallyEngine::in_memory().unwrap();
        let t = tx("p1", &label, amount).with_history(monthly_history(amount, history, day(2024, 6, 15)));
        let result = engine.classify(&t).unwrap();
        let c = result.confidence.value();
        prop_assert!((0.0..=1.0).contains(&c));
        if result.composite_score.abs() <= 0.6 {
            prop_assert_eq!(result.expense_type, ExpenseType::Variable);
        }
        prop_assert_eq!(engine.classify(&t).unwrap(), result);
    }
}
