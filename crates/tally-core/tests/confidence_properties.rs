use proptest::prelude::*;
use tally_core::Confidence;

proptest! {
    #[test]
    fn construction_always_lands_in_unit_range(v in any::<f64>()) {
        let c = Confidence::new(v).value();
        prop_assert!((0.0..=1.0).contains(&c));
    }

    #[test]
    fn arithmetic_never_escapes_unit_range(v in -2.0f64..2.0, rhs in -5.0f64..5.0) {
        let c = Confidence::new(v);
        prop_assert!((0.0..=1.0).contains(&(c * rhs).value()));
        prop_assert!((0.0..=1.0).contains(&(c - rhs).value()));
    }

    #[test]
    fn in_range_values_are_preserved(v in 0.0f64..=1.0) {
        prop_assert_eq!(Confidence::new(v).value(), v);
    }
}
