use tally_features::{normalize, FeatureExtractor, PaymentMethod};
use test_fixtures::golden_labels;

#[test]
fn golden_labels_normalize_to_their_merchant_pattern() {
    for golden in golden_labels() {
        assert_eq!(normalize(&golden.label), golden.merchant_pattern, "label {}", golden.label);
    }
}

#[test]
fn golden_prefixes_are_reported() {
    let extractor = FeatureExtractor::new();
    let by_label = |label: &str| extractor.extract(label).payment_method;
    assert_eq!(by_label("PRLV SEPA SPOTIFY AB 10.99"), Some(PaymentMethod::DirectDebit));
    assert_eq!(by_label("CB BURGER KING 12.40"), Some(PaymentMethod::Card));
    assert_eq!(by_label("PAIEMENT PAR CARTE SNCF 45,00"), Some(PaymentMethod::Card));
    assert_eq!(by_label("NETFLIX SARL 12.99 EUR"), None);
}
