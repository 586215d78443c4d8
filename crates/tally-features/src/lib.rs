//! # tally-features
//!
//! Turns a raw bank label into a canonical merchant pattern plus the
//! token and n-gram sets used by keyword and contextual matching.
//!
//! [`normalize`] is pure, deterministic and idempotent:
//! `normalize(&normalize(x)) == normalize(x)` for every input.

pub mod normalize;
pub mod payment;
pub mod tokens;

pub use normalize::{normalize, normalize_with_marker};
pub use payment::PaymentMethod;

use serde::{Deserialize, Serialize};

/// Everything the scorer and resolvers need from one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantFeatures {
    /// Canonical merchant pattern, the learning and matching key.
    pub merchant_pattern: String,
    /// Distinct tokens in order of first appearance.
    pub tokens: Vec<String>,
    /// Bigrams and trigrams over the token sequence.
    pub ngrams: Vec<String>,
    /// Payment-method prefix stripped from the label, if any.
    pub payment_method: Option<PaymentMethod>,
}

impl MerchantFeatures {
    pub fn is_empty(&self) -> bool {
        self.merchant_pattern.is_empty()
    }

    pub fn has_token(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }
}

/// Stateless feature extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Normalize a label and derive tokens and n-grams from the result.
    pub fn extract(&self, label: &str) -> MerchantFeatures {
        let (merchant_pattern, payment_method) = normalize_with_marker(label);
        let sequence = tokens::tokenize(&merchant_pattern);
        let ngrams = tokens::ngrams(&sequence, 2, 3);
        MerchantFeatures {
            tokens: tokens::distinct(&sequence),
            ngrams,
            merchant_pattern,
            payment_method,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_populates_all_fields() {
        let f = FeatureExtractor::new().extract("PRLV SEPA ORANGE MOBILE 39.99 EUR");
        assert_eq!(f.merchant_pattern, "orange mobile");
        assert_eq!(f.tokens, vec!["orange", "mobile"]);
        assert_eq!(f.ngrams, vec!["orange mobile"]);
        assert_eq!(f.payment_method, Some(PaymentMethod::DirectDebit));
    }

    #[test]
    fn empty_after_normalization() {
        let f = FeatureExtractor::new().extract("CB 12.50");
        assert!(f.is_empty());
        assert!(f.tokens.is_empty());
        assert_eq!(f.payment_method, Some(PaymentMethod::Card));
    }
}
