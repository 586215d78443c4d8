//! Individual classification signals.
//!
//! Every signal is a pure function returning `None` when it has no
//! evidence for the input.

pub mod amount;
pub mod frequency;
pub mod keyword;
pub mod merchant;
pub mod ngram;

use chrono::NaiveDate;
use tally_core::models::SignalKind;
use tally_features::MerchantFeatures;

/// Everything a signal may look at for one transaction.
#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    pub features: &'a MerchantFeatures,
    /// Absolute amounts, history then current.
    pub amounts: &'a [f64],
    /// Occurrence dates, ascending, current included.
    pub dates: &'a [NaiveDate],
}

/// One signal's vote.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalScore {
    pub signal: SignalKind,
    /// In [-1, +1]; positive leans FIXED.
    pub score: f64,
    /// Human-readable evidence, e.g. the keywords that matched.
    pub detail: String,
    /// Rule keys that matched, reported as `matched_patterns`.
    pub matched: Vec<String>,
}

impl SignalScore {
    pub(crate) fn new(signal: SignalKind, score: f64, detail: String) -> Self {
        Self {
            signal,
            score: clamp_unit(score),
            detail,
            matched: Vec::new(),
        }
    }

    pub(crate) fn with_matched(mut self, matched: Vec<String>) -> Self {
        self.matched = matched;
        self
    }
}

/// Clamp to [-1, +1], mapping NaN to 0.
pub(crate) fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(-1.0, 1.0)
    }
}

pub(crate) fn lean_word(score: f64) -> &'static str {
    if score >= 0.0 {
        "fixed"
    } else {
        "variable"
    }
}
