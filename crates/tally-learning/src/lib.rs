//! # tally-learning
//!
//! The feedback loop. Every user correction or acceptance is appended to an
//! [`IFeedbackStore`](tally_core::traits::IFeedbackStore); the records of the
//! affected merchant are then re-read and the merchant's
//! [`LearnedPattern`](tally_core::LearnedPattern) recomputed from scratch and
//! swapped into the [`LearnedPatternCache`].
//!
//! Learned patterns are derived state only. [`LearningEngine::rebuild`]
//! reproduces the whole cache from the ledger.

pub mod cache;
pub mod correction_tracker;
pub mod decay;
pub mod engine;
pub mod promotion;
pub mod stats;

pub use cache::LearnedPatternCache;
pub use correction_tracker::{CorrectionKey, CorrectionTracker, Penalty};
pub use engine::{LearnedMatch, LearnedMatchKind, LearningEngine};
pub use stats::LearningStats;
