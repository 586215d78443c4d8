//! Data model shared by every tally subsystem.

pub mod classification;
pub mod feedback;
pub mod learned_pattern;
pub mod stage;
pub mod suggestion;
pub mod transaction;

pub use classification::{
    ClassificationResult, ClassificationSource, ContributingFactor, ExpenseType, SignalKind,
};
pub use feedback::{FeedbackAck, FeedbackRecord, FeedbackType};
pub use learned_pattern::LearnedPattern;
pub use stage::{FeedbackStage, RequestStage};
pub use suggestion::{SuggestionSource, TagSuggestion};
pub use transaction::{HistoricalOccurrence, Transaction};
