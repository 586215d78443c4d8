//! # tally-core
//!
//! Foundation crate for the tally expense classifier.
//! Defines the data model, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod confidence;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use confidence::Confidence;
pub use config::TallyConfig;
pub use errors::{TallyError, TallyResult};
pub use models::{
    ClassificationResult, ExpenseType, FeedbackRecord, FeedbackType, LearnedPattern,
    SuggestionSource, TagSuggestion, Transaction,
};
