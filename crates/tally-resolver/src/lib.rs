//! # tally-resolver
//!
//! Tag suggestion as an ordered chain of strategies, each behind the
//! [`TagResolver`] seam:
//!
//! 1. [`KnownPatternResolver`]: curated merchant table.
//! 2. [`LearnedPatternResolver`]: patterns promoted from user feedback.
//! 3. [`ResearchResolver`]: external lookup, opt-in and time-bounded.
//! 4. [`HeuristicResolver`]: context keywords, amount bands, generic tag.
//!
//! The first strategy to answer wins. Failing stages are recorded as
//! degradations and skipped, so [`TagSuggestionResolver::resolve`] always
//! returns a suggestion.

pub mod context;
pub mod resolver;
pub mod strategies;

pub use context::ResolveContext;
pub use resolver::TagSuggestionResolver;
pub use strategies::{
    HeuristicResolver, KnownPatternResolver, LearnedPatternResolver, ResearchResolver,
    StageOutcome, TagResolver,
};
