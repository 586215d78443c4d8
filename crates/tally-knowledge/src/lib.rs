//! # tally-knowledge
//!
//! Immutable rule base consulted by the scorer and the tag resolvers:
//! keyword weights, curated merchants with tags, contextual phrases,
//! context tags and amount bands for the heuristic fallback.
//!
//! Rules are data, not code. The built-in set is embedded from
//! `rules/default_rules.toml`; a different file can be swapped in through
//! `KnowledgeConfig.rules_path`. Every key is normalized on load with the
//! same function applied to labels, so rule authors can write merchant
//! names the way they appear on statements.

pub mod knowledge_base;
pub mod matching;
pub mod rules;

pub use knowledge_base::KnowledgeBase;
pub use matching::{MatchKind, MerchantMatch};
pub use rules::{AmountBand, ContextTag, MerchantRule, RuleFile};
