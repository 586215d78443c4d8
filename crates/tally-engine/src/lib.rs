//! # tally-engine
//!
//! [`TallyEngine`] wires the knowledge base, scorer, learning service,
//! resolver chain, batch coordinator and performance monitor together and
//! exposes the operations collaborators call:
//!
//! - [`TallyEngine::classify`]: FIXED/VARIABLE with confidence and reasons.
//! - [`TallyEngine::suggest_tag`]: semantic tag through the resolver chain.
//! - [`TallyEngine::suggest_batch`]: up to `max_batch_size` at once.
//! - [`TallyEngine::record_feedback`]: append to the ledger, relearn.
//! - [`TallyEngine::get_stats`]: performance and learned-pattern snapshot.
//!
//! One engine per process (or per test); nothing is global.

pub mod classifier;
pub mod engine;
pub mod memo;
pub mod stats;

pub use classifier::Classifier;
pub use engine::TallyEngine;
pub use stats::EngineStats;

pub use tally_batch::{BatchEntry, BatchResult, BatchSummary};
