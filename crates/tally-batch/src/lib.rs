//! # tally-batch
//!
//! Suggest tags (and classify) up to `max_batch_size` transactions at once.
//!
//! Fast mode walks the items in order. Research mode fans out with at most
//! `research_concurrency` items in flight, each under its own deadline.
//! Either way every input yields exactly one [`BatchEntry`], in input order.

pub mod coordinator;
pub mod result;

pub use coordinator::{BatchCoordinator, ItemClassifier};
pub use result::{BatchEntry, BatchResult, BatchSummary};
