//! # tally-scoring
//!
//! FIXED/VARIABLE ensemble classifier.
//!
//! Five independent signals each produce a score in [-1, +1]
//! (positive leans FIXED). A signal without evidence abstains. The
//! composite is the weight-normalized mean of the signals that voted,
//! scaled down when too little weight voted, and anything inside the
//! decision band resolves to VARIABLE.

pub mod ensemble;
pub mod signals;

pub use ensemble::EnsembleScorer;
pub use signals::{ScoringInput, SignalScore};
