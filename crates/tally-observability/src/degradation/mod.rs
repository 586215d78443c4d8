//! Degradation tracking: every fallback taken because a component failed.

pub mod tracker;

pub use tracker::{DegradationEvent, DegradationTracker, RecoveryStatus, TrackedDegradation};
