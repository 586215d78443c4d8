//! # tally-observability
//!
//! Latency and confidence telemetry for the classifier.
//!
//! - [`PerformanceMonitor`]: rolling window per operation, p50/p95/p99,
//!   threshold alerts, snapshot reads.
//! - [`DegradationTracker`]: every fallback taken because a component failed.
//! - [`tracing_setup`]: JSON subscriber, structured events, span macros.

pub mod degradation;
pub mod monitor;
pub mod tracing_setup;
pub mod window;

pub use degradation::{DegradationEvent, DegradationTracker, RecoveryStatus, TrackedDegradation};
pub use monitor::{
    Operation, OperationStats, PerformanceAlert, PerformanceMonitor, PerformanceSnapshot,
};
pub use window::RollingWindow;
