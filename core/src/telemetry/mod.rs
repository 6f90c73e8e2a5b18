//! telemetry/mod.rs
//! Metrics calculator and stage timers.
//!
//! - `metrics`: immutable per-operation snapshot (ratio, duration, throughput).
//! - `timers`: stage timings for the structured log line of a process call.

pub mod metrics;
pub mod timers;

pub use metrics::*;
pub use timers::*;
