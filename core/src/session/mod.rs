//! session/mod.rs
//! Processing orchestrator.
//!
//! - `core`: `Session`, the single entry point for process/history/share.
//! - `types`: requests, outcomes, the state machine.
//! - `config`: `SessionConfig`.
//! - `samples`: built-in demo inputs.

pub mod config;
pub mod core;
pub mod samples;
pub mod types;

pub use self::config::*;
pub use self::core::*;
pub use self::samples::*;
pub use self::types::*;
