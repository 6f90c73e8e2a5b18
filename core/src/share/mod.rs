//! share/mod.rs
//! Shareable state codec.
//!
//! A session's fields travel as a percent-encoded JSON map in the `state`
//! query parameter. Inputs whose base64 form exceeds the size ceiling are
//! dropped together with the output, leaving a configuration-only token.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
