//! compression/codecs/mod.rs
//! In-process codec implementations.

pub mod lz4;

pub use lz4::*;
