//! compression/mod.rs
//! Versioned codec loading.
//!
//! - `types`: `Codec` / `CodecResolver` traits and `CodecError`.
//! - `codecs`: in-process codec implementations (LZ4 block).
//! - `registry`: version → factory table, itself a `CodecResolver`.
//! - `loader`: single active instance cache with fallback.

pub mod constants;
pub mod types;
pub mod codecs;
pub mod registry;
pub mod loader;

pub use constants::*;
pub use types::*;
pub use codecs::*;
pub use registry::*;
pub use loader::*;
