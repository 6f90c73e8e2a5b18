//! compression/types.rs
//! Codec and resolver traits, plus the compression error type.
use std::sync::Arc;

use thiserror::Error;

use crate::types::Mode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The resolver has never heard of this version.
    #[error("unknown codec version: {version}")]
    UnknownVersion { version: String },

    /// The version exists but could not be brought up.
    #[error("codec {version} init failed: {msg}")]
    InitFailed { version: String, msg: String },

    /// compress/decompress rejected the payload.
    #[error("codec {codec} process failed: {msg}")]
    ProcessFailed { codec: String, msg: String },

    /// Requested and fallback versions both failed to load.
    #[error("codec unavailable: failed to load version {version}")]
    Unavailable { version: String },
}

/// A loaded compress/decompress implementation for one version.
// Sync so a loaded instance can be shared through `Arc` across threads.
pub trait Codec: Send + Sync {
    /// Human-readable name, e.g. `lz4@0.3.4`.
    fn name(&self) -> String;

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CodecError>;

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>, CodecError>;

    /// Dispatch on mode.
    fn run(&self, mode: Mode, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        match mode {
            Mode::Compress => self.compress(input),
            Mode::Decompress => self.decompress(input),
        }
    }
}

/// Resolves a version string to a callable codec.
///
/// Implementations may hit the network or a plugin directory; a failure must
/// come back as an `Err`, never as an empty codec.
pub trait CodecResolver: Send + Sync {
    fn resolve(&self, version: &str) -> Result<Arc<dyn Codec>, CodecError>;
}

impl<R: CodecResolver + ?Sized> CodecResolver for Arc<R> {
    fn resolve(&self, version: &str) -> Result<Arc<dyn Codec>, CodecError> {
        (**self).resolve(version)
    }
}
