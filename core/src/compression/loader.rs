//! compression/loader.rs
//! Owns the single active codec instance and resolves versions on demand.
//!
//! Design notes:
//! - One cached instance, keyed by the version it was loaded for.
//! - A different version drops the cached instance before resolving again,
//!   so a mismatched codec is never served.
//! - One fallback attempt to a last-known-good version; the error names the
//!   version the caller asked for.
use std::{fmt, sync::Arc};

use tracing::{debug, info, warn};

use crate::{
    compression::types::{Codec, CodecError, CodecResolver},
    constants::FALLBACK_CODEC_VERSION,
};

/// A ready codec together with the version that actually got loaded.
#[derive(Clone)]
pub struct LoadedCodec {
    pub version: String,
    pub codec: Arc<dyn Codec>,
}

impl fmt::Debug for LoadedCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedCodec")
            .field("version", &self.version)
            .field("codec", &self.codec.name())
            .finish()
    }
}

pub struct CodecLoader {
    resolver: Box<dyn CodecResolver>,
    fallback_version: String,
    active: Option<LoadedCodec>,
}

impl CodecLoader {
    pub fn new(resolver: impl CodecResolver + 'static) -> Self {
        Self::with_fallback(resolver, FALLBACK_CODEC_VERSION)
    }

    pub fn with_fallback(resolver: impl CodecResolver + 'static, fallback_version: impl Into<String>) -> Self {
        Self {
            resolver: Box::new(resolver),
            fallback_version: fallback_version.into(),
            active: None,
        }
    }

    /// Version of the cached instance, if any.
    pub fn active_version(&self) -> Option<&str> {
        self.active.as_ref().map(|loaded| loaded.version.as_str())
    }

    pub fn is_ready(&self) -> bool {
        self.active.is_some()
    }

    pub fn fallback_version(&self) -> &str {
        &self.fallback_version
    }

    /// Drop the cached instance.
    pub fn reset(&mut self) {
        self.active = None;
    }

    /// Return a codec for `version`, loading it (or the fallback) if needed.
    ///
    /// # Errors
    /// - `CodecError::Unavailable { version }` when both the requested and
    ///   the fallback version fail; `version` is the requested one.
    pub fn ensure_loaded(&mut self, version: &str) -> Result<LoadedCodec, CodecError> {
        if let Some(active) = &self.active {
            if active.version == version {
                debug!(version, "codec cache hit");
                return Ok(active.clone());
            }
            debug!(cached = %active.version, requested = version, "codec version changed, dropping cached instance");
        }
        self.active = None;

        let loaded = match self.resolver.resolve(version) {
            Ok(codec) => LoadedCodec { version: version.to_string(), codec },
            Err(err) => {
                warn!(version, error = %err, fallback = %self.fallback_version, "codec load failed");
                if version == self.fallback_version {
                    return Err(CodecError::Unavailable { version: version.to_string() });
                }
                let codec = self.resolver.resolve(&self.fallback_version).map_err(|fallback_err| {
                    warn!(version = %self.fallback_version, error = %fallback_err, "fallback codec load failed");
                    CodecError::Unavailable { version: version.to_string() }
                })?;
                LoadedCodec { version: self.fallback_version.clone(), codec }
            }
        };

        info!(version = %loaded.version, codec = %loaded.codec.name(), "codec loaded");
        self.active = Some(loaded.clone());
        Ok(loaded)
    }
}

impl fmt::Debug for CodecLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecLoader")
            .field("fallback_version", &self.fallback_version)
            .field("active", &self.active)
            .finish()
    }
}
