//! compression/registry.rs
//! In-process codec registry: version string → codec factory.
use std::{collections::HashMap, fmt, sync::Arc};

use crate::{
    compression::{
        codecs::Lz4BlockCodec,
        types::{Codec, CodecError, CodecResolver},
    },
    constants::BUILTIN_CODEC_VERSIONS,
};

/// Builds a codec for the version it was registered under.
pub type CodecFactory = Box<dyn Fn(&str) -> Result<Arc<dyn Codec>, CodecError> + Send + Sync>;

#[derive(Default)]
pub struct CodecRegistry {
    factories: HashMap<String, CodecFactory>,
}

impl CodecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry serving the LZ4 block codec for every built-in version.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for version in BUILTIN_CODEC_VERSIONS {
            registry.register(*version, |v| Ok(Arc::new(Lz4BlockCodec::new(v)) as Arc<dyn Codec>));
        }
        registry
    }

    /// Register (or replace) the factory for `version`.
    pub fn register<F>(&mut self, version: impl Into<String>, factory: F)
    where
        F: Fn(&str) -> Result<Arc<dyn Codec>, CodecError> + Send + Sync + 'static,
    {
        self.factories.insert(version.into(), Box::new(factory));
    }

    pub fn contains(&self, version: &str) -> bool {
        self.factories.contains_key(version)
    }

    /// Registered versions, sorted lexically.
    pub fn versions(&self) -> Vec<&str> {
        let mut versions: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        versions.sort_unstable();
        versions
    }
}

impl CodecResolver for CodecRegistry {
    fn resolve(&self, version: &str) -> Result<Arc<dyn Codec>, CodecError> {
        let factory = self
            .factories
            .get(version)
            .ok_or_else(|| CodecError::UnknownVersion { version: version.to_string() })?;
        factory(version)
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecRegistry").field("versions", &self.versions()).finish()
    }
}
