//! versions/types.rs
//! Registry metadata and the lookup contract.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One selectable codec version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    #[serde(default)]
    pub latest: bool,
    #[serde(default)]
    pub yanked: bool,
}

impl VersionInfo {
    pub fn new(version: impl Into<String>) -> Self {
        Self { version: version.into(), latest: false, yanked: false }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VersionMeta {
    #[serde(default)]
    pub yanked: bool,
}

/// The parts of the registry's `meta.json` the engine reads:
/// `{ "latest": "x.y.z", "versions": { "x.y.z": { "yanked": false } } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegistryMeta {
    #[serde(default)]
    pub latest: Option<String>,
    /// Required: a body without it is not registry metadata.
    pub versions: BTreeMap<String, VersionMeta>,
}

impl RegistryMeta {
    pub fn parse(json: &str) -> Result<Self, RegistryError> {
        serde_json::from_str(json).map_err(|e| RegistryError::InvalidMeta(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("registry unreachable: {0}")]
    Unreachable(String),

    #[error("registry metadata invalid: {0}")]
    InvalidMeta(String),
}

/// Fetches the version listing from the package registry.
pub trait RegistryLookup: Send {
    fn fetch(&self) -> Result<RegistryMeta, RegistryError>;
}

/// Lookup over metadata already in hand (bundled JSON, tests).
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    meta: RegistryMeta,
}

impl StaticRegistry {
    pub fn new(meta: RegistryMeta) -> Self {
        Self { meta }
    }

    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        RegistryMeta::parse(json).map(Self::new)
    }
}

impl RegistryLookup for StaticRegistry {
    fn fetch(&self) -> Result<RegistryMeta, RegistryError> {
        Ok(self.meta.clone())
    }
}
