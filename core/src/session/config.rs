//! session/config.rs
use serde::{Deserialize, Serialize};

use crate::constants::{FALLBACK_CODEC_VERSION, MAX_URL_DATA_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Last-known-good codec version tried when a load fails.
    pub fallback_version: String,

    /// Max base64 input length kept inside share tokens.
    pub max_share_data_len: usize,

    /// Whether history and the latest metrics are written back to storage.
    /// - `false` keeps everything in memory (tests, previews).
    pub persist: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fallback_version: FALLBACK_CODEC_VERSION.to_string(),
            max_share_data_len: MAX_URL_DATA_SIZE,
            persist: true,
        }
    }
}

impl SessionConfig {
    pub fn new(fallback_version: Option<String>, max_share_data_len: Option<usize>, persist: Option<bool>) -> Self {
        let defaults = Self::default();
        Self {
            fallback_version: fallback_version.unwrap_or(defaults.fallback_version),
            max_share_data_len: max_share_data_len.unwrap_or(defaults.max_share_data_len),
            persist: persist.unwrap_or(defaults.persist),
        }
    }

    pub fn in_memory() -> Self {
        Self { persist: false, ..Self::default() }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
