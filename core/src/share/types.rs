//! share/types.rs
//! Wire shape of a share token and its encode/decode results.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{constants::SHARE_SCHEMA_LEGACY, types::SessionFields};

/// Compact field map carried inside a share token.
///
/// Keys are single letters to keep URLs short. `s` tags the schema: tokens
/// without it come from the web playground (schema 0), where `f` is
/// itself percent-encoded and `d`/`o` wrap display text, so compressed bytes
/// arrive base64-encoded twice. Unknown keys are ignored so newer tokens
/// still decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareEnvelope {
    #[serde(rename = "s", default = "legacy_schema")]
    pub schema: u8,
    /// Input payload, base64.
    #[serde(rename = "d", default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// `c` for compress, `d` for decompress.
    #[serde(rename = "m", default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(rename = "v", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "f", default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Output payload, base64.
    #[serde(rename = "o", default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Epoch milliseconds.
    #[serde(rename = "t", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

fn legacy_schema() -> u8 {
    SHARE_SCHEMA_LEGACY
}

/// Result of encoding session fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareToken {
    /// Percent-encoded JSON, ready to use as a query value.
    pub token: String,
    /// Payload fields were dropped because the input was too large.
    pub truncated: bool,
}

/// Result of decoding a share token.
///
/// When `payload_omitted` is set, `fields.input` and `fields.output` carry
/// nothing meaningful; only configuration survived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedShare {
    pub fields: SessionFields,
    pub payload_omitted: bool,
}

impl DecodedShare {
    /// Empty fields with the omitted flag set; what a broken token yields.
    pub fn invalid() -> Self {
        Self { fields: SessionFields::default(), payload_omitted: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    #[error("malformed share token: {0}")]
    Malformed(String),

    #[error("invalid share url: {0}")]
    InvalidUrl(String),
}
