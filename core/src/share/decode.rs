//! share/decode.rs
//! Share token → session fields.
//!
//! Decoding is all-or-nothing: any failure yields `DecodedShare::invalid()`
//! rather than a half-populated result.
use tracing::warn;
use url::Url;

use crate::{
    constants::{SHARE_SCHEMA_LEGACY, SHARE_STATE_PARAM},
    share::types::{DecodedShare, ShareEnvelope, ShareError},
    types::{Mode, SessionFields},
    utils::{decode_base64, is_likely_base64},
};

/// Decode a token; malformed input is logged and reported as empty fields
/// with `payload_omitted = true`.
pub fn decode(token: &str) -> DecodedShare {
    match try_decode(token) {
        Ok(decoded) => decoded,
        Err(err) => {
            warn!(error = %err, "discarding malformed share token");
            DecodedShare::invalid()
        }
    }
}

/// Decode a token, surfacing the reason on failure.
pub fn try_decode(token: &str) -> Result<DecodedShare, ShareError> {
    let json = urlencoding::decode(token).map_err(|e| ShareError::Malformed(e.to_string()))?;
    let envelope: ShareEnvelope =
        serde_json::from_str(&json).map_err(|e| ShareError::Malformed(e.to_string()))?;
    from_envelope(envelope)
}

fn from_envelope(envelope: ShareEnvelope) -> Result<DecodedShare, ShareError> {
    let payload_omitted = envelope.data.is_none();
    let legacy = envelope.schema == SHARE_SCHEMA_LEGACY;
    // Only an explicit `c` means compress.
    let mode = Mode::from_flag(envelope.mode.as_deref().unwrap_or_default());

    let mut input = match envelope.data.as_deref() {
        Some(data) => decode_payload(data, "d")?,
        None => Vec::new(),
    };
    let mut output = match envelope.output.as_deref() {
        Some(output) if !payload_omitted => Some(decode_payload(output, "o")?),
        _ => None,
    };

    // Schema 0 carried display text: compressed bytes appear there as base64
    // (the input when decompressing, the output when compressing).
    if legacy {
        match mode {
            Mode::Decompress => input = unwrap_display_base64(input),
            Mode::Compress => output = output.map(unwrap_display_base64),
        }
    }

    let file_name = match envelope.file_name {
        // Schema 0 percent-encoded the name inside the JSON as well.
        Some(name) if legacy => Some(
            urlencoding::decode(&name)
                .map_err(|e| ShareError::Malformed(format!("f: {e}")))?
                .into_owned(),
        ),
        other => other,
    }
    .filter(|name| !name.is_empty());

    let fields = SessionFields {
        input,
        mode,
        codec_version: envelope.version.unwrap_or_default(),
        file_name,
        output,
        timestamp: envelope.timestamp.filter(|&t| t != 0),
    };

    Ok(DecodedShare { fields, payload_omitted })
}

fn decode_payload(text: &str, key: &str) -> Result<Vec<u8>, ShareError> {
    decode_base64(text).map_err(|e| ShareError::Malformed(format!("{key}: {e}")))
}

/// Bytes behind base64 display text. Text that is not base64 is kept as is.
fn unwrap_display_base64(bytes: Vec<u8>) -> Vec<u8> {
    let decoded = std::str::from_utf8(&bytes)
        .ok()
        .filter(|text| !text.is_empty() && is_likely_base64(text.trim()))
        .and_then(|text| decode_base64(text).ok());
    decoded.unwrap_or(bytes)
}

/// Raw (still percent-encoded) `state` value of `url`.
/// `Ok(None)` when the parameter is absent, which is the normal case.
pub fn token_from_url(url: &str) -> Result<Option<String>, ShareError> {
    let url = Url::parse(url).map_err(|e| ShareError::InvalidUrl(e.to_string()))?;
    let token = url.query().and_then(|query| {
        query.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (key == SHARE_STATE_PARAM && !value.is_empty()).then(|| value.to_string())
        })
    });
    Ok(token)
}

/// Decode the token carried by `url`, if any.
pub fn decode_url(url: &str) -> Option<DecodedShare> {
    match token_from_url(url) {
        Ok(token) => token.map(|token| decode(&token)),
        Err(err) => {
            warn!(error = %err, "discarding unparseable share url");
            Some(DecodedShare::invalid())
        }
    }
}
