//! share/encode.rs
//! Session fields → share token.
use tracing::debug;
use url::Url;

use crate::{
    constants::{MAX_URL_DATA_SIZE, SHARE_SCHEMA_V1, SHARE_STATE_PARAM},
    share::types::{ShareEnvelope, ShareError, ShareToken},
    types::SessionFields,
    utils::encode_base64,
};

/// Encode with the default input size ceiling.
pub fn encode(fields: &SessionFields) -> ShareToken {
    encode_with_limit(fields, MAX_URL_DATA_SIZE)
}

/// Encode `fields`, dropping both payload fields when the base64 input is
/// longer than `max_data_len`. The token then carries configuration only.
pub fn encode_with_limit(fields: &SessionFields, max_data_len: usize) -> ShareToken {
    let mut envelope = ShareEnvelope {
        schema: SHARE_SCHEMA_V1,
        data: Some(encode_base64(&fields.input)),
        mode: Some(fields.mode.flag().to_string()),
        version: Some(fields.codec_version.clone()),
        file_name: fields.file_name.clone().filter(|name| !name.is_empty()),
        output: fields.output.as_deref().map(encode_base64),
        timestamp: fields.timestamp.filter(|&t| t != 0),
    };

    let data_len = envelope.data.as_ref().map_or(0, String::len);
    let truncated = data_len > max_data_len;
    if truncated {
        debug!(data_len, max_data_len, "share payload too large, keeping configuration only");
        envelope.data = None;
        envelope.output = None;
    }

    ShareToken { token: serialize_envelope(&envelope), truncated }
}

/// JSON then percent-encoding.
pub(crate) fn serialize_envelope(envelope: &ShareEnvelope) -> String {
    // A struct of strings and integers always serializes.
    let json = serde_json::to_string(envelope).unwrap_or_default();
    urlencoding::encode(&json).into_owned()
}

/// Replace the query of `base` with `state=<token>` and drop any fragment.
pub fn share_url(base: &str, token: &ShareToken) -> Result<String, ShareError> {
    let mut url = Url::parse(base).map_err(|e| ShareError::InvalidUrl(e.to_string()))?;
    url.set_fragment(None);
    url.set_query(Some(&format!("{}={}", SHARE_STATE_PARAM, token.token)));
    Ok(url.into())
}
