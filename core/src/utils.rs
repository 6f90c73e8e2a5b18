use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::{constants::LZ4_EXTENSION, types::Mode};

/// Standard (padded) base64.
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

pub fn decode_base64(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(text.trim())
}

/// Heuristic: base64 alphabet (standard or url-safe), at most two `=` at the
/// end, length a multiple of four.
pub fn is_likely_base64(text: &str) -> bool {
    let body = text.trim_end_matches('=');
    let padding = text.len() - body.len();
    padding <= 2
        && text.len() % 4 == 0
        && body
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'_' | b'-'))
}

/// Round to `places` decimals; non-finite input becomes 0.
pub fn round_to(value: f64, places: i32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Apply the extension policy: compress appends `.lz4` when absent,
/// decompress strips a trailing `.lz4`.
pub fn filename_for_mode(name: &str, mode: Mode) -> String {
    match mode {
        Mode::Compress if !name.ends_with(LZ4_EXTENSION) => format!("{name}{LZ4_EXTENSION}"),
        Mode::Decompress => name.strip_suffix(LZ4_EXTENSION).unwrap_or(name).to_string(),
        Mode::Compress => name.to_string(),
    }
}

/// Placeholder name for text input: `untitled-<iso>.txt` or `compressed-<iso>.lz4`.
/// `:` and `.` in the ISO stamp are replaced by `-`.
pub fn default_filename(mode: Mode, at: DateTime<Utc>) -> String {
    let stamp = at
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    match mode {
        Mode::Compress => format!("untitled-{stamp}.txt"),
        Mode::Decompress => format!("compressed-{stamp}{LZ4_EXTENSION}"),
    }
}

/// Current wall clock in epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
