use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    compression::CodecError,
    history::StorageError,
    session::SessionState,
    share::ShareError,
};

/// Direction of a codec operation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Compress,
    Decompress,
}

impl Mode {
    /// Single-character flag used by share tokens.
    pub fn flag(self) -> &'static str {
        match self {
            Mode::Compress => "c",
            Mode::Decompress => "d",
        }
    }

    /// Anything other than `"c"` reads as decompress.
    pub fn from_flag(flag: &str) -> Self {
        if flag == "c" { Mode::Compress } else { Mode::Decompress }
    }

    pub fn toggled(self) -> Self {
        match self {
            Mode::Compress => Mode::Decompress,
            Mode::Decompress => Mode::Compress,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Compress => "compress",
            Mode::Decompress => "decompress",
        })
    }
}

/// Input/output/mode/version/filename/timestamp bundle for one operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionFields {
    pub input: Vec<u8>,
    pub mode: Mode,
    pub codec_version: String,
    pub file_name: Option<String>,
    pub output: Option<Vec<u8>>,
    /// Epoch milliseconds.
    pub timestamp: Option<i64>,
}

impl SessionFields {
    pub fn new(input: impl Into<Vec<u8>>, mode: Mode, codec_version: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            mode,
            codec_version: codec_version.into(),
            ..Self::default()
        }
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    pub fn with_output(mut self, output: impl Into<Vec<u8>>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Unified session error covering codec, encoding, share, and storage failures.
/// - `From<T>` impls enable `?` across the engine.
/// - Messages are user-facing; `Session::run` surfaces them verbatim.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Neither the requested nor the fallback codec version could be loaded.
    #[error("failed to load codec version {version}")]
    CodecUnavailable { version: String },

    /// Text flagged as base64 did not decode.
    #[error("invalid base64 data, please provide valid base64-encoded compressed data ({0})")]
    InvalidEncoding(String),

    /// The codec itself rejected the payload.
    #[error("{codec} failed: {msg}")]
    CodecExecutionFailed { codec: String, msg: String },

    /// A process call arrived while another one was in flight.
    /// `Session::process` takes `&mut self` and always leaves the state at
    /// Idle or Failed, so the borrow already enforces single flight and this
    /// is not produced by the current call path.
    #[error("session busy ({state})")]
    Busy { state: SessionState },

    #[error("share token error: {0}")]
    Share(#[from] ShareError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<CodecError> for SessionError {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::Unavailable { version } => SessionError::CodecUnavailable { version },
            CodecError::ProcessFailed { codec, msg } => {
                SessionError::CodecExecutionFailed { codec, msg }
            }
            other => SessionError::CodecExecutionFailed {
                codec: "codec".into(),
                msg: other.to_string(),
            },
        }
    }
}

impl From<base64::DecodeError> for SessionError {
    fn from(e: base64::DecodeError) -> Self {
        SessionError::InvalidEncoding(e.to_string())
    }
}
