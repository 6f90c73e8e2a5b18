//! session/types.rs
//! Requests, outcomes, and the orchestrator state machine.
use std::fmt;

use crate::{
    telemetry::{PerformanceMetrics, StageTimes},
    types::{Mode, SessionFields},
};

/// Orchestrator state. A call walks
/// `Idle → Preparing → Loading → Executing → Measuring → Recording → Idle`
/// or drops to `Failed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Preparing,
    Loading,
    Executing,
    Measuring,
    Recording,
    Failed,
}

impl SessionState {
    /// Whether a new process call may start.
    pub fn accepts_work(self) -> bool {
        matches!(self, SessionState::Idle | SessionState::Failed)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle      => "idle",
            SessionState::Preparing => "preparing",
            SessionState::Loading   => "loading",
            SessionState::Executing => "executing",
            SessionState::Measuring => "measuring",
            SessionState::Recording => "recording",
            SessionState::Failed    => "failed",
        };
        f.write_str(name)
    }
}

/// Where the input bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Typed or pasted text. `base64` marks compressed input pasted as base64;
    /// it is only honored when decompressing.
    Text { text: String, base64: bool },
    /// Uploaded file, taken as raw bytes.
    File { name: String, bytes: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRequest {
    pub input: InputSource,
    pub mode: Mode,
    pub version: String,
    pub file_name: Option<String>,
}

impl ProcessRequest {
    pub fn text(text: impl Into<String>, mode: Mode, version: impl Into<String>) -> Self {
        Self {
            input: InputSource::Text { text: text.into(), base64: false },
            mode,
            version: version.into(),
            file_name: None,
        }
    }

    /// Base64 text holding compressed bytes, to be decompressed.
    pub fn base64(text: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            input: InputSource::Text { text: text.into(), base64: true },
            mode: Mode::Decompress,
            version: version.into(),
            file_name: None,
        }
    }

    pub fn file(name: impl Into<String>, bytes: impl Into<Vec<u8>>, mode: Mode, version: impl Into<String>) -> Self {
        Self {
            input: InputSource::File { name: name.into(), bytes: bytes.into() },
            mode,
            version: version.into(),
            file_name: None,
        }
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }
}

/// Display form of the codec output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputText {
    Utf8(String),
    Base64(String),
}

impl OutputText {
    pub fn as_str(&self) -> &str {
        match self {
            OutputText::Utf8(text) | OutputText::Base64(text) => text,
        }
    }

    pub fn is_base64(&self) -> bool {
        matches!(self, OutputText::Base64(_))
    }
}

/// Everything a successful process call produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOutcome {
    pub mode: Mode,
    /// Bytes handed to the codec.
    pub input: Vec<u8>,
    /// Raw codec output, e.g. for download.
    pub result: Vec<u8>,
    pub output: OutputText,
    pub metrics: PerformanceMetrics,
    /// Version that actually ran; differs from the request after a fallback.
    pub version: String,
    /// Name after the extension policy was applied.
    pub file_name: String,
    pub timestamp: i64,
    pub stage_times: StageTimes,
}

impl ProcessOutcome {
    /// Fields for building a share token.
    pub fn to_fields(&self) -> SessionFields {
        SessionFields {
            input: self.input.clone(),
            mode: self.mode,
            codec_version: self.version.clone(),
            file_name: Some(self.file_name.clone()),
            output: Some(self.result.clone()),
            timestamp: Some(self.timestamp),
        }
    }
}

/// Boundary form of a process call: an outcome or one user-facing message.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub outcome: Option<ProcessOutcome>,
    pub error: Option<String>,
}

impl RunReport {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_some()
    }
}

/// Input produced by loading a sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleInput {
    pub text: String,
    /// `text` is base64 of compressed bytes.
    pub base64: bool,
    pub file_name: String,
}
