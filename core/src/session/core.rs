//! session/core.rs
//! Processing orchestrator: the stable public API of the engine.
//!
//! Design notes:
//! - `Session` owns the codec loader, the history log and the latest-metrics
//!   snapshot; nothing else mutates them.
//! - History and metrics are only written on the Recording step, so a failed
//!   call leaves them untouched.
//! - `run` is the boundary form: every error becomes one message string.
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::{
    compression::{CodecLoader, CodecRegistry, CodecResolver},
    constants::{DEFAULT_CHART_POINTS, METRICS_STORAGE_KEY},
    history::{
        load_json, save_json, HistoryEntry, HistoryFilter, HistoryStore, KeyValueStore, MemoryStore,
        Page,
    },
    session::{
        config::SessionConfig,
        samples::sample_by_id,
        types::{
            InputSource, OutputText, ProcessOutcome, ProcessRequest, RunReport, SampleInput,
            SessionState,
        },
    },
    share::{self, DecodedShare, ShareToken},
    telemetry::{OperationTimer, PerformanceMetrics, Stage},
    types::{Mode, SessionError, SessionFields},
    utils::{decode_base64, default_filename, encode_base64, filename_for_mode, now_millis},
};

pub struct Session {
    config: SessionConfig,
    loader: CodecLoader,
    history: HistoryStore,
    latest_metrics: Option<PerformanceMetrics>,
    storage: Box<dyn KeyValueStore>,
    state: SessionState,
    /// Timestamp of the last recorded operation.
    last_processed: Option<i64>,
    last_timestamp: i64,
}

impl Session {
    /// Build a session, restoring history and the latest metrics from `storage`.
    /// Unreadable stored data is discarded.
    pub fn new(
        resolver: impl CodecResolver + 'static,
        storage: impl KeyValueStore + 'static,
        config: SessionConfig,
    ) -> Self {
        let history = HistoryStore::load(&storage);
        let latest_metrics = load_json::<PerformanceMetrics>(&storage, METRICS_STORAGE_KEY)
            .unwrap_or_else(|err| {
                warn!(error = %err, "latest metrics unreadable, discarding");
                None
            });
        let last_timestamp = history.entries().iter().map(HistoryEntry::timestamp).max().unwrap_or(0);
        debug!(entries = history.len(), "session restored");

        Self {
            loader: CodecLoader::with_fallback(resolver, config.fallback_version.clone()),
            config,
            history,
            latest_metrics,
            storage: Box::new(storage),
            state: SessionState::Idle,
            last_processed: None,
            last_timestamp,
        }
    }

    /// Built-in LZ4 codecs, in-memory storage.
    pub fn builtin() -> Self {
        Self::new(CodecRegistry::builtin(), MemoryStore::new(), SessionConfig::default())
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn latest_metrics(&self) -> Option<&PerformanceMetrics> {
        self.latest_metrics.as_ref()
    }

    pub fn last_processed(&self) -> Option<i64> {
        self.last_processed
    }

    pub fn loader(&self) -> &CodecLoader {
        &self.loader
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    /// Run one operation end to end.
    ///
    /// # Errors
    /// - `Busy` if a call is already in flight.
    /// - `InvalidEncoding` for base64 text that does not decode.
    /// - `CodecUnavailable` when neither the requested nor the fallback version loads.
    /// - `CodecExecutionFailed` when the codec rejects the payload.
    pub fn process(&mut self, request: ProcessRequest) -> Result<ProcessOutcome, SessionError> {
        if !self.state.accepts_work() {
            return Err(SessionError::Busy { state: self.state });
        }
        match self.execute(request) {
            Ok(outcome) => {
                self.state = SessionState::Idle;
                Ok(outcome)
            }
            Err(err) => {
                warn!(state = %self.state, error = %err, "process failed");
                self.state = SessionState::Failed;
                Err(err)
            }
        }
    }

    /// `process`, with any error turned into a single message.
    pub fn run(&mut self, request: ProcessRequest) -> RunReport {
        match self.process(request) {
            Ok(outcome) => RunReport { outcome: Some(outcome), error: None },
            Err(err) => RunReport { outcome: None, error: Some(err.to_string()) },
        }
    }

    fn execute(&mut self, request: ProcessRequest) -> Result<ProcessOutcome, SessionError> {
        let mut timer = OperationTimer::new();
        let ProcessRequest { input, mode, version, file_name } = request;

        self.state = SessionState::Preparing;
        let file_name = resolve_file_name(file_name, &input, mode);
        let data = prepare_input(input, mode)?;
        timer.lap(Stage::Prepare);

        self.state = SessionState::Loading;
        let loaded = self.loader.ensure_loaded(&version)?;
        timer.lap(Stage::Load);

        self.state = SessionState::Executing;
        let started = Instant::now();
        let result = loaded.codec.run(mode, &data)?;
        let duration_ms = started.elapsed().as_secs_f64() * 1_000.0;
        timer.lap(Stage::Execute);

        self.state = SessionState::Measuring;
        let metrics = PerformanceMetrics::compute(
            mode,
            data.len() as u64,
            result.len() as u64,
            duration_ms,
            loaded.version.clone(),
        );
        timer.lap(Stage::Measure);

        self.state = SessionState::Recording;
        let timestamp = self.next_timestamp();
        let metrics = metrics.with_timestamp(timestamp);
        let file_name = filename_for_mode(&file_name, mode);
        self.history.append(HistoryEntry::new(mode, Some(file_name.clone()), metrics.clone()));
        self.latest_metrics = Some(metrics.clone());
        self.last_processed = Some(timestamp);
        self.persist();
        timer.lap(Stage::Record);

        info!(
            %mode,
            version = %loaded.version,
            file_name = %file_name,
            original = metrics.original_size,
            result = metrics.result_size,
            ratio = metrics.ratio,
            speed_mbps = metrics.throughput_mbps,
            execute_ms = timer.stage_times.get_ms(Stage::Execute),
            total_ms = timer.elapsed().as_secs_f64() * 1_000.0,
            "operation recorded"
        );

        Ok(ProcessOutcome {
            mode,
            output: represent_output(mode, &result),
            input: data,
            result,
            metrics,
            version: loaded.version,
            file_name,
            timestamp,
            stage_times: timer.stage_times,
        })
    }

    /// Epoch ms, strictly increasing within this session so timestamps can
    /// identify history entries.
    /// Saturates at `i64::MAX` when restored history already sits there.
    fn next_timestamp(&mut self) -> i64 {
        let timestamp = now_millis().max(self.last_timestamp.saturating_add(1));
        self.last_timestamp = timestamp;
        timestamp
    }

    fn persist(&mut self) {
        if !self.config.persist {
            return;
        }
        if let Err(err) = self.history.save(self.storage.as_mut()) {
            warn!(error = %err, "history not persisted");
        }
        if let Some(metrics) = &self.latest_metrics {
            if let Err(err) = save_json(self.storage.as_mut(), METRICS_STORAGE_KEY, metrics) {
                warn!(error = %err, "latest metrics not persisted");
            }
        }
    }

    /// Delete the `index`-th row of `page` as the caller sees it under `filter`.
    pub fn delete_history_item(&mut self, filter: &HistoryFilter, page: Page, index: usize) -> Option<HistoryEntry> {
        let removed = self.history.delete_at(filter, page, index);
        if removed.is_some() {
            self.persist();
        }
        removed
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.persist();
    }

    /// Correct the filename of the last recorded operation (falls back to
    /// matching `old_name` when nothing was recorded in this session).
    pub fn rename_last(&mut self, old_name: Option<&str>, new_name: Option<&str>) -> bool {
        self.rename_by_timestamp(self.last_processed, old_name, new_name)
    }

    pub fn rename_by_timestamp(&mut self, timestamp: Option<i64>, old_name: Option<&str>, new_name: Option<&str>) -> bool {
        let changed = self.history.rename_by_timestamp(timestamp, old_name, new_name);
        if changed {
            self.persist();
        }
        changed
    }

    /// Most recent entries under `filter` for a chart, oldest first.
    pub fn chart_points<'a>(&'a self, filter: &HistoryFilter) -> Vec<&'a HistoryEntry> {
        self.history.chart_points(filter, DEFAULT_CHART_POINTS)
    }

    /// Share token for `fields`, honoring the configured size ceiling.
    pub fn share(&self, fields: &SessionFields) -> ShareToken {
        share::encode_with_limit(fields, self.config.max_share_data_len)
    }

    /// Decode a share token; a broken one yields empty fields, flagged omitted.
    pub fn open_shared(&self, token: &str) -> DecodedShare {
        share::decode(token)
    }

    /// Load a built-in sample for `mode`.
    ///
    /// In decompress mode the sample is compressed with `version` first and
    /// handed back as base64; if that fails the raw text is used instead.
    pub fn load_sample(&mut self, id: &str, mode: Mode, version: &str) -> Option<SampleInput> {
        let sample = sample_by_id(id)?;
        let raw = SampleInput { text: sample.data.clone(), base64: false, file_name: sample.file_name.to_string() };
        if mode == Mode::Compress {
            return Some(raw);
        }

        let compressed = self
            .loader
            .ensure_loaded(version)
            .map_err(SessionError::from)
            .and_then(|loaded| loaded.codec.compress(sample.data.as_bytes()).map_err(SessionError::from));
        match compressed {
            Ok(bytes) => Some(SampleInput {
                text: encode_base64(&bytes),
                base64: true,
                file_name: filename_for_mode(sample.file_name, Mode::Compress),
            }),
            Err(err) => {
                warn!(sample = id, error = %err, "sample compression failed, loading raw text");
                Some(raw)
            }
        }
    }
}

/// Explicit name, else the uploaded file's name, else a generated one.
fn resolve_file_name(requested: Option<String>, input: &InputSource, mode: Mode) -> String {
    if let Some(name) = requested.filter(|name| !name.trim().is_empty()) {
        return name;
    }
    match input {
        InputSource::File { name, .. } if !name.trim().is_empty() => name.clone(),
        _ => default_filename(mode, Utc::now()),
    }
}

/// Bytes handed to the codec.
fn prepare_input(input: InputSource, mode: Mode) -> Result<Vec<u8>, SessionError> {
    match input {
        InputSource::File { bytes, .. } => Ok(bytes),
        InputSource::Text { text, base64: true } if mode == Mode::Decompress => Ok(decode_base64(&text)?),
        InputSource::Text { text, .. } => Ok(text.into_bytes()),
    }
}

/// Compressed output as base64; decompressed output as text when it is
/// valid UTF-8, base64 otherwise.
fn represent_output(mode: Mode, result: &[u8]) -> OutputText {
    match mode {
        Mode::Compress => OutputText::Base64(encode_base64(result)),
        Mode::Decompress => match std::str::from_utf8(result) {
            Ok(text) => OutputText::Utf8(text.to_string()),
            Err(_) => OutputText::Base64(encode_base64(result)),
        },
    }
}
