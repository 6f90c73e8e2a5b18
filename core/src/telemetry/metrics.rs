//! telemetry/metrics.rs
//!
//! Performance metrics for one codec operation.
//!
//! Design notes:
//! - `compute` is pure: sizes and a measured duration in, an immutable
//!   snapshot out.
//! - One duration floor (`MIN_DURATION_MS`) is applied before any division,
//!   and throughput is derived from the floored value so ratio, duration and
//!   throughput always agree with each other.
//! - Every float at rest is finite and non-negative.
//! - Field names serialize in camelCase (`originalSize`, `speed`, ...) so
//!   records written by the web playground load unchanged.
use serde::{Deserialize, Serialize};

use crate::{
    constants::{BYTES_PER_MB, MAX_SPEED_MBPS, MIN_DURATION_MS},
    types::Mode,
    utils::round_to,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    /// Epoch milliseconds; 0 until the operation is recorded.
    #[serde(default)]
    pub timestamp: i64,
    pub original_size: u64,
    pub result_size: u64,
    pub ratio: f64,
    #[serde(rename = "duration")]
    pub duration_ms: f64,
    #[serde(rename = "speed")]
    pub throughput_mbps: f64,
    #[serde(rename = "version")]
    pub codec_version: String,
}

impl PerformanceMetrics {
    pub fn compute(
        mode: Mode,
        original_size: u64,
        result_size: u64,
        duration_ms: f64,
        codec_version: impl Into<String>,
    ) -> Self {
        let duration_ms = floor_duration(duration_ms);
        Self {
            timestamp: 0,
            original_size,
            result_size,
            ratio: ratio(mode, original_size, result_size),
            duration_ms,
            throughput_mbps: throughput_mbps(original_size, duration_ms),
            codec_version: codec_version.into(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Signed size change in percent: positive means bytes saved when
    /// compressing, bytes gained when decompressing. 0 for empty input.
    pub fn percent_change(&self, mode: Mode) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        let original = self.original_size as f64;
        let result = self.result_size as f64;
        match mode {
            Mode::Compress => (original - result) / original * 100.0,
            Mode::Decompress => (result - original) / original * 100.0,
        }
    }

    /// Validate the at-rest invariants.
    pub fn sanity_check(&self) -> bool {
        self.ratio.is_finite()
            && self.ratio >= 0.0
            && self.duration_ms.is_finite()
            && self.duration_ms >= MIN_DURATION_MS
            && self.throughput_mbps.is_finite()
            && (0.0..=MAX_SPEED_MBPS).contains(&self.throughput_mbps)
    }
}

/// Replace zero, negative and non-finite durations with the floor.
pub fn floor_duration(duration_ms: f64) -> f64 {
    if duration_ms.is_finite() && duration_ms > MIN_DURATION_MS {
        duration_ms
    } else {
        MIN_DURATION_MS
    }
}

/// Compression: fraction of bytes saved, clamped to `[0, 1]`.
/// Decompression: expansion factor. Both rounded to 3 decimals.
pub fn ratio(mode: Mode, original_size: u64, result_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    let original = original_size as f64;
    let result = result_size as f64;
    let raw = match mode {
        Mode::Compress => ((original - result) / original).clamp(0.0, 1.0),
        Mode::Decompress => result / original,
    };
    round_to(raw, 3)
}

/// MB/s over an already floored duration; 0 when unmeasurable.
pub fn throughput_mbps(original_size: u64, duration_ms: f64) -> f64 {
    let speed = (original_size as f64 / BYTES_PER_MB) / (floor_duration(duration_ms) / 1000.0);
    if !speed.is_finite() || !(0.0..=MAX_SPEED_MBPS).contains(&speed) {
        0.0
    } else {
        speed
    }
}
