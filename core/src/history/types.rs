//! history/types.rs
//! History records, filters, pages, and storage errors.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{constants::DEFAULT_PAGE_SIZE, telemetry::PerformanceMetrics, types::Mode};

/// One completed operation. Only `file_name` may change after append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub mode: Mode,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(flatten)]
    pub metrics: PerformanceMetrics,
}

impl HistoryEntry {
    pub fn new(mode: Mode, file_name: Option<String>, metrics: PerformanceMetrics) -> Self {
        Self { mode, file_name, metrics }
    }

    pub fn timestamp(&self) -> i64 {
        self.metrics.timestamp
    }

    pub fn version(&self) -> &str {
        &self.metrics.codec_version
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VersionFilter {
    #[default]
    All,
    Exact(String),
}

impl VersionFilter {
    /// `"all"` (or empty) means no version filter.
    pub fn parse(value: &str) -> Self {
        match value {
            "" | "all" => VersionFilter::All,
            version => VersionFilter::Exact(version.to_string()),
        }
    }

    pub fn matches(&self, version: &str) -> bool {
        match self {
            VersionFilter::All => true,
            VersionFilter::Exact(wanted) => wanted == version,
        }
    }
}

/// Filter applied by `HistoryStore::list`, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryFilter {
    pub show_compress: bool,
    pub show_decompress: bool,
    pub version: VersionFilter,
    /// Case-insensitive filename substring. Entries without a filename pass.
    pub search: Option<String>,
}

impl Default for HistoryFilter {
    fn default() -> Self {
        Self {
            show_compress: true,
            show_decompress: true,
            version: VersionFilter::All,
            search: None,
        }
    }
}

impl HistoryFilter {
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = VersionFilter::Exact(version.into());
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_modes(mut self, show_compress: bool, show_decompress: bool) -> Self {
        self.show_compress = show_compress;
        self.show_decompress = show_decompress;
        self
    }

    pub fn matches(&self, entry: &HistoryEntry) -> bool {
        let mode_ok = match entry.mode {
            Mode::Compress => self.show_compress,
            Mode::Decompress => self.show_decompress,
        };
        if !mode_ok || !self.version.matches(entry.version()) {
            return false;
        }
        match (self.search.as_deref(), entry.file_name.as_deref()) {
            (Some(term), Some(name)) if !term.is_empty() => {
                name.to_lowercase().contains(&term.to_lowercase())
            }
            _ => true,
        }
    }
}

/// 1-based page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: usize,
    pub per_page: usize,
}

impl Page {
    pub fn new(number: usize, per_page: usize) -> Self {
        Self { number: number.max(1), per_page: per_page.max(1) }
    }

    pub fn start_index(&self) -> usize {
        (self.number.max(1) - 1).saturating_mul(self.per_page.max(1))
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// One page of a filtered history view.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryPage<'a> {
    pub items: Vec<&'a HistoryEntry>,
    /// Number of entries passing the filter.
    pub total_entries: usize,
    pub total_pages: usize,
    /// Offset of `items[0]` inside the filtered view.
    pub start_index: usize,
}

/// Per-version aggregate over the whole history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionSummary {
    pub version: String,
    pub count: usize,
    pub avg_ratio: f64,
    pub avg_speed: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(String),

    /// Stored text is not valid structured data.
    #[error("stored value for {key} is unreadable: {msg}")]
    PersistenceReadFailure { key: String, msg: String },

    #[error("serialization error: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e.to_string())
    }
}
