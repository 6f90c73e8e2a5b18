//! history/store.rs
//! Append-only operation log, most recent first.
//!
//! Mutations are limited to delete-by-index, clear, and filename correction.
//! Indices handed out by filtered/paginated views are translated back to
//! stored positions before anything is removed.
use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::{
    constants::HISTORY_STORAGE_KEY,
    history::{
        persist::{load_json, save_json, KeyValueStore},
        types::{HistoryEntry, HistoryFilter, HistoryPage, Page, StorageError, VersionSummary},
    },
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        Self { entries }
    }

    /// Load the persisted log; unreadable data starts an empty log.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match load_json::<Vec<HistoryEntry>>(store, HISTORY_STORAGE_KEY) {
            Ok(entries) => Self { entries: entries.unwrap_or_default() },
            Err(err) => {
                warn!(error = %err, "history unreadable, starting empty");
                Self::new()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        save_json(store, HISTORY_STORAGE_KEY, &self.entries)
    }

    /// Newest entry goes to the front.
    pub fn append(&mut self, entry: HistoryEntry) {
        debug!(timestamp = entry.timestamp(), mode = %entry.mode, "history append");
        self.entries.insert(0, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Lazily filtered view in stored order.
    pub fn list<'a, 'f>(&'a self, filter: &'f HistoryFilter) -> impl Iterator<Item = &'a HistoryEntry> + 'f
    where
        'a: 'f,
    {
        self.entries.iter().filter(move |entry| filter.matches(entry))
    }

    /// Stored positions of the entries passing `filter`.
    fn positions(&self, filter: &HistoryFilter) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| filter.matches(entry))
            .map(|(pos, _)| pos)
            .collect()
    }

    pub fn page(&self, filter: &HistoryFilter, page: Page) -> HistoryPage<'_> {
        let positions = self.positions(filter);
        let total_entries = positions.len();
        let per_page = page.per_page.max(1);
        let start_index = page.start_index();
        let items = positions
            .iter()
            .skip(start_index)
            .take(per_page)
            .map(|&pos| &self.entries[pos])
            .collect();

        HistoryPage {
            items,
            total_entries,
            total_pages: total_entries.div_ceil(per_page),
            start_index,
        }
    }

    /// Remove the `index`-th item of `page` under `filter`.
    /// Returns the removed entry, or `None` when the index is out of range.
    pub fn delete_at(&mut self, filter: &HistoryFilter, page: Page, index: usize) -> Option<HistoryEntry> {
        let pos = self
            .positions(filter)
            .into_iter()
            .skip(page.start_index())
            .take(page.per_page.max(1))
            .nth(index)?;
        debug!(index, pos, "history delete");
        Some(self.entries.remove(pos))
    }

    /// Remove by stored position.
    pub fn remove(&mut self, pos: usize) -> Option<HistoryEntry> {
        (pos < self.entries.len()).then(|| self.entries.remove(pos))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Correct the filename of a recorded entry.
    ///
    /// With a timestamp, the entry carrying that timestamp is updated.
    /// Without one, the most recent entry named `old_name` is. Returns whether
    /// an entry changed.
    pub fn rename_by_timestamp(
        &mut self,
        timestamp: Option<i64>,
        old_name: Option<&str>,
        new_name: Option<&str>,
    ) -> bool {
        if old_name == new_name {
            return false;
        }
        let found = match timestamp {
            Some(ts) => self.entries.iter_mut().find(|entry| entry.timestamp() == ts),
            None => self
                .entries
                .iter_mut()
                .find(|entry| entry.file_name.as_deref() == old_name),
        };
        match found {
            Some(entry) => {
                entry.file_name = new_name.map(str::to_string);
                true
            }
            None => false,
        }
    }

    /// Distinct versions in order of first appearance.
    pub fn unique_versions(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.version()) {
                seen.push(entry.version());
            }
        }
        seen
    }

    /// Count, mean ratio and mean throughput per version, sorted by version.
    pub fn version_summaries(&self) -> Vec<VersionSummary> {
        let mut groups: BTreeMap<&str, (usize, f64, f64)> = BTreeMap::new();
        for entry in &self.entries {
            let group = groups.entry(entry.version()).or_default();
            group.0 += 1;
            group.1 += entry.metrics.ratio;
            group.2 += entry.metrics.throughput_mbps;
        }
        groups
            .into_iter()
            .map(|(version, (count, ratio, speed))| VersionSummary {
                version: version.to_string(),
                count,
                avg_ratio: ratio / count as f64,
                avg_speed: speed / count as f64,
            })
            .collect()
    }

    /// The `limit` most recent filtered entries, oldest first.
    pub fn chart_points<'a>(&'a self, filter: &HistoryFilter, limit: usize) -> Vec<&'a HistoryEntry> {
        let mut points: Vec<&HistoryEntry> = self.list(filter).take(limit).collect();
        points.reverse();
        points
    }
}
