#[cfg(test)]
mod history_tests {
    use lz4_session::{
        constants::HISTORY_STORAGE_KEY,
        history::{
            load_json, save_json, FileStore, HistoryEntry, HistoryFilter, HistoryStore, KeyValueStore, MemoryStore,
            Page, StorageError, VersionFilter,
        },
        telemetry::PerformanceMetrics,
        types::Mode,
    };

    fn entry(mode: Mode, version: &str, name: Option<&str>, timestamp: i64) -> HistoryEntry {
        let metrics = PerformanceMetrics::compute(mode, 1_048_576, 524_288, 1_000.0, version).with_timestamp(timestamp);
        HistoryEntry::new(mode, name.map(str::to_string), metrics)
    }

    /// Appended in timestamp order 1..=5; stored newest first.
    fn mixed_store() -> HistoryStore {
        let mut store = HistoryStore::new();
        store.append(entry(Mode::Compress, "1.0.0", Some("a.txt.lz4"), 1));
        store.append(entry(Mode::Compress, "2.0.0", Some("b.txt.lz4"), 2));
        store.append(entry(Mode::Decompress, "1.0.0", Some("c.txt"), 3));
        store.append(entry(Mode::Compress, "2.0.0", Some("D.TXT.lz4"), 4));
        store.append(entry(Mode::Decompress, "1.0.0", None, 5));
        store
    }

    fn timestamps<'a>(entries: impl IntoIterator<Item = &'a HistoryEntry>) -> Vec<i64> {
        entries.into_iter().map(HistoryEntry::timestamp).collect()
    }

    #[test]
    fn newest_entry_first() {
        let store = mixed_store();
        assert_eq!(store.len(), 5);
        assert_eq!(timestamps(store.entries()), [5, 4, 3, 2, 1]);
        assert_eq!(store.get(0).unwrap().timestamp(), 5);
    }

    #[test]
    fn filters_compose() {
        let store = mixed_store();
        let all = HistoryFilter::default();
        assert_eq!(store.list(&all).count(), 5);

        let compress_only = HistoryFilter::default().with_modes(true, false);
        assert_eq!(timestamps(store.list(&compress_only)), [4, 2, 1]);

        let v2 = HistoryFilter::default().with_version("2.0.0");
        assert_eq!(timestamps(store.list(&v2)), [4, 2]);

        let none = HistoryFilter::default().with_modes(false, false);
        assert_eq!(store.list(&none).count(), 0);
    }

    #[test]
    fn search_is_case_insensitive_and_passes_unnamed() {
        let store = mixed_store();
        let filter = HistoryFilter::default().with_search("d.txt");
        // D.TXT.lz4 matches; the unnamed entry passes.
        assert_eq!(timestamps(store.list(&filter)), [5, 4]);

        let empty = HistoryFilter::default().with_search("");
        assert_eq!(store.list(&empty).count(), 5);
    }

    #[test]
    fn version_filter_parse() {
        assert_eq!(VersionFilter::parse("all"), VersionFilter::All);
        assert_eq!(VersionFilter::parse(""), VersionFilter::All);
        assert_eq!(VersionFilter::parse("0.3.4"), VersionFilter::Exact("0.3.4".into()));
        assert!(VersionFilter::parse("0.3.4").matches("0.3.4"));
        assert!(!VersionFilter::parse("0.3.4").matches("0.3.3"));
    }

    #[test]
    fn delete_by_filtered_index_removes_the_visible_row() {
        let mut store = HistoryStore::new();
        store.append(entry(Mode::Compress, "1.0.0", None, 1));
        store.append(entry(Mode::Compress, "2.0.0", None, 2));
        store.append(entry(Mode::Compress, "1.0.0", None, 3));
        store.append(entry(Mode::Compress, "2.0.0", None, 4));
        store.append(entry(Mode::Compress, "1.0.0", None, 5));

        let filter = HistoryFilter::default().with_version("2.0.0");
        let removed = store.delete_at(&filter, Page::default(), 0).unwrap();
        assert_eq!(removed.timestamp(), 4);
        assert_eq!(timestamps(store.entries()), [5, 3, 2, 1]);
        assert_eq!(store.list(&filter).count(), 1);
        assert_eq!(store.list(&HistoryFilter::default().with_version("1.0.0")).count(), 3);
    }

    #[test]
    fn delete_respects_pagination() {
        let mut store = mixed_store();
        let removed = store.delete_at(&HistoryFilter::default(), Page::new(2, 2), 1).unwrap();
        assert_eq!(removed.timestamp(), 2);
        assert_eq!(timestamps(store.entries()), [5, 4, 3, 1]);
    }

    #[test]
    fn delete_out_of_range_is_noop() {
        let mut store = mixed_store();
        assert!(store.delete_at(&HistoryFilter::default(), Page::new(3, 2), 1).is_none());
        assert!(store.delete_at(&HistoryFilter::default().with_modes(false, false), Page::default(), 0).is_none());
        assert!(store.remove(99).is_none());
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn pages() {
        let store = mixed_store();
        let page = store.page(&HistoryFilter::default(), Page::new(3, 2));
        assert_eq!(page.total_entries, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.start_index, 4);
        assert_eq!(timestamps(page.items), [1]);

        let past_end = store.page(&HistoryFilter::default(), Page::new(9, 2));
        assert!(past_end.items.is_empty());

        assert_eq!(Page::new(0, 0), Page::new(1, 1));
    }

    #[test]
    fn huge_page_numbers_are_empty() {
        let mut store = mixed_store();
        let page = store.page(&HistoryFilter::default(), Page::new(usize::MAX, 2));
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.start_index, usize::MAX);

        assert!(store.delete_at(&HistoryFilter::default(), Page::new(usize::MAX, usize::MAX), 0).is_none());
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn rename_by_timestamp_or_old_name() {
        let mut store = mixed_store();
        assert!(store.rename_by_timestamp(Some(2), Some("b.txt.lz4"), Some("renamed.lz4")));
        assert_eq!(store.entries()[3].file_name.as_deref(), Some("renamed.lz4"));

        assert!(store.rename_by_timestamp(None, Some("c.txt"), Some("c2.txt")));
        assert_eq!(store.entries()[2].file_name.as_deref(), Some("c2.txt"));

        assert!(!store.rename_by_timestamp(Some(2), Some("x"), Some("x")));
        assert!(!store.rename_by_timestamp(Some(99), None, Some("y")));
        assert!(!store.rename_by_timestamp(None, Some("missing"), Some("y")));
    }

    #[test]
    fn versions_and_summaries() {
        let mut store = mixed_store();
        assert_eq!(store.unique_versions(), ["1.0.0", "2.0.0"]);

        let summaries = store.version_summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].version, "1.0.0");
        assert_eq!(summaries[0].count, 3);
        assert_eq!(summaries[1].count, 2);
        assert_eq!(summaries[1].avg_ratio, 0.5);

        store.clear();
        assert!(store.is_empty());
        assert!(store.version_summaries().is_empty());
    }

    #[test]
    fn chart_points_are_oldest_first() {
        let store = mixed_store();
        assert_eq!(timestamps(store.chart_points(&HistoryFilter::default(), 3)), [3, 4, 5]);
        let compress = HistoryFilter::default().with_modes(true, false);
        assert_eq!(timestamps(store.chart_points(&compress, 10)), [1, 2, 4]);
    }

    #[test]
    fn persists_through_memory_store() {
        let store = mixed_store();
        let mut kv = MemoryStore::new();
        store.save(&mut kv).unwrap();
        assert_eq!(HistoryStore::load(&kv), store);
    }

    #[test]
    fn corrupt_history_loads_empty() {
        let kv = MemoryStore::new().with_value(HISTORY_STORAGE_KEY, "{not json");
        assert!(HistoryStore::load(&kv).is_empty());
        assert!(matches!(
            load_json::<Vec<HistoryEntry>>(&kv, HISTORY_STORAGE_KEY),
            Err(StorageError::PersistenceReadFailure { .. })
        ));
        assert!(HistoryStore::load(&MemoryStore::new()).is_empty());
    }

    #[test]
    fn reads_stored_playground_records() {
        let stored = r#"[{"timestamp":1700000000002,"originalSize":11,"resultSize":13,"ratio":0,"duration":0.1,"speed":0.1,"version":"0.3.4","mode":"compress","fileName":"untitled.txt.lz4"},
                        {"timestamp":1700000000001,"originalSize":13,"resultSize":11,"ratio":0.846,"duration":0.2,"speed":0.05,"version":"0.3.3","mode":"decompress"}]"#;
        let kv = MemoryStore::new().with_value(HISTORY_STORAGE_KEY, stored);
        let store = HistoryStore::load(&kv);
        assert_eq!(store.len(), 2);
        assert_eq!(store.entries()[0].file_name.as_deref(), Some("untitled.txt.lz4"));
        assert_eq!(store.entries()[1].mode, Mode::Decompress);
        assert_eq!(store.entries()[1].file_name, None);
        assert_eq!(store.entries()[1].version(), "0.3.3");
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut kv = FileStore::open(dir.path().join("state")).unwrap();
        assert_eq!(kv.get("missing").unwrap(), None);

        kv.set("k", "v1").unwrap();
        assert_eq!(kv.get("k").unwrap().as_deref(), Some("v1"));
        assert!(kv.dir().join("k.json").exists());

        let store = mixed_store();
        store.save(&mut kv).unwrap();
        let reopened = FileStore::open(kv.dir()).unwrap();
        assert_eq!(HistoryStore::load(&reopened), store);
    }

    #[test]
    fn save_json_skips_unchanged_values() {
        let mut kv = MemoryStore::new();
        save_json(&mut kv, "n", &[1, 2, 3]).unwrap();
        assert_eq!(kv.get("n").unwrap().as_deref(), Some("[1,2,3]"));
        save_json(&mut kv, "n", &[1, 2, 3]).unwrap();
        assert_eq!(load_json::<Vec<i32>>(&kv, "n").unwrap(), Some(vec![1, 2, 3]));
    }
}
