
use pattern_playground::{
    FileStorage, InMemoryStorage, ProgressStore, ProgressStoreConfig, StateUpcaster,
    StorageBackend, DEFAULT_STORAGE_KEY,
};
use support::{reopen, stored_slot};

#[test]
fn save_creates_a_record() {
    let mut store = ProgressStore::open(InMemoryStorage::new());

    store.save_progress("pattern-1", r#"const code = "test""#);

    assert_eq!(store.progress().len(), 1);
    let record = &store.progress()[0];
    assert_eq!(record.pattern_id, "pattern-1");
    assert_eq!(record.user_code, r#"const code = "test""#);
    assert!(!record.completed);
}

#[test]
fn saving_twice_updates_the_same_record() {
    let mut store = ProgressStore::open(InMemoryStorage::new());

    store.save_progress("p1", "code-A");
    let first = store.get_progress("p1").unwrap().last_modified;
    store.save_progress("p1", "code-B");

    assert_eq!(store.len(), 1);
    let record = store.get_progress("p1").unwrap();
    assert_eq!(record.user_code, "code-B");
    assert!(record.last_modified >= first);
}

#[test]
fn records_keep_first_save_order() {
    let mut store = ProgressStore::open(InMemoryStorage::new());

    store.save_progress("pattern-1", "code 1");
    store.save_progress("pattern-2", "code 2");
    store.save_progress("pattern-3", "code 3");
    store.save_progress("pattern-1", "code 1 again");

    let ids: Vec<&str> = store.progress().iter().map(|p| p.pattern_id.as_str()).collect();
    assert_eq!(ids, vec!["pattern-1", "pattern-2", "pattern-3"]);
}

#[test]
fn mark_completed_only_touches_its_pattern() {
    let mut store = ProgressStore::open(InMemoryStorage::new());

    store.save_progress("pattern-1", "code 1");
    store.save_progress("pattern-2", "code 2");
    let stamp = store.get_progress("pattern-1").unwrap().last_modified;
    store.mark_completed("pattern-1");

    let first = store.get_progress("pattern-1").unwrap();
    assert!(first.completed);
    assert_eq!(first.last_modified, stamp);
    assert!(!store.get_progress("pattern-2").unwrap().completed);
    assert_eq!(store.completed_count(), 1);
}

#[test]
fn mark_completed_without_progress_creates_nothing() {
    let storage = InMemoryStorage::new();
    let mut store = ProgressStore::open(storage.clone());
    store.save_progress("p1", "x");
    let before = store.progress().to_vec();

    store.mark_completed("never-saved");

    assert_eq!(store.progress(), before.as_slice());
    assert!(store.get_progress("never-saved").is_none());
}

#[test]
fn untouched_patterns_have_no_progress() {
    let store = ProgressStore::open(InMemoryStorage::new());
    assert!(store.get_progress("non-existent").is_none());
    assert!(store.is_empty());
}

#[test]
fn mutations_are_written_to_the_slot() {
    let storage = InMemoryStorage::new();
    let mut store = ProgressStore::open(storage.clone());

    store.save_progress("pattern-1", "code");
    let slot = stored_slot(&storage);
    assert_eq!(slot["version"], 1);
    assert_eq!(slot["state"]["progress"].as_array().unwrap().len(), 1);
    assert_eq!(slot["state"]["progress"][0]["patternId"], "pattern-1");
    assert_eq!(slot["state"]["progress"][0]["completed"], false);

    store.mark_completed("pattern-1");
    assert_eq!(stored_slot(&storage)["state"]["progress"][0]["completed"], true);
}

#[test]
fn progress_survives_a_new_session() {
    let storage = InMemoryStorage::new();
    {
        let mut first = reopen(&storage);
        first.save_progress("p1", "x");
        first.mark_completed("p1");
    }

    let second = reopen(&storage);

    assert_eq!(second.len(), 1);
    let record = second.get_progress("p1").unwrap();
    assert_eq!(record.user_code, "x");
    assert!(record.completed);
}

#[test]
fn rehydration_is_verbatim() {
    let storage = InMemoryStorage::new();
    let mut first = reopen(&storage);
    first.save_progress("a", "one");
    first.save_progress("b", "two");
    first.mark_completed("b");

    let second = reopen(&storage);

    assert_eq!(second.progress(), first.progress());
}

#[test]
fn corrupted_slot_loads_empty() {
    let storage = InMemoryStorage::new();
    storage.write(DEFAULT_STORAGE_KEY, "invalid json").unwrap();

    let store = reopen(&storage);

    assert!(store.is_empty());
}

#[test]
fn corrupted_slot_is_replaced_on_first_mutation() {
    let storage = InMemoryStorage::new();
    storage.write(DEFAULT_STORAGE_KEY, "{\"state\":").unwrap();

    let mut store = reopen(&storage);
    store.save_progress("pattern-1", "code");

    assert_eq!(stored_slot(&storage)["state"]["progress"][0]["userCode"], "code");
    assert_eq!(reopen(&storage).len(), 1);
}

#[test]
fn slot_from_another_schema_version_loads_empty() {
    let storage = InMemoryStorage::new();
    storage
        .write(
            DEFAULT_STORAGE_KEY,
            r#"{"state":{"progress":[{"patternId":"hoc","userCode":"x","completed":true,"lastModified":"2024-01-01T00:00:00.000Z"}]},"version":7}"#,
        )
        .unwrap();

    assert!(reopen(&storage).is_empty());
}

#[test]
fn older_slot_is_migrated_by_upcaster() {
    let storage = InMemoryStorage::new();
    storage
        .write(
            "progress_v2",
            r#"{"state":{"progress":[{"patternId":"hoc","userCode":"x","done":true,"lastModified":"2024-01-01T00:00:00.000Z"}]},"version":1}"#,
        )
        .unwrap();

    let config = ProgressStoreConfig::new()
        .with_storage_key("progress_v2")
        .with_version(2)
        .with_upcaster(StateUpcaster {
            from_version: 1,
            to_version: 2,
            transform: |mut state| {
                if let Some(items) = state["progress"].as_array_mut() {
                    for item in items {
                        let done = item["done"].as_bool().unwrap_or(false);
                        item["completed"] = done.into();
                    }
                }
                state
            },
        });

    let mut store = ProgressStore::with_config(storage.clone(), config);
    assert!(store.get_progress("hoc").unwrap().completed);

    store.save_progress("hoc", "y");
    let raw = storage.read("progress_v2").unwrap().unwrap();
    assert!(raw.ends_with(r#""version":2}"#));
}

#[test]
fn current_slot_survives_a_longer_migration_chain() {
    let storage = InMemoryStorage::new();
    storage
        .write(
            DEFAULT_STORAGE_KEY,
            r#"{"state":{"progress":[{"patternId":"portal","userCode":"x","completed":true,"lastModified":"2024-01-01T00:00:00.000Z"}]},"version":2}"#,
        )
        .unwrap();

    let config = ProgressStoreConfig::new()
        .with_version(2)
        .with_upcaster(StateUpcaster {
            from_version: 1,
            to_version: 2,
            transform: |state| state,
        })
        .with_upcaster(StateUpcaster {
            from_version: 2,
            to_version: 3,
            transform: |state| state,
        });

    let store = ProgressStore::with_config(storage.clone(), config);

    assert_eq!(store.len(), 1);
    assert!(store.get_progress("portal").unwrap().completed);
}

#[test]
fn duplicate_ids_in_slot_collapse_to_one_record() {
    let storage = InMemoryStorage::new();
    storage
        .write(
            DEFAULT_STORAGE_KEY,
            r#"{"state":{"progress":[
                {"patternId":"p1","userCode":"first","completed":false,"lastModified":"2024-01-01T00:00:00.000Z"},
                {"patternId":"p1","userCode":"second","completed":true,"lastModified":"2024-01-02T00:00:00.000Z"}
            ]},"version":1}"#,
        )
        .unwrap();

    let store = reopen(&storage);

    assert_eq!(store.len(), 1);
    assert_eq!(store.get_progress("p1").unwrap().user_code, "first");
}

#[test]
fn handles_edge_case_inputs() {
    let mut store = ProgressStore::open(InMemoryStorage::new());
    let long_code = "x".repeat(10_000);

    store.save_progress("empty", "");
    store.save_progress("long", &long_code);
    store.save_progress("pattern-with-dash_and_underscore", "code");

    assert_eq!(store.get_progress("empty").unwrap().user_code, "");
    assert_eq!(store.get_progress("long").unwrap().user_code, long_code);
    assert!(store.get_progress("pattern-with-dash_and_underscore").is_some());
}

#[test]
fn separate_keys_do_not_share_progress() {
    let storage = InMemoryStorage::new();
    let mut default_store = ProgressStore::open(storage.clone());
    let other = ProgressStoreConfig::new().with_storage_key("other_progress");
    let other_store = ProgressStore::with_config(storage.clone(), other);

    default_store.save_progress("p1", "x");

    assert!(other_store.is_empty());
    assert_eq!(storage.len(), 1);
}

#[test]
fn borrowed_backend_is_accepted() {
    let storage = InMemoryStorage::new();
    {
        let mut store = ProgressStore::open(&storage);
        store.save_progress("p1", "x");
    }
    assert_eq!(reopen(&storage).len(), 1);
}

#[test]
fn file_storage_persists_across_sessions() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut store = ProgressStore::open(FileStorage::new(dir.path()));
        store.save_progress("context-api", "const UserContext = createContext(null);");
        store.mark_completed("context-api");
    }

    let store = ProgressStore::open(FileStorage::new(dir.path()));
    let record = store.get_progress("context-api").unwrap();
    assert!(record.completed);
    assert_eq!(record.user_code, "const UserContext = createContext(null);");
}

#[test]
fn corrupted_file_slot_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("rpp_progress.json"), "\u{0}\u{1}not json").unwrap();

    let store = ProgressStore::open(FileStorage::new(dir.path()));

    assert!(store.is_empty());
}

#[test]
fn reset_starts_over() {
    let storage = InMemoryStorage::new();
    let mut store = reopen(&storage);
    store.save_progress("p1", "x");

    store.reset().unwrap();

    assert!(store.is_empty());
    assert!(reopen(&storage).is_empty());
}

#[cfg(feature = "emitter")]
mod notifications {
    use std::sync::mpsc;
    use std::time::Duration;

    use pattern_playground::{InMemoryStorage, ProgressStore, PROGRESS_COMPLETED, PROGRESS_SAVED};

    #[test]
    fn listeners_receive_pattern_ids() {
        let mut store = ProgressStore::open(InMemoryStorage::new());
        let (saved_tx, saved_rx) = mpsc::channel();
        let (done_tx, done_rx) = mpsc::channel();

        store.on_change(PROGRESS_SAVED, move |id: String| {
            saved_tx.send(id).unwrap();
        });
        store.on_change(PROGRESS_COMPLETED, move |id: String| {
            done_tx.send(id).unwrap();
        });

        store.save_progress("hoc", "code");
        store.mark_completed("hoc");

        let saved = saved_rx.recv_timeout(Duration::from_secs(1)).expect("save never announced");
        let done = done_rx.recv_timeout(Duration::from_secs(1)).expect("completion never announced");
        assert_eq!(saved, "hoc");
        assert_eq!(done, "hoc");
    }

    #[test]
    fn completing_unknown_pattern_is_silent() {
        let mut store = ProgressStore::open(InMemoryStorage::new());
        let (tx, rx) = mpsc::channel::<String>();

        store.on_change(PROGRESS_COMPLETED, move |id: String| {
            tx.send(id).unwrap();
        });

        store.mark_completed("never-saved");

        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }
}
