use super::*;

#[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
struct Draft {
    step: u32,
    note: String,
}

#[test]
fn json_helpers_persist_and_restore_value() {
    let store = MemoryStore::new();
    let draft = Draft { step: 2, note: "halfway".to_owned() };
    save_json(&store, "draft", &draft).unwrap();
    assert_eq!(load_json::<Draft>(&store, "draft"), Some(draft));
}

#[test]
fn load_json_missing_key_is_none() {
    let store = MemoryStore::new();
    assert_eq!(load_json::<Draft>(&store, "draft"), None);
}

#[test]
fn load_json_corrupt_value_is_none() {
    let store = MemoryStore::new();
    store.set("draft", "{not json").unwrap();
    assert_eq!(load_json::<Draft>(&store, "draft"), None);
}

#[test]
fn rejecting_store_reports_write_failure() {
    let store = MemoryStore::rejecting_writes();
    let err = store.set("k", "v").unwrap_err();
    assert!(matches!(err, StorageError::WriteRejected(_)));
    assert!(!store.contains("k"));
}

#[test]
fn remove_deletes_entry() {
    let store = MemoryStore::new();
    store.set("k", "v").unwrap();
    store.remove("k");
    assert!(store.is_empty());
}

#[test]
fn local_store_is_inert_without_browser() {
    let store = LocalStore;
    assert!(store.set("k", "v").is_ok());
    assert_eq!(store.get("k"), None);
    store.remove("k");
}
