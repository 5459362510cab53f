use super::*;

#[test]
fn memory_storage_set_get_remove() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get("k"), None);

    storage.set("k", "v1");
    assert_eq!(storage.get("k").as_deref(), Some("v1"));

    storage.set("k", "v2");
    assert_eq!(storage.get("k").as_deref(), Some("v2"));

    storage.remove("k");
    storage.remove("k");
    assert_eq!(storage.get("k"), None);
    assert!(storage.is_empty());
}

#[test]
fn unavailable_memory_storage_reads_empty_and_ignores_writes() {
    let storage = MemoryStorage::new();
    storage.set("k", "v");
    storage.set_available(false);

    assert!(!storage.is_available());
    assert_eq!(storage.get("k"), None);
    storage.set("other", "x");
    storage.remove("k");

    storage.set_available(true);
    assert_eq!(storage.get("k").as_deref(), Some("v"));
    assert_eq!(storage.get("other"), None);
}

#[test]
fn load_json_returns_none_for_malformed_data() {
    let storage = MemoryStorage::new();
    storage.set("profile", "{not json");
    assert_eq!(load_json::<serde_json::Value>(&storage, "profile"), None);
}

#[test]
fn save_json_then_load_json() {
    let storage = MemoryStorage::new();
    save_json(&storage, "list", &vec![1, 2, 3]);
    assert_eq!(storage.get("list").as_deref(), Some("[1,2,3]"));
    assert_eq!(load_json::<Vec<i32>>(&storage, "list"), Some(vec![1, 2, 3]));
}

#[cfg(not(feature = "csr"))]
#[test]
fn browser_storage_is_inert_outside_the_browser() {
    let storage = BrowserStorage;
    storage.set("k", "v");
    assert_eq!(storage.get("k"), None);
    storage.remove("k");
    assert_eq!(storage.get("k"), None);
    assert!(!storage.is_available());
}
