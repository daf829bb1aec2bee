use super::*;
use session::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

fn temp_store() -> (tempfile::TempDir, FileStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("nested").join("session.json"));
    (dir, store)
}

#[test]
fn missing_file_reads_as_empty() {
    let (_dir, store) = temp_store();
    assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);
}

#[test]
fn set_creates_parent_dirs_and_persists_camel_case_keys() {
    let (_dir, store) = temp_store();
    store.set(ACCESS_TOKEN_KEY, "a1").unwrap();
    store.set(REFRESH_TOKEN_KEY, "r1").unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json, serde_json::json!({ "accessToken": "a1", "refreshToken": "r1" }));

    let reopened = FileStore::new(store.path());
    assert_eq!(reopened.get(REFRESH_TOKEN_KEY).unwrap().as_deref(), Some("r1"));
}

#[test]
fn removing_last_key_deletes_the_file() {
    let (_dir, store) = temp_store();
    store.set(ACCESS_TOKEN_KEY, "a1").unwrap();
    store.set(REFRESH_TOKEN_KEY, "r1").unwrap();

    store.remove(ACCESS_TOKEN_KEY).unwrap();
    assert!(store.path().exists());
    store.remove(REFRESH_TOKEN_KEY).unwrap();
    assert!(!store.path().exists());
}

#[test]
fn remove_on_missing_file_succeeds() {
    let (_dir, store) = temp_store();
    store.remove(ACCESS_TOKEN_KEY).unwrap();
}

#[test]
fn corrupt_file_is_a_read_error_but_can_be_overwritten() {
    let (_dir, store) = temp_store();
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), "{not json").unwrap();

    assert!(matches!(store.get(ACCESS_TOKEN_KEY), Err(StorageError::Read(_))));

    store.set(ACCESS_TOKEN_KEY, "fresh").unwrap();
    assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("fresh"));
}

#[test]
fn default_session_path_lives_under_config_dir() {
    let path = default_session_path();
    assert!(path.ends_with("session.json"));
}
