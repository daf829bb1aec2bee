use super::*;

#[test]
fn absent_key_reads_as_none() {
    assert_eq!(MemoryStore::new().get(ACCESS_TOKEN_KEY).unwrap(), None);
}

#[test]
fn with_tokens_seeds_only_present_tokens() {
    let store = MemoryStore::with_tokens(Some("a1"), None);
    assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("a1"));
    assert_eq!(store.get(REFRESH_TOKEN_KEY).unwrap(), None);
}

#[test]
fn set_overwrites_and_remove_is_idempotent() {
    let store = MemoryStore::new();
    store.set(REFRESH_TOKEN_KEY, "r1").unwrap();
    store.set(REFRESH_TOKEN_KEY, "r2").unwrap();
    assert_eq!(store.get(REFRESH_TOKEN_KEY).unwrap().as_deref(), Some("r2"));

    store.remove(REFRESH_TOKEN_KEY).unwrap();
    store.remove(REFRESH_TOKEN_KEY).unwrap();
    assert_eq!(store.get(REFRESH_TOKEN_KEY).unwrap(), None);
}

#[test]
fn references_are_stores_too() {
    fn write_through(store: impl TokenStore) {
        store.set(ACCESS_TOKEN_KEY, "via-ref").unwrap();
    }
    let store = MemoryStore::new();
    write_through(&store);
    assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("via-ref"));
}
