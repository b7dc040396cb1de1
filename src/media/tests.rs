use super::BlobStore;

#[test]
fn create_then_get_round_trips_bytes() {
    let store = BlobStore::new();
    let url = store.create(vec![1, 2, 3, 4]);
    let bytes = store.get(&url).expect("blob should exist");
    assert_eq!(&bytes[..], &[1, 2, 3, 4]);
}

#[test]
fn urls_are_unique_per_blob() {
    let store = BlobStore::new();
    let a = store.create(vec![0]);
    let b = store.create(vec![0]);
    assert_ne!(a, b);
    assert_eq!(store.len(), 2);
}

#[test]
fn revoke_frees_exactly_once() {
    let store = BlobStore::new();
    let url = store.create(vec![9; 16]);

    assert!(store.revoke(&url));
    assert!(!store.revoke(&url));
    assert!(store.get(&url).is_none());
    assert!(store.is_empty());
}

#[test]
fn clear_reports_remaining_count() {
    let store = BlobStore::new();
    let a = store.create(vec![1]);
    let _b = store.create(vec![2]);
    store.revoke(&a);

    assert_eq!(store.clear(), 1);
    assert_eq!(store.clear(), 0);
}

#[test]
fn clones_share_the_same_registry() {
    let store = BlobStore::new();
    let other = store.clone();
    let url = store.create(vec![7]);

    assert!(other.get(&url).is_some());
    assert!(other.revoke(&url));
    assert!(store.get(&url).is_none());
}

#[test]
fn display_formats_as_blob_scheme() {
    let store = BlobStore::new();
    let url = store.create(vec![]);
    assert!(url.to_string().starts_with("blob:resono/"));
}
