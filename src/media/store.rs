use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Locator for a blob held by a [`BlobStore`].
///
/// A `BlobUrl` is only meaningful against the store that minted it. Cloning
/// the URL does not clone ownership: the track that carries it is responsible
/// for revoking it exactly once.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlobUrl(u64);

impl fmt::Display for BlobUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "blob:resono/{}", self.0)
    }
}

/// Registry mapping generated URLs to in-memory file bytes.
///
/// Cheap to clone; all clones share the same underlying map.
#[derive(Clone, Default)]
pub struct BlobStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    blobs: HashMap<u64, Arc<[u8]>>,
}

impl BlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` and return a fresh URL for them.
    pub fn create(&self, bytes: Vec<u8>) -> BlobUrl {
        let mut inner = self.inner.lock().expect("blob store poisoned");
        let id = inner.next_id;
        inner.next_id += 1;
        inner.blobs.insert(id, Arc::from(bytes));
        BlobUrl(id)
    }

    /// Look up the bytes behind `url`, if it has not been revoked.
    pub fn get(&self, url: &BlobUrl) -> Option<Arc<[u8]>> {
        self.inner
            .lock()
            .expect("blob store poisoned")
            .blobs
            .get(&url.0)
            .cloned()
    }

    /// Release the blob behind `url`. Returns `true` only for the call that
    /// actually freed it; revoking an unknown or already-revoked URL is a
    /// no-op.
    pub fn revoke(&self, url: &BlobUrl) -> bool {
        self.inner
            .lock()
            .expect("blob store poisoned")
            .blobs
            .remove(&url.0)
            .is_some()
    }

    /// Drop every remaining blob, returning how many were freed.
    pub fn clear(&self) -> usize {
        let mut inner = self.inner.lock().expect("blob store poisoned");
        let n = inner.blobs.len();
        inner.blobs.clear();
        n
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("blob store poisoned").blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
