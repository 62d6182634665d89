use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use super::Document;

/// Shared handle to one region's document.
///
/// Handlers and query callbacks take turns on the lock; there is no
/// ordering between concurrent writers, the last one wins.
#[derive(Clone, Debug, Default)]
pub struct DocumentStore {
    inner: Arc<Mutex<Document>>,
    revision: Arc<AtomicU64>,
}

impl DocumentStore {
    pub fn new(document: Document) -> Self {
        Self {
            inner: Arc::new(Mutex::new(document)),
            revision: Arc::new(AtomicU64::new(0)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Document> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Runs `f` against the current document without changing it.
    pub fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        f(&self.lock())
    }

    /// Runs `f` with mutable access and bumps the revision.
    pub fn update<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        let result = f(&mut self.lock());
        self.revision.fetch_add(1, Ordering::SeqCst);
        result
    }

    pub fn replace(&self, document: Document) {
        self.update(|current| *current = document);
    }

    pub fn snapshot(&self) -> Document {
        self.read(Document::clone)
    }

    /// Incremented on every mutation; lets callers tell whether a redraw
    /// is stale.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }
}

/// One document per cloud region, created on first use.
#[derive(Clone, Debug, Default)]
pub struct Regions {
    inner: Arc<Mutex<BTreeMap<String, DocumentStore>>>,
}

impl Regions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&self, region: &str) -> DocumentStore {
        let mut regions = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        regions
            .entry(region.to_string())
            .or_insert_with(|| {
                tracing::debug!(region, "Creating region document");
                DocumentStore::new(Document::new(region))
            })
            .clone()
    }

    pub fn insert(&self, region: &str, document: Document) -> DocumentStore {
        let store = DocumentStore::new(document);
        let mut regions = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        regions.insert(region.to_string(), store.clone());
        store
    }

    pub fn names(&self) -> Vec<String> {
        let regions = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        regions.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InstancePatch;

    #[test]
    fn updates_are_visible_through_every_handle() {
        let store = DocumentStore::default();
        let other = store.clone();
        let id = store.update(|doc| doc.new_instance(InstancePatch::default()));
        assert!(other.read(|doc| doc.get_instance(&id).is_some()));
        assert_eq!(other.revision(), 1);
    }

    #[test]
    fn snapshot_is_detached() {
        let store = DocumentStore::default();
        let mut snapshot = store.snapshot();
        snapshot.title = "changed".into();
        assert_eq!(store.read(|doc| doc.title.clone()), "");
    }

    #[test]
    fn regions_share_store_per_name() {
        let regions = Regions::new();
        let a = regions.get_or_create("uk-london-1");
        a.update(|doc| doc.description = "london".into());
        let again = regions.get_or_create("uk-london-1");
        assert_eq!(again.read(|doc| doc.description.clone()), "london");
        assert_eq!(regions.names(), vec!["uk-london-1".to_string()]);
    }
}
