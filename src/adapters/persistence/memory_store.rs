//! In-memory document store for testing.
//!
//! Holds one document per store and ignores the location it is given.
//! Counts loads and saves so tests can assert that reads never write
//! and that misses leave the document untouched.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::ports::document_store::{DocumentLocation, DocumentStore, StoreError};

/// In-memory document store.
pub struct MemoryDocumentStore<D> {
    document: Mutex<D>,
    loads: AtomicUsize,
    saves: AtomicUsize,
}

impl<D: Clone> MemoryDocumentStore<D> {
    /// Create a store pre-loaded with `document`.
    pub fn new(document: D) -> Self {
        Self {
            document: Mutex::new(document),
            loads: AtomicUsize::new(0),
            saves: AtomicUsize::new(0),
        }
    }

    /// The document as currently stored.
    pub fn snapshot(&self) -> D {
        self.document
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of `load` calls so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Number of `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl<D> DocumentStore<D> for MemoryDocumentStore<D>
where
    D: Clone + Send,
{
    fn load(&self, _location: &DocumentLocation) -> Result<D, StoreError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.snapshot())
    }

    fn save(&self, document: &D, _location: &DocumentLocation) -> Result<(), StoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.document.lock().unwrap_or_else(PoisonError::into_inner) = document.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_replaces() {
        let store = MemoryDocumentStore::new(vec![1, 2]);
        let location = DocumentLocation::new("unused.json", "unused.schema.json");

        assert_eq!(store.load(&location).unwrap(), vec![1, 2]);
        store.save(&vec![3], &location).unwrap();

        assert_eq!(store.snapshot(), vec![3]);
        assert_eq!(store.load_count(), 1);
        assert_eq!(store.save_count(), 1);
    }
}
