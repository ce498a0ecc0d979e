//! In-memory adapter for the account store
//!
//! Keeps the serialized document in memory so loads go through the same
//! serde path as the file adapter. Counts saves, which lets callers check
//! that a rejected operation never rewrote the store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::domain::result::{Error, Result};
use crate::domain::AccountStore;
use crate::ports::{AccountRepository, LoadStatus, LoadedStore};

#[derive(Default)]
pub struct InMemoryRepository {
    document: Mutex<Option<String>>,
    saves: AtomicUsize,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a raw document, as if read from disk
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Mutex::new(Some(document.into())),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of completed saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl AccountRepository for InMemoryRepository {
    fn load(&self) -> Result<LoadedStore> {
        let document = self
            .document
            .lock()
            .map_err(|e| Error::Io(std::io::Error::other(format!("Lock poisoned: {}", e))))?;

        match document.as_deref() {
            None => Ok(LoadedStore::empty(LoadStatus::Missing)),
            Some(text) => match serde_json::from_str::<AccountStore>(text) {
                Ok(store) => Ok(LoadedStore {
                    store,
                    status: LoadStatus::Loaded,
                }),
                Err(e) => Ok(LoadedStore::empty(LoadStatus::Corrupt(e.to_string()))),
            },
        }
    }

    fn save(&self, store: &AccountStore) -> Result<()> {
        let text = serde_json::to_string(store)?;
        let mut document = self
            .document
            .lock()
            .map_err(|e| Error::Io(std::io::Error::other(format!("Lock poisoned: {}", e))))?;
        *document = Some(text);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
