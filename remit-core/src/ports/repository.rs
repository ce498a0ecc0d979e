//! Repository port - account store persistence

use crate::domain::result::Result;
use crate::domain::AccountStore;

/// How the persisted document was found at load time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    /// No document yet; fresh install
    Missing,
    /// Unreadable or unparsable document, replaced by an empty store
    Corrupt(String),
}

/// Result of loading the store
#[derive(Debug, Clone)]
pub struct LoadedStore {
    pub store: AccountStore,
    pub status: LoadStatus,
}

impl LoadedStore {
    pub fn empty(status: LoadStatus) -> Self {
        Self {
            store: AccountStore::new(),
            status,
        }
    }
}

/// Whole-document store persistence
///
/// There is no partial update: every mutation rewrites the full store and
/// there is no locking between sessions (last writer wins).
pub trait AccountRepository: Send + Sync {
    /// Load the whole store
    ///
    /// A missing or corrupt document is not an error; it loads as an empty
    /// store and the status says why.
    fn load(&self) -> Result<LoadedStore>;

    /// Replace the persisted document with `store`
    fn save(&self, store: &AccountStore) -> Result<()>;
}
