//! JSON file adapter for the account store
//!
//! The store is read fully and written fully. Output is indented with four
//! spaces so existing `user_data.json` files keep their layout.
//!
//! A document that does not parse is copied to `<file>.corrupt` before the
//! store starts empty.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::domain::result::Result;
use crate::domain::AccountStore;
use crate::ports::{AccountRepository, LoadStatus, LoadedStore};

/// Account store persisted as a single JSON document
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Where an unparsable document is set aside
    pub fn corrupt_copy_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".corrupt");
        self.path.with_file_name(name)
    }

    fn set_aside(&self, reason: String) -> LoadedStore {
        let backup = self.corrupt_copy_path();
        let reason = match fs::copy(&self.path, &backup) {
            Ok(_) => format!("{} (copied to {})", reason, backup.display()),
            Err(e) => format!("{} (copy to {} failed: {})", reason, backup.display(), e),
        };
        LoadedStore::empty(LoadStatus::Corrupt(reason))
    }

    /// Serialize the store the way it is written to disk
    pub fn to_document(store: &AccountStore) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        store.serialize(&mut ser)?;
        Ok(buf)
    }
}

impl AccountRepository for JsonFileRepository {
    fn load(&self) -> Result<LoadedStore> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(LoadedStore::empty(LoadStatus::Missing));
            }
            Err(e) => return Ok(LoadedStore::empty(LoadStatus::Corrupt(e.to_string()))),
        };

        match serde_json::from_str::<AccountStore>(&content) {
            Ok(store) => Ok(LoadedStore {
                store,
                status: LoadStatus::Loaded,
            }),
            Err(e) => Ok(self.set_aside(e.to_string())),
        }
    }

    fn save(&self, store: &AccountStore) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let document = Self::to_document(store)?;
        fs::write(&self.path, document)?;
        Ok(())
    }
}
