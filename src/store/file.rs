//! JSON-file backed store
//!
//! All keys live in one JSON object on disk, e.g.
//! `{"sentences": "[...]", "settings": "{...}"}`. Values stay opaque strings
//! so the file mirrors a browser's local storage.

use super::{read_error, write_error, KeyValueStore};
use crate::Result;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

type Entries = BTreeMap<String, String>;

/// Key-value store persisted to a single JSON file
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// File name used inside the config directory
    pub const FILE_NAME: &'static str = "store.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform config dir (`~/.config/speechcards/store.json` on Linux)
    pub fn default_location() -> Self {
        let dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::APP_NAME);
        Self::new(dir.join(Self::FILE_NAME))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Entries> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(Entries::new()),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| read_error("store file", e)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(read_error("store file", e)),
        }
    }

    /// Entries to modify before a write
    ///
    /// A corrupt file is replaced rather than blocking every future write.
    fn entries_for_write(&self) -> Entries {
        self.read_entries().unwrap_or_else(|e| {
            warn!("Discarding unreadable store {:?}: {}", self.path, e);
            Entries::new()
        })
    }

    fn write_entries(&self, entries: &Entries) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| write_error("store dir", e))?;
            }
        }

        let raw = serde_json::to_string_pretty(entries).map_err(|e| write_error("store file", e))?;

        // Write then rename so a crash never leaves a half-written store
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw).map_err(|e| write_error("store file", e))?;
        fs::rename(&tmp, &self.path).map_err(|e| write_error("store file", e))?;

        debug!("Wrote {} keys to {:?}", entries.len(), self.path);
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries_for_write();
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match self.read_entries() {
            Ok(mut entries) => {
                if entries.remove(key).is_some() {
                    self.write_entries(&entries)?;
                }
                Ok(())
            }
            Err(e) => {
                // An unreadable file may still hold the key; replace it so the key is gone
                warn!("Discarding unreadable store {:?}: {}", self.path, e);
                self.write_entries(&Entries::new())
            }
        }
    }
}
