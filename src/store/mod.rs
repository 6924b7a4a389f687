//! Persistent key-value storage for sentence pairs and settings
//!
//! Two records live in the store: `"sentences"` (a JSON array of pairs) and
//! `"settings"` (a JSON object). [`DataStore`] is the only place that parses
//! or serializes them, so both surfaces see the same defaults and the same
//! failure handling.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::model::{SentenceList, SentencePair, Settings};
use crate::{Result, SpeechCardsError};
use log::{debug, error, warn};

/// Key holding the serialized sentence list
pub const SENTENCES_KEY: &str = "sentences";

/// Key holding the serialized settings record
pub const SETTINGS_KEY: &str = "settings";

/// Synchronous string key-value store
///
/// Backends report failures as `StoreRead` / `StoreWrite` errors.
pub trait KeyValueStore: Send {
    /// Read a value, `None` if the key is absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete a key; deleting an absent key is not an error
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Typed access to the two persisted records
pub struct DataStore {
    kv: Box<dyn KeyValueStore>,
}

impl DataStore {
    pub fn new(kv: Box<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Default list used when nothing has been saved yet
    pub fn default_sentences() -> SentenceList {
        vec![SentencePair::seed()]
    }

    /// Load the sentence list
    ///
    /// An absent record yields the seeded default. A record that cannot be
    /// read or parsed is logged and replaced by an empty list.
    pub fn load_sentence_list(&self) -> SentenceList {
        match self.kv.get(SENTENCES_KEY) {
            Ok(None) => {
                debug!("No stored sentences, using seeded default");
                Self::default_sentences()
            }
            Ok(Some(raw)) => match serde_json::from_str::<SentenceList>(&raw) {
                Ok(list) => {
                    debug!("Loaded {} sentence pairs", list.len());
                    list
                }
                Err(e) => {
                    error!("Error reading sentences: {}", e);
                    Vec::new()
                }
            },
            Err(e) => {
                error!("Error reading sentences: {}", e);
                Vec::new()
            }
        }
    }

    /// Serialize and write the sentence list
    pub fn save_sentence_list(&mut self, list: &[SentencePair]) -> Result<()> {
        let raw = serde_json::to_string(list)?;
        debug!("Saving {} sentence pairs", list.len());
        self.kv.set(SENTENCES_KEY, &raw)
    }

    /// Load settings, falling back to defaults when absent or unreadable
    ///
    /// Defaults are not written back.
    pub fn load_settings(&self) -> Settings {
        match self.kv.get(SETTINGS_KEY) {
            Ok(None) => Settings::default(),
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                error!("Error reading settings: {}", e);
                Settings::default()
            }),
            Err(e) => {
                error!("Error reading settings: {}", e);
                Settings::default()
            }
        }
    }

    /// Serialize and write the settings record
    pub fn save_settings(&mut self, settings: &Settings) -> Result<()> {
        let raw = serde_json::to_string(settings)?;
        debug!("Saving settings: {}", raw);
        self.kv.set(SETTINGS_KEY, &raw)
    }

    /// Delete both records
    ///
    /// Both removals are attempted even if the first one fails.
    pub fn clear_all(&mut self) -> Result<()> {
        let sentences = self.kv.remove(SENTENCES_KEY);
        let settings = self.kv.remove(SETTINGS_KEY);

        match (sentences, settings) {
            (Ok(()), Ok(())) => Ok(()),
            (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
            (Err(first), Err(second)) => {
                warn!("Both removals failed; second error: {}", second);
                Err(first)
            }
        }
    }

    /// Whether a record exists under `key`
    pub fn contains(&self, key: &str) -> bool {
        matches!(self.kv.get(key), Ok(Some(_)))
    }
}

impl From<MemoryStore> for DataStore {
    fn from(store: MemoryStore) -> Self {
        Self::new(Box::new(store))
    }
}

impl From<FileStore> for DataStore {
    fn from(store: FileStore) -> Self {
        Self::new(Box::new(store))
    }
}

pub(crate) fn write_error(context: &str, e: impl std::fmt::Display) -> SpeechCardsError {
    SpeechCardsError::StoreWrite(format!("{}: {}", context, e))
}

pub(crate) fn read_error(context: &str, e: impl std::fmt::Display) -> SpeechCardsError {
    SpeechCardsError::StoreRead(format!("{}: {}", context, e))
}
