//! Application configuration
//!
//! Lives in `~/.speechcards.cfg` (INI). This holds how the program runs:
//! where the store is, how the synthesizer is set up, the gap between
//! repeats. Learner data (pairs and speech settings) is in the store instead.

use crate::speech::DEFAULT_REPEAT_INTERVAL;
use crate::store::FileStore;
use crate::{Result, SpeechCardsError};
use ini::Ini;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path (~/.speechcards.cfg)
    path: PathBuf,
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from `path`, writing defaults there if it does not exist
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(&path)
                .map_err(|e| SpeechCardsError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_config();
            default
                .write_to_file(&path)
                .map_err(|e| SpeechCardsError::IniParse(format!("Failed to write config: {}", e)))?;
            default
        };

        Ok(Self { ini, path })
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        debug!("Saving config to {:?}", self.path);
        self.ini
            .write_to_file(&self.path)
            .map_err(|e| SpeechCardsError::Config(format!("Failed to save config: {}", e)))
    }

    /// Get config file path (~/.speechcards.cfg)
    fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".speechcards.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create default configuration
    fn default_config() -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("speech")).set(
            "repeat_interval_ms",
            DEFAULT_REPEAT_INTERVAL.as_millis().to_string(),
        );
        ini.with_section(Some("store"));

        ini
    }

    /// Get a string value from config
    pub fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.ini.get_from(Some(section), key).map(str::to_string)
    }

    /// Get an integer value from config
    pub fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Set a value in config
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    /// Gap between repeats of one utterance
    pub fn repeat_interval(&self) -> Duration {
        let default = DEFAULT_REPEAT_INTERVAL.as_millis() as i64;
        let ms = self.get_int("speech", "repeat_interval_ms", default);
        u64::try_from(ms)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_REPEAT_INTERVAL)
    }

    /// Speech volume (0-100)
    pub fn volume(&self) -> Option<u8> {
        self.get_int("speech", "volume", -1)
            .try_into()
            .ok()
            .filter(|&v| v <= 100)
    }

    /// Voice index for TTS engine
    pub fn voice_idx(&self) -> Option<usize> {
        self.get_int("speech", "voice_idx", -1).try_into().ok()
    }

    /// Path of the key-value store file
    pub fn store_path(&self) -> PathBuf {
        self.get_string("store", "path")
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| FileStore::default_location().path().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_written_on_first_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("speechcards.cfg");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.repeat_interval(), Duration::from_millis(2500));
        assert_eq!(config.volume(), None);
        assert_eq!(config.voice_idx(), None);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("speechcards.cfg");
        std::fs::write(
            &path,
            "[speech]\nrepeat_interval_ms = -5\nvolume = 300\nvoice_idx = two\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.repeat_interval(), DEFAULT_REPEAT_INTERVAL);
        assert_eq!(config.volume(), None);
        assert_eq!(config.voice_idx(), None);
    }
}
