//! Admin surface: manage sentence pairs and speech settings

use crate::error::ValidationError;
use crate::model::{word_count, SentenceList, SentencePair, Settings, SENTENCE_WORDS};
use crate::prompt::UserPrompt;
use crate::store::DataStore;
use crate::Result;
use log::{debug, error, info};

pub const DELETE_CONFIRM: &str = "Are you sure you want to delete this sentence?";
pub const CLEAR_CONFIRM: &str =
    "Are you sure you want to clear all sentences and settings? This cannot be undone.";
pub const CLEARED_NOTICE: &str = "All data has been cleared.";
pub const CLEAR_FAILED_NOTICE: &str = "Error clearing data. Please try again.";
pub const SETTINGS_SAVED_NOTICE: &str = "Settings saved successfully!";
pub const SETTINGS_FAILED_NOTICE: &str = "Error saving settings. Please try again.";
pub const SENTENCES_FAILED_NOTICE: &str = "Error saving sentences. Please try again.";

/// One editable settings field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    WordDelay,
    RepeatCount,
    SpeechRate,
    SpeechPitch,
}

impl SettingField {
    pub const ALL: [SettingField; 4] = [
        SettingField::WordDelay,
        SettingField::RepeatCount,
        SettingField::SpeechRate,
        SettingField::SpeechPitch,
    ];

    /// Label shown next to the field
    pub fn label(self) -> &'static str {
        match self {
            SettingField::WordDelay => "Seconds between keyword and sentence",
            SettingField::RepeatCount => "Number of times to repeat",
            SettingField::SpeechRate => "Speech Speed (0.5 - 2.0)",
            SettingField::SpeechPitch => "Speech Pitch (0.5 - 2.0)",
        }
    }

    /// Name used in error messages
    pub fn name(self) -> &'static str {
        match self {
            SettingField::WordDelay => "word delay",
            SettingField::RepeatCount => "repeat count",
            SettingField::SpeechRate => "speech rate",
            SettingField::SpeechPitch => "speech pitch",
        }
    }

    /// Current value formatted for display
    pub fn value(self, settings: &Settings) -> String {
        match self {
            SettingField::WordDelay => settings.word_delay.to_string(),
            SettingField::RepeatCount => settings.repeat_count.to_string(),
            SettingField::SpeechRate => settings.speech_rate.to_string(),
            SettingField::SpeechPitch => settings.speech_pitch.to_string(),
        }
    }
}

/// State of the admin screen
///
/// Settings edits land in memory immediately; only [`save_settings`]
/// persists them.
///
/// [`save_settings`]: AdminSurface::save_settings
pub struct AdminSurface {
    sentences: SentenceList,
    settings: Settings,
    keyword_input: String,
    sentence_input: String,
    error: Option<ValidationError>,
}

impl AdminSurface {
    /// Build the surface from whatever the store holds
    pub fn load(store: &DataStore) -> Self {
        let sentences = store.load_sentence_list();
        let settings = store.load_settings();
        info!("Admin surface loaded with {} pairs", sentences.len());

        Self {
            sentences,
            settings,
            keyword_input: String::new(),
            sentence_input: String::new(),
            error: None,
        }
    }

    pub fn sentences(&self) -> &[SentencePair] {
        &self.sentences
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Inline error under the sentence field, if any
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn keyword_input(&self) -> &str {
        &self.keyword_input
    }

    pub fn sentence_input(&self) -> &str {
        &self.sentence_input
    }

    pub fn set_keyword_input(&mut self, text: impl Into<String>) {
        self.keyword_input = text.into();
    }

    pub fn set_sentence_input(&mut self, text: impl Into<String>) {
        self.sentence_input = text.into();
    }

    /// Validate the two input fields and append them as a new pair
    ///
    /// On a validation failure the error is kept inline and the list is
    /// untouched. On success the fields and any earlier error are cleared.
    pub fn add_pair(&mut self, store: &mut DataStore, prompt: &mut dyn UserPrompt) -> Result<()> {
        let keyword = self.keyword_input.trim();
        let sentence = self.sentence_input.trim();

        let checked = if keyword.is_empty() || sentence.is_empty() {
            Err(ValidationError::MissingField)
        } else {
            match word_count(sentence) {
                SENTENCE_WORDS => Ok(()),
                found => Err(ValidationError::WrongWordCount { found }),
            }
        };
        if let Err(e) = checked {
            debug!("Rejected pair: {}", e);
            self.error = Some(e.clone());
            return Err(e.into());
        }

        let pair = SentencePair::new(keyword, sentence);
        let mut updated = self.sentences.clone();
        updated.push(pair);
        self.persist_sentences(&updated, store, prompt)?;

        self.error = None;
        self.keyword_input.clear();
        self.sentence_input.clear();
        Ok(())
    }

    /// Delete the pair at `index` after the user confirms
    ///
    /// Returns `Ok(false)` when the user cancels.
    pub fn delete_pair(
        &mut self,
        index: usize,
        store: &mut DataStore,
        prompt: &mut dyn UserPrompt,
    ) -> Result<bool> {
        let len = self.sentences.len();
        if index >= len {
            return Err(ValidationError::NoSuchPair { index, len }.into());
        }

        if !prompt.confirm(DELETE_CONFIRM) {
            debug!("Delete of pair {} cancelled", index);
            return Ok(false);
        }

        let updated: SentenceList = self
            .sentences
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, pair)| pair.clone())
            .collect();
        self.persist_sentences(&updated, store, prompt)?;
        Ok(true)
    }

    /// Write the list and re-read it so memory matches the store
    fn persist_sentences(
        &mut self,
        list: &[SentencePair],
        store: &mut DataStore,
        prompt: &mut dyn UserPrompt,
    ) -> Result<()> {
        let saved = store.save_sentence_list(list);
        self.sentences = store.load_sentence_list();

        if let Err(e) = saved {
            error!("Error saving sentences: {}", e);
            prompt.alert(SENTENCES_FAILED_NOTICE);
            return Err(e);
        }
        Ok(())
    }

    /// Update one settings field from raw text input
    ///
    /// Takes effect in memory immediately; values are not range-checked
    /// until the settings are saved.
    pub fn edit_setting(&mut self, field: SettingField, raw: &str) -> std::result::Result<(), ValidationError> {
        let input = raw.trim();
        let invalid = || ValidationError::InvalidNumber {
            field: field.name(),
            input: raw.to_string(),
        };

        match field {
            SettingField::WordDelay => {
                self.settings.word_delay = input.parse().map_err(|_| invalid())?;
            }
            SettingField::RepeatCount => {
                self.settings.repeat_count = input.parse().map_err(|_| invalid())?;
            }
            SettingField::SpeechRate => {
                self.settings.speech_rate = parse_finite(input).ok_or_else(invalid)?;
            }
            SettingField::SpeechPitch => {
                self.settings.speech_pitch = parse_finite(input).ok_or_else(invalid)?;
            }
        }

        debug!("Edited {}: {}", field.name(), field.value(&self.settings));
        Ok(())
    }

    /// Replace the in-memory settings wholesale
    /// Clamp the in-memory settings to their domains and persist them
    pub fn save_settings(&mut self, store: &mut DataStore, prompt: &mut dyn UserPrompt) -> Result<()> {
        let clamped = self.settings.clamped();
        if clamped != self.settings {
            info!("Clamped settings {:?} to {:?}", self.settings, clamped);
            self.settings = clamped;
        }

        match store.save_settings(&self.settings) {
            Ok(()) => {
                prompt.alert(SETTINGS_SAVED_NOTICE);
                Ok(())
            }
            Err(e) => {
                error!("Error saving settings: {}", e);
                prompt.alert(SETTINGS_FAILED_NOTICE);
                Err(e)
            }
        }
    }

    /// Wipe both records after the user confirms
    ///
    /// Memory is reset to an empty list and default settings. Returns
    /// `Ok(false)` when the user cancels.
    pub fn clear_all(&mut self, store: &mut DataStore, prompt: &mut dyn UserPrompt) -> Result<bool> {
        if !prompt.confirm(CLEAR_CONFIRM) {
            return Ok(false);
        }

        if let Err(e) = store.clear_all() {
            error!("Error clearing data: {}", e);
            prompt.alert(CLEAR_FAILED_NOTICE);
            return Err(e);
        }

        self.sentences.clear();
        self.settings = Settings::default();
        self.error = None;
        info!("All data cleared");
        prompt.alert(CLEARED_NOTICE);
        Ok(true)
    }
}

fn parse_finite(input: &str) -> Option<f32> {
    input.parse::<f32>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompt;
    use crate::store::MemoryStore;
    use crate::SpeechCardsError;

    fn admin_with(pairs: &[(&str, &str)]) -> (AdminSurface, DataStore) {
        let mut store = DataStore::from(MemoryStore::new());
        let list: SentenceList = pairs.iter().map(|(k, s)| SentencePair::new(*k, *s)).collect();
        store.save_sentence_list(&list).unwrap();
        (AdminSurface::load(&store), store)
    }

    #[test]
    fn test_keyword_not_limited_to_one_token() {
        let (mut admin, mut store) = admin_with(&[]);
        let mut prompt = ScriptedPrompt::new();
        admin.set_keyword_input("ice cream");
        admin.set_sentence_input("I want it");
        admin.add_pair(&mut store, &mut prompt).unwrap();
        assert_eq!(admin.sentences()[0].keyword, "ice cream");
    }

    #[test]
    fn test_missing_field_checked_before_word_count() {
        let (mut admin, mut store) = admin_with(&[]);
        let mut prompt = ScriptedPrompt::new();
        admin.set_keyword_input("   ");
        admin.set_sentence_input("one two");
        assert!(admin.add_pair(&mut store, &mut prompt).is_err());
        assert_eq!(admin.error(), Some(&ValidationError::MissingField));
    }

    #[test]
    fn test_edit_setting_rejects_garbage() {
        let (mut admin, _store) = admin_with(&[]);
        assert!(admin.edit_setting(SettingField::SpeechRate, "fast").is_err());
        assert!(admin.edit_setting(SettingField::WordDelay, "-3").is_err());
        assert!(admin.edit_setting(SettingField::SpeechPitch, "inf").is_err());
        assert_eq!(*admin.settings(), Settings::default());

        admin.edit_setting(SettingField::WordDelay, " 7 ").unwrap();
        admin.edit_setting(SettingField::SpeechPitch, "1.5").unwrap();
        assert_eq!(admin.settings().word_delay, 7);
        assert_eq!(admin.settings().speech_pitch, 1.5);
    }

    #[test]
    fn test_delete_out_of_range() {
        let (mut admin, mut store) = admin_with(&[("a", "b c d")]);
        let mut prompt = ScriptedPrompt::answering([true]);
        let err = admin.delete_pair(4, &mut store, &mut prompt).unwrap_err();
        assert!(matches!(
            err,
            SpeechCardsError::Validation(ValidationError::NoSuchPair { index: 4, len: 1 })
        ));
        assert!(prompt.questions.is_empty());
    }
}
