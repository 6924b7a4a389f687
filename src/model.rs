//! Persisted data model: sentence pairs and speech settings

use serde::{Deserialize, Serialize};

/// Number of words a sentence must have
pub const SENTENCE_WORDS: usize = 3;

/// A keyword and the three-word sentence spoken after it
///
/// Pairs are identified by position in the list; duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentencePair {
    pub keyword: String,
    pub sentence: String,
}

impl SentencePair {
    pub fn new(keyword: impl Into<String>, sentence: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            sentence: sentence.into(),
        }
    }

    /// The pair a fresh install starts with
    pub fn seed() -> Self {
        Self::new("hungry", "I am hungry")
    }
}

/// Ordered list of pairs, insertion order preserved
pub type SentenceList = Vec<SentencePair>;

/// Count whitespace-separated words
///
/// Runs of whitespace count as a single separator, so "I  am hungry" is three words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Speech settings shared by both surfaces
///
/// Serialized with camelCase keys (`wordDelay`, `repeatCount`, ...).
/// Fields missing from a stored record fall back to their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Seconds between speaking the keyword and speaking the sentence
    pub word_delay: u32,

    /// How many times each utterance is spoken
    pub repeat_count: u32,

    /// Speech rate multiplier (1.0 is the platform's normal rate)
    pub speech_rate: f32,

    /// Speech pitch multiplier (1.0 is the platform's normal pitch)
    pub speech_pitch: f32,
}

impl Settings {
    pub const WORD_DELAY_RANGE: (u32, u32) = (1, 30);
    pub const REPEAT_COUNT_RANGE: (u32, u32) = (1, 5);
    pub const RATE_RANGE: (f32, f32) = (0.5, 2.0);
    pub const PITCH_RANGE: (f32, f32) = (0.5, 2.0);

    /// Return a copy with every field pulled into its declared domain
    ///
    /// NaN rate or pitch falls back to the default value.
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        let clamp_f = |v: f32, (lo, hi): (f32, f32), fallback: f32| {
            if v.is_nan() {
                fallback
            } else {
                v.clamp(lo, hi)
            }
        };

        Self {
            word_delay: self
                .word_delay
                .clamp(Self::WORD_DELAY_RANGE.0, Self::WORD_DELAY_RANGE.1),
            repeat_count: self
                .repeat_count
                .clamp(Self::REPEAT_COUNT_RANGE.0, Self::REPEAT_COUNT_RANGE.1),
            speech_rate: clamp_f(self.speech_rate, Self::RATE_RANGE, defaults.speech_rate),
            speech_pitch: clamp_f(self.speech_pitch, Self::PITCH_RANGE, defaults.speech_pitch),
        }
    }

    /// True when every field lies inside its declared domain
    pub fn in_domain(&self) -> bool {
        self.clamped() == *self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            word_delay: 10,
            repeat_count: 1,
            speech_rate: 0.8,
            speech_pitch: 1.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("I am hungry"), 3);
        assert_eq!(word_count("  I   am\thungry  "), 3);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("I want more food"), 4);
    }

    #[test]
    fn test_settings_json_keys() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains("\"wordDelay\":10"));
        assert!(json.contains("\"repeatCount\":1"));
        assert!(json.contains("\"speechRate\":0.8"));
        assert!(json.contains("\"speechPitch\":1.2"));
    }

    #[test]
    fn test_partial_settings_record() {
        let settings: Settings = serde_json::from_str(r#"{"wordDelay":4}"#).unwrap();
        assert_eq!(settings.word_delay, 4);
        assert_eq!(settings.repeat_count, 1);
        assert_eq!(settings.speech_rate, 0.8);
    }

    #[test]
    fn test_clamped() {
        let wild = Settings {
            word_delay: 0,
            repeat_count: 9,
            speech_rate: 3.0,
            speech_pitch: f32::NAN,
        };
        let clamped = wild.clamped();
        assert_eq!(clamped.word_delay, 1);
        assert_eq!(clamped.repeat_count, 5);
        assert_eq!(clamped.speech_rate, 2.0);
        assert_eq!(clamped.speech_pitch, 1.2);
        assert!(clamped.in_domain());
        assert!(Settings::default().in_domain());
    }
}
