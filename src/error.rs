//! Error types for speechcards

use std::io;
use thiserror::Error;

/// Rejected admin input
///
/// Shown inline on the admin surface and cleared by the next successful add.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in both fields")]
    MissingField,

    #[error("Please enter exactly three words for the sentence")]
    WrongWordCount { found: usize },

    #[error("{field} must be a number (got '{input}')")]
    InvalidNumber { field: &'static str, input: String },

    #[error("No sentence at position {index} (have {len})")]
    NoSuchPair { index: usize, len: usize },
}

/// Main error type for speechcards
#[derive(Error, Debug)]
pub enum SpeechCardsError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Store read error: {0}")]
    StoreRead(String),

    #[error("Store write error: {0}")]
    StoreWrite(String),

    #[error("Speech synthesis is not available")]
    SpeechUnavailable,

    #[error("Speech synthesis error: {0}")]
    Speech(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for speechcards operations
pub type Result<T> = std::result::Result<T, SpeechCardsError>;

impl From<String> for SpeechCardsError {
    fn from(s: String) -> Self {
        SpeechCardsError::Other(s)
    }
}

impl From<&str> for SpeechCardsError {
    fn from(s: &str) -> Self {
        SpeechCardsError::Other(s.to_string())
    }
}
