//! speechcards - spoken keyword flashcards
//!
//! A console tool for speech practice: a caregiver keeps a list of
//! keyword / three-word-sentence pairs, and the learner screen picks one at
//! random, speaks the keyword, waits, then speaks the whole sentence.

pub mod error;
pub mod input;
pub mod model;
pub mod prompt;
pub mod schedule;
pub mod selection;
pub mod speech;
pub mod state;
pub mod store;
pub mod surface;
pub mod terminal;
pub mod view;

pub use error::{Result, SpeechCardsError, ValidationError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "speechcards";
