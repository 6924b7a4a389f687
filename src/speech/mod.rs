//! Speech synthesis system

pub mod synth;
pub mod driver;
pub mod backends;

pub use synth::{create_synth, SpeechCommand, Synth, Utterance};
pub use driver::{Cue, SpeechDriver, Stage, DEFAULT_REPEAT_INTERVAL};
