//! Speech synthesizer abstraction
//!
//! The platform speech channel is a single shared resource: a new utterance
//! may interrupt whatever is playing, and `cancel` drops everything queued.
//! The driver owns the only handle to it.

use crate::Result;
use log::info;

/// One request to the speech channel
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// Rate multiplier, 1.0 is the platform's normal rate
    pub rate: f32,
    /// Pitch multiplier, 1.0 is the platform's normal pitch
    pub pitch: f32,
}

impl Utterance {
    pub fn new(text: impl Into<String>, rate: f32, pitch: f32) -> Self {
        Self {
            text: text.into(),
            rate,
            pitch,
        }
    }
}

/// One call made on a [`Synth`], in a form that can be stored and compared
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechCommand {
    /// Speak an utterance, optionally interrupting current speech
    Speak { utterance: Utterance, interrupt: bool },
    /// Cancel/silence current and queued speech
    Cancel,
    /// Set speech volume (0-100)
    SetVolume(u8),
    /// Set voice index (backend-specific)
    SetVoiceIdx(usize),
}

/// Speech synthesizer trait
///
/// Backends translate rate and pitch multipliers into their own ranges.
pub trait Synth: Send {
    /// Speak an utterance; `interrupt` stops current speech first
    fn speak(&mut self, utterance: &Utterance, interrupt: bool) -> Result<()>;

    /// Cancel/silence current and queued speech
    fn cancel(&mut self) -> Result<()>;

    /// Whether audio is still playing
    ///
    /// Backends that cannot tell report `false`.
    fn is_speaking(&mut self) -> Result<bool>;

    /// Set speech volume (0-100)
    fn set_volume(&mut self, volume: u8) -> Result<()>;

    /// Set voice by index (platform-specific)
    fn set_voice_idx(&mut self, idx: usize) -> Result<()>;
}

/// Probe the platform for a speech synthesizer
///
/// Returns `SpeechUnavailable` if no backend can be initialized; callers keep
/// running without speech and tell the user when they try to speak.
pub fn create_synth() -> Result<Box<dyn Synth>> {
    use super::backends::native::NativeSynth;

    info!(
        "Creating native speech synthesizer for platform: {}",
        std::env::consts::OS
    );

    match NativeSynth::new() {
        Ok(synth) => {
            info!("✓ Successfully initialized native TTS backend");
            Ok(Box::new(synth))
        }
        Err(e) => {
            info!("✗ Native TTS backend unavailable: {}", e);
            Err(crate::SpeechCardsError::SpeechUnavailable)
        }
    }
}
