//! Native Rust TTS backend using the tts crate
//!
//! This backend uses the `tts` crate which provides a unified interface to:
//! - Speech Dispatcher on Linux (via native bindings)
//! - AVFoundation on macOS/iOS (via native bindings)
//! - SAPI / WinRT on Windows

use crate::model::Settings;
use crate::speech::{Synth, Utterance};
use crate::{Result, SpeechCardsError};
use log::{debug, error, warn};
use tts::Tts as TtsCrate;

/// Native TTS backend using the tts crate
pub struct NativeSynth {
    /// The tts crate's TTS instance
    tts: TtsCrate,

    /// Last rate multiplier pushed to the engine
    rate: Applied,

    /// Last pitch multiplier pushed to the engine
    pitch: Applied,
}

/// Last value successfully pushed to the engine for one parameter
#[derive(Debug, Default)]
struct Applied(Option<f32>);

impl Applied {
    /// Run `set` unless `value` is already applied
    ///
    /// The value is only remembered once `set` succeeds, so a failed change
    /// is retried on the next utterance.
    fn update(&mut self, value: f32, set: impl FnOnce(f32) -> Result<()>) -> Result<()> {
        if self.0 == Some(value) {
            return Ok(());
        }
        set(value)?;
        self.0 = Some(value);
        Ok(())
    }
}

impl NativeSynth {
    /// Create a new native TTS synthesizer
    ///
    /// Initializes the platform-appropriate TTS backend
    pub fn new() -> Result<Self> {
        debug!("Creating native TTS backend");

        let tts = TtsCrate::default()
            .map_err(|e| SpeechCardsError::Speech(format!("Failed to initialize TTS: {}", e)))?;

        debug!("Native TTS backend created successfully");

        Ok(Self {
            tts,
            rate: Applied::default(),
            pitch: Applied::default(),
        })
    }

    fn apply_rate(&mut self, multiplier: f32) -> Result<()> {
        let tts = &mut self.tts;
        self.rate.update(multiplier, |multiplier| {
            if !tts.supported_features().rate {
                warn!("Rate control not supported on this platform");
                return Ok(());
            }

            let rate = scale_multiplier(
                multiplier,
                Settings::RATE_RANGE,
                (tts.min_rate(), tts.normal_rate(), tts.max_rate()),
            );
            debug!("Setting rate to {} (multiplier {})", rate, multiplier);
            tts.set_rate(rate)
                .map_err(|e| SpeechCardsError::Speech(format!("Failed to set rate: {}", e)))?;
            Ok(())
        })
    }

    fn apply_pitch(&mut self, multiplier: f32) -> Result<()> {
        let tts = &mut self.tts;
        self.pitch.update(multiplier, |multiplier| {
            if !tts.supported_features().pitch {
                warn!("Pitch control not supported on this platform");
                return Ok(());
            }

            let pitch = scale_multiplier(
                multiplier,
                Settings::PITCH_RANGE,
                (tts.min_pitch(), tts.normal_pitch(), tts.max_pitch()),
            );
            debug!("Setting pitch to {} (multiplier {})", pitch, multiplier);
            tts.set_pitch(pitch)
                .map_err(|e| SpeechCardsError::Speech(format!("Failed to set pitch: {}", e)))?;
            Ok(())
        })
    }
}

/// Map a multiplier onto an engine's native range
///
/// 1.0 lands on the engine's normal value and the ends of `domain` land on
/// the engine's min and max, linearly on each side. Speech Dispatcher's
/// normal rate is 0, so plain multiplication would not work there.
pub fn scale_multiplier(multiplier: f32, domain: (f32, f32), engine: (f32, f32, f32)) -> f32 {
    let (lo, hi) = domain;
    let (min, normal, max) = engine;
    let m = multiplier.clamp(lo, hi);

    if m < 1.0 {
        normal - (1.0 - m) / (1.0 - lo) * (normal - min)
    } else {
        normal + (m - 1.0) / (hi - 1.0) * (max - normal)
    }
}

impl Synth for NativeSynth {
    fn speak(&mut self, utterance: &Utterance, interrupt: bool) -> Result<()> {
        if utterance.text.is_empty() {
            return Ok(());
        }

        // A failed rate/pitch change should not keep the words from being spoken
        if let Err(e) = self.apply_rate(utterance.rate) {
            warn!("{}", e);
        }
        if let Err(e) = self.apply_pitch(utterance.pitch) {
            warn!("{}", e);
        }

        debug!("Speaking: {}", utterance.text);
        self.tts
            .speak(utterance.text.as_str(), interrupt)
            .map_err(|e| {
                error!("Failed to speak: {}", e);
                SpeechCardsError::Speech(format!("Speak failed: {}", e))
            })?;

        Ok(())
    }

    fn cancel(&mut self) -> Result<()> {
        debug!("Canceling speech");
        self.tts.stop().map_err(|e| {
            error!("Failed to cancel speech: {}", e);
            SpeechCardsError::Speech(format!("Cancel failed: {}", e))
        })?;

        Ok(())
    }

    fn is_speaking(&mut self) -> Result<bool> {
        if !self.tts.supported_features().is_speaking {
            return Ok(false);
        }

        self.tts
            .is_speaking()
            .map_err(|e| SpeechCardsError::Speech(format!("Failed to query speech state: {}", e)))
    }

    fn set_volume(&mut self, volume: u8) -> Result<()> {
        debug!("Setting volume to {}", volume);

        if !self.tts.supported_features().volume {
            warn!("Volume control not supported on this platform");
            return Ok(());
        }

        let (min, max) = (self.tts.min_volume(), self.tts.max_volume());
        let converted = min + (max - min) * f32::from(volume.min(100)) / 100.0;
        self.tts
            .set_volume(converted)
            .map_err(|e| SpeechCardsError::Speech(format!("Failed to set volume: {}", e)))?;

        Ok(())
    }

    fn set_voice_idx(&mut self, idx: usize) -> Result<()> {
        debug!("Setting voice index to {}", idx);

        let voices = self
            .tts
            .voices()
            .map_err(|e| SpeechCardsError::Speech(format!("Failed to get voices: {}", e)))?;

        if let Some(voice) = voices.get(idx) {
            debug!("Selecting voice: {:?}", voice);
            self.tts
                .set_voice(voice)
                .map_err(|e| SpeechCardsError::Speech(format!("Failed to set voice: {}", e)))?;
        } else {
            warn!(
                "Voice index {} out of range (have {} voices)",
                idx,
                voices.len()
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_synth() {
        // May fail without speech-dispatcher (Linux) or in CI without audio
        match NativeSynth::new() {
            Ok(_) => println!("✓ Native TTS backend initialized successfully"),
            Err(e) => println!("⚠ TTS initialization failed (may be expected in CI): {}", e),
        }
    }

    #[test]
    fn test_scale_speech_dispatcher_range() {
        let engine = (-100.0, 0.0, 100.0);
        assert_eq!(scale_multiplier(1.0, (0.5, 2.0), engine), 0.0);
        assert_eq!(scale_multiplier(0.5, (0.5, 2.0), engine), -100.0);
        assert_eq!(scale_multiplier(2.0, (0.5, 2.0), engine), 100.0);
        assert!((scale_multiplier(0.8, (0.5, 2.0), engine) - -40.0).abs() < 1e-4);
    }

    #[test]
    fn test_failed_change_is_retried() {
        let mut applied = Applied::default();
        let mut calls = 0;

        let failed = applied.update(1.5, |_| {
            calls += 1;
            Err(SpeechCardsError::Speech("engine busy".to_string()))
        });
        assert!(failed.is_err());

        applied.update(1.5, |_| {
            calls += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(calls, 2);

        // Now cached
        applied.update(1.5, |_| {
            calls += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_scale_clamps_outside_domain() {
        let engine = (0.1, 1.0, 10.0);
        assert!((scale_multiplier(9.0, (0.5, 2.0), engine) - 10.0).abs() < 1e-4);
        assert!((scale_multiplier(0.0, (0.5, 2.0), engine) - 0.1).abs() < 1e-4);
    }
}
