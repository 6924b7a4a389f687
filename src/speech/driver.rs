//! Speech sequencing
//!
//! The driver turns "say this" requests into timed cues on the shared speech
//! channel. Every request starts a new generation: pending cues from older
//! generations are dropped and the channel is cancelled, so rapid clicks
//! never stack audio.
//!
//! A keyword/sentence sequence with `wordDelay = 5` and `repeatCount = 2`
//! produces cues at 0s and 2.5s (keyword) and 5s and 7.5s (sentence).

use super::{Synth, Utterance};
use crate::model::Settings;
use crate::schedule::Scheduler;
use crate::{Result, SpeechCardsError};
use log::{debug, error, warn};
use std::time::{Duration, Instant};

/// Gap between repeats of the same utterance
pub const DEFAULT_REPEAT_INTERVAL: Duration = Duration::from_millis(2500);

/// Which half of a pair a cue speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Keyword,
    Sentence,
}

/// One scheduled utterance
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    /// Generation of the request that scheduled this cue
    pub generation: u64,
    pub stage: Stage,
    /// 0 for the first utterance of a stage, 1 for the first repeat, ...
    pub repeat: u32,
    pub utterance: Utterance,
}

impl Cue {
    /// The first cue of a stage interrupts whatever is playing
    pub fn interrupts(&self) -> bool {
        self.repeat == 0
    }
}

/// Sequences utterances over an injected synthesizer
pub struct SpeechDriver {
    /// `None` when the platform has no speech capability
    synth: Option<Box<dyn Synth>>,

    cues: Scheduler<Cue>,

    /// Bumped on every request and on shutdown
    generation: u64,

    repeat_interval: Duration,
}

impl SpeechDriver {
    pub fn new(synth: Option<Box<dyn Synth>>) -> Self {
        Self {
            synth,
            cues: Scheduler::new(),
            generation: 0,
            repeat_interval: DEFAULT_REPEAT_INTERVAL,
        }
    }

    /// Override the gap between repeats
    pub fn with_repeat_interval(mut self, interval: Duration) -> Self {
        self.repeat_interval = interval;
        self
    }

    /// Current generation number
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Speak `text` `repeatCount` times, preempting anything in flight
    ///
    /// Settings are captured once here; later changes do not affect the
    /// repeats already scheduled. Returns `SpeechUnavailable` when there is
    /// no synthesizer, after clearing any older sequence.
    pub fn speak(&mut self, stage: Stage, text: &str, settings: &Settings, now: Instant) -> Result<()> {
        self.begin_generation();
        if self.synth.is_none() {
            return Err(SpeechCardsError::SpeechUnavailable);
        }

        let settings = settings.clamped();
        debug!("[speak] {:?} '{}' x{}", stage, text, settings.repeat_count);
        self.schedule_stage(stage, text, &settings, now);
        self.tick(now);
        Ok(())
    }

    /// Speak the keyword now and the sentence after the word delay
    pub fn speak_pair(
        &mut self,
        keyword: &str,
        sentence: &str,
        settings: &Settings,
        now: Instant,
    ) -> Result<()> {
        self.begin_generation();
        if self.synth.is_none() {
            return Err(SpeechCardsError::SpeechUnavailable);
        }

        let settings = settings.clamped();
        let sentence_at = now + Duration::from_secs(u64::from(settings.word_delay));
        debug!(
            "[speak_pair] '{}' then '{}' after {}s",
            keyword, sentence, settings.word_delay
        );
        self.schedule_stage(Stage::Keyword, keyword, &settings, now);
        self.schedule_stage(Stage::Sentence, sentence, &settings, sentence_at);
        self.tick(now);
        Ok(())
    }

    fn begin_generation(&mut self) {
        self.generation += 1;
        let generation = self.generation;
        let dropped = self.cues.cancel_where(|cue| cue.generation < generation);
        if dropped > 0 {
            debug!("Dropped {} pending cues from an older request", dropped);
        }
        self.cancel_channel();
    }

    fn schedule_stage(&mut self, stage: Stage, text: &str, settings: &Settings, start: Instant) {
        for repeat in 0..settings.repeat_count {
            let cue = Cue {
                generation: self.generation,
                stage,
                repeat,
                utterance: Utterance::new(text, settings.speech_rate, settings.speech_pitch),
            };
            self.cues.schedule(start + self.repeat_interval * repeat, cue);
        }
    }

    /// Fire every cue due at `now`; returns how many utterances were issued
    ///
    /// Playback failures are logged and do not stop later cues.
    pub fn tick(&mut self, now: Instant) -> usize {
        let due = self.cues.take_due(now);
        let mut fired = 0;
        let mut keyword_preempted = false;

        for cue in due {
            if cue.generation != self.generation {
                debug!("Skipping stale cue from generation {}", cue.generation);
                continue;
            }

            if cue.stage == Stage::Keyword && keyword_preempted {
                continue;
            }

            if cue.stage == Stage::Sentence && cue.interrupts() {
                // The sentence takes over the channel from leftover keyword repeats
                let generation = self.generation;
                let dropped = self
                    .cues
                    .cancel_where(|c| c.generation == generation && c.stage == Stage::Keyword);
                if dropped > 0 {
                    debug!("Sentence preempted {} keyword repeats", dropped);
                }
                keyword_preempted = true;
            }

            let Some(synth) = self.synth.as_mut() else {
                continue;
            };
            match synth.speak(&cue.utterance, cue.interrupts()) {
                Ok(()) => {
                    debug!("Utterance queued: '{}'", cue.utterance.text);
                    fired += 1;
                }
                Err(e) => error!("Utterance error: '{}': {}", cue.utterance.text, e),
            }
        }

        fired
    }

    /// True while the current request still has cues pending or audio playing
    pub fn is_busy(&mut self) -> bool {
        let generation = self.generation;
        if self.cues.any(|cue| cue.generation == generation) {
            return true;
        }

        match self.synth.as_mut().map(|synth| synth.is_speaking()) {
            Some(Ok(speaking)) => speaking,
            Some(Err(e)) => {
                warn!("{}", e);
                false
            }
            None => false,
        }
    }

    /// Time until the next cue, for the event loop's poll timeout
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.cues.time_until_next(now)
    }

    /// Pending cues in firing order
    pub fn pending(&self) -> Vec<(Instant, &Cue)> {
        self.cues.pending()
    }

    /// Drop every pending cue and silence the channel
    ///
    /// Called on teardown; nothing scheduled before this call will fire.
    pub fn shutdown(&mut self) {
        self.generation += 1;
        self.cues.clear();
        self.cancel_channel();
        debug!("Speech driver shut down (generation {})", self.generation);
    }

    fn cancel_channel(&mut self) {
        if let Some(synth) = self.synth.as_mut() {
            if let Err(e) = synth.cancel() {
                warn!("{}", e);
            }
        }
    }
}
