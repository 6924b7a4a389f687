//! Learner surface: show a random pair and speak it
//!
//! Advancing picks a new pair, speaks the keyword straight away and the
//! sentence after the configured delay, so the learner gets a moment to
//! guess. While that sequence is still running, advancing is ignored.

use crate::model::{SentenceList, SentencePair};
use crate::prompt::UserPrompt;
use crate::selection::pick_next_index;
use crate::speech::{SpeechDriver, Stage};
use crate::store::DataStore;
use crate::SpeechCardsError;
use log::{debug, error, info};
use rand::Rng;
use std::time::Instant;

/// Shown in place of the keyword before the first pair is picked
pub const PLACEHOLDER: &str = "Click Start";

pub const SPEECH_UNAVAILABLE_NOTICE: &str =
    "Sorry, your platform does not support speech synthesis.";

/// What an advance request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// No pairs to choose from
    Empty,
    /// A sequence is still playing; nothing changed
    Busy,
    /// This index is now the current pair
    Selected(usize),
}

/// State of the learner screen
///
/// Selection lives only in memory and starts empty on every load.
pub struct LearnerSurface {
    sentences: SentenceList,
    current_index: Option<usize>,
}

impl LearnerSurface {
    pub fn load(store: &DataStore) -> Self {
        let sentences = store.load_sentence_list();
        info!("Learner surface loaded with {} pairs", sentences.len());
        Self {
            sentences,
            current_index: None,
        }
    }

    pub fn sentences(&self) -> &[SentencePair] {
        &self.sentences
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current_pair(&self) -> Option<&SentencePair> {
        self.current_index.and_then(|i| self.sentences.get(i))
    }

    /// Keyword line: the current keyword or the start placeholder
    pub fn keyword_display(&self) -> &str {
        self.current_pair()
            .map_or(PLACEHOLDER, |pair| pair.keyword.as_str())
    }

    /// Sentence line: the current sentence or nothing
    pub fn sentence_display(&self) -> &str {
        self.current_pair().map_or("", |pair| pair.sentence.as_str())
    }

    /// "Start" before the first pick, "Next" after
    pub fn advance_label(&self) -> &'static str {
        if self.current_index.is_none() {
            "Start"
        } else {
            "Next"
        }
    }

    /// Whether the repeat actions are available
    pub fn can_repeat(&self) -> bool {
        self.current_pair().is_some()
    }

    /// Pick a different random pair and speak it
    ///
    /// Settings are read from the store at this moment.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        store: &DataStore,
        driver: &mut SpeechDriver,
        prompt: &mut dyn UserPrompt,
        rng: &mut R,
        now: Instant,
    ) -> AdvanceOutcome {
        if self.sentences.is_empty() {
            return AdvanceOutcome::Empty;
        }
        if driver.is_busy() {
            debug!("[advance] ignored, sequence still playing");
            return AdvanceOutcome::Busy;
        }

        let Some(index) = pick_next_index(self.sentences.len(), self.current_index, rng) else {
            return AdvanceOutcome::Empty;
        };
        self.current_index = Some(index);
        let pair = self.sentences[index].clone();
        debug!("[advance] index {} -> {:?}", index, pair);

        let settings = store.load_settings();
        if let Err(e) = driver.speak_pair(&pair.keyword, &pair.sentence, &settings, now) {
            report_speech_error(e, prompt);
        }

        AdvanceOutcome::Selected(index)
    }

    /// Say the current keyword again
    ///
    /// Returns false when nothing is selected yet.
    pub fn repeat_word(
        &mut self,
        store: &DataStore,
        driver: &mut SpeechDriver,
        prompt: &mut dyn UserPrompt,
        now: Instant,
    ) -> bool {
        self.repeat(Stage::Keyword, store, driver, prompt, now)
    }

    /// Say the current sentence again
    pub fn repeat_sentence(
        &mut self,
        store: &DataStore,
        driver: &mut SpeechDriver,
        prompt: &mut dyn UserPrompt,
        now: Instant,
    ) -> bool {
        self.repeat(Stage::Sentence, store, driver, prompt, now)
    }

    fn repeat(
        &mut self,
        stage: Stage,
        store: &DataStore,
        driver: &mut SpeechDriver,
        prompt: &mut dyn UserPrompt,
        now: Instant,
    ) -> bool {
        let Some(pair) = self.current_pair() else {
            return false;
        };
        let text = match stage {
            Stage::Keyword => pair.keyword.clone(),
            Stage::Sentence => pair.sentence.clone(),
        };

        let settings = store.load_settings();
        if let Err(e) = driver.speak(stage, &text, &settings, now) {
            report_speech_error(e, prompt);
        }
        true
    }

    /// Cancel everything this surface scheduled
    ///
    /// Called when navigating away; no cue fires afterwards.
    pub fn teardown(&mut self, driver: &mut SpeechDriver) {
        debug!("Tearing down learner surface");
        driver.shutdown();
    }
}

fn report_speech_error(e: SpeechCardsError, prompt: &mut dyn UserPrompt) {
    match e {
        SpeechCardsError::SpeechUnavailable => {
            error!("Speech synthesis unavailable");
            prompt.alert(SPEECH_UNAVAILABLE_NOTICE);
        }
        other => error!("Speech error: {}", other),
    }
}
