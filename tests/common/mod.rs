//! Shared fakes for integration tests

#![allow(dead_code)]

use speechcards::model::{SentencePair, Settings};
use speechcards::prompt::{ScriptedPrompt, UserPrompt};
use speechcards::speech::{SpeechCommand, SpeechDriver, Synth, Utterance};
use speechcards::store::{DataStore, KeyValueStore, MemoryStore, SENTENCES_KEY, SETTINGS_KEY};
use speechcards::{Result, SpeechCardsError};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Synth that records every command
#[derive(Clone, Default)]
pub struct FakeSynth {
    commands: Arc<Mutex<Vec<SpeechCommand>>>,
    speaking: Arc<AtomicBool>,
    fail_speak: Arc<AtomicBool>,
    fail_voice: Arc<AtomicBool>,
}

impl FakeSynth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Driver over a clone of this synth
    pub fn driver(&self) -> SpeechDriver {
        SpeechDriver::new(Some(Box::new(self.clone())))
    }

    pub fn commands(&self) -> Vec<SpeechCommand> {
        self.commands.lock().unwrap().clone()
    }

    /// Texts of every utterance issued, in order
    pub fn spoken(&self) -> Vec<String> {
        self.utterances().into_iter().map(|u| u.text).collect()
    }

    pub fn utterances(&self) -> Vec<Utterance> {
        self.commands()
            .into_iter()
            .filter_map(|cmd| match cmd {
                SpeechCommand::Speak { utterance, .. } => Some(utterance),
                _ => None,
            })
            .collect()
    }

    pub fn cancel_count(&self) -> usize {
        self.commands()
            .iter()
            .filter(|cmd| matches!(cmd, SpeechCommand::Cancel))
            .count()
    }

    pub fn set_speaking(&self, speaking: bool) {
        self.speaking.store(speaking, Ordering::SeqCst);
    }

    pub fn set_fail_speak(&self, fail: bool) {
        self.fail_speak.store(fail, Ordering::SeqCst);
    }

    /// Make voice selection fail, like a backend without voice support
    pub fn set_fail_voice(&self, fail: bool) {
        self.fail_voice.store(fail, Ordering::SeqCst);
    }

    pub fn clear(&self) {
        self.commands.lock().unwrap().clear();
    }
}

impl Synth for FakeSynth {
    fn speak(&mut self, utterance: &Utterance, interrupt: bool) -> Result<()> {
        if self.fail_speak.load(Ordering::SeqCst) {
            return Err(SpeechCardsError::Speech("device busy".to_string()));
        }
        self.commands.lock().unwrap().push(SpeechCommand::Speak {
            utterance: utterance.clone(),
            interrupt,
        });
        Ok(())
    }

    fn cancel(&mut self) -> Result<()> {
        self.commands.lock().unwrap().push(SpeechCommand::Cancel);
        Ok(())
    }

    fn is_speaking(&mut self) -> Result<bool> {
        Ok(self.speaking.load(Ordering::SeqCst))
    }

    fn set_volume(&mut self, volume: u8) -> Result<()> {
        self.commands.lock().unwrap().push(SpeechCommand::SetVolume(volume));
        Ok(())
    }

    fn set_voice_idx(&mut self, idx: usize) -> Result<()> {
        if self.fail_voice.load(Ordering::SeqCst) {
            return Err(SpeechCardsError::Speech("voices not supported".to_string()));
        }
        self.commands.lock().unwrap().push(SpeechCommand::SetVoiceIdx(idx));
        Ok(())
    }
}

/// Scripted prompt that stays inspectable after being boxed into `State`
#[derive(Clone, Default)]
pub struct SharedPrompt(pub Rc<RefCell<ScriptedPrompt>>);

impl SharedPrompt {
    pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
        Self(Rc::new(RefCell::new(ScriptedPrompt::answering(answers))))
    }

    pub fn alerts(&self) -> Vec<String> {
        self.0.borrow().alerts.clone()
    }

    pub fn questions(&self) -> Vec<String> {
        self.0.borrow().questions.clone()
    }
}

impl UserPrompt for SharedPrompt {
    fn alert(&mut self, message: &str) {
        self.0.borrow_mut().alert(message);
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.0.borrow_mut().confirm(message)
    }
}

pub fn pairs(items: &[(&str, &str)]) -> Vec<SentencePair> {
    items.iter().map(|(k, s)| SentencePair::new(*k, *s)).collect()
}

/// Memory store preloaded with `items`, plus a handle to its backing map
pub fn store_with(items: &[(&str, &str)]) -> (DataStore, MemoryStore) {
    let mut kv = MemoryStore::new();
    kv.set(SENTENCES_KEY, &serde_json::to_string(&pairs(items)).unwrap())
        .unwrap();
    (DataStore::from(kv.clone()), kv)
}

/// Memory store preloaded with `items` and `settings`
pub fn store_with_settings(items: &[(&str, &str)], settings: &Settings) -> (DataStore, MemoryStore) {
    let (store, mut kv) = store_with(items);
    kv.set(SETTINGS_KEY, &serde_json::to_string(settings).unwrap())
        .unwrap();
    (store, kv)
}
