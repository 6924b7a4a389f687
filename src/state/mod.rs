//! Application state management
//!
//! The State struct is the central data structure for the event loop: the
//! active route, the store both surfaces share, the speech driver, and the
//! modal input stack.

pub mod config;

use crate::input::HandlerStack;
use crate::prompt::{TerminalPrompt, UserPrompt};
use crate::speech::{SpeechDriver, Synth};
use crate::store::{DataStore, FileStore};
use crate::surface::{AdminSurface, AdvanceOutcome, LearnerSurface, SettingField};
use config::Config;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

/// Which screen is showing
pub enum Route {
    /// Root route
    Learner(LearnerSurface),
    /// `/admin`
    Admin(AdminSurface),
}

/// Route names without surface state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Learner,
    Admin,
}

impl Route {
    pub fn kind(&self) -> RouteKind {
        match self {
            Route::Learner(_) => RouteKind::Learner,
            Route::Admin(_) => RouteKind::Admin,
        }
    }

    /// Build a fresh surface from the store, like a page load
    fn open(kind: RouteKind, store: &DataStore) -> Self {
        match kind {
            RouteKind::Learner => Route::Learner(LearnerSurface::load(store)),
            RouteKind::Admin => Route::Admin(AdminSurface::load(store)),
        }
    }
}

impl RouteKind {
    /// Path shown in the header
    pub fn path(self) -> &'static str {
        match self {
            RouteKind::Learner => "/",
            RouteKind::Admin => "/admin",
        }
    }
}

/// A line of text being typed in a modal prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEntry {
    pub label: String,
    pub text: String,
}

/// Apply the volume and voice from the app config
///
/// A setting the backend rejects is logged and skipped.
pub fn configure_synth(synth: &mut dyn Synth, config: &Config) {
    if let Some(volume) = config.volume() {
        match synth.set_volume(volume) {
            Ok(()) => info!("Speech volume set to {}", volume),
            Err(e) => warn!("Could not set speech volume {}: {}", volume, e),
        }
    }
    if let Some(voice_idx) = config.voice_idx() {
        match synth.set_voice_idx(voice_idx) {
            Ok(()) => info!("Speech voice index set to {}", voice_idx),
            Err(e) => warn!("Could not select voice {}: {}", voice_idx, e),
        }
    }
}

/// Main application state
pub struct State {
    /// Persisted sentence pairs and settings
    pub store: DataStore,

    /// Speech sequencing over the platform synthesizer
    pub driver: SpeechDriver,

    /// Current screen
    pub route: Route,

    /// Key handler stack for modal input
    /// Text entry and the like intercept keys here
    pub handlers: HandlerStack,

    /// Blocking alerts and confirmations
    pub prompt: Box<dyn UserPrompt>,

    /// Transient one-line message under the current screen
    pub status: Option<String>,

    /// Text entry in progress, if any
    pub entry: Option<TextEntry>,

    /// Cleared when the user asks to quit
    pub running: bool,

    rng: StdRng,
}

impl State {
    /// Create the production state: file store, native speech, terminal prompts
    pub fn new(config: &Config, start: RouteKind) -> Self {
        let store_path = config.store_path();
        info!("Using store at {:?}", store_path);
        let store = DataStore::from(FileStore::new(store_path));

        let synth = match crate::speech::create_synth() {
            Ok(mut synth) => {
                configure_synth(synth.as_mut(), config);
                Some(synth)
            }
            Err(e) => {
                warn!("Continuing without speech: {}", e);
                None
            }
        };
        let driver = SpeechDriver::new(synth).with_repeat_interval(config.repeat_interval());

        Self::from_parts(
            store,
            driver,
            Box::new(TerminalPrompt::new()),
            StdRng::from_os_rng(),
            start,
        )
    }

    /// Assemble state from explicit collaborators
    pub fn from_parts(
        store: DataStore,
        driver: SpeechDriver,
        prompt: Box<dyn UserPrompt>,
        rng: StdRng,
        start: RouteKind,
    ) -> Self {
        let route = Route::open(start, &store);
        Self {
            store,
            driver,
            route,
            handlers: HandlerStack::new(),
            prompt,
            status: None,
            entry: None,
            running: true,
            rng,
        }
    }

    pub fn route_kind(&self) -> RouteKind {
        self.route.kind()
    }

    /// Switch screens
    ///
    /// Leaving the learner cancels its pending speech first. The target
    /// surface is rebuilt from the store even if it is already showing.
    pub fn navigate(&mut self, to: RouteKind) {
        info!("Navigating {} -> {}", self.route_kind().path(), to.path());
        self.teardown_route();
        self.handlers = HandlerStack::new();
        self.entry = None;
        self.status = None;
        self.route = Route::open(to, &self.store);
    }

    fn teardown_route(&mut self) {
        if let Route::Learner(learner) = &mut self.route {
            learner.teardown(&mut self.driver);
        }
    }

    /// Stop everything before exit
    pub fn shutdown(&mut self) {
        self.teardown_route();
        self.running = false;
    }

    /// Fire due speech cues
    pub fn run_scheduled(&mut self, now: Instant) -> usize {
        self.driver.tick(now)
    }

    /// Time until the next speech cue, for the poll timeout
    pub fn time_until_next_scheduled(&self, now: Instant) -> Option<Duration> {
        self.driver.time_until_next(now)
    }

    // ========== Learner actions ==========

    /// Start/Next
    pub fn advance(&mut self, now: Instant) -> Option<AdvanceOutcome> {
        let Route::Learner(learner) = &mut self.route else {
            return None;
        };
        let outcome = learner.advance(
            &self.store,
            &mut self.driver,
            self.prompt.as_mut(),
            &mut self.rng,
            now,
        );
        self.status = match outcome {
            AdvanceOutcome::Empty => Some("No sentences yet. Add some in admin.".to_string()),
            AdvanceOutcome::Busy => Some("Still speaking...".to_string()),
            AdvanceOutcome::Selected(_) => None,
        };
        Some(outcome)
    }

    pub fn repeat_word(&mut self, now: Instant) -> bool {
        let Route::Learner(learner) = &mut self.route else {
            return false;
        };
        learner.repeat_word(&self.store, &mut self.driver, self.prompt.as_mut(), now)
    }

    pub fn repeat_sentence(&mut self, now: Instant) -> bool {
        let Route::Learner(learner) = &mut self.route else {
            return false;
        };
        learner.repeat_sentence(&self.store, &mut self.driver, self.prompt.as_mut(), now)
    }

    // ========== Admin actions ==========
    // Errors are already shown to the user by the surface (inline or as a
    // notice), so they are only logged here.

    /// Fill both input fields and try to add them as a pair
    pub fn add_pair(&mut self, keyword: &str, sentence: &str) -> bool {
        let Route::Admin(admin) = &mut self.route else {
            return false;
        };
        admin.set_keyword_input(keyword);
        admin.set_sentence_input(sentence);
        match admin.add_pair(&mut self.store, self.prompt.as_mut()) {
            Ok(()) => true,
            Err(e) => {
                debug!("add pair failed: {}", e);
                false
            }
        }
    }

    /// Delete by position after confirmation
    pub fn delete_pair(&mut self, index: usize) -> bool {
        let Route::Admin(admin) = &mut self.route else {
            return false;
        };
        match admin.delete_pair(index, &mut self.store, self.prompt.as_mut()) {
            Ok(deleted) => deleted,
            Err(e) => {
                debug!("delete failed: {}", e);
                self.status = Some(e.to_string());
                false
            }
        }
    }

    /// Live edit of one settings field
    pub fn edit_setting(&mut self, field: SettingField, raw: &str) -> bool {
        let Route::Admin(admin) = &mut self.route else {
            return false;
        };
        match admin.edit_setting(field, raw) {
            Ok(()) => true,
            Err(e) => {
                self.status = Some(e.to_string());
                false
            }
        }
    }

    pub fn save_settings(&mut self) -> bool {
        let Route::Admin(admin) = &mut self.route else {
            return false;
        };
        admin.save_settings(&mut self.store, self.prompt.as_mut()).is_ok()
    }

    pub fn clear_all(&mut self) -> bool {
        let Route::Admin(admin) = &mut self.route else {
            return false;
        };
        matches!(admin.clear_all(&mut self.store, self.prompt.as_mut()), Ok(true))
    }
}
