//! Default key handler
//!
//! Looks keys up in the keymap of the current route and runs the bound
//! command. Unbound keys are ignored.

use super::{admin_handler, HandlerAction, KeyAction};
use crate::state::{RouteKind, State};
use crate::Result;
use log::{debug, trace};
use std::collections::HashMap;
use std::time::Instant;

/// Base handler for both screens
pub struct DefaultKeyHandler {
    /// Learner screen bindings
    learner_keymap: HashMap<Vec<u8>, KeyAction>,

    /// Admin screen bindings
    admin_keymap: HashMap<Vec<u8>, KeyAction>,
}

impl DefaultKeyHandler {
    pub fn new(
        learner_keymap: HashMap<Vec<u8>, KeyAction>,
        admin_keymap: HashMap<Vec<u8>, KeyAction>,
    ) -> Self {
        debug!(
            "Creating default key handler with {} learner / {} admin bindings",
            learner_keymap.len(),
            admin_keymap.len()
        );
        Self {
            learner_keymap,
            admin_keymap,
        }
    }

    /// Look up the action bound to `key` on the current route
    pub fn action_for(&self, key: &[u8], route: RouteKind) -> Option<&KeyAction> {
        match route {
            RouteKind::Learner => self.learner_keymap.get(key),
            RouteKind::Admin => self.admin_keymap.get(key),
        }
    }

    /// Process a key with the current route's bindings
    pub fn process_key(&mut self, key: &[u8], state: &mut State, now: Instant) -> Result<HandlerAction> {
        let Some(action) = self.action_for(key, state.route_kind()).cloned() else {
            trace!("Unbound key: {:?}", key);
            return Ok(HandlerAction::Ignored);
        };

        debug!("Key action: {:?}", action);
        state.status = None;
        self.execute_action(&action, state, now)?;
        Ok(HandlerAction::Handled)
    }

    fn execute_action(&mut self, action: &KeyAction, state: &mut State, now: Instant) -> Result<()> {
        match action {
            KeyAction::Advance => {
                state.advance(now);
            }
            KeyAction::RepeatWord => {
                state.repeat_word(now);
            }
            KeyAction::RepeatSentence => {
                state.repeat_sentence(now);
            }
            KeyAction::OpenAdmin => state.navigate(RouteKind::Admin),
            KeyAction::OpenLearner => state.navigate(RouteKind::Learner),
            KeyAction::Quit => state.shutdown(),
            other => {
                admin_handler::perform(other, state)?;
            }
        }
        Ok(())
    }
}

impl Default for DefaultKeyHandler {
    fn default() -> Self {
        Self::new(super::create_learner_keymap(), super::create_admin_keymap())
    }
}
