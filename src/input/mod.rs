//! Input handling and key bindings
//!
//! The input system uses a stack-based handler architecture where handlers
//! can be pushed/popped to create modal interfaces (text entry for the
//! admin forms). With no modal handler active, keys go to the
//! [`DefaultKeyHandler`] for the current route.

pub mod handler;
pub mod keymap;
pub mod default_handler;
pub mod admin_handler;
pub mod buffer_handler;

pub use handler::{KeyHandler, HandlerAction, HandlerStack};
pub use keymap::{create_admin_keymap, create_learner_keymap, KeyAction};
pub use default_handler::DefaultKeyHandler;
pub use buffer_handler::BufferHandler;

use crate::state::State;
use crate::Result;
use std::time::Instant;

/// Route one chunk of keyboard input
///
/// The chunk is split into keys and each key goes to whoever is on top at
/// that moment, so `cold\r` typed ahead fills a prompt and accepts it.
pub fn dispatch(
    input: &[u8],
    state: &mut State,
    default_handler: &mut DefaultKeyHandler,
    now: Instant,
) -> Result<HandlerAction> {
    let mut action = HandlerAction::Ignored;
    for key in split_keys(input) {
        if !state.running {
            break;
        }
        action = dispatch_key(key, state, default_handler, now)?;
    }
    Ok(action)
}

/// The top modal handler gets the key first; it is put back on the stack
/// unless it asks to be removed.
fn dispatch_key(
    key: &[u8],
    state: &mut State,
    default_handler: &mut DefaultKeyHandler,
    now: Instant,
) -> Result<HandlerAction> {
    // Temporarily pop the handler to avoid borrow checker issues
    if let Some(mut handler) = state.handlers.pop() {
        let depth = state.handlers.len();
        let action = handler.process(key, state)?;
        if action != HandlerAction::Remove {
            state.handlers.insert(depth, handler);
        }
        return Ok(action);
    }

    default_handler.process_key(key, state, now)
}

/// Split one read from the terminal into keys
///
/// Each character is a key. An escape sequence (arrow keys etc.) runs to the
/// end of the read and stays one key. Bytes that are not UTF-8 stay together.
pub fn split_keys(input: &[u8]) -> Vec<&[u8]> {
    let Ok(text) = std::str::from_utf8(input) else {
        return vec![input];
    };

    let mut keys = Vec::new();
    for (i, c) in text.char_indices() {
        if c == '\x1b' {
            keys.push(&input[i..]);
            break;
        }
        keys.push(&input[i..i + c.len_utf8()]);
    }
    keys
}
