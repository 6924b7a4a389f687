//! Buffer handler for collecting text input
//!
//! Used when the admin screen needs a line of text from the user
//! (a keyword, a sentence, a settings value, a list position).

use super::{HandlerAction, KeyHandler};
use crate::state::{State, TextEntry};
use crate::Result;
use log::debug;

/// Callback function type for when input is complete
pub type OnAcceptFn = Box<dyn FnOnce(String, &mut State) -> Result<()>>;

/// Handler that collects text input until Enter is pressed
///
/// Escape abandons the entry without calling the callback. The text typed
/// so far is mirrored into `state.entry` for display.
pub struct BufferHandler {
    /// Prompt label shown before the text
    label: String,

    /// Accumulated input buffer
    buffer: String,

    /// Callback to execute when Enter is pressed
    on_accept: Option<OnAcceptFn>,
}

impl BufferHandler {
    /// Create a new buffer handler
    ///
    /// The callback will be invoked with the collected text when user presses Enter
    pub fn new(label: impl Into<String>, on_accept: OnAcceptFn) -> Self {
        Self {
            label: label.into(),
            buffer: String::new(),
            on_accept: Some(on_accept),
        }
    }

    /// Push a buffer handler and show its empty prompt
    pub fn open(state: &mut State, label: impl Into<String>, on_accept: OnAcceptFn) {
        let handler = Self::new(label, on_accept);
        handler.show(state);
        state.handlers.push(Box::new(handler));
    }

    fn show(&self, state: &mut State) {
        state.entry = Some(TextEntry {
            label: self.label.clone(),
            text: self.buffer.clone(),
        });
    }
}

impl KeyHandler for BufferHandler {
    fn process(&mut self, key: &[u8], state: &mut State) -> Result<HandlerAction> {
        match key {
            // Enter - accept input and invoke callback
            b"\r" | b"\n" => {
                debug!("BufferHandler: accepting input '{}'", self.buffer);
                state.entry = None;

                if let Some(callback) = self.on_accept.take() {
                    callback(std::mem::take(&mut self.buffer), state)?;
                }

                // Remove this handler from stack
                Ok(HandlerAction::Remove)
            }

            // Escape - abandon input
            b"\x1b" => {
                debug!("BufferHandler: cancelled '{}'", self.label);
                state.entry = None;
                Ok(HandlerAction::Remove)
            }

            // Backspace - remove last character
            b"\x08" | b"\x7f" => {
                if self.buffer.pop().is_some() {
                    debug!("BufferHandler: backspace, buffer now '{}'", self.buffer);
                }
                self.show(state);
                Ok(HandlerAction::Handled)
            }

            // Other escape sequences (arrow keys etc.) are not text
            [0x1b, ..] => Ok(HandlerAction::Handled),

            // Regular character - add to buffer
            _ => {
                if let Ok(s) = std::str::from_utf8(key) {
                    // Drop control bytes (ctrl combos, tabs)
                    let printable: String = s.chars().filter(|c| !c.is_control()).collect();
                    self.buffer.push_str(&printable);
                    debug!("BufferHandler: added '{}', buffer now '{}'", printable, self.buffer);
                }
                self.show(state);
                Ok(HandlerAction::Handled)
            }
        }
    }
}
