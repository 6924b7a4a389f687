//! Key handler system with modal input support

use crate::state::State;
use crate::Result;

/// Action to take after processing a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerAction {
    /// Key has no meaning here
    Ignored,
    /// Remove this handler from the stack
    Remove,
    /// Key was handled, do nothing more
    Handled,
}

/// A key handler processes keyboard input
///
/// Handlers get the whole state so a modal prompt can act on what it collected.
pub trait KeyHandler {
    /// Process one key
    fn process(&mut self, key: &[u8], state: &mut State) -> Result<HandlerAction>;
}

/// Stack of key handlers (last one processes input first)
pub struct HandlerStack {
    handlers: Vec<Box<dyn KeyHandler>>,
}

impl HandlerStack {
    /// Create a new handler stack
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Push a handler onto the stack
    pub fn push(&mut self, handler: Box<dyn KeyHandler>) {
        self.handlers.push(handler);
    }

    /// Put a handler back at `depth` (clamped to the stack size)
    ///
    /// Anything pushed above `depth` stays on top, so a handler that opens
    /// a follow-up prompt hands the keyboard to that prompt.
    pub fn insert(&mut self, depth: usize, handler: Box<dyn KeyHandler>) {
        let depth = depth.min(self.handlers.len());
        self.handlers.insert(depth, handler);
    }

    /// Pop the top handler from the stack
    pub fn pop(&mut self) -> Option<Box<dyn KeyHandler>> {
        self.handlers.pop()
    }

    /// Drop every handler
    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    /// Get the number of handlers in the stack
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if the stack is empty
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for HandlerStack {
    fn default() -> Self {
        Self::new()
    }
}
