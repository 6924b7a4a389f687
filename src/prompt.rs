//! Blocking user prompts
//!
//! Alerts and yes/no confirmations stop the surface until the user answers.

use log::debug;
use std::collections::VecDeque;
use std::io::{self, Read, Write};

/// Blocking notices and confirmations
pub trait UserPrompt {
    /// Show a notice and wait for the user to dismiss it
    fn alert(&mut self, message: &str);

    /// Ask a yes/no question; `true` means confirmed
    fn confirm(&mut self, message: &str) -> bool;
}

/// Prompt on the controlling terminal
///
/// Expects the terminal to be in raw mode, so a single keypress answers.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        Self
    }

    /// First byte of the next read
    ///
    /// The rest of the read is dropped so typed-ahead keys never answer a
    /// later confirmation.
    fn read_key() -> Option<u8> {
        let mut buf = [0u8; 16];
        match io::stdin().read(&mut buf) {
            Ok(n) if n > 0 => Some(buf[0]),
            _ => None,
        }
    }

    fn show(text: &str) {
        let mut out = io::stdout();
        let _ = write!(out, "\r\n{}", text);
        let _ = out.flush();
    }
}

impl UserPrompt for TerminalPrompt {
    fn alert(&mut self, message: &str) {
        debug!("alert: {}", message);
        Self::show(&format!("{} (press any key)", message));
        let _ = Self::read_key();
    }

    fn confirm(&mut self, message: &str) -> bool {
        debug!("confirm: {}", message);
        Self::show(&format!("{} [y/N] ", message));
        let answer = matches!(Self::read_key(), Some(b'y') | Some(b'Y'));
        Self::show(if answer { "yes" } else { "no" });
        answer
    }
}

/// Prompt that answers from a script and records what it was shown
///
/// Confirmations pop answers in order and default to `false` once the
/// script runs out.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<bool>,
    pub alerts: Vec<String>,
    pub questions: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prompt whose confirmations answer `answers` in order
    pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl UserPrompt for ScriptedPrompt {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.questions.push(message.to_string());
        self.answers.pop_front().unwrap_or(false)
    }
}
