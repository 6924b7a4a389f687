//! Terminal utilities

use crate::{Result, SpeechCardsError};
use log::debug;
use nix::libc;
use nix::sys::termios::{self, SetArg, Termios};
use std::os::fd::{AsFd, AsRawFd};

/// Get the terminal size for the given file descriptor
///
/// Falls back to 80x24 when the size cannot be queried (e.g. not a TTY).
pub fn get_terminal_size<F: AsRawFd>(fd: &F) -> (u16, u16) {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };

    let result = unsafe { libc::ioctl(fd.as_raw_fd(), libc::TIOCGWINSZ, &mut ws) };

    if result == 0 && ws.ws_col > 0 {
        (ws.ws_col, ws.ws_row)
    } else {
        (80, 24)
    }
}

/// Set raw mode on a terminal
///
/// Raw mode lets single keypresses (space, escape, ctrl+c) reach the
/// handlers without waiting for Enter. Returns the previous attributes.
pub fn set_raw_mode<F: AsFd>(fd: &F) -> Result<Termios> {
    let original = termios::tcgetattr(fd)
        .map_err(|e| SpeechCardsError::Other(format!("tcgetattr failed: {}", e)))?;

    let mut raw = original.clone();
    termios::cfmakeraw(&mut raw);
    termios::tcsetattr(fd, SetArg::TCSANOW, &raw)
        .map_err(|e| SpeechCardsError::Other(format!("tcsetattr failed: {}", e)))?;

    Ok(original)
}

/// Restore terminal attributes
pub fn restore_termios<F: AsFd>(fd: &F, original: &Termios) {
    if let Err(e) = termios::tcsetattr(fd, SetArg::TCSANOW, original) {
        debug!("Failed to restore terminal attributes: {}", e);
    }
}

/// RAII guard that puts stdin back into its original mode
///
/// Ensures the terminal is usable again even if the program exits with an error
pub struct RawModeGuard {
    original: Termios,
}

impl RawModeGuard {
    /// Switch stdin to raw mode until the guard is dropped
    pub fn new() -> Result<Self> {
        let original = set_raw_mode(&std::io::stdin())?;
        Ok(Self { original })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        restore_termios(&std::io::stdin(), &self.original);
        debug!("Terminal attributes restored");
    }
}
