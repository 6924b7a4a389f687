//! Terminal setup

pub mod util;

pub use util::{get_terminal_size, restore_termios, set_raw_mode, RawModeGuard};
