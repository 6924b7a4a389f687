//! Plain-text rendering of the two screens
//!
//! Output uses `\r\n` line endings because the terminal is in raw mode.

use crate::input::admin_handler::settings_keys;
use crate::state::{Route, State};
use crate::surface::{AdminSurface, LearnerSurface};
use unicode_width::UnicodeWidthStr;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Pad `text` so it sits in the middle of `width` columns
pub fn center(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width()) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

/// Left and right text on one line, right text flush with `width`
fn spread(left: &str, right: &str, width: usize) -> String {
    let gap = width.saturating_sub(left.width() + right.width()).max(1);
    format!("{}{}{}", left, " ".repeat(gap), right)
}

pub fn render_learner(learner: &LearnerSurface, width: usize) -> Vec<String> {
    let mut lines = vec![
        spread("Speech Learning", "a: Admin", width),
        "-".repeat(width),
        String::new(),
        center(learner.keyword_display(), width),
        String::new(),
        center(learner.sentence_display(), width),
        String::new(),
    ];

    let mut actions = format!("[space] {}", learner.advance_label());
    if learner.can_repeat() {
        actions.push_str("   w: Repeat Word   s: Repeat Sentence");
    }
    lines.push(center(&actions, width));
    lines
}

pub fn render_admin(admin: &AdminSurface, width: usize) -> Vec<String> {
    let mut lines = vec![
        spread("b: ← Back to Learning Page", "X: Clear All Data", width),
        "-".repeat(width),
        "Manage Sentences".to_string(),
        format!("  Keyword: {}", admin.keyword_input()),
        format!("  Three Word Sentence: {}", admin.sentence_input()),
    ];
    if let Some(error) = admin.error() {
        lines.push(format!("  ! {}", error));
    }
    lines.push("  a: Add Sentence".to_string());
    lines.push(String::new());

    lines.push("Speech Settings".to_string());
    for (key, field) in settings_keys() {
        lines.push(format!(
            "  {}: {}: {}",
            key,
            field.label(),
            field.value(admin.settings())
        ));
    }
    lines.push("  S: Save Settings".to_string());
    lines.push(String::new());

    lines.push("Saved Sentences".to_string());
    if admin.sentences().is_empty() {
        lines.push("  No sentences added yet.".to_string());
    } else {
        for (i, pair) in admin.sentences().iter().enumerate() {
            lines.push(format!("  {}. {} → {}", i + 1, pair.keyword, pair.sentence));
        }
        lines.push("  d: Delete".to_string());
    }
    lines
}

/// Full screen for the current state
pub fn render(state: &State, width: u16) -> String {
    let width = usize::from(width.max(20));
    let mut lines = match &state.route {
        Route::Learner(learner) => render_learner(learner, width),
        Route::Admin(admin) => render_admin(admin, width),
    };

    lines.push(String::new());
    if let Some(entry) = &state.entry {
        lines.push(format!("{}: {}_   (enter to accept, esc to cancel)", entry.label, entry.text));
    }
    if let Some(status) = &state.status {
        lines.push(status.clone());
    }
    lines.push("q: Quit".to_string());

    format!("{}{}", CLEAR_SCREEN, lines.join("\r\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center() {
        assert_eq!(center("ab", 6), "  ab");
        assert_eq!(center("toolong", 3), "toolong");
        // Wide characters take two columns
        assert_eq!(center("日本", 8), "  日本");
    }

    #[test]
    fn test_spread() {
        assert_eq!(spread("a", "b", 5), "a   b");
        assert_eq!(spread("left", "right", 4), "left right");
    }
}
