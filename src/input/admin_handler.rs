//! Admin screen commands
//!
//! Each command either acts straight away (save, clear) or opens one or
//! more text prompts and acts when the last one is accepted:
//! - a: keyword, then sentence, then add the pair
//! - d: list position, then confirm and delete
//! - 1-4: new value for a settings field
//! - S: save settings
//! - X: clear all data

use super::{BufferHandler, KeyAction};
use crate::state::State;
use crate::surface::SettingField;
use crate::Result;
use log::debug;

/// Run an admin key action
///
/// Returns false for actions that do not belong to the admin screen.
pub fn perform(action: &KeyAction, state: &mut State) -> Result<bool> {
    match action {
        KeyAction::AddPair => {
            debug!("Admin: add pair");
            BufferHandler::open(
                state,
                "Keyword",
                Box::new(|keyword: String, state: &mut State| {
                    ask_sentence(keyword, state);
                    Ok(())
                }),
            );
        }

        KeyAction::DeletePair => {
            debug!("Admin: delete pair");
            BufferHandler::open(
                state,
                "Delete which number",
                Box::new(|input: String, state: &mut State| {
                    delete_by_number(&input, state);
                    Ok(())
                }),
            );
        }

        KeyAction::EditSetting(field) => {
            debug!("Admin: edit {}", field.name());
            let field = *field;
            BufferHandler::open(
                state,
                field.label(),
                Box::new(move |input: String, state: &mut State| {
                    if state.edit_setting(field, &input) {
                        state.status = Some(format!("{} is now {} (not saved yet)", field.label(), input.trim()));
                    }
                    Ok(())
                }),
            );
        }

        KeyAction::SaveSettings => {
            debug!("Admin: save settings");
            state.save_settings();
        }

        KeyAction::ClearAll => {
            debug!("Admin: clear all data");
            state.clear_all();
        }

        _ => return Ok(false),
    }

    Ok(true)
}

fn ask_sentence(keyword: String, state: &mut State) {
    BufferHandler::open(
        state,
        "Three Word Sentence",
        Box::new(move |sentence: String, state: &mut State| {
            if state.add_pair(&keyword, &sentence) {
                state.status = Some(format!("Added '{}'", keyword.trim()));
            }
            Ok(())
        }),
    );
}

/// Delete using the 1-based number shown in the list
fn delete_by_number(input: &str, state: &mut State) {
    match input.trim().parse::<usize>() {
        Ok(n) if n >= 1 => {
            if state.delete_pair(n - 1) {
                state.status = Some(format!("Deleted sentence {}", n));
            }
        }
        _ => {
            debug!("Invalid list number: {}", input);
            state.status = Some(format!("'{}' is not a sentence number", input.trim()));
        }
    }
}

/// Settings fields in on-screen order, with their key
pub fn settings_keys() -> impl Iterator<Item = (char, SettingField)> {
    ('1'..='4').zip(SettingField::ALL)
}
