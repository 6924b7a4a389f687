//! Default key bindings for speechcards

use crate::surface::SettingField;
use std::collections::HashMap;

/// Key sequence type
pub type KeySequence = Vec<u8>;

/// Action identifier for key bindings
///
/// Each variant represents a command that can be triggered by a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    // Learner
    Advance,
    RepeatWord,
    RepeatSentence,
    OpenAdmin,

    // Admin
    AddPair,
    DeletePair,
    EditSetting(SettingField),
    SaveSettings,
    ClearAll,
    OpenLearner,

    // Both
    Quit,
}

fn insert_common(map: &mut HashMap<KeySequence, KeyAction>) {
    map.insert(b"q".to_vec(), KeyAction::Quit);
    map.insert(b"\x03".to_vec(), KeyAction::Quit); // ctrl+c
}

/// Create the learner screen keymap
pub fn create_learner_keymap() -> HashMap<KeySequence, KeyAction> {
    let mut map = HashMap::new();

    // Start/Next
    map.insert(b" ".to_vec(), KeyAction::Advance);
    map.insert(b"\r".to_vec(), KeyAction::Advance);
    map.insert(b"\n".to_vec(), KeyAction::Advance);
    map.insert(b"n".to_vec(), KeyAction::Advance);

    // Repeats
    map.insert(b"w".to_vec(), KeyAction::RepeatWord);
    map.insert(b"s".to_vec(), KeyAction::RepeatSentence);

    map.insert(b"a".to_vec(), KeyAction::OpenAdmin);
    insert_common(&mut map);

    map
}

/// Create the admin screen keymap
pub fn create_admin_keymap() -> HashMap<KeySequence, KeyAction> {
    let mut map = HashMap::new();

    map.insert(b"a".to_vec(), KeyAction::AddPair);
    map.insert(b"d".to_vec(), KeyAction::DeletePair);

    // Settings fields by their position on screen
    map.insert(b"1".to_vec(), KeyAction::EditSetting(SettingField::WordDelay));
    map.insert(b"2".to_vec(), KeyAction::EditSetting(SettingField::RepeatCount));
    map.insert(b"3".to_vec(), KeyAction::EditSetting(SettingField::SpeechRate));
    map.insert(b"4".to_vec(), KeyAction::EditSetting(SettingField::SpeechPitch));
    map.insert(b"S".to_vec(), KeyAction::SaveSettings);

    map.insert(b"X".to_vec(), KeyAction::ClearAll);

    // Back to learning (b or escape)
    map.insert(b"b".to_vec(), KeyAction::OpenLearner);
    map.insert(b"\x1b".to_vec(), KeyAction::OpenLearner);
    insert_common(&mut map);

    map
}
