//! Keyboard shortcut handling
//!
//! Input devices are the caller's business: the viewport translates its key
//! events into [`KeyPress`] values and hands them to [`handle_key`].

use serde::{Deserialize, Serialize};
use shared::TransformMode;

use crate::state::SceneStore;

/// A key event, as reported by the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    /// Key name, e.g. `"q"`, `"Escape"`, `"Delete"`
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
    /// Cmd on macOS
    #[serde(default)]
    pub meta: bool,
    /// A text field has focus; shortcuts must not fire
    #[serde(default)]
    pub editing_text: bool,
}

impl KeyPress {
    pub fn key(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Self::default()
        }
    }

    pub fn ctrl(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ctrl: true,
            ..Self::default()
        }
    }

    pub fn ctrl_shift(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ctrl: true,
            shift: true,
            ..Self::default()
        }
    }

    fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Editor action bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shortcut {
    Translate,
    Rotate,
    Scale,
    Undo,
    Redo,
    Deselect,
    Delete,
}

impl Shortcut {
    /// All shortcuts in overlay order
    pub fn all() -> &'static [Shortcut] {
        &[
            Shortcut::Translate,
            Shortcut::Rotate,
            Shortcut::Scale,
            Shortcut::Undo,
            Shortcut::Redo,
            Shortcut::Deselect,
            Shortcut::Delete,
        ]
    }

    pub fn key_label(&self) -> &'static str {
        match self {
            Shortcut::Translate => "Q",
            Shortcut::Rotate => "W",
            Shortcut::Scale => "E",
            Shortcut::Undo => "Ctrl+Z",
            Shortcut::Redo => "Ctrl+Y",
            Shortcut::Deselect => "ESC",
            Shortcut::Delete => "DEL",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Shortcut::Translate => "Select/Move",
            Shortcut::Rotate => "Rotate",
            Shortcut::Scale => "Scale",
            Shortcut::Undo => "Undo",
            Shortcut::Redo => "Redo",
            Shortcut::Deselect => "Deselect",
            Shortcut::Delete => "Delete",
        }
    }

    /// Match a key press against the bindings
    pub fn from_key(press: &KeyPress) -> Option<Shortcut> {
        let key = press.key.to_ascii_lowercase();
        let shortcut = match key.as_str() {
            // Ctrl+Z undo, Ctrl+Shift+Z redo
            "z" if press.command() && press.shift => Shortcut::Redo,
            "z" if press.command() => Shortcut::Undo,
            // Ctrl+Y redo
            "y" if press.command() => Shortcut::Redo,
            _ if press.command() => return None,
            "q" => Shortcut::Translate,
            "w" => Shortcut::Rotate,
            "e" => Shortcut::Scale,
            "escape" | "esc" => Shortcut::Deselect,
            "delete" | "del" => Shortcut::Delete,
            _ => return None,
        };
        Some(shortcut)
    }
}

/// Handle a key press for the editor. Returns the shortcut that fired.
pub fn handle_key(store: &mut SceneStore, press: &KeyPress) -> Option<Shortcut> {
    // Don't handle shortcuts when a text field is focused
    if press.editing_text || !store.shortcuts_enabled() {
        return None;
    }

    let shortcut = Shortcut::from_key(press)?;
    match shortcut {
        Shortcut::Translate => store.set_transform_mode(TransformMode::Translate),
        Shortcut::Rotate => store.set_transform_mode(TransformMode::Rotate),
        Shortcut::Scale => store.set_transform_mode(TransformMode::Scale),
        Shortcut::Undo => {
            store.undo();
        }
        Shortcut::Redo => {
            store.redo();
        }
        Shortcut::Deselect => store.select_object(None),
        Shortcut::Delete => {
            store.remove_selected();
        }
    }
    Some(shortcut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::store_with_boxes;

    #[test]
    fn test_mode_keys() {
        let mut store = SceneStore::new();
        assert_eq!(handle_key(&mut store, &KeyPress::key("w")), Some(Shortcut::Rotate));
        assert_eq!(store.transform_mode(), TransformMode::Rotate);
        assert_eq!(handle_key(&mut store, &KeyPress::key("E")), Some(Shortcut::Scale));
        assert_eq!(store.transform_mode(), TransformMode::Scale);
        handle_key(&mut store, &KeyPress::key("q"));
        assert_eq!(store.transform_mode(), TransformMode::Translate);
    }

    #[test]
    fn test_undo_redo_keys() {
        let (mut store, _) = store_with_boxes(&["a"]);
        handle_key(&mut store, &KeyPress::ctrl("z"));
        assert_eq!(store.object_count(), 0);
        handle_key(&mut store, &KeyPress::ctrl("y"));
        assert_eq!(store.object_count(), 1);
        handle_key(&mut store, &KeyPress::ctrl("z"));
        handle_key(&mut store, &KeyPress::ctrl_shift("Z"));
        assert_eq!(store.object_count(), 1);
    }

    #[test]
    fn test_meta_counts_as_command() {
        let press = KeyPress {
            key: "z".into(),
            meta: true,
            ..KeyPress::default()
        };
        assert_eq!(Shortcut::from_key(&press), Some(Shortcut::Undo));
    }

    #[test]
    fn test_plain_z_does_nothing() {
        assert_eq!(Shortcut::from_key(&KeyPress::key("z")), None);
        // Ctrl+Q is not a mode switch
        assert_eq!(Shortcut::from_key(&KeyPress::ctrl("q")), None);
    }

    #[test]
    fn test_escape_deselects() {
        let (mut store, _) = store_with_boxes(&["a"]);
        store.select_object(Some("a"));
        handle_key(&mut store, &KeyPress::key("Escape"));
        assert!(store.selected_id().is_none());
    }

    #[test]
    fn test_delete_removes_selected() {
        let (mut store, _) = store_with_boxes(&["a", "b"]);
        store.select_object(Some("b"));
        assert_eq!(handle_key(&mut store, &KeyPress::key("Delete")), Some(Shortcut::Delete));
        assert_eq!(store.registry().ids(), vec!["a"]);
    }

    #[test]
    fn test_disabled_shortcuts_ignored() {
        let (mut store, _) = store_with_boxes(&["a"]);
        store.toggle_shortcuts(Some(false));
        assert_eq!(handle_key(&mut store, &KeyPress::ctrl("z")), None);
        assert_eq!(store.object_count(), 1);
    }

    #[test]
    fn test_text_input_ignored() {
        let mut store = SceneStore::new();
        let press = KeyPress {
            key: "w".into(),
            editing_text: true,
            ..KeyPress::default()
        };
        assert_eq!(handle_key(&mut store, &press), None);
        assert_eq!(store.transform_mode(), TransformMode::Translate);
    }

    #[test]
    fn test_labels_cover_all() {
        for s in Shortcut::all() {
            assert!(!s.key_label().is_empty());
            assert!(!s.description().is_empty());
        }
    }
}
