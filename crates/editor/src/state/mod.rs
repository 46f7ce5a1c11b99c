//! Scene state management
//!
//! [`SceneStore`] is the single source of truth the presentation layer
//! reads from and calls into. It owns the history and hands it to the
//! registry and the gesture tracker whenever they need to record something.

pub mod display;
pub mod gesture;
pub mod history;
pub mod object;
mod object_ops;
pub mod registry;
pub mod selection;
pub mod settings;
mod template_ops;
mod transform_ops;

pub use display::{object_display_name, short_id};
pub use gesture::GestureTracker;
pub use history::{
    Command, FnCommand, HistoryEntry, HistoryStack, HistoryStatus, GROUP_APPEARANCE,
    GROUP_OBJECTS, GROUP_TRANSFORM,
};
pub use object::{new_handle, new_object, ObjectHandle, WeakObjectHandle};
pub use registry::ObjectRegistry;
pub use selection::Selection;
pub use settings::AppSettings;

use shared::TransformMode;

/// Editor state: objects, selection, gizmo mode, history and preferences
pub struct SceneStore {
    pub(crate) registry: ObjectRegistry,
    pub(crate) history: HistoryStack<ObjectRegistry>,
    pub(crate) gestures: GestureTracker,
    pub(crate) transform_mode: TransformMode,
    pub(crate) current_scene: Option<String>,
    pub(crate) shortcuts_enabled: bool,
    /// Configured startup scene; loading other scenes leaves it alone
    pub(crate) startup_template: Option<String>,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::from_settings(&AppSettings::default())
    }

    /// Build a store honoring the user's preferences
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            registry: ObjectRegistry::new(),
            history: HistoryStack::with_limit(settings.history_limit),
            gestures: GestureTracker::new(),
            transform_mode: settings.transform_mode,
            current_scene: None,
            shortcuts_enabled: settings.shortcuts_enabled,
            startup_template: settings.startup_template.clone(),
        }
    }

    /// Current preferences, for persisting
    pub fn settings(&self) -> AppSettings {
        AppSettings {
            shortcuts_enabled: self.shortcuts_enabled,
            history_limit: self.history.limit(),
            transform_mode: self.transform_mode,
            startup_template: self.startup_template.clone(),
        }
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn history(&self) -> &HistoryStack<ObjectRegistry> {
        &self.history
    }

    pub fn gestures(&self) -> &GestureTracker {
        &self.gestures
    }

    // ── History ───────────────────────────────────────────────

    /// Undo last change
    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.registry);
        self.gestures.retain_registered(&self.registry);
        undone
    }

    /// Redo last undone change
    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo(&mut self.registry);
        self.gestures.retain_registered(&self.registry);
        redone
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Record a change the caller has already applied
    pub fn push_command(&mut self, command: Box<dyn Command<ObjectRegistry>>) {
        self.history.push(command);
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Maximum undo steps (0 = unlimited), applied on the next recorded change
    pub fn set_history_limit(&mut self, limit: usize) {
        self.history.set_limit(limit);
    }

    /// Get notified whenever the undo/redo state changes
    pub fn on_history_change(&mut self, callback: impl FnMut(HistoryStatus) + 'static) {
        self.history.set_on_change(callback);
    }

    // ── Preferences ───────────────────────────────────────────

    /// Flip the shortcuts flag, or set it when `enabled` is given. Returns
    /// the new value.
    pub fn toggle_shortcuts(&mut self, enabled: Option<bool>) -> bool {
        self.shortcuts_enabled = enabled.unwrap_or(!self.shortcuts_enabled);
        tracing::debug!("shortcuts enabled: {}", self.shortcuts_enabled);
        self.shortcuts_enabled
    }

    pub fn shortcuts_enabled(&self) -> bool {
        self.shortcuts_enabled
    }
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_defaults() {
        let store = SceneStore::new();
        assert_eq!(store.transform_mode(), TransformMode::Translate);
        assert!(store.shortcuts_enabled());
        assert!(store.current_scene().is_none());
        assert!(!store.can_undo());
        assert!(!store.can_redo());
    }

    #[test]
    fn test_from_settings() {
        let settings = AppSettings {
            shortcuts_enabled: false,
            history_limit: 3,
            transform_mode: TransformMode::Scale,
            startup_template: None,
        };
        let store = SceneStore::from_settings(&settings);
        assert!(!store.shortcuts_enabled());
        assert_eq!(store.history().limit(), 3);
        assert_eq!(store.transform_mode(), TransformMode::Scale);
        assert_eq!(store.settings(), settings);
    }

    #[test]
    fn test_loading_scene_keeps_configured_startup_template() {
        let settings = AppSettings {
            startup_template: Some("showcase".into()),
            ..AppSettings::default()
        };
        let mut store = SceneStore::from_settings(&settings);
        store.load_template("basic").unwrap();
        assert_eq!(store.settings().startup_template.as_deref(), Some("showcase"));

        let mut store = SceneStore::new();
        store.load_template("basic").unwrap();
        assert!(store.settings().startup_template.is_none());
    }

    #[test]
    fn test_toggle_shortcuts() {
        let mut store = SceneStore::new();
        assert!(!store.toggle_shortcuts(None));
        assert!(store.toggle_shortcuts(None));
        assert!(!store.toggle_shortcuts(Some(false)));
        assert!(!store.toggle_shortcuts(Some(false)));
        assert!(!store.shortcuts_enabled());
    }

    #[test]
    fn test_undo_of_add_drops_pending_gesture() {
        let mut store = SceneStore::new();
        let a = crate::fixtures::box_handle("a");
        store.add_object(a.clone());
        store.begin_gesture(&a);

        store.undo();
        assert_eq!(store.gestures().pending_count(), 0);

        // Re-added object: an end without begin uses the live transform
        store.redo();
        a.borrow_mut().position = glam::Vec3::X;
        store.end_gesture("a", shared::PartialTransform::position(glam::Vec3::X));
        store.undo();
        assert_eq!(a.borrow().position, glam::Vec3::X);
    }

    #[test]
    fn test_redo_of_remove_drops_pending_gesture() {
        let mut store = SceneStore::new();
        let a = crate::fixtures::box_handle("a");
        store.add_object(a.clone());
        store.remove_object("a");
        store.undo();
        store.begin_gesture(&a);

        store.redo();
        assert!(!store.gestures().is_pending("a"));
    }

    #[test]
    fn test_undo_on_empty_store_is_noop() {
        let mut store = SceneStore::new();
        assert!(!store.undo());
        assert!(!store.redo());
        assert_eq!(store.object_count(), 0);
    }
}
