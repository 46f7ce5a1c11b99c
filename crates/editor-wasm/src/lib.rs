use wasm_bindgen::prelude::*;

use scene_editor_lib::command::{execute_json, execute_json_batch};
use scene_editor_lib::shortcuts::{handle_key, KeyPress};
use scene_editor_lib::state::HistoryStatus;
use scene_editor_lib::SceneStore;
use shared::builtin_templates;

fn js_error(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

/// Payload handed to the history callback
fn status_json(status: &HistoryStatus) -> serde_json::Result<String> {
    serde_json::to_string(status)
}

/// Editor session owned by the page. The viewport forwards gizmo gestures,
/// sidebar clicks and key events here as protocol commands.
#[wasm_bindgen]
pub struct SceneEditor {
    store: SceneStore,
}

#[wasm_bindgen]
impl SceneEditor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> SceneEditor {
        SceneEditor {
            store: SceneStore::new(),
        }
    }

    /// Run one JSON command, returns the JSON response
    pub fn execute(&mut self, command_json: &str) -> Result<String, JsError> {
        let resp = execute_json(&mut self.store, command_json).map_err(js_error)?;
        serde_json::to_string(&resp).map_err(js_error)
    }

    /// Run a JSON array of commands, returns a JSON array of responses
    pub fn execute_batch(&mut self, commands_json: &str) -> Result<String, JsError> {
        let resps = execute_json_batch(&mut self.store, commands_json).map_err(js_error)?;
        serde_json::to_string(&resps).map_err(js_error)
    }

    /// Feed a key event; returns the name of the shortcut that fired
    pub fn key_down(
        &mut self,
        key: &str,
        ctrl: bool,
        shift: bool,
        meta: bool,
        editing_text: bool,
    ) -> Option<String> {
        let press = KeyPress {
            key: key.to_string(),
            ctrl,
            shift,
            meta,
            editing_text,
        };
        let shortcut = handle_key(&mut self.store, &press)?;
        serde_json::to_value(shortcut)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
    }

    pub fn undo(&mut self) -> bool {
        self.store.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.store.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.store.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.store.can_redo()
    }

    pub fn shortcuts_enabled(&self) -> bool {
        self.store.shortcuts_enabled()
    }

    /// Flip shortcuts, or set them when `enabled` is given
    pub fn toggle_shortcuts(&mut self, enabled: Option<bool>) -> bool {
        self.store.toggle_shortcuts(enabled)
    }

    /// Register `callback(statusJson)`, called after every history change.
    ///
    /// The callback runs while this editor is still borrowed by the call that
    /// changed the history, so it must not call back into the same
    /// `SceneEditor` (wasm-bindgen rejects the recursive use). The status
    /// carries `index`, `length`, `can_undo` and `can_redo`; anything else
    /// should be scheduled with `queueMicrotask`.
    pub fn on_history_change(&mut self, callback: js_sys::Function) {
        self.store.on_history_change(move |status| {
            let json = match status_json(&status) {
                Ok(json) => json,
                Err(e) => {
                    web_sys::console::error_1(&format!("history status: {e}").into());
                    return;
                }
            };
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                web_sys::console::error_2(&"history callback failed:".into(), &e);
            }
        });
    }

    /// Current scene as JSON
    pub fn export_scene(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.store.describe()).map_err(js_error)
    }
}

impl Default for SceneEditor {
    fn default() -> Self {
        Self::new()
    }
}

/// Built-in scene templates as JSON, for the scene picker
#[wasm_bindgen]
pub fn list_templates() -> Result<String, JsError> {
    serde_json::to_string(&builtin_templates()).map_err(js_error)
}
