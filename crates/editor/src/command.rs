//! JSON command protocol for scripted and remote editing.
//!
//! Every command maps onto one store operation; responses carry whatever the
//! caller needs to keep going (new ids, flags, scene dumps).

use serde::{Deserialize, Serialize};
use shared::{PartialTransform, Primitive, TransformMode};

use crate::error::EditorError;
use crate::shortcuts::{handle_key, KeyPress};
use crate::state::{object_display_name, SceneStore};

/// A command the editor can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EditorCommand {
    /// Create an object with a fresh id
    AddObject {
        primitive: Primitive,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        transform: Option<PartialTransform>,
        #[serde(default)]
        color: Option<String>,
        /// Select the new object
        #[serde(default)]
        select: bool,
    },
    /// Remove an object by ID
    RemoveObject {
        id: String,
    },
    /// Select an object, or deselect with a null/missing id
    Select {
        #[serde(default)]
        id: Option<String>,
    },
    SetTransformMode {
        mode: TransformMode,
    },
    /// Pointer-down on the gizmo
    BeginGesture {
        id: String,
    },
    /// One drag frame; moves the object without recording
    UpdateGesture {
        id: String,
        transform: PartialTransform,
    },
    /// Pointer-up: move the object to `transform` and record the drag
    EndGesture {
        id: String,
        transform: PartialTransform,
    },
    CancelGesture {
        id: String,
    },
    SetColor {
        id: String,
        color: String,
    },
    /// Undo the last operation.
    Undo,
    /// Redo the last undone operation.
    Redo,
    SetHistoryLimit {
        limit: usize,
    },
    ClearHistory,
    /// Flip keyboard shortcuts, or set them when `enabled` is given
    ToggleShortcuts {
        #[serde(default)]
        enabled: Option<bool>,
    },
    /// Feed a key event through the shortcut dispatcher
    KeyPress(KeyPress),
    /// Replace the scene with a built-in template
    LoadScene {
        template: String,
    },
    /// Inspect the scene: list all objects and the undo state.
    Inspect,
    /// Export the scene as JSON.
    ExportScene,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// Execute a single command on the store.
pub fn execute_command(store: &mut SceneStore, cmd: EditorCommand) -> CommandResponse {
    match cmd {
        EditorCommand::AddObject {
            primitive,
            name,
            transform,
            color,
            select,
        } => {
            let handle = store.spawn(primitive, transform, color, name);
            let id = handle.borrow().id.clone();
            if select {
                store.select_object(Some(&id));
            }
            CommandResponse::ok_with_data(serde_json::json!({ "id": id }))
        }

        EditorCommand::RemoveObject { id } => {
            let removed = store.remove_object(&id);
            CommandResponse::ok_with_data(serde_json::json!({ "removed": removed }))
        }

        EditorCommand::Select { id } => {
            // Unregistered ids are accepted; the selected-object lookup is empty
            store.select_object(id.as_deref());
            CommandResponse::ok_with_data(serde_json::json!({ "selected": id }))
        }

        EditorCommand::SetTransformMode { mode } => {
            store.set_transform_mode(mode);
            CommandResponse::ok()
        }

        EditorCommand::BeginGesture { id } => match store.object(&id) {
            Some(object) => {
                store.begin_gesture(&object);
                CommandResponse::ok()
            }
            None => CommandResponse::err(format!("Unknown object: {id}")),
        },

        EditorCommand::UpdateGesture { id, transform } => {
            if store.preview_transform(&id, &transform) {
                CommandResponse::ok()
            } else {
                CommandResponse::err(format!("Unknown object: {id}"))
            }
        }

        EditorCommand::EndGesture { id, transform } => {
            if !store.preview_transform(&id, &transform) {
                // Still clears a pending snapshot left for a vanished object
                store.cancel_gesture(&id);
                return CommandResponse::err(format!("Unknown object: {id}"));
            }
            let recorded = store.end_gesture(&id, transform);
            CommandResponse::ok_with_data(serde_json::json!({ "recorded": recorded }))
        }

        EditorCommand::CancelGesture { id } => {
            let cancelled = store.cancel_gesture(&id);
            CommandResponse::ok_with_data(serde_json::json!({ "cancelled": cancelled }))
        }

        EditorCommand::SetColor { id, color } => {
            if store.object(&id).is_none() {
                return CommandResponse::err(format!("Unknown object: {id}"));
            }
            let changed = store.set_color(&id, &color);
            CommandResponse::ok_with_data(serde_json::json!({ "changed": changed }))
        }

        EditorCommand::Undo => {
            let success = store.undo();
            CommandResponse::ok_with_data(serde_json::json!({ "undone": success }))
        }

        EditorCommand::Redo => {
            let success = store.redo();
            CommandResponse::ok_with_data(serde_json::json!({ "redone": success }))
        }

        EditorCommand::SetHistoryLimit { limit } => {
            store.set_history_limit(limit);
            CommandResponse::ok()
        }

        EditorCommand::ClearHistory => {
            store.clear_history();
            CommandResponse::ok()
        }

        EditorCommand::ToggleShortcuts { enabled } => {
            let enabled = store.toggle_shortcuts(enabled);
            CommandResponse::ok_with_data(serde_json::json!({ "shortcuts_enabled": enabled }))
        }

        EditorCommand::KeyPress(press) => {
            let shortcut = handle_key(store, &press);
            CommandResponse::ok_with_data(serde_json::json!({ "shortcut": shortcut }))
        }

        EditorCommand::LoadScene { template } => match store.load_template(&template) {
            Ok(()) => CommandResponse::ok_with_data(serde_json::json!({
                "scene": template,
                "object_count": store.object_count(),
            })),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        EditorCommand::Inspect => {
            let objects: Vec<serde_json::Value> = store
                .objects()
                .iter()
                .map(|handle| {
                    let object = handle.borrow();
                    serde_json::json!({
                        "id": object.id,
                        "name": object.name,
                        "label": object_display_name(&object),
                        "type": object.primitive.type_tag(),
                        "color": object.color,
                        "position": object.position,
                        "rotation": object.rotation,
                        "scale": object.scale,
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "object_count": objects.len(),
                "objects": objects,
                "selected": store.selected_id(),
                "transform_mode": store.transform_mode(),
                "shortcuts_enabled": store.shortcuts_enabled(),
                "history": store.history().status(),
                "entries": store.history().entries(None),
            }))
        }

        EditorCommand::ExportScene => match serde_json::to_string_pretty(&store.describe()) {
            Ok(json) => CommandResponse::ok_with_data(serde_json::json!({ "scene_json": json })),
            Err(e) => CommandResponse::err(format!("Failed to serialize scene: {e}")),
        },
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(store: &mut SceneStore, json: &str) -> Result<CommandResponse, EditorError> {
    let cmd: EditorCommand = serde_json::from_str(json).map_err(EditorError::InvalidCommand)?;
    Ok(execute_command(store, cmd))
}

/// Parse and execute multiple JSON commands (array).
///
/// The whole batch is parsed before anything runs, so malformed input
/// leaves the store untouched.
pub fn execute_json_batch(
    store: &mut SceneStore,
    json: &str,
) -> Result<Vec<CommandResponse>, EditorError> {
    let cmds: Vec<EditorCommand> =
        serde_json::from_str(json).map_err(EditorError::InvalidCommand)?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(store, cmd))
        .collect())
}
