//! Headless test harness for programmatic scene manipulation.
//!
//! Drives the store the way the viewport would: objects are created through
//! the sidebar path, drags go through begin/preview/end.

use glam::Vec3;
use shared::{ObjectId, PartialTransform, Primitive, SceneDescription, TransformMode};

use crate::command::{execute_json, CommandResponse};
use crate::error::EditorError;
use crate::shortcuts::{handle_key, KeyPress, Shortcut};
use crate::state::SceneStore;

/// Drag frames simulated between pointer-down and pointer-up
const DRAG_FRAMES: usize = 8;

/// Headless test harness around a [`SceneStore`]
pub struct TestHarness {
    pub store: SceneStore,
}

impl TestHarness {
    /// Create a new empty harness.
    pub fn new() -> Self {
        Self {
            store: SceneStore::new(),
        }
    }

    // ── Scene manipulation ────────────────────────────────────

    /// Create an object with a primitive and return its ID
    pub fn create_object(&mut self, name: &str, primitive: Primitive) -> ObjectId {
        let handle = self
            .store
            .spawn(primitive, None, None, Some(name.to_string()));
        let id = handle.borrow().id.clone();
        id
    }

    /// Create a box and return its ID
    pub fn create_box(&mut self, name: &str, w: f32, h: f32, d: f32) -> ObjectId {
        self.create_object(
            name,
            Primitive::Box {
                width: w,
                height: h,
                depth: d,
            },
        )
    }

    /// Create a sphere and return its ID
    pub fn create_sphere(&mut self, name: &str, r: f32) -> ObjectId {
        self.create_object(
            name,
            Primitive::Sphere {
                radius: r,
                segments: 32,
            },
        )
    }

    /// Create a ground plane and return its ID
    pub fn create_plane(&mut self, name: &str) -> ObjectId {
        self.create_object(name, Primitive::unit_plane())
    }

    /// Remove an object by ID
    pub fn remove(&mut self, id: &str) -> bool {
        self.store.remove_object(id)
    }

    /// Load a built-in template (replaces current)
    pub fn load_template(&mut self, template_id: &str) -> Result<(), EditorError> {
        self.store.load_template(template_id)
    }

    /// Load a scene from JSON string
    pub fn load_scene_json(&mut self, json: &str) -> Result<(), EditorError> {
        let scene: SceneDescription = serde_json::from_str(json)?;
        self.store.load_description(scene);
        Ok(())
    }

    /// Export the current scene as JSON
    pub fn export_scene_json(&self) -> String {
        serde_json::to_string_pretty(&self.store.describe()).unwrap_or_default()
    }

    /// Undo the last operation
    pub fn undo(&mut self) -> bool {
        self.store.undo()
    }

    /// Redo the last undone operation
    pub fn redo(&mut self) -> bool {
        self.store.redo()
    }

    // ── Gizmo ─────────────────────────────────────────────────

    /// Drag an object from where it is to `to` in translate mode, with a
    /// few intermediate frames, and release
    pub fn drag(&mut self, id: &str, to: Vec3) -> bool {
        self.gesture(id, TransformMode::Translate, to)
    }

    /// Rotate an object to the given XYZ Euler angles in one gesture
    pub fn rotate(&mut self, id: &str, to: Vec3) -> bool {
        self.gesture(id, TransformMode::Rotate, to)
    }

    /// Scale an object to `to` in one gesture
    pub fn scale(&mut self, id: &str, to: Vec3) -> bool {
        self.gesture(id, TransformMode::Scale, to)
    }

    fn gesture(&mut self, id: &str, mode: TransformMode, to: Vec3) -> bool {
        let Some(object) = self.store.object(id) else {
            return false;
        };
        self.store.set_transform_mode(mode);
        self.store.begin_gesture(&object);

        let start = object.borrow().snapshot();
        let from = match mode {
            TransformMode::Translate => start.position,
            TransformMode::Rotate => start.rotation,
            TransformMode::Scale => start.scale,
        };
        let frame = |v: Vec3| match mode {
            TransformMode::Translate => PartialTransform::position(v),
            TransformMode::Rotate => PartialTransform::rotation(v),
            TransformMode::Scale => PartialTransform::scale(v),
        };

        for i in 1..=DRAG_FRAMES {
            let t = i as f32 / DRAG_FRAMES as f32;
            self.store.preview_transform(id, &frame(from.lerp(to, t)));
        }
        self.store.end_gesture(id, frame(to))
    }

    // ── Selection ─────────────────────────────────────────────

    /// Select an object
    pub fn select(&mut self, id: &str) {
        self.store.select_object(Some(id));
    }

    /// Clear selection
    pub fn clear_selection(&mut self) {
        self.store.select_object(None);
    }

    // ── Input ─────────────────────────────────────────────────

    /// Press a key with no modifiers
    pub fn press(&mut self, key: &str) -> Option<Shortcut> {
        handle_key(&mut self.store, &KeyPress::key(key))
    }

    /// Press Ctrl + key
    pub fn press_ctrl(&mut self, key: &str) -> Option<Shortcut> {
        handle_key(&mut self.store, &KeyPress::ctrl(key))
    }

    /// Run one protocol command
    pub fn execute(&mut self, json: &str) -> Result<CommandResponse, EditorError> {
        execute_json(&mut self.store, json)
    }

    // ── Inspection ────────────────────────────────────────────

    /// Number of objects in the scene
    pub fn object_count(&self) -> usize {
        self.store.object_count()
    }

    pub fn position_of(&self, id: &str) -> Option<Vec3> {
        self.store.object(id).map(|o| o.borrow().position)
    }

    pub fn rotation_of(&self, id: &str) -> Option<Vec3> {
        self.store.object(id).map(|o| o.borrow().rotation)
    }

    pub fn scale_of(&self, id: &str) -> Option<Vec3> {
        self.store.object(id).map(|o| o.borrow().scale)
    }

    pub fn color_of(&self, id: &str) -> Option<String> {
        self.store.object(id).map(|o| o.borrow().color.clone())
    }

    /// Labels of the recorded steps, oldest first
    pub fn history_labels(&self) -> Vec<String> {
        self.store
            .history()
            .entries(None)
            .into_iter()
            .map(|e| e.label)
            .collect()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
