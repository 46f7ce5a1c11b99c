//! Scene templates and scene-level export

use shared::{find_template, SceneDescription, SceneObject};

use super::object::{new_handle, new_object};
use super::SceneStore;
use crate::error::EditorError;

impl SceneStore {
    pub fn current_scene(&self) -> Option<&str> {
        self.current_scene.as_deref()
    }

    pub fn set_current_scene(&mut self, scene: Option<String>) {
        self.current_scene = scene;
    }

    /// Replace the scene with a built-in template.
    ///
    /// Starts a fresh timeline: objects, selection, running gestures and
    /// history are all dropped, and the template's objects are not undoable.
    pub fn load_template(&mut self, template_id: &str) -> Result<(), EditorError> {
        let template = find_template(template_id)
            .ok_or_else(|| EditorError::UnknownTemplate(template_id.to_string()))?;

        let objects = template
            .objects
            .iter()
            .map(|entry| {
                let mut object = new_object(entry.primitive.clone(), None);
                object.apply(&entry.transform);
                if let Some(color) = &entry.color {
                    object.color = color.clone();
                }
                object
            })
            .collect();
        self.reset_scene(objects);

        self.current_scene = Some(template.id.clone());
        tracing::info!(
            "Loaded scene: {} ({} objects)",
            template.name,
            template.objects.len()
        );
        Ok(())
    }

    /// Replace the scene with a previously exported one. Like
    /// [`load_template`](Self::load_template) this starts a fresh timeline.
    pub fn load_description(&mut self, scene: SceneDescription) {
        let count = scene.objects.len();
        self.reset_scene(scene.objects);
        self.current_scene = scene.current_scene;
        if let Some(id) = scene.selected {
            if self.registry.contains(&id) {
                self.registry.select(Some(id));
            }
        }
        tracing::info!("Loaded scene description ({count} objects)");
    }

    fn reset_scene(&mut self, objects: Vec<SceneObject>) {
        self.gestures.clear();
        self.registry.reset();
        self.history.clear();
        for object in objects {
            let position = self.registry.len();
            self.registry.attach(position, new_handle(object));
        }
    }

    /// Serializable copy of the scene
    pub fn describe(&self) -> SceneDescription {
        SceneDescription {
            current_scene: self.current_scene.clone(),
            selected: self.registry.selected_id().cloned(),
            objects: self.registry.snapshot_objects(),
        }
    }
}
