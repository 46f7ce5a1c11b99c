//! Object creation, removal, selection and appearance

use std::rc::Rc;

use shared::{ObjectId, PartialTransform, Primitive};

use super::history::{FnCommand, GROUP_APPEARANCE};
use super::object::{new_handle, new_object, ObjectHandle};
use super::registry::ObjectRegistry;
use super::SceneStore;

impl SceneStore {
    /// Register an object created by the caller. Recorded in history.
    pub fn add_object(&mut self, object: ObjectHandle) -> bool {
        self.registry.add(object, &mut self.history)
    }

    /// Create an object with a fresh id and register it. `transform`
    /// overrides the primitive's default placement.
    pub fn spawn(
        &mut self,
        primitive: Primitive,
        transform: Option<PartialTransform>,
        color: Option<String>,
        name: Option<String>,
    ) -> ObjectHandle {
        let mut object = new_object(primitive, name);
        if let Some(transform) = transform {
            object.apply(&transform);
        }
        if let Some(color) = color {
            object.color = color;
        }

        let handle = new_handle(object);
        self.add_object(handle.clone());
        handle
    }

    /// Remove an object by id. Any gesture still running on it is dropped.
    pub fn remove_object(&mut self, id: &str) -> bool {
        self.gestures.cancel(id);
        self.registry.remove(id, &mut self.history)
    }

    /// Remove the selected object, if any
    pub fn remove_selected(&mut self) -> bool {
        match self.registry.selected_id().cloned() {
            Some(id) => self.remove_object(&id),
            None => false,
        }
    }

    /// Select by id, or deselect with `None`. Not recorded in history.
    pub fn select_object(&mut self, id: Option<&str>) {
        self.registry.select(id.map(str::to_string));
    }

    pub fn selected_id(&self) -> Option<&ObjectId> {
        self.registry.selected_id()
    }

    /// The selected object, if it is still registered
    pub fn selected_object(&self) -> Option<ObjectHandle> {
        self.registry.selected()
    }

    pub fn object(&self, id: &str) -> Option<ObjectHandle> {
        self.registry.get(id)
    }

    pub fn objects(&self) -> &[ObjectHandle] {
        self.registry.objects()
    }

    pub fn object_count(&self) -> usize {
        self.registry.len()
    }

    /// Recolor an object. Recorded in history; returns `false` if the object
    /// is unknown or already has that color.
    pub fn set_color(&mut self, id: &str, color: &str) -> bool {
        let Some(object) = self.registry.get(id) else {
            return false;
        };

        let (old, name) = {
            let mut o = object.borrow_mut();
            if o.color == color {
                return false;
            }
            (std::mem::replace(&mut o.color, color.to_string()), o.name.clone())
        };

        let redo_target = Rc::downgrade(&object);
        let undo_target = redo_target.clone();
        let new = color.to_string();
        self.history.push(Box::new(
            FnCommand::new(
                format!("Color {name}"),
                move |_: &mut ObjectRegistry| {
                    if let Some(o) = redo_target.upgrade() {
                        o.borrow_mut().color = new.clone();
                    }
                },
                move |_: &mut ObjectRegistry| {
                    if let Some(o) = undo_target.upgrade() {
                        o.borrow_mut().color = old.clone();
                    }
                },
            )
            .with_group(GROUP_APPEARANCE),
        ));
        true
    }
}
