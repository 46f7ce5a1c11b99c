//! Transform mode and gizmo gestures

use shared::{PartialTransform, TransformMode};

use super::object::ObjectHandle;
use super::SceneStore;

impl SceneStore {
    pub fn set_transform_mode(&mut self, mode: TransformMode) {
        self.transform_mode = mode;
    }

    pub fn transform_mode(&self) -> TransformMode {
        self.transform_mode
    }

    /// Pointer-down on the gizmo: remember where the object started
    pub fn begin_gesture(&mut self, object: &ObjectHandle) {
        self.gestures.begin(&object.borrow());
    }

    /// Pointer-up: record the whole drag as one undo step. The renderer has
    /// already moved the object to `final_transform`.
    pub fn end_gesture(&mut self, id: &str, final_transform: PartialTransform) -> bool {
        self.gestures
            .end(id, final_transform, &self.registry, &mut self.history)
    }

    /// Abandon a drag without recording it
    pub fn cancel_gesture(&mut self, id: &str) -> bool {
        self.gestures.cancel(id).is_some()
    }

    /// Move the live object without recording anything, the way the gizmo
    /// does on every drag frame
    pub fn preview_transform(&mut self, id: &str, transform: &PartialTransform) -> bool {
        match self.registry.get(id) {
            Some(object) => {
                object.borrow_mut().apply(transform);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::fixtures::box_handle;

    #[test]
    fn test_set_transform_mode() {
        let mut store = SceneStore::new();
        for mode in TransformMode::all() {
            store.set_transform_mode(*mode);
            assert_eq!(store.transform_mode(), *mode);
        }
        // Mode changes are not undoable
        assert!(!store.can_undo());
    }

    #[test]
    fn test_drag_is_one_undo_step() {
        let mut store = SceneStore::new();
        let o = box_handle("o");
        store.add_object(o.clone());
        let steps_before = store.history().len();

        store.begin_gesture(&o);
        for i in 1..=30 {
            store.preview_transform("o", &PartialTransform::position(Vec3::splat(i as f32 * 0.1)));
        }
        let end = o.borrow().position;
        assert!(store.end_gesture("o", PartialTransform::position(end)));
        assert_eq!(store.history().len(), steps_before + 1);

        store.undo();
        assert_eq!(o.borrow().position, Vec3::ZERO);
        store.redo();
        assert_eq!(o.borrow().position, end);
    }

    #[test]
    fn test_cancel_gesture() {
        let mut store = SceneStore::new();
        let o = box_handle("o");
        store.add_object(o.clone());
        store.begin_gesture(&o);
        assert!(store.cancel_gesture("o"));
        assert!(!store.cancel_gesture("o"));
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn test_preview_unknown_object() {
        let mut store = SceneStore::new();
        assert!(!store.preview_transform("nope", &PartialTransform::position(Vec3::X)));
    }
}
