//! Live object set and selection
//!
//! Adding and removing objects goes through the history: each call applies
//! the change immediately and records the inverse command on the stack it
//! is given.

use shared::{ObjectId, SceneObject};

use super::display::object_display_name;
use super::history::{Command, HistoryStack, GROUP_OBJECTS};
use super::object::ObjectHandle;
use super::selection::Selection;

/// The live objects of a scene, in insertion order, plus the selection
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    objects: Vec<ObjectHandle>,
    selection: Selection,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `object` and record its creation. Returns `false` (and
    /// records nothing) if an object with the same id is already present.
    pub fn add(&mut self, object: ObjectHandle, history: &mut HistoryStack<ObjectRegistry>) -> bool {
        let (id, label) = {
            let o = object.borrow();
            (o.id.clone(), format!("Add {}", object_display_name(&o)))
        };
        if self.contains(&id) {
            tracing::warn!("Object {} is already registered", id);
            return false;
        }

        let position = self.objects.len();
        self.attach(position, object.clone());
        history.push(Box::new(AddObject {
            object,
            id,
            position,
            label,
        }));
        true
    }

    /// Remove the object with `id` and record the removal. Unknown ids are a
    /// no-op.
    pub fn remove(&mut self, id: &str, history: &mut HistoryStack<ObjectRegistry>) -> bool {
        let Some((position, object)) = self.detach(id) else {
            tracing::debug!("remove: no object {}", id);
            return false;
        };

        let label = format!("Remove {}", object_display_name(&object.borrow()));
        history.push(Box::new(RemoveObject {
            object,
            id: id.to_string(),
            position,
            label,
        }));
        true
    }

    /// Look up an object by id
    pub fn get(&self, id: &str) -> Option<ObjectHandle> {
        self.position(id).map(|i| self.objects[i].clone())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Index of the object in insertion order
    pub fn position(&self, id: &str) -> Option<usize> {
        self.objects.iter().position(|o| o.borrow().id == id)
    }

    pub fn objects(&self) -> &[ObjectHandle] {
        &self.objects
    }

    pub fn ids(&self) -> Vec<ObjectId> {
        self.objects.iter().map(|o| o.borrow().id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Select an object by id, or deselect with `None`
    pub fn select(&mut self, id: Option<ObjectId>) {
        self.selection.set(id);
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_id(&self) -> Option<&ObjectId> {
        self.selection.primary()
    }

    /// The selected object, if the selected id is registered
    pub fn selected(&self) -> Option<ObjectHandle> {
        self.selection.primary().and_then(|id| self.get(id))
    }

    /// Copies of all objects, for inspection and export
    pub fn snapshot_objects(&self) -> Vec<SceneObject> {
        self.objects.iter().map(|o| o.borrow().clone()).collect()
    }

    /// Insert without recording, clamping `position` to the current length
    pub(crate) fn attach(&mut self, position: usize, object: ObjectHandle) {
        let id = object.borrow().id.clone();
        if self.contains(&id) {
            tracing::warn!("attach: object {} already present", id);
            return;
        }
        let position = position.min(self.objects.len());
        self.objects.insert(position, object);
    }

    /// Remove without recording; also drops the selection if it pointed at
    /// the removed object
    pub(crate) fn detach(&mut self, id: &str) -> Option<(usize, ObjectHandle)> {
        let position = self.position(id)?;
        let object = self.objects.remove(position);
        self.selection.clear_if(id);
        Some((position, object))
    }

    /// Drop every object and the selection without recording
    pub(crate) fn reset(&mut self) {
        self.objects.clear();
        self.selection.clear();
    }
}

/// Undo removes the object again, redo re-adds it at its original position
struct AddObject {
    object: ObjectHandle,
    id: ObjectId,
    position: usize,
    label: String,
}

impl Command<ObjectRegistry> for AddObject {
    fn execute(&mut self, registry: &mut ObjectRegistry) {
        registry.attach(self.position, self.object.clone());
    }

    fn undo(&mut self, registry: &mut ObjectRegistry) {
        registry.detach(&self.id);
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn group(&self) -> Option<&str> {
        Some(GROUP_OBJECTS)
    }
}

/// Undo re-adds the object at its original position, redo removes it again
struct RemoveObject {
    object: ObjectHandle,
    id: ObjectId,
    position: usize,
    label: String,
}

impl Command<ObjectRegistry> for RemoveObject {
    fn execute(&mut self, registry: &mut ObjectRegistry) {
        registry.detach(&self.id);
    }

    fn undo(&mut self, registry: &mut ObjectRegistry) {
        registry.attach(self.position, self.object.clone());
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn group(&self) -> Option<&str> {
        Some(GROUP_OBJECTS)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::fixtures::{box_handle, sphere_handle};

    fn setup() -> (ObjectRegistry, HistoryStack<ObjectRegistry>) {
        (ObjectRegistry::new(), HistoryStack::new())
    }

    #[test]
    fn test_add_registers_and_records() {
        let (mut reg, mut history) = setup();
        assert!(reg.add(box_handle("a"), &mut history));
        assert!(reg.contains("a"));
        assert_eq!(history.len(), 1);
        assert_eq!(history.entries(None)[0].group.as_deref(), Some(GROUP_OBJECTS));
    }

    #[test]
    fn test_add_duplicate_id_is_noop() {
        let (mut reg, mut history) = setup();
        reg.add(box_handle("a"), &mut history);
        assert!(!reg.add(box_handle("a"), &mut history));
        assert_eq!(reg.len(), 1);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_undo_add_removes_and_deselects() {
        let (mut reg, mut history) = setup();
        let a = box_handle("a");
        reg.add(a.clone(), &mut history);
        reg.select(Some("a".into()));

        history.undo(&mut reg);
        assert!(!reg.contains("a"));
        assert!(reg.selected_id().is_none());

        history.redo(&mut reg);
        let back = reg.get("a").unwrap();
        assert!(Rc::ptr_eq(&back, &a));
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let (mut reg, mut history) = setup();
        reg.add(box_handle("a"), &mut history);
        assert!(!reg.remove("zzz", &mut history));
        assert_eq!(reg.len(), 1);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_remove_clears_selection() {
        let (mut reg, mut history) = setup();
        reg.add(box_handle("a"), &mut history);
        reg.select(Some("a".into()));
        assert!(reg.remove("a", &mut history));
        assert!(reg.selected().is_none());
        assert!(reg.selected_id().is_none());
    }

    #[test]
    fn test_remove_keeps_other_selection() {
        let (mut reg, mut history) = setup();
        reg.add(box_handle("a"), &mut history);
        reg.add(sphere_handle("b"), &mut history);
        reg.select(Some("b".into()));
        reg.remove("a", &mut history);
        assert_eq!(reg.selected_id().map(String::as_str), Some("b"));
    }

    #[test]
    fn test_undo_remove_restores_order() {
        let (mut reg, mut history) = setup();
        reg.add(box_handle("a"), &mut history);
        reg.add(box_handle("b"), &mut history);
        reg.add(box_handle("c"), &mut history);

        reg.remove("b", &mut history);
        assert_eq!(reg.ids(), vec!["a", "c"]);

        history.undo(&mut reg);
        assert_eq!(reg.ids(), vec!["a", "b", "c"]);

        history.redo(&mut reg);
        assert_eq!(reg.ids(), vec!["a", "c"]);
    }

    #[test]
    fn test_select_unknown_id_gives_empty_lookup() {
        let (mut reg, _history) = setup();
        reg.select(Some("ghost".into()));
        assert_eq!(reg.selected_id().map(String::as_str), Some("ghost"));
        assert!(reg.selected().is_none());
    }

    #[test]
    fn test_get_unknown_is_none() {
        let reg = ObjectRegistry::new();
        assert!(reg.get("nope").is_none());
    }
}
