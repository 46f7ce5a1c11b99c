//! Shared handles to live scene objects

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use shared::{Primitive, SceneObject};

/// Live object shared between the registry, the history and the renderer.
///
/// Callers must not hold a `borrow_mut()` across calls into the editor;
/// registry lookups and command replay borrow the object themselves.
pub type ObjectHandle = Rc<RefCell<SceneObject>>;

/// Non-owning handle, used by commands that must go inert once the object
/// is gone for good
pub type WeakObjectHandle = Weak<RefCell<SceneObject>>;

/// Wrap an object into a shared handle
pub fn new_handle(object: SceneObject) -> ObjectHandle {
    Rc::new(RefCell::new(object))
}

/// Build an object with a fresh UUID and the primitive's defaults
pub fn new_object(primitive: Primitive, name: Option<String>) -> SceneObject {
    let id = uuid::Uuid::new_v4().to_string();
    let name = name.unwrap_or_else(|| primitive.kind().to_string());
    SceneObject::new(id, name, primitive)
}
