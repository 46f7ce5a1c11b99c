//! Transform gestures
//!
//! A drag on the gizmo mutates the live object many times per second. The
//! tracker snapshots the object when the drag starts and turns the whole
//! drag into a single history entry when it ends.

use std::collections::HashMap;
use std::rc::Rc;

use shared::{ObjectId, PartialTransform, SceneObject, TransformSnapshot};

use super::display::short_id;
use super::history::{Command, HistoryStack, GROUP_TRANSFORM};
use super::object::WeakObjectHandle;
use super::registry::ObjectRegistry;

/// Pending "before" snapshots of gestures in progress, keyed by object id
#[derive(Debug, Default)]
pub struct GestureTracker {
    pending: HashMap<ObjectId, TransformSnapshot>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the object's current transform. A second begin for the same
    /// object without an end replaces the earlier snapshot.
    pub fn begin(&mut self, object: &SceneObject) {
        let snapshot = object.snapshot();
        if self.pending.insert(object.id.clone(), snapshot).is_some() {
            tracing::debug!("gesture: restarted on {}", short_id(&object.id));
        }
    }

    /// Finish the gesture on `id` and record it.
    ///
    /// The live object is expected to already hold `final_transform`; the
    /// command is pushed without being executed. Without a matching begin
    /// the object's current transform is used as the "before" state.
    /// Returns `false` when `id` is not registered; nothing is recorded then.
    pub fn end(
        &mut self,
        id: &str,
        final_transform: PartialTransform,
        registry: &ObjectRegistry,
        history: &mut HistoryStack<ObjectRegistry>,
    ) -> bool {
        // Taken up front so no exit path can leave the entry behind
        let pending = self.pending.remove(id);

        let Some(object) = registry.get(id) else {
            tracing::debug!("gesture: end on unknown object {}", id);
            return false;
        };

        let before = match pending {
            Some(snapshot) => snapshot,
            None => {
                tracing::debug!("gesture: end without begin on {}", short_id(id));
                object.borrow().snapshot()
            }
        };

        history.push(Box::new(TransformObject {
            object: Rc::downgrade(&object),
            before,
            after: final_transform,
            label: format!("Transform {}", object.borrow().name),
        }));
        true
    }

    /// Abandon the gesture on `id` without recording anything. Returns the
    /// discarded snapshot.
    pub fn cancel(&mut self, id: &str) -> Option<TransformSnapshot> {
        self.pending.remove(id)
    }

    /// Drop gestures on objects that are no longer registered. History
    /// replay can detach an object behind the tracker's back.
    pub fn retain_registered(&mut self, registry: &ObjectRegistry) {
        let before = self.pending.len();
        self.pending.retain(|id, _| registry.contains(id));
        if self.pending.len() < before {
            tracing::debug!(
                "gesture: dropped {} pending on detached objects",
                before - self.pending.len()
            );
        }
    }

    /// Drop every pending gesture
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.contains_key(id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Snapshot captured for a running gesture
    pub fn pending_snapshot(&self, id: &str) -> Option<TransformSnapshot> {
        self.pending.get(id).copied()
    }
}

/// One completed gesture on one object.
///
/// Holds the object weakly: once nothing else keeps it alive (removed and
/// the removal evicted from history) replay does nothing.
struct TransformObject {
    object: WeakObjectHandle,
    before: TransformSnapshot,
    after: PartialTransform,
    label: String,
}

impl Command<ObjectRegistry> for TransformObject {
    fn execute(&mut self, _registry: &mut ObjectRegistry) {
        if let Some(object) = self.object.upgrade() {
            object.borrow_mut().apply(&self.after);
        }
    }

    fn undo(&mut self, _registry: &mut ObjectRegistry) {
        if let Some(object) = self.object.upgrade() {
            object.borrow_mut().restore(&self.before);
        }
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn group(&self) -> Option<&str> {
        Some(GROUP_TRANSFORM)
    }
}
