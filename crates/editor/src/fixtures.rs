//! Factory functions for creating test data.
//!
//! Provides helpers to construct `SceneObject`s with fixed ids, their shared
//! handles, and pre-populated stores.

use glam::Vec3;
use shared::*;

use crate::state::{new_handle, ObjectHandle, SceneStore};

// ── Object factories ────────────────────────────────────────────

/// Unit box at the origin.
pub fn box_object(id: &str) -> SceneObject {
    SceneObject::new(id, "Box", Primitive::unit_box())
}

/// Unit box at a specific position.
pub fn box_at(id: &str, pos: [f32; 3]) -> SceneObject {
    box_object(id).with_transform(TransformSnapshot::at(Vec3::from_array(pos)))
}

/// Sphere of radius 0.5.
pub fn sphere_object(id: &str) -> SceneObject {
    SceneObject::new(id, "Sphere", Primitive::unit_sphere())
}

/// Ground plane with default placement.
pub fn plane_object(id: &str) -> SceneObject {
    SceneObject::new(id, "Plane", Primitive::unit_plane())
}

// ── Handles ─────────────────────────────────────────────────────

pub fn box_handle(id: &str) -> ObjectHandle {
    new_handle(box_object(id))
}

pub fn sphere_handle(id: &str) -> ObjectHandle {
    new_handle(sphere_object(id))
}

pub fn plane_handle(id: &str) -> ObjectHandle {
    new_handle(plane_object(id))
}

// ── Stores ──────────────────────────────────────────────────────

/// Store with one unit box per id, registered in order. Each add is one
/// history step.
pub fn store_with_boxes(ids: &[&str]) -> (SceneStore, Vec<ObjectHandle>) {
    let mut store = SceneStore::new();
    let handles = ids
        .iter()
        .map(|id| {
            let h = box_handle(id);
            store.add_object(h.clone());
            h
        })
        .collect();
    (store, handles)
}
