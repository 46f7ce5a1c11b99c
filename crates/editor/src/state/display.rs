//! Display helper functions for objects

use shared::SceneObject;

/// Get display name for an object
pub fn object_display_name(object: &SceneObject) -> String {
    format!("{} ({})", object.name, short_id(&object.id))
}

/// First 8 characters of an id
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Primitive;

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn test_object_display_name() {
        let obj = SceneObject::new("0123456789", "Crate", Primitive::unit_box());
        assert_eq!(object_display_name(&obj), "Crate (01234567)");
    }
}
