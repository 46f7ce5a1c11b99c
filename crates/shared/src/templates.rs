//! Built-in starter scenes

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{PartialTransform, Primitive};

/// One object to spawn when a template is loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateObject {
    pub primitive: Primitive,
    /// Overrides applied on top of the primitive's default transform
    #[serde(default)]
    pub transform: PartialTransform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl TemplateObject {
    fn new(primitive: Primitive) -> Self {
        Self {
            primitive,
            transform: PartialTransform::default(),
            color: None,
        }
    }

    fn at(mut self, position: Vec3) -> Self {
        self.transform.position = Some(position);
        self
    }

    fn rotated(mut self, rotation: Vec3) -> Self {
        self.transform.rotation = Some(rotation);
        self
    }

    fn scaled(mut self, scale: Vec3) -> Self {
        self.transform.scale = Some(scale);
        self
    }

    fn colored(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }
}

/// A named starter scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub objects: Vec<TemplateObject>,
}

fn flat() -> Vec3 {
    Vec3::new(-std::f32::consts::FRAC_PI_2, 0.0, 0.0)
}

/// All templates offered by the scene manager, in display order
pub fn builtin_templates() -> Vec<SceneTemplate> {
    vec![
        SceneTemplate {
            id: "empty".into(),
            name: "Empty Scene".into(),
            description: "Start with a clean scene".into(),
            objects: vec![],
        },
        SceneTemplate {
            id: "basic".into(),
            name: "Basic Scene".into(),
            description: "A simple scene with basic objects".into(),
            objects: vec![
                TemplateObject::new(Primitive::unit_box())
                    .at(Vec3::new(0.0, 0.5, 0.0))
                    .colored("#f44336"),
                TemplateObject::new(Primitive::unit_sphere())
                    .at(Vec3::new(2.0, 0.5, 0.0))
                    .colored("#4caf50"),
                TemplateObject::new(Primitive::unit_plane())
                    .at(Vec3::ZERO)
                    .rotated(flat()),
            ],
        },
        SceneTemplate {
            id: "showcase".into(),
            name: "Showcase".into(),
            description: "Scene designed for showcasing models".into(),
            objects: vec![
                TemplateObject::new(Primitive::unit_plane())
                    .at(Vec3::ZERO)
                    .rotated(flat())
                    .scaled(Vec3::new(20.0, 20.0, 1.0))
                    .colored("#212121"),
                TemplateObject::new(Primitive::unit_box())
                    .at(Vec3::new(-3.0, 0.5, -3.0))
                    .colored("#E91E63"),
                TemplateObject::new(Primitive::unit_box())
                    .at(Vec3::new(3.0, 0.5, -3.0))
                    .colored("#2196F3"),
                TemplateObject::new(Primitive::unit_sphere())
                    .at(Vec3::new(0.0, 1.0, -5.0))
                    .scaled(Vec3::splat(2.0))
                    .colored("#FFC107"),
            ],
        },
    ]
}

/// Look up a built-in template by id
pub fn find_template(id: &str) -> Option<SceneTemplate> {
    builtin_templates().into_iter().find(|t| t.id == id)
}
