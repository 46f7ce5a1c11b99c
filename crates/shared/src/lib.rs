use std::fmt;
use std::str::FromStr;

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

pub mod templates;

pub use templates::{builtin_templates, find_template, SceneTemplate, TemplateObject};

/// Stable unique identifier of a scene object
pub type ObjectId = String;

/// Primitive shape of a scene object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Box {
        #[serde(default = "unit")]
        width: f32,
        #[serde(default = "unit")]
        height: f32,
        #[serde(default = "unit")]
        depth: f32,
    },
    Sphere {
        #[serde(default = "half")]
        radius: f32,
        #[serde(default = "default_segments")]
        segments: u32,
    },
    Plane {
        #[serde(default = "unit")]
        width: f32,
        #[serde(default = "unit")]
        height: f32,
    },
}

fn unit() -> f32 {
    1.0
}

fn half() -> f32 {
    0.5
}

fn default_segments() -> u32 {
    32
}

impl Primitive {
    /// Unit box (1x1x1)
    pub fn unit_box() -> Self {
        Primitive::Box {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        }
    }

    /// Sphere of radius 0.5 with 32 segments
    pub fn unit_sphere() -> Self {
        Primitive::Sphere {
            radius: 0.5,
            segments: 32,
        }
    }

    /// Unit plane, scaled up by its default transform
    pub fn unit_plane() -> Self {
        Primitive::Plane {
            width: 1.0,
            height: 1.0,
        }
    }

    /// Short display name
    pub fn kind(&self) -> &'static str {
        match self {
            Primitive::Box { .. } => "Box",
            Primitive::Sphere { .. } => "Sphere",
            Primitive::Plane { .. } => "Plane",
        }
    }

    /// Serialized `type` tag
    pub fn type_tag(&self) -> &'static str {
        match self {
            Primitive::Box { .. } => "box",
            Primitive::Sphere { .. } => "sphere",
            Primitive::Plane { .. } => "plane",
        }
    }

    /// Transform a freshly spawned object of this kind starts with.
    /// Planes lie flat on the ground and cover a 10x10 area.
    pub fn default_transform(&self) -> TransformSnapshot {
        match self {
            Primitive::Plane { .. } => TransformSnapshot {
                position: Vec3::ZERO,
                rotation: Vec3::new(-std::f32::consts::FRAC_PI_2, 0.0, 0.0),
                scale: Vec3::new(10.0, 10.0, 1.0),
            },
            _ => TransformSnapshot::IDENTITY,
        }
    }

    /// Color a freshly spawned object of this kind starts with
    pub fn default_color(&self) -> &'static str {
        match self {
            Primitive::Plane { .. } => "#444444",
            _ => "#ffffff",
        }
    }
}

/// Active manipulation mode of the transform gizmo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformMode {
    #[default]
    Translate,
    Rotate,
    Scale,
}

impl TransformMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransformMode::Translate => "translate",
            TransformMode::Rotate => "rotate",
            TransformMode::Scale => "scale",
        }
    }

    /// All modes in toolbar order
    pub fn all() -> &'static [TransformMode] {
        &[
            TransformMode::Translate,
            TransformMode::Rotate,
            TransformMode::Scale,
        ]
    }
}

impl fmt::Display for TransformMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransformMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "translate" => Ok(TransformMode::Translate),
            "rotate" => Ok(TransformMode::Rotate),
            "scale" => Ok(TransformMode::Scale),
            other => Err(format!("unknown transform mode '{other}'")),
        }
    }
}

/// Value copy of an object's transform at a point in time.
///
/// `rotation` holds XYZ-order Euler angles in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformSnapshot {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl TransformSnapshot {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Rotation as a quaternion
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }
}

impl Default for TransformSnapshot {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Transform with every field optional; absent fields are left untouched
/// when applied.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialTransform {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Vec3>,
}

impl PartialTransform {
    pub fn position(position: Vec3) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn rotation(rotation: Vec3) -> Self {
        Self {
            rotation: Some(rotation),
            ..Self::default()
        }
    }

    pub fn scale(scale: Vec3) -> Self {
        Self {
            scale: Some(scale),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.rotation.is_none() && self.scale.is_none()
    }

    /// Fill absent fields from `base`
    pub fn resolve(&self, base: &TransformSnapshot) -> TransformSnapshot {
        TransformSnapshot {
            position: self.position.unwrap_or(base.position),
            rotation: self.rotation.unwrap_or(base.rotation),
            scale: self.scale.unwrap_or(base.scale),
        }
    }
}

impl From<TransformSnapshot> for PartialTransform {
    fn from(t: TransformSnapshot) -> Self {
        Self {
            position: Some(t.position),
            rotation: Some(t.rotation),
            scale: Some(t.scale),
        }
    }
}

/// A live object in the scene. The editor shares it with the renderer,
/// which mutates the transform fields directly while a gesture is running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: String,
    pub primitive: Primitive,
    pub color: String,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl SceneObject {
    pub fn new(id: impl Into<ObjectId>, name: impl Into<String>, primitive: Primitive) -> Self {
        let transform = primitive.default_transform();
        let color = primitive.default_color().to_string();
        Self {
            id: id.into(),
            name: name.into(),
            primitive,
            color,
            position: transform.position,
            rotation: transform.rotation,
            scale: transform.scale,
        }
    }

    pub fn with_transform(mut self, transform: TransformSnapshot) -> Self {
        self.restore(&transform);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Copy of the current transform
    pub fn snapshot(&self) -> TransformSnapshot {
        TransformSnapshot {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    /// Overwrite the fields present in `transform`
    pub fn apply(&mut self, transform: &PartialTransform) {
        if let Some(position) = transform.position {
            self.position = position;
        }
        if let Some(rotation) = transform.rotation {
            self.rotation = rotation;
        }
        if let Some(scale) = transform.scale {
            self.scale = scale;
        }
    }

    /// Overwrite all three transform fields
    pub fn restore(&mut self, snapshot: &TransformSnapshot) {
        self.position = snapshot.position;
        self.rotation = snapshot.rotation;
        self.scale = snapshot.scale;
    }
}

/// Serializable view of a whole scene
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_scene: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<ObjectId>,
    pub objects: Vec<SceneObject>,
}
