//! Scene object identity and payloads

use crate::foundation::math::Vec3;
use crate::render::MeshHandle;
use crate::scene::Transform;
use std::fmt;
use std::sync::Arc;

/// Opaque identifier for a scene object
///
/// Assigned monotonically by the owning [`SceneGraph`](crate::scene::SceneGraph)
/// and never reused within a process run, even after the object is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneObjectId(u32);

impl SceneObjectId {
    pub(crate) fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw integer value, for logging and debugging
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SceneObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Point light payload attached to a scene object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// Light intensity; multiplies the object's color tint downstream
    pub intensity: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        Self { intensity: 1.0 }
    }
}

/// An entity in the render world
///
/// Carries a transform plus optional renderable and light payloads. The
/// mesh handle is shared: several objects may draw the same mesh, and the
/// handle stays alive as long as any of them references it. Parent/child
/// links are stored as ids only; the [`SceneGraph`](crate::scene::SceneGraph)
/// registry is the sole owner of objects.
#[derive(Debug, Clone)]
pub struct SceneObject {
    id: SceneObjectId,

    /// Local transform, possibly keyframe-animated
    pub transform: Transform,

    /// Light tint or unlit tint color
    pub color: Vec3,

    /// Index into the externally managed texture set; -1 means none
    pub texture_binding: i32,

    /// Opaque mesh handle shared with other objects drawing the same mesh
    pub renderable: Option<Arc<MeshHandle>>,

    /// Optional point light payload
    pub point_light: Option<PointLight>,

    pub(crate) parent: Option<SceneObjectId>,
    pub(crate) children: Vec<SceneObjectId>,
}

impl SceneObject {
    pub(crate) fn new(id: SceneObjectId) -> Self {
        Self {
            id,
            transform: Transform::default(),
            color: Vec3::zeros(),
            texture_binding: -1,
            renderable: None,
            point_light: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// This object's id
    pub fn id(&self) -> SceneObjectId {
        self.id
    }

    /// The parent object's id, if parented
    pub fn parent(&self) -> Option<SceneObjectId> {
        self.parent
    }

    /// Ids of owned children, in attachment order
    pub fn children(&self) -> &[SceneObjectId] {
        &self.children
    }
}
