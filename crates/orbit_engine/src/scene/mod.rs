//! # Scene Management
//!
//! Scene graph, object transforms, keyframe animation, playback control, and
//! camera. The scene layer owns all world-space state; rendering code reads
//! from it once per frame and never mutates it.

pub mod animation;
pub mod camera;
pub mod graph;
pub mod object;
pub mod playback;
pub mod transform;

pub use animation::{AnimationKeyFrame, AnimationSequence, AnimationStatus};
pub use camera::Camera;
pub use graph::{SceneError, SceneGraph};
pub use object::{PointLight, SceneObject, SceneObjectId};
pub use playback::{AnimationPlayback, PlaybackState};
pub use transform::Transform;
