//! Per-object transform and its animation state machine
//!
//! [`Transform`] stores translation, Euler rotation, and scale, plus an
//! optional keyframe sequence driving them. Matrix construction uses the
//! closed-form composition used throughout the renderer: translate, then
//! rotate about Z, then X, then Y, then scale.

use crate::foundation::math::{utils::lerp_vec3, Mat4, Vec3};
use crate::scene::animation::{AnimationSequence, AnimationStatus};

/// Local affine transform with optional keyframe animation
///
/// Invariant: `scale` components must be non-zero; a zero component makes
/// the reciprocal in [`Transform::normal_matrix`] undefined.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Translation in parent space
    pub translation: Vec3,

    /// Intrinsic Euler angles in radians, composed Z then X then Y
    pub rotation: Vec3,

    /// Per-axis scale factors; must be non-zero
    pub scale: Vec3,

    /// Optional keyframe sequence driving this transform
    pub animation: Option<AnimationSequence>,

    /// Seconds since the current animation cycle started
    pub elapsed: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            animation: None,
            elapsed: 0.0,
        }
    }
}

impl Transform {
    /// Create an identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only translation set
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Build the local affine matrix as translate * Ry * Rx * Rz * scale
    ///
    /// Expanded closed form rather than a product of five matrices; the
    /// columns below are the rotation basis vectors pre-multiplied by scale.
    pub fn local_matrix(&self) -> Mat4 {
        let c3 = self.rotation.z.cos();
        let s3 = self.rotation.z.sin();
        let c2 = self.rotation.x.cos();
        let s2 = self.rotation.x.sin();
        let c1 = self.rotation.y.cos();
        let s1 = self.rotation.y.sin();
        let scale = self.scale;

        Mat4::new(
            scale.x * (c1 * c3 + s1 * s2 * s3),
            scale.y * (c3 * s1 * s2 - c1 * s3),
            scale.z * (c2 * s1),
            self.translation.x,
            scale.x * (c2 * s3),
            scale.y * (c2 * c3),
            scale.z * (-s2),
            self.translation.y,
            scale.x * (c1 * s2 * s3 - c3 * s1),
            scale.y * (c1 * c3 * s2 + s1 * s3),
            scale.z * (c1 * c2),
            self.translation.z,
            0.0,
            0.0,
            0.0,
            1.0,
        )
    }

    /// Build the matrix used to transform normals under non-uniform scale
    ///
    /// This is the rotation basis scaled by the reciprocal of each scale
    /// component, not a full inverse-transpose. The approximation only
    /// holds while rotation and scale commute component-wise, which is the
    /// contract for every mesh this renderer draws.
    pub fn normal_matrix(&self) -> Mat4 {
        debug_assert!(
            self.scale.x != 0.0 && self.scale.y != 0.0 && self.scale.z != 0.0,
            "zero scale component makes the normal matrix undefined"
        );
        let c3 = self.rotation.z.cos();
        let s3 = self.rotation.z.sin();
        let c2 = self.rotation.x.cos();
        let s2 = self.rotation.x.sin();
        let c1 = self.rotation.y.cos();
        let s1 = self.rotation.y.sin();
        let inv_scale = Vec3::new(1.0 / self.scale.x, 1.0 / self.scale.y, 1.0 / self.scale.z);

        Mat4::new(
            inv_scale.x * (c1 * c3 + s1 * s2 * s3),
            inv_scale.y * (c3 * s1 * s2 - c1 * s3),
            inv_scale.z * (c2 * s1),
            0.0,
            inv_scale.x * (c2 * s3),
            inv_scale.y * (c2 * c3),
            inv_scale.z * (-s2),
            0.0,
            inv_scale.x * (c1 * s2 * s3 - c3 * s1),
            inv_scale.y * (c1 * c3 * s2 + s1 * s3),
            inv_scale.z * (c1 * c2),
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        )
    }

    /// Advance the animation by `delta_time` seconds
    ///
    /// Returns [`AnimationStatus::CycleComplete`] exactly once when the
    /// accumulated elapsed time first exceeds the sequence duration; the
    /// elapsed counter resets to zero on that call but translation,
    /// rotation, and scale keep their last interpolated values. This
    /// leave-the-pose behavior is a contract: callers that want the rest
    /// pose back re-apply the first keyframe themselves.
    ///
    /// A sample that falls outside every keyframe interval leaves the
    /// transform untouched and is logged; the cycle still counts as playing
    /// because elapsed time keeps accumulating toward the duration wrap.
    pub fn advance(&mut self, delta_time: f32) -> AnimationStatus {
        let Some(sequence) = self.animation.as_ref() else {
            return AnimationStatus::Inert;
        };

        self.elapsed += delta_time;

        if self.elapsed > sequence.duration() {
            self.elapsed = 0.0;
            return AnimationStatus::CycleComplete;
        }

        if sequence.is_inert() {
            return AnimationStatus::Inert;
        }

        match sequence.find_interval(self.elapsed) {
            Some((index, alpha)) => {
                let frames = sequence.keyframes();
                let prev = &frames[index];
                let next = &frames[index + 1];
                self.translation = lerp_vec3(prev.translation, next.translation, alpha);
                // Linear in Euler angles, deliberately not spherical: large
                // angular deltas between keyframes can visibly short-path.
                self.rotation = lerp_vec3(prev.rotation, next.rotation, alpha);
                self.scale = lerp_vec3(prev.scale, next.scale, alpha);
            }
            None => {
                log::warn!(
                    "no keyframe interval brackets elapsed={:.3}s; transform left unchanged",
                    self.elapsed
                );
            }
        }

        AnimationStatus::Playing
    }
}
