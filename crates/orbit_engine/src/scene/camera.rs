//! # 3D Camera
//!
//! Camera abstraction holding explicit projection, view, and inverse-view
//! matrices. All three are plain data recomputed on demand by the setter
//! methods, so the camera has no hidden coupling to any rendering backend.
//!
//! ## Design Principles
//! - **Library-agnostic**: no graphics API types leak into camera math
//! - **Explicit state**: matrices change only when a setter is called
//! - **Vulkan depth convention**: projections map depth into [0, 1]

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};

/// Camera with cached projection and view matrices
///
/// The view matrix transforms world space into camera space; the inverse
/// view matrix carries the camera's world-space basis and position, which
/// shading code needs to recover the eye position.
///
/// # Coordinate System
/// Right-handed with Y pointing down and Z pointing into the scene, matching
/// Vulkan's clip-space conventions. Projection matrices map depth to [0, 1].
#[derive(Debug, Clone)]
pub struct Camera {
    projection: Mat4,
    view: Mat4,
    inverse_view: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            projection: Mat4::identity(),
            view: Mat4::identity(),
            inverse_view: Mat4::identity(),
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure a perspective projection
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect` - Viewport aspect ratio (width / height)
    /// * `near` - Near clipping plane distance (must be > 0)
    /// * `far` - Far clipping plane distance (must be > near)
    pub fn set_perspective_projection(&mut self, fov_y: f32, aspect: f32, near: f32, far: f32) {
        debug_assert!(aspect.abs() > f32::EPSILON, "degenerate aspect ratio");
        self.projection = Mat4::perspective(fov_y, aspect, near, far);
    }

    /// Configure an orthographic projection over an axis-aligned view volume
    pub fn set_orthographic_projection(
        &mut self,
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
        near: f32,
        far: f32,
    ) {
        self.projection = Mat4::orthographic(left, right, top, bottom, near, far);
    }

    /// Orient the camera at `position` looking along `direction`
    ///
    /// `direction` need not be normalized but must be non-zero. The basis is
    /// orthonormalized against `up`, so `up` only needs to be roughly vertical.
    pub fn set_view_direction(&mut self, position: Vec3, direction: Vec3, up: Vec3) {
        let w = direction.normalize();
        let u = w.cross(&up).normalize();
        let v = w.cross(&u);
        self.assemble_view(position, u, v, w);
    }

    /// Orient the camera at `position` looking at a world-space `target`
    pub fn set_view_target(&mut self, position: Vec3, target: Vec3, up: Vec3) {
        self.set_view_direction(position, target - position, up);
    }

    /// Orient the camera from Euler angles applied in Y, X, Z order
    ///
    /// Matches the rotation convention used by [`Transform`]'s local matrix,
    /// so a camera can be driven directly by an object's transform fields.
    ///
    /// [`Transform`]: crate::scene::Transform
    pub fn set_view_yxz(&mut self, position: Vec3, rotation: Vec3) {
        let c3 = rotation.z.cos();
        let s3 = rotation.z.sin();
        let c2 = rotation.x.cos();
        let s2 = rotation.x.sin();
        let c1 = rotation.y.cos();
        let s1 = rotation.y.sin();
        let u = Vec3::new(c1 * c3 + s1 * s2 * s3, c2 * s3, c1 * s2 * s3 - c3 * s1);
        let v = Vec3::new(c3 * s1 * s2 - c1 * s3, c2 * c3, c1 * c3 * s2 + s1 * s3);
        let w = Vec3::new(c2 * s1, -s2, c1 * c2);
        self.assemble_view(position, u, v, w);
    }

    /// Build the view matrix from an orthonormal camera basis
    ///
    /// The view matrix rotates world axes onto the camera basis and translates
    /// by the negated projected position. The inverse view stores the basis as
    /// columns with the raw position, which inverts the rigid transform exactly
    /// without a general matrix inversion.
    fn assemble_view(&mut self, position: Vec3, u: Vec3, v: Vec3, w: Vec3) {
        self.view = Mat4::new(
            u.x,
            u.y,
            u.z,
            -u.dot(&position),
            v.x,
            v.y,
            v.z,
            -v.dot(&position),
            w.x,
            w.y,
            w.z,
            -w.dot(&position),
            0.0,
            0.0,
            0.0,
            1.0,
        );
        self.inverse_view = Mat4::new(
            u.x, v.x, w.x, position.x, u.y, v.y, w.y, position.y, u.z, v.z, w.z, position.z, 0.0,
            0.0, 0.0, 1.0,
        );
    }

    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    pub fn view(&self) -> &Mat4 {
        &self.view
    }

    pub fn inverse_view(&self) -> &Mat4 {
        &self.inverse_view
    }

    /// Camera position in world space, read from the inverse view matrix
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.inverse_view[(0, 3)],
            self.inverse_view[(1, 3)],
            self.inverse_view[(2, 3)],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec4;
    use approx::assert_relative_eq;

    #[test]
    fn default_camera_is_identity() {
        let camera = Camera::new();
        assert_relative_eq!(*camera.projection(), Mat4::identity());
        assert_relative_eq!(*camera.view(), Mat4::identity());
        assert_relative_eq!(*camera.inverse_view(), Mat4::identity());
    }

    #[test]
    fn view_times_inverse_view_is_identity() {
        let mut camera = Camera::new();
        camera.set_view_yxz(Vec3::new(1.0, -2.0, 3.0), Vec3::new(0.3, 0.8, -0.2));
        let product = camera.view() * camera.inverse_view();
        assert_relative_eq!(product, Mat4::identity(), epsilon = 1e-5);
    }

    #[test]
    fn view_target_moves_target_onto_forward_axis() {
        let mut camera = Camera::new();
        let position = Vec3::new(0.0, 0.0, -5.0);
        let target = Vec3::new(0.0, 0.0, 2.0);
        camera.set_view_target(position, target, Vec3::new(0.0, -1.0, 0.0));

        let transformed = camera.view() * Vec4::new(target.x, target.y, target.z, 1.0);
        assert_relative_eq!(transformed.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(transformed.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(transformed.z, 7.0, epsilon = 1e-6);
    }

    #[test]
    fn position_recovered_from_inverse_view() {
        let mut camera = Camera::new();
        let position = Vec3::new(4.0, 1.5, -9.0);
        camera.set_view_yxz(position, Vec3::new(0.0, 0.5, 0.0));
        assert_relative_eq!(camera.position(), position, epsilon = 1e-6);
    }

    #[test]
    fn zero_rotation_view_is_pure_translation() {
        let mut camera = Camera::new();
        camera.set_view_yxz(Vec3::new(2.0, 3.0, 4.0), Vec3::zeros());
        let view = camera.view();
        assert_relative_eq!(view[(0, 3)], -2.0, epsilon = 1e-6);
        assert_relative_eq!(view[(1, 3)], -3.0, epsilon = 1e-6);
        assert_relative_eq!(view[(2, 3)], -4.0, epsilon = 1e-6);
        assert_relative_eq!(view[(0, 0)], 1.0, epsilon = 1e-6);
        assert_relative_eq!(view[(1, 1)], 1.0, epsilon = 1e-6);
        assert_relative_eq!(view[(2, 2)], 1.0, epsilon = 1e-6);
    }
}
