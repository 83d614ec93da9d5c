//! # Frame Update Block
//!
//! CPU-side mirror of the per-frame uniform block consumed by shaders. The
//! layout is `repr(C)` with explicit padding so the byte image produced by
//! [`FrameUpdateBlock::as_bytes`] matches std140 expectations exactly, and
//! matrices are stored as plain column-major arrays rather than math types
//! so the struct stays `Pod`.

use crate::foundation::math::Vec3;
use crate::render::{RenderError, RenderResult};
use crate::scene::Camera;

/// Hard cap on point lights in a single frame, mirrored in shader code
pub const MAX_POINT_LIGHTS: usize = 10;

const IDENTITY: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// One point light as seen by shaders
///
/// Position and color are padded to vec4; `color.w` carries the intensity.
#[repr(C, align(16))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLightData {
    pub position: [f32; 4],
    pub color: [f32; 4],
}

/// Per-frame uniform data - camera matrices, ambient term, active lights
#[repr(C, align(16))]
#[derive(Debug, Clone, Copy)]
pub struct FrameUpdateBlock {
    /// Projection matrix (camera to clip space), column-major
    pub projection: [[f32; 4]; 4],
    /// View matrix (world to camera space), column-major
    pub view: [[f32; 4]; 4],
    /// Inverse view matrix; column 3 holds the camera world position
    pub inverse_view: [[f32; 4]; 4],
    /// Ambient light color (RGB) and intensity (A)
    pub ambient_light_color: [f32; 4],
    /// Fixed-capacity light array; only the first `num_lights` are valid
    pub point_lights: [PointLightData; MAX_POINT_LIGHTS],
    /// Number of active entries in `point_lights`
    pub num_lights: u32,
    /// Padding to a 16-byte boundary
    pub _padding: [u32; 3],
}

unsafe impl bytemuck::Pod for PointLightData {}
unsafe impl bytemuck::Zeroable for PointLightData {}

unsafe impl bytemuck::Pod for FrameUpdateBlock {}
unsafe impl bytemuck::Zeroable for FrameUpdateBlock {}

impl Default for FrameUpdateBlock {
    fn default() -> Self {
        Self {
            projection: IDENTITY,
            view: IDENTITY,
            inverse_view: IDENTITY,
            ambient_light_color: [1.0, 1.0, 1.0, 0.02],
            point_lights: [PointLightData {
                position: [0.0; 4],
                color: [0.0; 4],
            }; MAX_POINT_LIGHTS],
            num_lights: 0,
            _padding: [0; 3],
        }
    }
}

impl FrameUpdateBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the camera's current matrices into the block
    pub fn set_camera(&mut self, camera: &Camera) {
        self.projection = (*camera.projection()).into();
        self.view = (*camera.view()).into();
        self.inverse_view = (*camera.inverse_view()).into();
    }

    /// Clear the active light count; stale array entries are left in place
    pub fn reset_lights(&mut self) {
        self.num_lights = 0;
    }

    /// Append one point light
    ///
    /// Fails with [`RenderError::LightCapacityExceeded`] once the fixed
    /// array is full; callers decide whether that is an error or a signal
    /// to truncate.
    pub fn push_light(&mut self, position: Vec3, color: Vec3, intensity: f32) -> RenderResult<()> {
        let index = self.num_lights as usize;
        if index >= MAX_POINT_LIGHTS {
            return Err(RenderError::LightCapacityExceeded {
                capacity: MAX_POINT_LIGHTS,
            });
        }
        self.point_lights[index] = PointLightData {
            position: [position.x, position.y, position.z, 1.0],
            color: [color.x, color.y, color.z, intensity],
        };
        self.num_lights += 1;
        Ok(())
    }

    pub fn active_light_count(&self) -> usize {
        self.num_lights as usize
    }

    /// Raw byte image for upload into a uniform buffer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem;

    #[test]
    fn block_layout_is_stable() {
        // 3 matrices + ambient vec4 + 10 lights of 2 vec4s + count + padding
        assert_eq!(mem::size_of::<FrameUpdateBlock>(), 544);
        assert_eq!(mem::size_of::<PointLightData>(), 32);
        assert_eq!(mem::align_of::<FrameUpdateBlock>(), 16);
    }

    #[test]
    fn default_block_has_identity_matrices_and_no_lights() {
        let block = FrameUpdateBlock::new();
        assert_eq!(block.projection, IDENTITY);
        assert_eq!(block.active_light_count(), 0);
        assert_eq!(block.ambient_light_color, [1.0, 1.0, 1.0, 0.02]);
    }

    #[test]
    fn push_light_packs_intensity_into_color_w() {
        let mut block = FrameUpdateBlock::new();
        block
            .push_light(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.5, 0.25, 1.0), 2.0)
            .unwrap();
        assert_eq!(block.active_light_count(), 1);
        assert_eq!(block.point_lights[0].position, [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(block.point_lights[0].color, [0.5, 0.25, 1.0, 2.0]);
    }

    #[test]
    fn push_light_fails_at_capacity() {
        let mut block = FrameUpdateBlock::new();
        for _ in 0..MAX_POINT_LIGHTS {
            block
                .push_light(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0), 1.0)
                .unwrap();
        }
        let overflow = block.push_light(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0), 1.0);
        assert!(matches!(
            overflow,
            Err(RenderError::LightCapacityExceeded { capacity: MAX_POINT_LIGHTS })
        ));
        assert_eq!(block.active_light_count(), MAX_POINT_LIGHTS);
    }

    #[test]
    fn reset_lights_only_clears_the_count() {
        let mut block = FrameUpdateBlock::new();
        block
            .push_light(Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0), 1.0)
            .unwrap();
        block.reset_lights();
        assert_eq!(block.active_light_count(), 0);
        assert_eq!(block.point_lights[0].position, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn byte_image_covers_whole_struct() {
        let block = FrameUpdateBlock::new();
        assert_eq!(block.as_bytes().len(), mem::size_of::<FrameUpdateBlock>());
    }

    #[test]
    fn set_camera_copies_matrices() {
        let mut camera = Camera::new();
        camera.set_perspective_projection(1.0, 1.5, 0.1, 100.0);
        let mut block = FrameUpdateBlock::new();
        block.set_camera(&camera);
        let expected: [[f32; 4]; 4] = (*camera.projection()).into();
        assert_eq!(block.projection, expected);
    }
}
