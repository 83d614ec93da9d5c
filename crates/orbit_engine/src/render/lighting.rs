//! # Light Aggregation
//!
//! Walks the scene graph once per frame, collects every object carrying a
//! point light payload, and writes the survivors into the frame update
//! block. World positions come from the composed parent chain, so a light
//! parented to an animated object orbits with it for free.

use crate::foundation::math::Vec3;
use crate::render::frame_data::{FrameUpdateBlock, MAX_POINT_LIGHTS};
use crate::scene::SceneGraph;

/// Collects scene point lights into a [`FrameUpdateBlock`]
///
/// The aggregator enforces a per-frame light budget. Lights beyond the
/// budget are dropped in iteration order (stable creation order for a
/// process run), and the drop is reported once per frame rather than per
/// light to keep logs readable when a scene is persistently over budget.
#[derive(Debug, Clone)]
pub struct LightAggregator {
    max_lights: usize,
}

impl LightAggregator {
    /// Create an aggregator with the given light budget
    ///
    /// Budgets above [`MAX_POINT_LIGHTS`] are clamped, since the uniform
    /// block cannot carry more entries than its fixed array holds.
    pub fn new(max_lights: usize) -> Self {
        let clamped = max_lights.min(MAX_POINT_LIGHTS);
        if clamped < max_lights {
            log::warn!(
                "light budget {max_lights} exceeds uniform capacity, clamping to {clamped}"
            );
        }
        Self { max_lights: clamped }
    }

    pub fn max_lights(&self) -> usize {
        self.max_lights
    }

    /// Gather the scene's point lights into `block`
    ///
    /// Resets the block's light count, then appends each lit object's
    /// world-space position and color until the budget is reached. Returns
    /// the number of lights written.
    pub fn update(&self, graph: &SceneGraph, block: &mut FrameUpdateBlock) -> usize {
        block.reset_lights();

        let mut written = 0usize;
        let mut dropped = 0usize;

        for object in graph.iter() {
            let Some(light) = object.point_light else {
                continue;
            };
            if written >= self.max_lights {
                dropped += 1;
                continue;
            }
            // Column 3 of the composed matrix is the world-space position.
            let world = match graph.world_transform(object.id()) {
                Ok(matrix) => matrix,
                Err(err) => {
                    log::warn!("skipping light: {err}");
                    continue;
                }
            };
            let position = Vec3::new(world[(0, 3)], world[(1, 3)], world[(2, 3)]);
            match block.push_light(position, object.color, light.intensity) {
                Ok(()) => written += 1,
                Err(err) => {
                    log::warn!("skipping light for {}: {err}", object.id());
                    dropped += 1;
                }
            }
        }

        if dropped > 0 {
            log::warn!(
                "scene has {} point lights, budget is {}; dropped {dropped}",
                written + dropped,
                self.max_lights
            );
        }
        written
    }
}
