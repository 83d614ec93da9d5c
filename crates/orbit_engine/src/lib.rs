//! # Orbit Engine
//!
//! Scene and frame-resource layer for a real-time 3D renderer.
//!
//! ## Features
//!
//! - **Scene Graph**: Parent/child hierarchy with composed world transforms
//! - **Keyframe Animation**: Per-object sequences with triggered playback
//! - **Light Aggregation**: Scene point lights packed into a uniform block
//! - **N-Buffered Frames**: Per-frame uniform buffers and binding sets
//! - **Backend Agnostic**: GPU access through the narrow [`RenderDevice`] trait
//!
//! ## Quick Start
//!
//! ```rust
//! use orbit_engine::prelude::*;
//!
//! fn main() -> Result<(), RenderError> {
//!     let mut device = HeadlessDevice::new();
//!     let pipeline = FrameResourcePipeline::new(&mut device, 2, &[])?;
//!
//!     let mut graph = SceneGraph::new();
//!     graph.make_point_light(1.0, 0.1, Vec3::new(1.0, 1.0, 1.0));
//!
//!     let mut block = FrameUpdateBlock::new();
//!     LightAggregator::new(MAX_POINT_LIGHTS).update(&graph, &mut block);
//!     pipeline.publish(&mut device, 0, &block)?;
//!     Ok(())
//! }
//! ```
//!
//! [`RenderDevice`]: render::RenderDevice

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod core;
pub mod foundation;
pub mod input;
pub mod render;
pub mod scene;

/// Common imports for applications built on the engine
pub mod prelude {
    pub use crate::core::config::{Config, EngineConfig, RendererConfig};
    pub use crate::foundation::math::{Mat4, Mat4Ext, Vec3, Vec4};
    pub use crate::foundation::time::Timer;
    pub use crate::input::{InputManager, KeyCode};
    pub use crate::render::{
        FrameResourcePipeline, FrameUpdateBlock, HeadlessDevice, LightAggregator, MeshHandle,
        RenderDevice, RenderError, TextureHandle, MAX_POINT_LIGHTS,
    };
    pub use crate::scene::{
        AnimationKeyFrame, AnimationPlayback, AnimationSequence, AnimationStatus, Camera,
        PlaybackState, SceneError, SceneGraph, SceneObject, SceneObjectId, Transform,
    };
}
