//! # Frame Resource Layer
//!
//! Per-frame GPU-facing state: the frame update block layout, light
//! aggregation from the scene graph, and the N-buffered pipeline of uniform
//! buffers and binding sets that lets the CPU prepare frame K+1 while the GPU
//! consumes frame K.
//!
//! All GPU work goes through the [`RenderDevice`] trait, so this layer has no
//! direct dependency on any graphics API.

pub mod device;
pub mod frame_data;
pub mod frame_pipeline;
pub mod lighting;

pub use device::{
    BindingSetHandle, BufferHandle, HeadlessDevice, MeshHandle, RenderDevice, TextureHandle,
};
pub use frame_data::{FrameUpdateBlock, PointLightData, MAX_POINT_LIGHTS};
pub use frame_pipeline::FrameResourcePipeline;
pub use lighting::LightAggregator;

use thiserror::Error;

/// Errors from frame resource creation and per-frame publication
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Render initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),

    #[error("Render backend error: {0}")]
    BackendError(String),

    #[error("Frame index {index} out of range for {frames_in_flight} frames in flight")]
    InvalidFrameIndex { index: usize, frames_in_flight: usize },

    #[error("Point light capacity of {capacity} exceeded")]
    LightCapacityExceeded { capacity: usize },
}

pub type RenderResult<T> = Result<T, RenderError>;
