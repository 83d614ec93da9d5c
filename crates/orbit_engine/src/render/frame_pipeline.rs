//! # N-Buffered Frame Resources
//!
//! One uniform buffer and one binding set per frame in flight. Frame K+1
//! writes its slot while the GPU still reads frame K's, so no slot is ever
//! rewritten while in use as long as callers stick to their frame index.

use std::mem;

use crate::render::device::{BindingSetHandle, BufferHandle, RenderDevice, TextureHandle};
use crate::render::frame_data::FrameUpdateBlock;
use crate::render::{RenderError, RenderResult};

#[derive(Debug, Clone, Copy)]
struct FrameSlot {
    buffer: BufferHandle,
    binding_set: BindingSetHandle,
}

/// Per-frame uniform buffers and binding sets
///
/// Built once at startup with a fixed frame count; slots are never
/// reallocated afterwards, so the handles handed out remain valid for the
/// pipeline's lifetime.
#[derive(Debug)]
pub struct FrameResourcePipeline {
    slots: Vec<FrameSlot>,
}

impl FrameResourcePipeline {
    /// Allocate `frames_in_flight` uniform buffers and binding sets
    ///
    /// Every binding set references its own buffer plus the shared
    /// `textures`, matching the layout shaders bind once per frame.
    pub fn new(
        device: &mut dyn RenderDevice,
        frames_in_flight: usize,
        textures: &[TextureHandle],
    ) -> RenderResult<Self> {
        if frames_in_flight == 0 {
            return Err(RenderError::InitializationFailed(
                "frames_in_flight must be at least 1".to_string(),
            ));
        }

        let block_size = mem::size_of::<FrameUpdateBlock>();
        let mut slots = Vec::with_capacity(frames_in_flight);
        for _ in 0..frames_in_flight {
            let buffer = device.create_uniform_buffer(block_size)?;
            let binding_set = device.create_binding_set(buffer, textures)?;
            slots.push(FrameSlot { buffer, binding_set });
        }
        log::info!(
            "frame resource pipeline ready: {frames_in_flight} slots of {block_size} bytes"
        );
        Ok(Self { slots })
    }

    pub fn frames_in_flight(&self) -> usize {
        self.slots.len()
    }

    fn slot(&self, frame_index: usize) -> RenderResult<&FrameSlot> {
        self.slots
            .get(frame_index)
            .ok_or(RenderError::InvalidFrameIndex {
                index: frame_index,
                frames_in_flight: self.slots.len(),
            })
    }

    /// Binding set for a frame slot without publishing new data
    pub fn binding_set(&self, frame_index: usize) -> RenderResult<BindingSetHandle> {
        Ok(self.slot(frame_index)?.binding_set)
    }

    /// Upload `block` into the slot for `frame_index` and flush it
    ///
    /// Returns the slot's binding set, ready to be bound for this frame's
    /// draw calls. Only the addressed slot is touched.
    pub fn publish(
        &self,
        device: &mut dyn RenderDevice,
        frame_index: usize,
        block: &FrameUpdateBlock,
    ) -> RenderResult<BindingSetHandle> {
        let slot = self.slot(frame_index)?;
        device.write_buffer(slot.buffer, block.as_bytes())?;
        device.flush_buffer(slot.buffer)?;
        Ok(slot.binding_set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::device::HeadlessDevice;

    #[test]
    fn zero_frames_is_rejected() {
        let mut device = HeadlessDevice::new();
        assert!(matches!(
            FrameResourcePipeline::new(&mut device, 0, &[]),
            Err(RenderError::InitializationFailed(_))
        ));
    }

    #[test]
    fn each_slot_gets_its_own_buffer_and_binding_set() {
        let mut device = HeadlessDevice::new();
        let pipeline = FrameResourcePipeline::new(&mut device, 3, &[]).unwrap();
        assert_eq!(pipeline.frames_in_flight(), 3);

        let sets: Vec<_> = (0..3).map(|i| pipeline.binding_set(i).unwrap()).collect();
        assert_ne!(sets[0], sets[1]);
        assert_ne!(sets[1], sets[2]);

        let buffers: Vec<_> = sets
            .iter()
            .map(|set| device.binding_set_buffer(*set).unwrap())
            .collect();
        assert_ne!(buffers[0], buffers[1]);
        assert_ne!(buffers[1], buffers[2]);
    }

    #[test]
    fn publish_writes_only_the_addressed_slot() {
        let mut device = HeadlessDevice::new();
        let pipeline = FrameResourcePipeline::new(&mut device, 2, &[]).unwrap();

        let mut block = FrameUpdateBlock::new();
        block.num_lights = 4;
        let set = pipeline.publish(&mut device, 1, &block).unwrap();
        assert_eq!(set, pipeline.binding_set(1).unwrap());

        let written = device.binding_set_buffer(set).unwrap();
        assert_eq!(device.buffer_contents(written).unwrap(), block.as_bytes());
        assert_eq!(device.flush_count(written), 1);

        let untouched = device
            .binding_set_buffer(pipeline.binding_set(0).unwrap())
            .unwrap();
        assert_eq!(device.flush_count(untouched), 0);
    }

    #[test]
    fn binding_sets_carry_the_fixed_texture_list() {
        let mut device = HeadlessDevice::new();
        let textures: Vec<_> = (0..4).map(|_| device.create_texture()).collect();
        let pipeline = FrameResourcePipeline::new(&mut device, 2, &textures).unwrap();

        // Every slot binds the same fixed texture set, established once at
        // startup.
        for frame_index in 0..2 {
            let set = pipeline.binding_set(frame_index).unwrap();
            assert_eq!(
                device.binding_set_textures(set).unwrap(),
                textures.as_slice()
            );
        }

        // Publishing rewrites the slot's buffer, never the texture list.
        let block = FrameUpdateBlock::new();
        let set = pipeline.publish(&mut device, 0, &block).unwrap();
        assert_eq!(
            device.binding_set_textures(set).unwrap(),
            textures.as_slice()
        );
    }

    #[test]
    fn out_of_range_frame_index_is_rejected() {
        let mut device = HeadlessDevice::new();
        let pipeline = FrameResourcePipeline::new(&mut device, 2, &[]).unwrap();
        let block = FrameUpdateBlock::new();
        assert!(matches!(
            pipeline.publish(&mut device, 2, &block),
            Err(RenderError::InvalidFrameIndex {
                index: 2,
                frames_in_flight: 2
            })
        ));
    }
}
