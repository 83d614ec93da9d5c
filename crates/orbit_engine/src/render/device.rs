//! # Render Device Abstraction
//!
//! Narrow trait covering exactly the GPU operations the frame resource layer
//! needs: uniform buffer allocation, byte uploads, flushes, and binding set
//! creation. Backends implement [`RenderDevice`]; everything above it works
//! in terms of opaque handles and never touches API types.

use std::collections::HashMap;

use crate::render::{RenderError, RenderResult};

/// Opaque GPU buffer identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u64);

/// Opaque binding set identifier (descriptor set or equivalent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingSetHandle(pub u64);

/// Opaque texture identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Opaque mesh identifier attached to renderable scene objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// GPU operations required by the frame resource layer
///
/// Implementations must keep writes to a buffer invisible to the GPU until
/// [`flush_buffer`] is called for it, which is what allows one buffer per
/// frame in flight to be rewritten while another is being consumed.
///
/// [`flush_buffer`]: RenderDevice::flush_buffer
pub trait RenderDevice {
    /// Allocate a host-visible uniform buffer of `size` bytes
    fn create_uniform_buffer(&mut self, size: usize) -> RenderResult<BufferHandle>;

    /// Write `data` into `buffer` starting at offset zero
    fn write_buffer(&mut self, buffer: BufferHandle, data: &[u8]) -> RenderResult<()>;

    /// Make prior writes to `buffer` visible to the GPU
    fn flush_buffer(&mut self, buffer: BufferHandle) -> RenderResult<()>;

    /// Build a binding set referencing `buffer` and the given textures
    fn create_binding_set(
        &mut self,
        buffer: BufferHandle,
        textures: &[TextureHandle],
    ) -> RenderResult<BindingSetHandle>;
}

#[derive(Debug)]
struct HeadlessBuffer {
    capacity: usize,
    contents: Vec<u8>,
    flush_count: usize,
}

/// In-memory [`RenderDevice`] backend
///
/// Stores every upload in host memory and counts flushes, which makes the
/// full frame pipeline runnable and inspectable without a GPU. Used by the
/// test suite and by demo binaries on machines without a graphics stack.
#[derive(Debug, Default)]
pub struct HeadlessDevice {
    next_handle: u64,
    buffers: HashMap<BufferHandle, HeadlessBuffer>,
    binding_sets: HashMap<BindingSetHandle, (BufferHandle, Vec<TextureHandle>)>,
    textures: Vec<TextureHandle>,
}

impl HeadlessDevice {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }

    /// Register a dummy texture, for exercising binding set creation
    pub fn create_texture(&mut self) -> TextureHandle {
        let handle = TextureHandle(self.allocate_handle());
        self.textures.push(handle);
        handle
    }

    /// Register a dummy mesh handle
    pub fn create_mesh(&mut self) -> MeshHandle {
        MeshHandle(self.allocate_handle())
    }

    /// Last bytes written to `buffer`, if the handle is live
    pub fn buffer_contents(&self, buffer: BufferHandle) -> Option<&[u8]> {
        self.buffers.get(&buffer).map(|b| b.contents.as_slice())
    }

    /// Number of flushes issued against `buffer`
    pub fn flush_count(&self, buffer: BufferHandle) -> usize {
        self.buffers.get(&buffer).map_or(0, |b| b.flush_count)
    }

    /// Buffer referenced by a binding set
    pub fn binding_set_buffer(&self, set: BindingSetHandle) -> Option<BufferHandle> {
        self.binding_sets.get(&set).map(|(buffer, _)| *buffer)
    }

    /// Textures referenced by a binding set, in bind order
    pub fn binding_set_textures(&self, set: BindingSetHandle) -> Option<&[TextureHandle]> {
        self.binding_sets
            .get(&set)
            .map(|(_, textures)| textures.as_slice())
    }
}

impl RenderDevice for HeadlessDevice {
    fn create_uniform_buffer(&mut self, size: usize) -> RenderResult<BufferHandle> {
        if size == 0 {
            return Err(RenderError::ResourceCreationFailed(
                "uniform buffer size must be non-zero".to_string(),
            ));
        }
        let handle = BufferHandle(self.allocate_handle());
        self.buffers.insert(
            handle,
            HeadlessBuffer {
                capacity: size,
                contents: vec![0; size],
                flush_count: 0,
            },
        );
        log::trace!("created headless uniform buffer {handle:?} ({size} bytes)");
        Ok(handle)
    }

    fn write_buffer(&mut self, buffer: BufferHandle, data: &[u8]) -> RenderResult<()> {
        let slot = self.buffers.get_mut(&buffer).ok_or_else(|| {
            RenderError::BackendError(format!("write to unknown buffer {buffer:?}"))
        })?;
        if data.len() > slot.capacity {
            return Err(RenderError::BackendError(format!(
                "write of {} bytes exceeds buffer capacity {}",
                data.len(),
                slot.capacity
            )));
        }
        slot.contents[..data.len()].copy_from_slice(data);
        Ok(())
    }

    fn flush_buffer(&mut self, buffer: BufferHandle) -> RenderResult<()> {
        let slot = self.buffers.get_mut(&buffer).ok_or_else(|| {
            RenderError::BackendError(format!("flush of unknown buffer {buffer:?}"))
        })?;
        slot.flush_count += 1;
        Ok(())
    }

    fn create_binding_set(
        &mut self,
        buffer: BufferHandle,
        textures: &[TextureHandle],
    ) -> RenderResult<BindingSetHandle> {
        if !self.buffers.contains_key(&buffer) {
            return Err(RenderError::ResourceCreationFailed(format!(
                "binding set references unknown buffer {buffer:?}"
            )));
        }
        for texture in textures {
            if !self.textures.contains(texture) {
                return Err(RenderError::ResourceCreationFailed(format!(
                    "binding set references unknown texture {texture:?}"
                )));
            }
        }
        let handle = BindingSetHandle(self.allocate_handle());
        self.binding_sets.insert(handle, (buffer, textures.to_vec()));
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_round_trip() {
        let mut device = HeadlessDevice::new();
        let buffer = device.create_uniform_buffer(16).unwrap();
        device.write_buffer(buffer, &[7u8; 8]).unwrap();
        device.flush_buffer(buffer).unwrap();

        let contents = device.buffer_contents(buffer).unwrap();
        assert_eq!(&contents[..8], &[7u8; 8]);
        assert_eq!(&contents[8..], &[0u8; 8]);
        assert_eq!(device.flush_count(buffer), 1);
    }

    #[test]
    fn zero_size_buffer_is_rejected() {
        let mut device = HeadlessDevice::new();
        assert!(device.create_uniform_buffer(0).is_err());
    }

    #[test]
    fn oversized_write_is_rejected() {
        let mut device = HeadlessDevice::new();
        let buffer = device.create_uniform_buffer(4).unwrap();
        assert!(device.write_buffer(buffer, &[0u8; 5]).is_err());
    }

    #[test]
    fn binding_set_requires_live_buffer() {
        let mut device = HeadlessDevice::new();
        assert!(device.create_binding_set(BufferHandle(99), &[]).is_err());

        let buffer = device.create_uniform_buffer(4).unwrap();
        let texture = device.create_texture();
        let set = device.create_binding_set(buffer, &[texture]).unwrap();
        assert_eq!(device.binding_set_buffer(set), Some(buffer));
        assert_eq!(device.binding_set_textures(set), Some(&[texture][..]));
    }

    #[test]
    fn binding_set_rejects_unknown_texture() {
        let mut device = HeadlessDevice::new();
        let buffer = device.create_uniform_buffer(4).unwrap();
        assert!(device
            .create_binding_set(buffer, &[TextureHandle(99)])
            .is_err());
    }

    #[test]
    fn handles_are_unique() {
        let mut device = HeadlessDevice::new();
        let a = device.create_uniform_buffer(4).unwrap();
        let b = device.create_uniform_buffer(4).unwrap();
        assert_ne!(a, b);
    }
}
