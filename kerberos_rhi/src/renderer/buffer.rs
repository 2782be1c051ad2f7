//! GPU buffer traits: vertex, index and uniform buffers
//!
//! Each implementation owns exactly one native buffer and releases it on drop.

use crate::error::{Error, Result};
use crate::renderer::BufferLayout;

/// How a vertex buffer's content evolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexBufferUsage {
    /// Uploaded once at creation; `set_data` is rejected
    Static,
    /// Allocated empty and rewritten with `set_data`
    Dynamic,
}

/// Vertex buffer resource
///
/// The layout must be set before the buffer is added to a vertex array.
/// Handles are shared as `Arc<dyn VertexBuffer>` once they join a vertex
/// array, so content updates go through `&self`.
pub trait VertexBuffer: Send + Sync {
    fn bind(&self);

    fn unbind(&self);

    /// Overwrite the buffer content starting at offset 0
    ///
    /// # Errors
    ///
    /// `InvalidResource` when the buffer is static or `data` exceeds the capacity.
    fn set_data(&self, data: &[u8]) -> Result<()>;

    fn layout(&self) -> &BufferLayout;

    fn set_layout(&mut self, layout: BufferLayout);

    /// Vertices currently held (bytes written ÷ layout stride, 0 without a layout)
    fn count(&self) -> u32;

    fn usage(&self) -> VertexBufferUsage;

    /// Allocated size in bytes
    fn capacity(&self) -> u64;

    /// Backend object name (GL buffer name, ...); stable for the buffer lifetime
    fn native_handle(&self) -> u64;
}

/// Index buffer resource (32-bit unsigned indices)
pub trait IndexBuffer: Send + Sync {
    fn bind(&self);

    fn unbind(&self);

    /// Number of indices given at creation
    fn count(&self) -> u32;

    fn native_handle(&self) -> u64;
}

/// Uniform buffer bound to a fixed binding slot
pub trait UniformBuffer: Send + Sync {
    /// Write `data` at byte `offset`
    ///
    /// # Errors
    ///
    /// `InvalidResource` when `offset + data.len()` exceeds the buffer size.
    fn set_data(&self, data: &[u8], offset: u64) -> Result<()>;

    fn binding(&self) -> u32;

    fn size(&self) -> u64;

    /// Attach a label visible in graphics debuggers
    fn set_debug_name(&self, name: &str);

    fn native_handle(&self) -> u64;
}

/// Check a vertex buffer write of `len` bytes against `usage` and `capacity`
///
/// Shared by every backend so the rules stay identical across APIs.
pub fn check_vertex_write(usage: VertexBufferUsage, capacity: u64, len: u64) -> Result<()> {
    if usage == VertexBufferUsage::Static {
        return Err(Error::InvalidResource(
            "set_data called on a static vertex buffer".to_string()
        ));
    }
    if len > capacity {
        return Err(Error::InvalidResource(format!(
            "vertex data of {} bytes exceeds buffer capacity of {} bytes",
            len, capacity
        )));
    }
    Ok(())
}

/// Check a write of `len` bytes at `offset` into a buffer of `size` bytes
pub fn check_range(offset: u64, len: u64, size: u64) -> Result<()> {
    match offset.checked_add(len) {
        Some(end) if end <= size => Ok(()),
        _ => Err(Error::InvalidResource(format!(
            "write of {} bytes at offset {} exceeds buffer size of {} bytes",
            len, offset, size
        ))),
    }
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
