//! Vertex array: the geometry unit consumed by draw calls

use std::sync::Arc;
use crate::error::Result;
use crate::renderer::{IndexBuffer, VertexBuffer};

/// Vertex buffers with their layouts plus an optional index buffer
pub trait VertexArray: Send + Sync {
    fn bind(&self);

    fn unbind(&self);

    /// Attach a vertex buffer and configure its attributes
    ///
    /// Attribute locations continue from the buffers added before.
    ///
    /// # Errors
    ///
    /// `InvalidResource` when the buffer has an empty layout.
    fn add_vertex_buffer(&mut self, vertex_buffer: Arc<dyn VertexBuffer>) -> Result<()>;

    fn set_index_buffer(&mut self, index_buffer: Arc<dyn IndexBuffer>);

    fn vertex_buffers(&self) -> &[Arc<dyn VertexBuffer>];

    fn index_buffer(&self) -> Option<&Arc<dyn IndexBuffer>>;

    fn set_debug_name(&self, name: &str);
}
