//! Renderer API: the per-backend command emitter
//!
//! One implementation per graphics API. The [`RenderCommand`](crate::renderer::RenderCommand)
//! facade owns the active instance and enforces the init-once lifecycle.

use glam::Vec4;
use crate::error::{Error, Result};
use crate::renderer::VertexArray;

/// Depth comparison function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepthFunc {
    Always,
    Never,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,
}

/// Command emission interface of one backend
///
/// Calls are forwarded in order and never block on the GPU.
pub trait RendererApi: Send + Sync {
    /// One-time setup of global state (debug output, default depth test)
    fn init(&mut self) -> Result<()>;

    fn set_viewport(&mut self, x: u32, y: u32, width: u32, height: u32) -> Result<()>;

    fn set_clear_color(&mut self, color: Vec4) -> Result<()>;

    /// Clear color and depth
    fn clear(&mut self) -> Result<()>;

    fn clear_depth(&mut self) -> Result<()>;

    fn set_depth_test(&mut self, enabled: bool) -> Result<()>;

    fn set_depth_func(&mut self, func: DepthFunc) -> Result<()>;

    /// Draw indexed triangles; `index_count == 0` draws the whole index buffer
    fn draw_indexed(&mut self, vertex_array: &dyn VertexArray, index_count: u32) -> Result<()>;

    /// Draw `vertex_count` non-indexed vertices as triangles
    fn draw_array(&mut self, vertex_array: &dyn VertexArray, vertex_count: u32) -> Result<()>;
}

/// Number of indices a `draw_indexed(vertex_array, index_count)` call consumes
///
/// # Errors
///
/// `InvalidResource` when the vertex array has no index buffer.
pub fn resolve_index_count(vertex_array: &dyn VertexArray, index_count: u32) -> Result<u32> {
    let index_buffer = vertex_array.index_buffer().ok_or_else(|| {
        Error::InvalidResource("draw_indexed on a vertex array without an index buffer".to_string())
    })?;
    Ok(if index_count == 0 { index_buffer.count() } else { index_count })
}
