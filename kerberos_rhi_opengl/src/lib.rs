/*!
# Kerberos RHI - OpenGL Backend

OpenGL implementation of the `kerberos_rhi` traits.

The window layer creates the GL context and exposes its entry points as a
[`GlContext`]; [`register`] adds the OpenGL backend to a
[`BackendRegistry`](kerberos_rhi::kerberos::render::BackendRegistry).
[`RecordingGlContext`] runs the backend headless and records the native
command stream.
*/

use std::sync::Arc;
use kerberos_rhi::kerberos::Result;
use kerberos_rhi::kerberos::render::{Backend, BackendRegistry, GraphicsApi};

pub mod gl;
mod conversions;
mod opengl_debug;
mod opengl_backend;
mod opengl_buffer;
mod opengl_vertex_array;
mod opengl_renderer_api;
mod opengl_pipeline;
mod opengl_render_pass;
mod recording_context;

pub use gl::{GlContext, GlDebugCallback, ClearMask};
pub use opengl_backend::OpenGLBackend;
pub use opengl_buffer::{OpenGLVertexBuffer, OpenGLIndexBuffer, OpenGLUniformBuffer};
pub use opengl_vertex_array::OpenGLVertexArray;
pub use opengl_renderer_api::OpenGLRendererApi;
pub use opengl_pipeline::{OpenGLPipeline, PrimitiveState};
pub use opengl_render_pass::OpenGLRenderPass;
pub use recording_context::{GlCall, RecordingGlContext};

// Debug output statistics
pub use opengl_debug::{
    DebugMessageStats, debug_message_stats, opengl_message_callback,
    print_debug_message_report, reset_debug_message_stats, tracked_message_count,
};

/// Register the OpenGL backend for `GraphicsApi::OpenGL`
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use kerberos_rhi::kerberos::render::{BackendRegistry, GraphicsApi, RenderContext, RendererConfig};
/// use kerberos_rhi_opengl::RecordingGlContext;
///
/// let mut registry = BackendRegistry::new();
/// kerberos_rhi_opengl::register(&mut registry, Arc::new(RecordingGlContext::new()))?;
/// let context = RenderContext::new(RendererConfig::for_api(GraphicsApi::OpenGL), &registry)?;
/// # Ok::<(), kerberos_rhi::kerberos::Error>(())
/// ```
pub fn register(registry: &mut BackendRegistry, gl: Arc<dyn GlContext>) -> Result<()> {
    registry.register(GraphicsApi::OpenGL, move |config| {
        Ok(Arc::new(OpenGLBackend::new(gl.clone(), config)) as Arc<dyn Backend>)
    })
}
