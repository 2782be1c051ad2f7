//! OpenGL backend - factory for every OpenGL RHI object

use std::sync::Arc;
use kerberos_rhi::kerberos::Result;
use kerberos_rhi::kerberos::render::{
    Backend, GraphicsApi, IndexBuffer, Pipeline, PipelineSpecification, RenderPass,
    RenderPassSpecification, RendererApi, RendererConfig, UniformBuffer, VertexArray, VertexBuffer,
};
use crate::gl::GlContext;
use crate::opengl_buffer::{OpenGLIndexBuffer, OpenGLUniformBuffer, OpenGLVertexBuffer};
use crate::opengl_pipeline::{OpenGLPipeline, PrimitiveState};
use crate::opengl_render_pass::OpenGLRenderPass;
use crate::opengl_renderer_api::OpenGLRendererApi;
use crate::opengl_vertex_array::OpenGLVertexArray;

pub struct OpenGLBackend {
    gl: Arc<dyn GlContext>,
    /// Shared by every pipeline and the renderer API of this backend
    primitive: Arc<PrimitiveState>,
    enable_debug_output: bool,
}

impl OpenGLBackend {
    pub fn new(gl: Arc<dyn GlContext>, config: &RendererConfig) -> Self {
        Self {
            gl,
            primitive: Arc::new(PrimitiveState::new()),
            enable_debug_output: config.enable_debug_output,
        }
    }
}

impl Backend for OpenGLBackend {
    fn api(&self) -> GraphicsApi {
        GraphicsApi::OpenGL
    }

    fn create_renderer_api(&self) -> Result<Box<dyn RendererApi>> {
        Ok(Box::new(OpenGLRendererApi::new(self.gl.clone(), self.primitive.clone(), self.enable_debug_output)))
    }

    fn create_vertex_buffer(&self, vertices: &[f32]) -> Result<Box<dyn VertexBuffer>> {
        Ok(Box::new(OpenGLVertexBuffer::new_static(self.gl.clone(), vertices)?))
    }

    fn create_dynamic_vertex_buffer(&self, size: u64) -> Result<Box<dyn VertexBuffer>> {
        Ok(Box::new(OpenGLVertexBuffer::new_dynamic(self.gl.clone(), size)?))
    }

    fn create_index_buffer(&self, indices: &[u32]) -> Result<Arc<dyn IndexBuffer>> {
        Ok(Arc::new(OpenGLIndexBuffer::new(self.gl.clone(), indices)?))
    }

    fn create_uniform_buffer(&self, size: u64, binding: u32) -> Result<Arc<dyn UniformBuffer>> {
        Ok(Arc::new(OpenGLUniformBuffer::new(self.gl.clone(), size, binding)?))
    }

    fn create_vertex_array(&self) -> Result<Box<dyn VertexArray>> {
        Ok(Box::new(OpenGLVertexArray::new(self.gl.clone())))
    }

    fn create_pipeline(&self, spec: PipelineSpecification) -> Result<Arc<dyn Pipeline>> {
        Ok(Arc::new(OpenGLPipeline::new(self.gl.clone(), self.primitive.clone(), spec)?))
    }

    fn create_render_pass(&self, spec: RenderPassSpecification) -> Result<Box<dyn RenderPass>> {
        Ok(Box::new(OpenGLRenderPass::new(self.gl.clone(), spec)))
    }
}
