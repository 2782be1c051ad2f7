//! OpenGL renderer API - immediate-mode command emission

use std::sync::Arc;
use glam::Vec4;
use kerberos_rhi::kerberos::Result;
use kerberos_rhi::kerberos::render::{DepthFunc, RendererApi, VertexArray, resolve_index_count};
use kerberos_rhi::{engine_debug, engine_error, engine_info};
use crate::conversions::depth_func_to_gl;
use crate::gl::{consts, to_gl_int, ClearMask, GlContext};
use crate::opengl_debug::opengl_message_callback;
use crate::opengl_pipeline::PrimitiveState;

const SOURCE: &str = "kerberos::OpenGLRendererAPI";

pub struct OpenGLRendererApi {
    gl: Arc<dyn GlContext>,
    /// Topology of the bound pipeline, shared with the backend's pipelines
    primitive: Arc<PrimitiveState>,
    enable_debug_output: bool,
}

impl OpenGLRendererApi {
    pub fn new(gl: Arc<dyn GlContext>, primitive: Arc<PrimitiveState>, enable_debug_output: bool) -> Self {
        Self {
            gl,
            primitive,
            enable_debug_output: enable_debug_output || cfg!(feature = "force-debug-output"),
        }
    }

    fn install_debug_output(&self) {
        self.gl.enable(consts::DEBUG_OUTPUT);
        self.gl.enable(consts::DEBUG_OUTPUT_SYNCHRONOUS);
        self.gl.debug_message_callback(opengl_message_callback);
        self.gl.debug_message_control(
            consts::DONT_CARE,
            consts::DONT_CARE,
            consts::DEBUG_SEVERITY_NOTIFICATION,
            false,
        );
        engine_debug!(SOURCE, "GL debug output enabled");
    }
}

impl RendererApi for OpenGLRendererApi {
    fn init(&mut self) -> Result<()> {
        if self.enable_debug_output {
            self.install_debug_output();
        }
        self.gl.enable(consts::DEPTH_TEST);
        self.gl.depth_func(consts::LESS);
        engine_info!(SOURCE, "OpenGL renderer API initialized");
        Ok(())
    }

    fn set_viewport(&mut self, x: u32, y: u32, width: u32, height: u32) -> Result<()> {
        self.gl.viewport(
            to_gl_int(x, SOURCE, "Viewport x")?,
            to_gl_int(y, SOURCE, "Viewport y")?,
            to_gl_int(width, SOURCE, "Viewport width")?,
            to_gl_int(height, SOURCE, "Viewport height")?,
        );
        Ok(())
    }

    fn set_clear_color(&mut self, color: Vec4) -> Result<()> {
        self.gl.clear_color(color.x, color.y, color.z, color.w);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.gl.clear((ClearMask::COLOR | ClearMask::DEPTH).bits());
        Ok(())
    }

    fn clear_depth(&mut self) -> Result<()> {
        self.gl.clear(ClearMask::DEPTH.bits());
        Ok(())
    }

    fn set_depth_test(&mut self, enabled: bool) -> Result<()> {
        if enabled {
            self.gl.enable(consts::DEPTH_TEST);
        } else {
            self.gl.disable(consts::DEPTH_TEST);
        }
        Ok(())
    }

    fn set_depth_func(&mut self, func: DepthFunc) -> Result<()> {
        self.gl.depth_func(depth_func_to_gl(func));
        Ok(())
    }

    fn draw_indexed(&mut self, vertex_array: &dyn VertexArray, index_count: u32) -> Result<()> {
        let count = match resolve_index_count(vertex_array, index_count) {
            Ok(count) => count,
            Err(error) => {
                engine_error!(SOURCE, "draw_indexed rejected: {}", error);
                return Err(error);
            }
        };
        let count = to_gl_int(count, SOURCE, "Index count")?;
        vertex_array.bind();
        self.gl.draw_elements(self.primitive.mode(), count, consts::UNSIGNED_INT, 0);
        Ok(())
    }

    fn draw_array(&mut self, vertex_array: &dyn VertexArray, vertex_count: u32) -> Result<()> {
        let count = to_gl_int(vertex_count, SOURCE, "Vertex count")?;
        vertex_array.bind();
        self.gl.draw_arrays(self.primitive.mode(), 0, count);
        Ok(())
    }
}

#[cfg(test)]
#[path = "opengl_renderer_api_tests.rs"]
mod tests;
