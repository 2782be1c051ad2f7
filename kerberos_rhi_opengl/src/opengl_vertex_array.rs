//! OpenGL vertex array object

use std::sync::Arc;
use kerberos_rhi::kerberos::Result;
use kerberos_rhi::kerberos::render::{IndexBuffer, VertexArray, VertexBuffer};
use kerberos_rhi::engine_trace;
use crate::conversions::shader_data_type_to_gl;
use crate::gl::{consts, to_gl_int, GlContext};

const SOURCE: &str = "kerberos::OpenGLVertexArray";

/// GL vertex array: attribute setup of its vertex buffers plus the element buffer
pub struct OpenGLVertexArray {
    gl: Arc<dyn GlContext>,
    renderer_id: u32,
    vertex_buffers: Vec<Arc<dyn VertexBuffer>>,
    index_buffer: Option<Arc<dyn IndexBuffer>>,
    /// Next free attribute location
    next_attribute: u32,
}

impl OpenGLVertexArray {
    pub fn new(gl: Arc<dyn GlContext>) -> Self {
        let renderer_id = gl.create_vertex_array();
        Self {
            gl,
            renderer_id,
            vertex_buffers: Vec::new(),
            index_buffer: None,
            next_attribute: 0,
        }
    }

    pub fn renderer_id(&self) -> u32 {
        self.renderer_id
    }

    pub fn attribute_count(&self) -> u32 {
        self.next_attribute
    }
}

impl VertexArray for OpenGLVertexArray {
    fn bind(&self) {
        self.gl.bind_vertex_array(self.renderer_id);
    }

    fn unbind(&self) {
        self.gl.bind_vertex_array(0);
    }

    fn add_vertex_buffer(&mut self, vertex_buffer: Arc<dyn VertexBuffer>) -> Result<()> {
        let layout = vertex_buffer.layout();
        if layout.is_empty() {
            kerberos_rhi::engine_bail!(SOURCE, @InvalidResource,
                "Vertex buffer {} has no layout; call set_layout() before adding it to a vertex array",
                vertex_buffer.native_handle());
        }
        let stride = to_gl_int(layout.stride(), SOURCE, "Vertex stride")?;

        self.bind();
        vertex_buffer.bind();

        for element in layout {
            let data_type = element.data_type;
            let components = data_type.component_count() as i32;
            let gl_type = shader_data_type_to_gl(data_type);
            // Matrices take one location per column
            let column_size = (data_type.size() / data_type.location_count().max(1)) as usize;

            for column in 0..data_type.location_count() {
                let location = self.next_attribute;
                let offset = element.offset as usize + column_size * column as usize;
                self.gl.enable_vertex_attrib_array(location);
                if data_type.is_integer() {
                    self.gl.vertex_attrib_i_pointer(location, components, gl_type, stride, offset);
                } else {
                    self.gl.vertex_attrib_pointer(location, components, gl_type, element.normalized, stride, offset);
                }
                self.next_attribute += 1;
            }
        }

        engine_trace!(SOURCE, "Vertex array {}: buffer {} added ({} attributes total)",
            self.renderer_id, vertex_buffer.native_handle(), self.next_attribute);
        self.vertex_buffers.push(vertex_buffer);
        Ok(())
    }

    fn set_index_buffer(&mut self, index_buffer: Arc<dyn IndexBuffer>) {
        self.bind();
        index_buffer.bind();
        self.index_buffer = Some(index_buffer);
    }

    fn vertex_buffers(&self) -> &[Arc<dyn VertexBuffer>] {
        &self.vertex_buffers
    }

    fn index_buffer(&self) -> Option<&Arc<dyn IndexBuffer>> {
        self.index_buffer.as_ref()
    }

    fn set_debug_name(&self, name: &str) {
        self.gl.object_label(consts::VERTEX_ARRAY, self.renderer_id, name);
    }
}

impl Drop for OpenGLVertexArray {
    fn drop(&mut self) {
        self.gl.delete_vertex_array(self.renderer_id);
    }
}

#[cfg(test)]
#[path = "opengl_vertex_array_tests.rs"]
mod tests;
