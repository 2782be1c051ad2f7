//! OpenGL vertex, index and uniform buffers

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use kerberos_rhi::kerberos::Result;
use kerberos_rhi::kerberos::render::{
    BufferLayout, IndexBuffer, UniformBuffer, VertexBuffer, VertexBufferUsage,
    check_range, check_vertex_write,
};
use kerberos_rhi::{engine_error, engine_trace};
use crate::gl::{check_error, consts, GlContext};

/// GL vertex buffer (`GL_ARRAY_BUFFER`)
pub struct OpenGLVertexBuffer {
    gl: Arc<dyn GlContext>,
    renderer_id: u32,
    layout: BufferLayout,
    usage: VertexBufferUsage,
    capacity: u64,
    /// Bytes currently holding vertex data
    data_size: AtomicU64,
}

impl OpenGLVertexBuffer {
    const SOURCE: &'static str = "kerberos::OpenGLVertexBuffer";

    /// Static buffer uploaded once with `GL_STATIC_DRAW`
    pub fn new_static(gl: Arc<dyn GlContext>, vertices: &[f32]) -> Result<Self> {
        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        let renderer_id = gl.create_buffer();
        let buffer = Self {
            gl,
            renderer_id,
            layout: BufferLayout::default(),
            usage: VertexBufferUsage::Static,
            capacity: bytes.len() as u64,
            data_size: AtomicU64::new(bytes.len() as u64),
        };
        buffer.gl.bind_buffer(consts::ARRAY_BUFFER, renderer_id);
        buffer.gl.buffer_data(consts::ARRAY_BUFFER, bytes.len(), Some(bytes), consts::STATIC_DRAW);
        check_error(buffer.gl.as_ref(), Self::SOURCE, "glBufferData")?;
        engine_trace!(Self::SOURCE, "Static vertex buffer {} created ({} bytes)", renderer_id, bytes.len());
        Ok(buffer)
    }

    /// Dynamic buffer of `size` bytes allocated with `GL_DYNAMIC_DRAW`
    pub fn new_dynamic(gl: Arc<dyn GlContext>, size: u64) -> Result<Self> {
        let Ok(len) = usize::try_from(size) else {
            kerberos_rhi::engine_bail!(Self::SOURCE, @InvalidResource,
                "Dynamic vertex buffer of {} bytes exceeds the host address space", size);
        };
        let renderer_id = gl.create_buffer();
        let buffer = Self {
            gl,
            renderer_id,
            layout: BufferLayout::default(),
            usage: VertexBufferUsage::Dynamic,
            capacity: size,
            data_size: AtomicU64::new(0),
        };
        buffer.gl.bind_buffer(consts::ARRAY_BUFFER, renderer_id);
        buffer.gl.buffer_data(consts::ARRAY_BUFFER, len, None, consts::DYNAMIC_DRAW);
        check_error(buffer.gl.as_ref(), Self::SOURCE, "glBufferData")?;
        engine_trace!(Self::SOURCE, "Dynamic vertex buffer {} created ({} bytes)", renderer_id, size);
        Ok(buffer)
    }

    pub fn renderer_id(&self) -> u32 {
        self.renderer_id
    }
}

impl VertexBuffer for OpenGLVertexBuffer {
    fn bind(&self) {
        self.gl.bind_buffer(consts::ARRAY_BUFFER, self.renderer_id);
    }

    fn unbind(&self) {
        self.gl.bind_buffer(consts::ARRAY_BUFFER, 0);
    }

    fn set_data(&self, data: &[u8]) -> Result<()> {
        if let Err(error) = check_vertex_write(self.usage, self.capacity, data.len() as u64) {
            engine_error!(Self::SOURCE, "Vertex buffer {}: {}", self.renderer_id, error);
            return Err(error);
        }
        self.bind();
        self.gl.buffer_sub_data(consts::ARRAY_BUFFER, 0, data);
        check_error(self.gl.as_ref(), Self::SOURCE, "glBufferSubData")?;
        self.data_size.store(data.len() as u64, Ordering::Relaxed);
        Ok(())
    }

    fn layout(&self) -> &BufferLayout {
        &self.layout
    }

    fn set_layout(&mut self, layout: BufferLayout) {
        self.layout = layout;
    }

    fn count(&self) -> u32 {
        match self.layout.stride() {
            0 => 0,
            stride => (self.data_size.load(Ordering::Relaxed) / u64::from(stride)) as u32,
        }
    }

    fn usage(&self) -> VertexBufferUsage {
        self.usage
    }

    fn capacity(&self) -> u64 {
        self.capacity
    }

    fn native_handle(&self) -> u64 {
        u64::from(self.renderer_id)
    }
}

impl Drop for OpenGLVertexBuffer {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.renderer_id);
    }
}

/// GL index buffer (`GL_ELEMENT_ARRAY_BUFFER`, 32-bit indices)
pub struct OpenGLIndexBuffer {
    gl: Arc<dyn GlContext>,
    renderer_id: u32,
    count: u32,
}

impl OpenGLIndexBuffer {
    const SOURCE: &'static str = "kerberos::OpenGLIndexBuffer";

    pub fn new(gl: Arc<dyn GlContext>, indices: &[u32]) -> Result<Self> {
        let Ok(count) = u32::try_from(indices.len()) else {
            kerberos_rhi::engine_bail!(Self::SOURCE, @InvalidResource,
                "{} indices exceed the 32-bit index count", indices.len());
        };
        let bytes: &[u8] = bytemuck::cast_slice(indices);
        let renderer_id = gl.create_buffer();
        let buffer = Self { gl, renderer_id, count };
        buffer.gl.bind_buffer(consts::ELEMENT_ARRAY_BUFFER, renderer_id);
        buffer.gl.buffer_data(consts::ELEMENT_ARRAY_BUFFER, bytes.len(), Some(bytes), consts::STATIC_DRAW);
        check_error(buffer.gl.as_ref(), Self::SOURCE, "glBufferData")?;
        Ok(buffer)
    }

    pub fn renderer_id(&self) -> u32 {
        self.renderer_id
    }
}

impl IndexBuffer for OpenGLIndexBuffer {
    fn bind(&self) {
        self.gl.bind_buffer(consts::ELEMENT_ARRAY_BUFFER, self.renderer_id);
    }

    fn unbind(&self) {
        self.gl.bind_buffer(consts::ELEMENT_ARRAY_BUFFER, 0);
    }

    fn count(&self) -> u32 {
        self.count
    }

    fn native_handle(&self) -> u64 {
        u64::from(self.renderer_id)
    }
}

impl Drop for OpenGLIndexBuffer {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.renderer_id);
    }
}

/// GL uniform buffer bound to a `layout(binding = N)` slot
pub struct OpenGLUniformBuffer {
    gl: Arc<dyn GlContext>,
    renderer_id: u32,
    size: u64,
    binding: u32,
}

impl OpenGLUniformBuffer {
    const SOURCE: &'static str = "kerberos::OpenGLUniformBuffer";

    pub fn new(gl: Arc<dyn GlContext>, size: u64, binding: u32) -> Result<Self> {
        let Ok(len) = usize::try_from(size) else {
            kerberos_rhi::engine_bail!(Self::SOURCE, @InvalidResource,
                "Uniform buffer of {} bytes exceeds the host address space", size);
        };
        let renderer_id = gl.create_buffer();
        let buffer = Self { gl, renderer_id, size, binding };
        buffer.gl.bind_buffer(consts::UNIFORM_BUFFER, renderer_id);
        buffer.gl.buffer_data(consts::UNIFORM_BUFFER, len, None, consts::DYNAMIC_DRAW);
        buffer.gl.bind_buffer_base(consts::UNIFORM_BUFFER, binding, renderer_id);
        check_error(buffer.gl.as_ref(), Self::SOURCE, "glBufferData")?;
        Ok(buffer)
    }
}

impl UniformBuffer for OpenGLUniformBuffer {
    fn set_data(&self, data: &[u8], offset: u64) -> Result<()> {
        if let Err(error) = check_range(offset, data.len() as u64, self.size) {
            engine_error!(Self::SOURCE, "Uniform buffer {} (binding {}): {}", self.renderer_id, self.binding, error);
            return Err(error);
        }
        self.gl.bind_buffer(consts::UNIFORM_BUFFER, self.renderer_id);
        // In range of `size`, which fits in usize
        self.gl.buffer_sub_data(consts::UNIFORM_BUFFER, offset as usize, data);
        check_error(self.gl.as_ref(), Self::SOURCE, "glBufferSubData")
    }

    fn binding(&self) -> u32 {
        self.binding
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn set_debug_name(&self, name: &str) {
        self.gl.object_label(consts::BUFFER, self.renderer_id, name);
    }

    fn native_handle(&self) -> u64 {
        u64::from(self.renderer_id)
    }
}

impl Drop for OpenGLUniformBuffer {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.renderer_id);
    }
}

#[cfg(test)]
#[path = "opengl_buffer_tests.rs"]
mod tests;
