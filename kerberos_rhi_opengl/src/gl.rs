//! OpenGL entry points consumed by the backend
//!
//! The window layer owns the GL context and loads the function pointers; the
//! backend only sees the [`GlContext`] trait. Enum parameters are raw
//! `GLenum` values from the [`consts`] table.

use bitflags::bitflags;
use kerberos_rhi::kerberos::Result;

/// `GLenum` values used by the backend
pub mod consts {
    // Errors
    pub const NO_ERROR: u32 = 0;
    pub const INVALID_ENUM: u32 = 0x0500;
    pub const INVALID_VALUE: u32 = 0x0501;
    pub const INVALID_OPERATION: u32 = 0x0502;
    pub const STACK_OVERFLOW: u32 = 0x0503;
    pub const STACK_UNDERFLOW: u32 = 0x0504;
    pub const OUT_OF_MEMORY: u32 = 0x0505;
    pub const INVALID_FRAMEBUFFER_OPERATION: u32 = 0x0506;
    pub const CONTEXT_LOST: u32 = 0x0507;

    // Buffer targets and usage
    pub const ARRAY_BUFFER: u32 = 0x8892;
    pub const ELEMENT_ARRAY_BUFFER: u32 = 0x8893;
    pub const UNIFORM_BUFFER: u32 = 0x8A11;
    pub const STATIC_DRAW: u32 = 0x88E4;
    pub const DYNAMIC_DRAW: u32 = 0x88E8;

    // Object label identifiers
    pub const BUFFER: u32 = 0x82E0;
    pub const VERTEX_ARRAY: u32 = 0x8074;

    // Data types
    pub const BYTE: u32 = 0x1400;
    pub const UNSIGNED_BYTE: u32 = 0x1401;
    pub const INT: u32 = 0x1404;
    pub const UNSIGNED_INT: u32 = 0x1405;
    pub const FLOAT: u32 = 0x1406;

    // Primitive modes
    pub const LINES: u32 = 0x0001;
    pub const LINE_STRIP: u32 = 0x0003;
    pub const TRIANGLES: u32 = 0x0004;

    // Clear mask bits
    pub const DEPTH_BUFFER_BIT: u32 = 0x0000_0100;
    pub const STENCIL_BUFFER_BIT: u32 = 0x0000_0400;
    pub const COLOR_BUFFER_BIT: u32 = 0x0000_4000;

    // Capabilities
    pub const CULL_FACE: u32 = 0x0B44;
    pub const DEPTH_TEST: u32 = 0x0B71;
    pub const DEBUG_OUTPUT: u32 = 0x92E0;
    pub const DEBUG_OUTPUT_SYNCHRONOUS: u32 = 0x8242;

    // Compare functions
    pub const NEVER: u32 = 0x0200;
    pub const LESS: u32 = 0x0201;
    pub const EQUAL: u32 = 0x0202;
    pub const LEQUAL: u32 = 0x0203;
    pub const GREATER: u32 = 0x0204;
    pub const NOTEQUAL: u32 = 0x0205;
    pub const GEQUAL: u32 = 0x0206;
    pub const ALWAYS: u32 = 0x0207;

    // Culling and winding
    pub const FRONT: u32 = 0x0404;
    pub const BACK: u32 = 0x0405;
    pub const FRONT_AND_BACK: u32 = 0x0408;
    pub const CW: u32 = 0x0900;
    pub const CCW: u32 = 0x0901;

    // Framebuffers
    pub const FRAMEBUFFER: u32 = 0x8D40;
    pub const FRAMEBUFFER_COMPLETE: u32 = 0x8CD5;
    pub const FRAMEBUFFER_INCOMPLETE_ATTACHMENT: u32 = 0x8CD6;
    pub const FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT: u32 = 0x8CD7;
    pub const FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER: u32 = 0x8CDB;
    pub const FRAMEBUFFER_INCOMPLETE_READ_BUFFER: u32 = 0x8CDC;
    pub const FRAMEBUFFER_UNSUPPORTED: u32 = 0x8CDD;
    pub const FRAMEBUFFER_INCOMPLETE_MULTISAMPLE: u32 = 0x8D56;
    pub const FRAMEBUFFER_UNDEFINED: u32 = 0x8219;

    // Debug output
    pub const DONT_CARE: u32 = 0x1100;
    pub const DEBUG_SEVERITY_HIGH: u32 = 0x9146;
    pub const DEBUG_SEVERITY_MEDIUM: u32 = 0x9147;
    pub const DEBUG_SEVERITY_LOW: u32 = 0x9148;
    pub const DEBUG_SEVERITY_NOTIFICATION: u32 = 0x826B;
}

bitflags! {
    /// `glClear` mask
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearMask: u32 {
        const COLOR = consts::COLOR_BUFFER_BIT;
        const DEPTH = consts::DEPTH_BUFFER_BIT;
        const STENCIL = consts::STENCIL_BUFFER_BIT;
    }
}

/// Receiver of `glDebugMessageCallback` messages
pub type GlDebugCallback = fn(source: u32, message_type: u32, id: u32, severity: u32, message: &str);

/// The GL calls issued by the backend
///
/// Implementations wrap a loaded GL 4.5 function table (or record calls, see
/// [`RecordingGlContext`](crate::RecordingGlContext)). Object names are plain
/// `u32` values; 0 is the null object.
pub trait GlContext: Send + Sync {
    fn get_error(&self) -> u32;

    // Buffers
    fn create_buffer(&self) -> u32;
    fn delete_buffer(&self, buffer: u32);
    fn bind_buffer(&self, target: u32, buffer: u32);
    /// `glBufferData`; `data == None` allocates `size` bytes of undefined content
    fn buffer_data(&self, target: u32, size: usize, data: Option<&[u8]>, usage: u32);
    fn buffer_sub_data(&self, target: u32, offset: usize, data: &[u8]);
    fn bind_buffer_base(&self, target: u32, index: u32, buffer: u32);

    // Vertex arrays
    fn create_vertex_array(&self) -> u32;
    fn delete_vertex_array(&self, vertex_array: u32);
    fn bind_vertex_array(&self, vertex_array: u32);
    fn enable_vertex_attrib_array(&self, index: u32);
    fn vertex_attrib_pointer(&self, index: u32, size: i32, data_type: u32, normalized: bool, stride: i32, offset: usize);
    fn vertex_attrib_i_pointer(&self, index: u32, size: i32, data_type: u32, stride: i32, offset: usize);

    fn object_label(&self, identifier: u32, name: u32, label: &str);

    // Fixed-function state
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32);
    fn clear(&self, mask: u32);
    fn enable(&self, capability: u32);
    fn disable(&self, capability: u32);
    fn depth_func(&self, func: u32);
    fn cull_face(&self, mode: u32);
    fn front_face(&self, mode: u32);

    // Draws
    fn draw_elements(&self, mode: u32, count: i32, element_type: u32, offset: i32);
    fn draw_arrays(&self, mode: u32, first: i32, count: i32);

    fn check_framebuffer_status(&self, target: u32) -> u32;

    // Debug output
    fn debug_message_callback(&self, callback: GlDebugCallback);
    fn debug_message_control(&self, source: u32, message_type: u32, severity: u32, enabled: bool);
}

/// Symbolic name of a `glGetError` code
pub fn error_name(code: u32) -> &'static str {
    match code {
        consts::NO_ERROR => "GL_NO_ERROR",
        consts::INVALID_ENUM => "GL_INVALID_ENUM",
        consts::INVALID_VALUE => "GL_INVALID_VALUE",
        consts::INVALID_OPERATION => "GL_INVALID_OPERATION",
        consts::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        consts::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        consts::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        consts::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        consts::CONTEXT_LOST => "GL_CONTEXT_LOST",
        _ => "GL_UNKNOWN_ERROR",
    }
}

/// Symbolic name of a `glCheckFramebufferStatus` result
pub fn framebuffer_status_name(status: u32) -> &'static str {
    match status {
        consts::FRAMEBUFFER_COMPLETE => "GL_FRAMEBUFFER_COMPLETE",
        consts::FRAMEBUFFER_UNDEFINED => "GL_FRAMEBUFFER_UNDEFINED",
        consts::FRAMEBUFFER_INCOMPLETE_ATTACHMENT => "GL_FRAMEBUFFER_INCOMPLETE_ATTACHMENT",
        consts::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT => "GL_FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT",
        consts::FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER => "GL_FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER",
        consts::FRAMEBUFFER_INCOMPLETE_READ_BUFFER => "GL_FRAMEBUFFER_INCOMPLETE_READ_BUFFER",
        consts::FRAMEBUFFER_UNSUPPORTED => "GL_FRAMEBUFFER_UNSUPPORTED",
        consts::FRAMEBUFFER_INCOMPLETE_MULTISAMPLE => "GL_FRAMEBUFFER_INCOMPLETE_MULTISAMPLE",
        _ => "GL_FRAMEBUFFER_STATUS_UNKNOWN",
    }
}

/// Fail with a `BackendError` naming the pending GL error, if any
///
/// `operation` is the GL call being checked (e.g. "glBufferData").
pub fn check_error(gl: &dyn GlContext, source: &str, operation: &str) -> Result<()> {
    let code = gl.get_error();
    if code != consts::NO_ERROR {
        kerberos_rhi::engine_bail!(source, "{} failed: {} (0x{:04X})", operation, error_name(code), code);
    }
    Ok(())
}

/// Convert an RHI dimension to a `GLint`/`GLsizei`
pub fn to_gl_int(value: u32, source: &str, what: &str) -> Result<i32> {
    match i32::try_from(value) {
        Ok(value) => Ok(value),
        Err(_) => kerberos_rhi::engine_bail!(source, @InvalidResource,
            "{} of {} does not fit in a GLint", what, value),
    }
}

#[cfg(test)]
#[path = "gl_tests.rs"]
mod tests;
