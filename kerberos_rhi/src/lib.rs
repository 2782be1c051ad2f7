/*!
# Kerberos RHI

API-agnostic render hardware interface of the Kerberos engine.

Renderer objects (buffers, vertex arrays, pipelines, render passes and the
renderer API that emits commands) are traits. Each graphics API provides
them through a [`Backend`](kerberos::render::Backend) registered in a
[`BackendRegistry`](kerberos::render::BackendRegistry); selecting an API
yields a [`RenderContext`](kerberos::render::RenderContext) whose factories
create the objects of that API.

## Architecture

- **Buffer**: owned host byte block used for uploads
- **BufferLayout**: vertex attribute schema
- **VertexBuffer / IndexBuffer / UniformBuffer**: GPU buffers
- **VertexArray**: geometry consumed by draw calls
- **RendererApi / RenderCommand**: command emission behind an init-once facade
- **Pipeline / RenderPass**: fixed-function state and pass lifecycle

The OpenGL backend lives in the `kerberos_rhi_opengl` crate.
*/

mod error;
mod engine;
pub mod log;
pub mod memory;
pub mod renderer;

// Main kerberos namespace module
pub mod kerberos {
    pub use crate::error::{Error, Result};

    pub use crate::engine::Engine;

    pub use crate::memory::Buffer;

    // Logging types (the engine_* macros are exported at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    pub mod render {
        pub use crate::renderer::*;
    }
}

// Re-export math library at crate root
pub use glam;
