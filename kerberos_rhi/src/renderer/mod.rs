//! Renderer module - the API-agnostic RHI types and traits

pub mod graphics_api;
pub mod config;
pub mod buffer_layout;
pub mod buffer;
pub mod shader;
pub mod texture;
pub mod framebuffer;
pub mod vertex_array;
pub mod renderer_api;
pub mod render_command;
pub mod pipeline;
pub mod render_pass;
pub mod backend;

#[cfg(test)]
pub mod mock_backend;

pub use graphics_api::*;
pub use config::*;
pub use buffer_layout::*;
pub use buffer::*;
pub use shader::*;
pub use texture::*;
pub use framebuffer::*;
pub use vertex_array::*;
pub use renderer_api::*;
pub use render_command::*;
pub use pipeline::*;
pub use render_pass::*;
pub use backend::*;
