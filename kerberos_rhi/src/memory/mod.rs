//! Host memory helpers

mod buffer;

pub use buffer::Buffer;
