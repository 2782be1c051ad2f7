//! Shader program handle consumed by pipelines
//!
//! Compilation and reflection live outside the RHI; pipelines only need to
//! bind the program.

/// Compiled shader program
pub trait Shader: Send + Sync {
    fn name(&self) -> &str;

    /// Make the program current
    fn bind(&self);

    fn unbind(&self);
}
