//! Pipeline: shader plus fixed-function state

use std::fmt;
use std::sync::Arc;
use crate::error::Result;
use crate::renderer::{BufferLayout, Framebuffer, Shader};

/// Primitive assembly mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Topology {
    #[default]
    Triangles,
    Lines,
    LineStrip,
}

/// Faces discarded by rasterization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullMode {
    None,
    Front,
    #[default]
    Back,
    FrontAndBack,
}

/// Vertex winding of front faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindingOrder {
    Clockwise,
    #[default]
    CounterClockwise,
}

/// Depth test mode (`None` disables the test)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DepthTest {
    #[default]
    None,
    Less,
    LessEqual,
    Equal,
    Greater,
    GreaterEqual,
    NotEqual,
    Always,
    Never,
}

/// Everything a pipeline is built from
#[derive(Clone, Default)]
pub struct PipelineSpecification {
    pub name: String,
    pub shader: Option<Arc<dyn Shader>>,
    /// Render target; `None` targets the backend default framebuffer
    pub target_framebuffer: Option<Arc<dyn Framebuffer>>,
    pub layout: BufferLayout,
    pub topology: Topology,
    pub cull_mode: CullMode,
    pub front_face: WindingOrder,
    pub depth_test: DepthTest,
}

impl PipelineSpecification {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl fmt::Debug for PipelineSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineSpecification")
            .field("name", &self.name)
            .field("shader", &self.shader.as_ref().map(|s| s.name().to_string()))
            .field("target_framebuffer", &self.target_framebuffer.as_ref().map(|fb| fb.renderer_id()))
            .field("layout", &self.layout)
            .field("topology", &self.topology)
            .field("cull_mode", &self.cull_mode)
            .field("front_face", &self.front_face)
            .field("depth_test", &self.depth_test)
            .finish()
    }
}

/// Pipeline resource
///
/// The specification is immutable once the pipeline exists.
pub trait Pipeline: Send + Sync {
    fn specification(&self) -> &PipelineSpecification;

    /// Make the pipeline state current for the following draws
    fn bind(&self) -> Result<()>;
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
