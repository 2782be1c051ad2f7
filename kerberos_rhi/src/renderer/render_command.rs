//! Render command facade
//!
//! [`RenderCommand`] owns the renderer API of the selected backend and
//! forwards every call to it synchronously, in call order.

use glam::Vec4;
use crate::error::Result;
use crate::renderer::{DepthFunc, GraphicsApi, RenderContext, RendererApi, VertexArray};

const SOURCE: &str = "kerberos::RenderCommand";

/// Lifecycle of the active renderer API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RendererState {
    Uninitialized,
    Initialized,
}

/// Facade over exactly one active [`RendererApi`]
///
/// # Example
///
/// ```no_run
/// use kerberos_rhi::kerberos::render::{RenderCommand, RenderContext};
/// use kerberos_rhi::glam::Vec4;
///
/// # fn frame(context: &RenderContext) -> kerberos_rhi::kerberos::Result<()> {
/// let mut command = RenderCommand::setup_renderer_api(context)?;
/// command.init()?;
/// command.set_clear_color(Vec4::new(0.1, 0.1, 0.1, 1.0))?;
/// command.clear()?;
/// # Ok(())
/// # }
/// ```
pub struct RenderCommand {
    api: GraphicsApi,
    renderer_api: Box<dyn RendererApi>,
    state: RendererState,
}

impl RenderCommand {
    /// Instantiate the renderer API of the context's backend
    ///
    /// Pass-based APIs run the backend pipeline bootstrap first. A context
    /// (and its clones) sets up one renderer API only; a failed setup frees
    /// the slot again.
    ///
    /// # Errors
    ///
    /// `InitializationFailed` when the context already has a renderer API,
    /// `UnsupportedBackend` when the backend has no renderer API, plus any
    /// bootstrap failure.
    pub fn setup_renderer_api(context: &RenderContext) -> Result<Self> {
        let api = context.api();
        if !context.claim_renderer_api() {
            crate::engine_bail!(SOURCE, @InitializationFailed,
                "A renderer API is already set up for '{}'; setup_renderer_api() runs once per context", api);
        }
        match Self::build(context, api) {
            Ok(command) => Ok(command),
            Err(error) => {
                context.release_renderer_api();
                Err(error)
            }
        }
    }

    fn build(context: &RenderContext, api: GraphicsApi) -> Result<Self> {
        let renderer_api = context.create_renderer_api()?;
        if api.is_pass_based() {
            context.bootstrap_pipelines()?;
            crate::engine_debug!(SOURCE, "Pipeline bootstrap completed for '{}'", api);
        }
        crate::engine_info!(SOURCE, "Renderer API set up for '{}'", api);
        Ok(Self {
            api,
            renderer_api,
            state: RendererState::Uninitialized,
        })
    }

    pub fn api(&self) -> GraphicsApi {
        self.api
    }

    pub fn state(&self) -> RendererState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state == RendererState::Initialized
    }

    /// Initialize the renderer API (once)
    pub fn init(&mut self) -> Result<()> {
        if self.is_initialized() {
            crate::engine_bail!(SOURCE, @InitializationFailed,
                "init() called twice on the '{}' renderer API", self.api);
        }
        self.renderer_api.init()?;
        self.state = RendererState::Initialized;
        crate::engine_info!(SOURCE, "Renderer API '{}' initialized", self.api);
        Ok(())
    }

    fn active(&mut self, operation: &str) -> Result<&mut dyn RendererApi> {
        if !self.is_initialized() {
            crate::engine_bail!(SOURCE, @InitializationFailed,
                "{}() called before init() on the '{}' renderer API", operation, self.api);
        }
        Ok(self.renderer_api.as_mut())
    }

    pub fn set_viewport(&mut self, x: u32, y: u32, width: u32, height: u32) -> Result<()> {
        self.active("set_viewport")?.set_viewport(x, y, width, height)
    }

    pub fn set_clear_color(&mut self, color: Vec4) -> Result<()> {
        self.active("set_clear_color")?.set_clear_color(color)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.active("clear")?.clear()
    }

    pub fn clear_depth(&mut self) -> Result<()> {
        self.active("clear_depth")?.clear_depth()
    }

    pub fn set_depth_test(&mut self, enabled: bool) -> Result<()> {
        self.active("set_depth_test")?.set_depth_test(enabled)
    }

    pub fn set_depth_func(&mut self, func: DepthFunc) -> Result<()> {
        self.active("set_depth_func")?.set_depth_func(func)
    }

    /// Draw indexed triangles; `index_count == 0` draws the whole index buffer
    pub fn draw_indexed(&mut self, vertex_array: &dyn VertexArray, index_count: u32) -> Result<()> {
        self.active("draw_indexed")?.draw_indexed(vertex_array, index_count)
    }

    pub fn draw_array(&mut self, vertex_array: &dyn VertexArray, vertex_count: u32) -> Result<()> {
        self.active("draw_array")?.draw_array(vertex_array, vertex_count)
    }
}

#[cfg(test)]
#[path = "render_command_tests.rs"]
mod tests;
