//! Renderer configuration handed to backend factories

use crate::renderer::GraphicsApi;

/// Startup configuration of the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    /// API to select
    pub api: GraphicsApi,

    /// Route native debug messages (GL debug output, validation layers) to the engine logger
    pub enable_debug_output: bool,

    /// Application name, used for native object labels and driver hints
    pub app_name: String,
}

impl RendererConfig {
    /// Default configuration with `api` selected
    pub fn for_api(api: GraphicsApi) -> Self {
        Self {
            api,
            ..Self::default()
        }
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            api: GraphicsApi::OpenGL,
            enable_debug_output: cfg!(debug_assertions),
            app_name: "Kerberos Application".to_string(),
        }
    }
}
