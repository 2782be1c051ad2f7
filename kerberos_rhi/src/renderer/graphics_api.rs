//! Graphics API identifiers and selection helpers

use std::fmt;
use std::str::FromStr;
use crate::error::Error;

/// Graphics API a render context talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GraphicsApi {
    /// No API selected; every factory fails
    #[default]
    None,
    OpenGL,
    Vulkan,
    D3D11,
    D3D12,
}

impl GraphicsApi {
    /// Every API in declaration order
    pub const ALL: [GraphicsApi; 5] = [
        GraphicsApi::None,
        GraphicsApi::OpenGL,
        GraphicsApi::Vulkan,
        GraphicsApi::D3D11,
        GraphicsApi::D3D12,
    ];

    /// Lowercase identifier used in configuration files and logs
    pub fn name(&self) -> &'static str {
        match self {
            GraphicsApi::None => "none",
            GraphicsApi::OpenGL => "opengl",
            GraphicsApi::Vulkan => "vulkan",
            GraphicsApi::D3D11 => "d3d11",
            GraphicsApi::D3D12 => "d3d12",
        }
    }

    /// Explicit pass/pipeline-object APIs
    ///
    /// Their renderer setup runs the backend pipeline bootstrap before the
    /// renderer API becomes active.
    pub fn is_pass_based(&self) -> bool {
        matches!(self, GraphicsApi::Vulkan | GraphicsApi::D3D12)
    }
}

impl fmt::Display for GraphicsApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GraphicsApi {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        GraphicsApi::ALL
            .into_iter()
            .find(|api| api.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::InvalidResource(format!(
                "Unknown graphics API '{}' (expected one of: none, opengl, vulkan, d3d11, d3d12)",
                s
            )))
    }
}

#[cfg(test)]
#[path = "graphics_api_tests.rs"]
mod tests;
