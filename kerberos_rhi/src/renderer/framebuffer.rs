//! Render target handle consumed by pipelines and render passes

use std::sync::Arc;
use crate::renderer::Texture2D;

/// Format of one framebuffer attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FramebufferTextureFormat {
    #[default]
    None,
    RGBA8,
    RedInteger,
    Depth24Stencil8,
}

impl FramebufferTextureFormat {
    pub fn is_depth(&self) -> bool {
        matches!(self, FramebufferTextureFormat::Depth24Stencil8)
    }
}

/// Framebuffer creation parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramebufferSpecification {
    pub width: u32,
    pub height: u32,
    pub attachments: Vec<FramebufferTextureFormat>,
    pub samples: u32,
    /// Render directly to the swapchain image
    pub swap_chain_target: bool,
}

impl FramebufferSpecification {
    /// Attachments that are neither `None` nor depth
    pub fn color_attachment_count(&self) -> u32 {
        self.attachments
            .iter()
            .filter(|format| !format.is_depth() && **format != FramebufferTextureFormat::None)
            .count() as u32
    }
}

impl Default for FramebufferSpecification {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            attachments: Vec::new(),
            samples: 1,
            swap_chain_target: false,
        }
    }
}

/// Framebuffer resource
pub trait Framebuffer: Send + Sync {
    fn specification(&self) -> &FramebufferSpecification;

    fn bind(&self);

    fn unbind(&self);

    fn color_attachment_count(&self) -> u32 {
        self.specification().color_attachment_count()
    }

    /// Color attachment `index` as a sampleable texture
    fn color_attachment(&self, index: u32) -> Option<Arc<dyn Texture2D>>;

    fn renderer_id(&self) -> u64;
}
