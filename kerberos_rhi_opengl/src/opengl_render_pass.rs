//! OpenGL render pass
//!
//! GL has no pass object: baking validates the target framebuffer and
//! publishes its color attachments, `begin` binds the framebuffer, the
//! pipeline state and the input textures.

use std::sync::Arc;
use kerberos_rhi::kerberos::Result;
use kerberos_rhi::kerberos::render::{
    Framebuffer, RenderPass, RenderPassBindings, RenderPassSpecification, RenderPassState, Texture2D,
};
use kerberos_rhi::{engine_bail, engine_debug};
use crate::gl::{consts, framebuffer_status_name, GlContext};

const SOURCE: &str = "kerberos::OpenGLRenderPass";

pub struct OpenGLRenderPass {
    gl: Arc<dyn GlContext>,
    specification: RenderPassSpecification,
    bindings: RenderPassBindings,
}

impl OpenGLRenderPass {
    pub fn new(gl: Arc<dyn GlContext>, specification: RenderPassSpecification) -> Self {
        engine_debug!(SOURCE, "Render pass '{}' created (pipeline '{}', {} inputs)",
            specification.name,
            specification.pipeline.specification().name,
            specification.inputs.len());
        Self {
            gl,
            specification,
            bindings: RenderPassBindings::new(SOURCE),
        }
    }

    fn target(&self) -> Option<&Arc<dyn Framebuffer>> {
        self.specification.pipeline.specification().target_framebuffer.as_ref()
    }
}

impl RenderPass for OpenGLRenderPass {
    fn specification(&self) -> &RenderPassSpecification {
        &self.specification
    }

    fn state(&self) -> RenderPassState {
        self.bindings.state()
    }

    fn set_input(&mut self, name: &str, texture: Arc<dyn Texture2D>) -> Result<()> {
        self.bindings.set_input(&self.specification, name, texture)
    }

    fn input(&self, name: &str) -> Option<Arc<dyn Texture2D>> {
        self.bindings.input(name).cloned()
    }

    fn output_image(&self, index: u32) -> Result<Arc<dyn Texture2D>> {
        self.bindings.output(&self.specification, index)
    }

    fn validate(&self) -> bool {
        self.bindings.validate(&self.specification)
    }

    fn bake(&mut self) -> Result<()> {
        self.bindings.check_bakeable(&self.specification)?;
        let Some(framebuffer) = self.target().cloned() else {
            engine_bail!(SOURCE, @InvalidResource,
                "Render pass '{}' has no target framebuffer", self.specification.name);
        };

        framebuffer.bind();
        let status = self.gl.check_framebuffer_status(consts::FRAMEBUFFER);
        framebuffer.unbind();
        if status != consts::FRAMEBUFFER_COMPLETE {
            engine_bail!(SOURCE, "Render pass '{}': framebuffer {} is incomplete: {} (0x{:04X})",
                self.specification.name, framebuffer.renderer_id(), framebuffer_status_name(status), status);
        }

        let outputs: Vec<Arc<dyn Texture2D>> = (0..framebuffer.color_attachment_count())
            .filter_map(|index| framebuffer.color_attachment(index))
            .collect();
        engine_debug!(SOURCE, "Render pass '{}' baked with {} output images",
            self.specification.name, outputs.len());
        self.bindings.finish_bake(outputs);
        Ok(())
    }

    fn begin(&self) -> Result<()> {
        self.bindings.require_baked(&self.specification, "begin")?;
        if let Some(framebuffer) = self.target() {
            framebuffer.bind();
        }
        self.specification.pipeline.bind()?;
        for (slot, texture) in self.bindings.slot_bindings(&self.specification) {
            texture.bind(slot);
        }
        Ok(())
    }

    fn end(&self) -> Result<()> {
        self.bindings.require_baked(&self.specification, "end")?;
        if let Some(framebuffer) = self.target() {
            framebuffer.unbind();
        }
        Ok(())
    }
}
