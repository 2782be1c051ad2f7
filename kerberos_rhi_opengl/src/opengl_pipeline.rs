//! OpenGL pipeline: a bundle of GL state applied at bind time

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use kerberos_rhi::kerberos::Result;
use kerberos_rhi::kerberos::render::{Pipeline, PipelineSpecification, Shader};
use kerberos_rhi::engine_debug;
use crate::conversions::{cull_mode_to_gl, depth_test_to_gl, topology_to_gl, winding_order_to_gl};
use crate::gl::{consts, GlContext};

const SOURCE: &str = "kerberos::OpenGLPipeline";

/// Primitive mode of the last bound pipeline
///
/// GL has no pipeline object, so the topology travels from
/// [`Pipeline::bind`] to the draw calls of the renderer API through this
/// value. `GL_TRIANGLES` until a pipeline is bound.
#[derive(Debug)]
pub struct PrimitiveState {
    mode: AtomicU32,
}

impl PrimitiveState {
    pub fn new() -> Self {
        Self {
            mode: AtomicU32::new(consts::TRIANGLES),
        }
    }

    pub fn mode(&self) -> u32 {
        self.mode.load(Ordering::Relaxed)
    }

    fn set_mode(&self, mode: u32) {
        self.mode.store(mode, Ordering::Relaxed);
    }
}

impl Default for PrimitiveState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct OpenGLPipeline {
    gl: Arc<dyn GlContext>,
    primitive: Arc<PrimitiveState>,
    specification: PipelineSpecification,
    shader: Arc<dyn Shader>,
}

impl OpenGLPipeline {
    /// # Errors
    ///
    /// `InvalidResource` when the specification has no shader.
    pub fn new(
        gl: Arc<dyn GlContext>,
        primitive: Arc<PrimitiveState>,
        specification: PipelineSpecification,
    ) -> Result<Self> {
        let Some(shader) = specification.shader.clone() else {
            kerberos_rhi::engine_bail!(SOURCE, @InvalidResource,
                "Pipeline '{}' has no shader", specification.name);
        };
        engine_debug!(SOURCE, "Pipeline '{}' created with shader '{}'", specification.name, shader.name());
        Ok(Self { gl, primitive, specification, shader })
    }

    /// GL primitive mode of the pipeline topology
    pub fn primitive_mode(&self) -> u32 {
        topology_to_gl(self.specification.topology)
    }
}

impl Pipeline for OpenGLPipeline {
    fn specification(&self) -> &PipelineSpecification {
        &self.specification
    }

    fn bind(&self) -> Result<()> {
        self.shader.bind();
        self.primitive.set_mode(self.primitive_mode());

        match cull_mode_to_gl(self.specification.cull_mode) {
            Some(mode) => {
                self.gl.enable(consts::CULL_FACE);
                self.gl.cull_face(mode);
            }
            None => self.gl.disable(consts::CULL_FACE),
        }
        self.gl.front_face(winding_order_to_gl(self.specification.front_face));

        match depth_test_to_gl(self.specification.depth_test) {
            Some(func) => {
                self.gl.enable(consts::DEPTH_TEST);
                self.gl.depth_func(func);
            }
            None => self.gl.disable(consts::DEPTH_TEST),
        }
        Ok(())
    }
}
