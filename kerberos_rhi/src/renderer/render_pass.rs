//! Render pass: named inputs, indexed outputs and a pipeline
//!
//! Lifecycle: `Constructed` → (`set_input`) → `InputsBound` → (`bake`) → `Baked`.
//! Baking is irreversible. Inputs can no longer change once baked and outputs
//! only exist after the bake.

use std::fmt;
use std::sync::Arc;
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::renderer::{Pipeline, Texture2D};

/// Render pass creation parameters
#[derive(Clone)]
pub struct RenderPassSpecification {
    pub name: String,
    pub pipeline: Arc<dyn Pipeline>,
    /// Inputs the pass requires, bound to texture slots in this order
    pub inputs: Vec<String>,
}

impl RenderPassSpecification {
    pub fn new(name: impl Into<String>, pipeline: Arc<dyn Pipeline>) -> Self {
        Self {
            name: name.into(),
            pipeline,
            inputs: Vec::new(),
        }
    }

    /// Declare a required input
    pub fn with_input(mut self, name: impl Into<String>) -> Self {
        self.inputs.push(name.into());
        self
    }
}

impl fmt::Debug for RenderPassSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderPassSpecification")
            .field("name", &self.name)
            .field("pipeline", &self.pipeline.specification().name)
            .field("inputs", &self.inputs)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderPassState {
    Constructed,
    InputsBound,
    Baked,
}

/// Render pass resource
pub trait RenderPass: Send + Sync {
    fn specification(&self) -> &RenderPassSpecification;

    fn state(&self) -> RenderPassState;

    /// Bind `texture` to input `name`; the last write for a name wins
    ///
    /// # Errors
    ///
    /// `InvalidResource` once the pass is baked.
    fn set_input(&mut self, name: &str, texture: Arc<dyn Texture2D>) -> Result<()>;

    fn input(&self, name: &str) -> Option<Arc<dyn Texture2D>>;

    /// Output image `index`
    ///
    /// # Errors
    ///
    /// `NotBaked` before `bake`, `InvalidResource` when `index` is out of range.
    fn output_image(&self, index: u32) -> Result<Arc<dyn Texture2D>>;

    /// `true` when every declared input is bound and the pipeline targets a
    /// framebuffer with at least one color attachment
    fn validate(&self) -> bool;

    /// Create the native resources of the pass
    ///
    /// # Errors
    ///
    /// `InvalidResource` when the pass does not validate or is already baked;
    /// `BackendError` when the backend rejects the target.
    fn bake(&mut self) -> Result<()>;

    /// Start recording with this pass (baked passes only)
    fn begin(&self) -> Result<()>;

    fn end(&self) -> Result<()>;
}

/// Input map and bake state shared by render pass implementations
///
/// Every rejected operation is logged under `source` before it is returned.
pub struct RenderPassBindings {
    source: &'static str,
    inputs: FxHashMap<String, Arc<dyn Texture2D>>,
    outputs: Vec<Arc<dyn Texture2D>>,
    baked: bool,
}

impl RenderPassBindings {
    pub fn new(source: &'static str) -> Self {
        Self {
            source,
            inputs: FxHashMap::default(),
            outputs: Vec::new(),
            baked: false,
        }
    }

    pub fn state(&self) -> RenderPassState {
        if self.baked {
            RenderPassState::Baked
        } else if self.inputs.is_empty() {
            RenderPassState::Constructed
        } else {
            RenderPassState::InputsBound
        }
    }

    pub fn is_baked(&self) -> bool {
        self.baked
    }

    pub fn set_input(
        &mut self,
        spec: &RenderPassSpecification,
        name: &str,
        texture: Arc<dyn Texture2D>,
    ) -> Result<()> {
        if self.baked {
            crate::engine_bail!(self.source, @InvalidResource,
                "Cannot bind input '{}' of render pass '{}': pass is already baked",
                name, spec.name);
        }
        if !spec.inputs.iter().any(|declared| declared == name) {
            crate::engine_warn!(self.source,
                "Render pass '{}' does not declare input '{}'; it will not be bound at begin()",
                spec.name, name);
        }
        self.inputs.insert(name.to_string(), texture);
        Ok(())
    }

    pub fn input(&self, name: &str) -> Option<&Arc<dyn Texture2D>> {
        self.inputs.get(name)
    }

    /// Declared inputs that have no texture yet, in declaration order
    pub fn missing_inputs<'a>(&self, spec: &'a RenderPassSpecification) -> Vec<&'a str> {
        spec.inputs
            .iter()
            .filter(|name| !self.inputs.contains_key(name.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// `true` when the pipeline renders into a framebuffer with a color attachment
    pub fn has_color_target(spec: &RenderPassSpecification) -> bool {
        spec.pipeline
            .specification()
            .target_framebuffer
            .as_ref()
            .is_some_and(|framebuffer| framebuffer.color_attachment_count() > 0)
    }

    pub fn validate(&self, spec: &RenderPassSpecification) -> bool {
        self.missing_inputs(spec).is_empty() && Self::has_color_target(spec)
    }

    /// Reject a bake of a pass that is baked or does not validate
    pub fn check_bakeable(&self, spec: &RenderPassSpecification) -> Result<()> {
        if self.baked {
            crate::engine_bail!(self.source, @InvalidResource,
                "Render pass '{}' is already baked", spec.name);
        }
        let missing = self.missing_inputs(spec);
        if !missing.is_empty() {
            crate::engine_bail!(self.source, @InvalidResource,
                "Render pass '{}' is missing inputs: {}", spec.name, missing.join(", "));
        }
        if !Self::has_color_target(spec) {
            crate::engine_bail!(self.source, @InvalidResource,
                "Render pass '{}': pipeline '{}' has no target framebuffer with a color attachment",
                spec.name, spec.pipeline.specification().name);
        }
        Ok(())
    }

    /// Publish the outputs and enter the `Baked` state
    pub fn finish_bake(&mut self, outputs: Vec<Arc<dyn Texture2D>>) {
        self.outputs = outputs;
        self.baked = true;
    }

    pub fn output(&self, spec: &RenderPassSpecification, index: u32) -> Result<Arc<dyn Texture2D>> {
        if !self.baked {
            let error = Error::NotBaked(format!(
                "output image {} of render pass '{}' requested before bake", index, spec.name
            ));
            crate::engine_error!(self.source, "{}", error);
            return Err(error);
        }
        match self.outputs.get(index as usize) {
            Some(texture) => Ok(Arc::clone(texture)),
            None => crate::engine_bail!(self.source, @InvalidResource,
                "Render pass '{}' has {} output images, index {} is out of range",
                spec.name, self.outputs.len(), index),
        }
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    pub fn require_baked(&self, spec: &RenderPassSpecification, operation: &str) -> Result<()> {
        if !self.baked {
            let error = Error::NotBaked(format!(
                "{} called on render pass '{}' before bake", operation, spec.name
            ));
            crate::engine_error!(self.source, "{}", error);
            return Err(error);
        }
        Ok(())
    }

    /// Declared inputs paired with their texture slot, in declaration order
    pub fn slot_bindings<'a>(
        &'a self,
        spec: &'a RenderPassSpecification,
    ) -> impl Iterator<Item = (u32, &'a Arc<dyn Texture2D>)> + 'a {
        spec.inputs
            .iter()
            .enumerate()
            .filter_map(move |(slot, name)| self.inputs.get(name).map(|texture| (slot as u32, texture)))
    }
}

#[cfg(test)]
#[path = "render_pass_tests.rs"]
mod tests;
