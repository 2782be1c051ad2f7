//! Backend plugin table and the render context threaded into every factory
//!
//! A [`Backend`] creates the API-specific implementation of every RHI object.
//! Objects a backend does not implement fall back to the trait's default
//! methods, which fail with [`Error::UnsupportedBackend`]. Backends are
//! registered in a [`BackendRegistry`] under their [`GraphicsApi`]; a
//! [`RenderContext`] is the immutable result of selecting one of them.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::renderer::{
    GraphicsApi, RendererConfig, RendererApi, VertexBuffer, IndexBuffer, UniformBuffer,
    VertexArray, Pipeline, PipelineSpecification, RenderPass, RenderPassSpecification,
};

/// API-specific object factory
pub trait Backend: Send + Sync {
    fn api(&self) -> GraphicsApi;

    fn create_renderer_api(&self) -> Result<Box<dyn RendererApi>> {
        Err(Error::UnsupportedBackend { api: self.api(), resource: "RendererAPI" })
    }

    /// One-time pipeline-object setup run before the renderer API of a
    /// pass-based API becomes active
    fn bootstrap_pipelines(&self) -> Result<()> {
        Ok(())
    }

    /// Static vertex buffer pre-populated with `vertices`
    fn create_vertex_buffer(&self, _vertices: &[f32]) -> Result<Box<dyn VertexBuffer>> {
        Err(Error::UnsupportedBackend { api: self.api(), resource: "VertexBuffer" })
    }

    /// Dynamic vertex buffer of `size` bytes with undefined content
    fn create_dynamic_vertex_buffer(&self, _size: u64) -> Result<Box<dyn VertexBuffer>> {
        Err(Error::UnsupportedBackend { api: self.api(), resource: "VertexBuffer" })
    }

    fn create_index_buffer(&self, _indices: &[u32]) -> Result<Arc<dyn IndexBuffer>> {
        Err(Error::UnsupportedBackend { api: self.api(), resource: "IndexBuffer" })
    }

    fn create_uniform_buffer(&self, _size: u64, _binding: u32) -> Result<Arc<dyn UniformBuffer>> {
        Err(Error::UnsupportedBackend { api: self.api(), resource: "UniformBuffer" })
    }

    fn create_vertex_array(&self) -> Result<Box<dyn VertexArray>> {
        Err(Error::UnsupportedBackend { api: self.api(), resource: "VertexArray" })
    }

    fn create_pipeline(&self, _spec: PipelineSpecification) -> Result<Arc<dyn Pipeline>> {
        Err(Error::UnsupportedBackend { api: self.api(), resource: "Pipeline" })
    }

    fn create_render_pass(&self, _spec: RenderPassSpecification) -> Result<Box<dyn RenderPass>> {
        Err(Error::UnsupportedBackend { api: self.api(), resource: "RenderPass" })
    }
}

/// Factory building a backend from the renderer configuration
pub type BackendFactory = Box<dyn Fn(&RendererConfig) -> Result<Arc<dyn Backend>> + Send + Sync>;

/// Backend factories keyed by graphics API
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use kerberos_rhi::kerberos::render::{Backend, BackendRegistry, GraphicsApi};
///
/// struct HeadlessVulkan;
/// impl Backend for HeadlessVulkan {
///     fn api(&self) -> GraphicsApi { GraphicsApi::Vulkan }
/// }
///
/// let mut registry = BackendRegistry::new();
/// registry.register(GraphicsApi::Vulkan, |_config| Ok(Arc::new(HeadlessVulkan) as Arc<dyn Backend>))?;
/// assert!(registry.is_registered(GraphicsApi::Vulkan));
/// # Ok::<(), kerberos_rhi::kerberos::Error>(())
/// ```
#[derive(Default)]
pub struct BackendRegistry {
    factories: FxHashMap<GraphicsApi, BackendFactory>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the factory for `api`
    ///
    /// # Errors
    ///
    /// `UnsupportedBackend` when `api` is `GraphicsApi::None`.
    pub fn register<F>(&mut self, api: GraphicsApi, factory: F) -> Result<()>
    where
        F: Fn(&RendererConfig) -> Result<Arc<dyn Backend>> + Send + Sync + 'static,
    {
        if api == GraphicsApi::None {
            let error = Error::UnsupportedBackend { api, resource: "Backend" };
            crate::engine_error!("kerberos::BackendRegistry", "Cannot register a backend for API 'none'");
            return Err(error);
        }
        if self.factories.insert(api, Box::new(factory)).is_some() {
            crate::engine_warn!("kerberos::BackendRegistry", "Backend for '{}' replaced", api);
        } else {
            crate::engine_debug!("kerberos::BackendRegistry", "Backend registered for '{}'", api);
        }
        Ok(())
    }

    pub fn is_registered(&self, api: GraphicsApi) -> bool {
        self.factories.contains_key(&api)
    }

    /// Registered APIs in [`GraphicsApi::ALL`] order
    pub fn registered_apis(&self) -> Vec<GraphicsApi> {
        GraphicsApi::ALL
            .into_iter()
            .filter(|api| self.factories.contains_key(api))
            .collect()
    }

    /// Build the backend for `config.api`
    ///
    /// # Errors
    ///
    /// `UnsupportedBackend` when no factory is registered for the API,
    /// `BackendError` when the factory returns a backend for another API,
    /// and whatever the factory itself reports.
    pub fn create_backend(&self, config: &RendererConfig) -> Result<Arc<dyn Backend>> {
        let factory = self.factories.get(&config.api).ok_or_else(|| {
            crate::engine_error!("kerberos::BackendRegistry",
                "No backend registered for graphics API '{}'", config.api);
            Error::UnsupportedBackend { api: config.api, resource: "Backend" }
        })?;

        let backend = factory(config)?;
        if backend.api() != config.api {
            crate::engine_bail!("kerberos::BackendRegistry",
                "Factory for '{}' produced a '{}' backend", config.api, backend.api());
        }
        Ok(backend)
    }
}

/// Immutable selection of one backend
///
/// Cheap to clone; every clone shares the same backend instance and the
/// same renderer API slot, so at most one renderer API is ever set up per
/// context.
#[derive(Clone)]
pub struct RenderContext {
    config: Arc<RendererConfig>,
    backend: Arc<dyn Backend>,
    renderer_api_claimed: Arc<AtomicBool>,
}

impl RenderContext {
    /// Select `config.api` from `registry`
    ///
    /// # Errors
    ///
    /// `UnsupportedBackend` for `GraphicsApi::None` or an unregistered API.
    pub fn new(config: RendererConfig, registry: &BackendRegistry) -> Result<Self> {
        if config.api == GraphicsApi::None {
            crate::engine_error!("kerberos::RenderContext",
                "Graphics API 'none' selected: no renderer object can be created");
            return Err(Error::UnsupportedBackend { api: GraphicsApi::None, resource: "RenderContext" });
        }
        let backend = registry.create_backend(&config)?;
        crate::engine_debug!("kerberos::RenderContext",
            "Render context created for '{}' ({})", config.api, config.app_name);
        Ok(Self {
            config: Arc::new(config),
            backend,
            renderer_api_claimed: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn api(&self) -> GraphicsApi {
        self.backend.api()
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    /// `true` once a renderer API has been set up from this context or a clone
    pub fn has_renderer_api(&self) -> bool {
        self.renderer_api_claimed.load(Ordering::Acquire)
    }

    /// Take the renderer API slot; `false` when it is already taken
    pub(crate) fn claim_renderer_api(&self) -> bool {
        self.renderer_api_claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Give the slot back after a failed setup
    pub(crate) fn release_renderer_api(&self) {
        self.renderer_api_claimed.store(false, Ordering::Release);
    }

    fn dispatch<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(Error::UnsupportedBackend { api, resource }) = &result {
            crate::engine_error!("kerberos::RenderContext",
                "{} is not implemented for graphics API '{}'", resource, api);
        }
        result
    }

    pub fn create_renderer_api(&self) -> Result<Box<dyn RendererApi>> {
        self.dispatch(self.backend.create_renderer_api())
    }

    pub fn bootstrap_pipelines(&self) -> Result<()> {
        self.dispatch(self.backend.bootstrap_pipelines())
    }

    pub fn create_vertex_buffer(&self, vertices: &[f32]) -> Result<Box<dyn VertexBuffer>> {
        self.dispatch(self.backend.create_vertex_buffer(vertices))
    }

    pub fn create_dynamic_vertex_buffer(&self, size: u64) -> Result<Box<dyn VertexBuffer>> {
        self.dispatch(self.backend.create_dynamic_vertex_buffer(size))
    }

    pub fn create_index_buffer(&self, indices: &[u32]) -> Result<Arc<dyn IndexBuffer>> {
        self.dispatch(self.backend.create_index_buffer(indices))
    }

    pub fn create_uniform_buffer(&self, size: u64, binding: u32) -> Result<Arc<dyn UniformBuffer>> {
        self.dispatch(self.backend.create_uniform_buffer(size, binding))
    }

    pub fn create_vertex_array(&self) -> Result<Box<dyn VertexArray>> {
        self.dispatch(self.backend.create_vertex_array())
    }

    pub fn create_pipeline(&self, spec: PipelineSpecification) -> Result<Arc<dyn Pipeline>> {
        self.dispatch(self.backend.create_pipeline(spec))
    }

    pub fn create_render_pass(&self, spec: RenderPassSpecification) -> Result<Box<dyn RenderPass>> {
        self.dispatch(self.backend.create_render_pass(spec))
    }
}

impl fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("api", &self.api())
            .field("config", &self.config)
            .field("has_renderer_api", &self.has_renderer_api())
            .finish()
    }
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
