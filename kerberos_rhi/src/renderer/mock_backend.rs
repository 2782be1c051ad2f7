//! Mock backend for unit tests (no GPU required)
//!
//! Every object records the calls it receives into a shared [`CallLog`] so
//! tests can assert on the exact command stream.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use glam::Vec4;
use crate::error::Result;
use crate::engine_bail;
use crate::renderer::{
    Backend, BufferLayout, DepthFunc, Framebuffer, FramebufferSpecification,
    FramebufferTextureFormat, GraphicsApi, IndexBuffer, Pipeline, PipelineSpecification,
    RenderPass, RenderPassBindings, RenderPassSpecification, RenderPassState, RendererApi,
    Shader, Texture2D, TextureSpecification, UniformBuffer, VertexArray, VertexBuffer,
    VertexBufferUsage, check_range, check_vertex_write, resolve_index_count,
};

pub type CallLog = Arc<Mutex<Vec<String>>>;

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

fn next_handle() -> u64 {
    NEXT_HANDLE.fetch_add(1, Ordering::Relaxed)
}

fn record(calls: &CallLog, call: impl Into<String>) {
    calls.lock().unwrap().push(call.into());
}

// ============================================================================
// Mock Backend
// ============================================================================

pub struct MockBackend {
    pub api: GraphicsApi,
    pub calls: CallLog,
    pub fail_bootstrap: bool,
}

impl MockBackend {
    pub fn new(api: GraphicsApi) -> Self {
        Self {
            api,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_bootstrap: false,
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Backend for MockBackend {
    fn api(&self) -> GraphicsApi {
        self.api
    }

    fn create_renderer_api(&self) -> Result<Box<dyn RendererApi>> {
        record(&self.calls, "create_renderer_api");
        Ok(Box::new(MockRendererApi::new(self.calls.clone())))
    }

    fn bootstrap_pipelines(&self) -> Result<()> {
        if self.fail_bootstrap {
            engine_bail!("kerberos::mock", "pipeline bootstrap failed");
        }
        record(&self.calls, "bootstrap_pipelines");
        Ok(())
    }

    fn create_vertex_buffer(&self, vertices: &[f32]) -> Result<Box<dyn VertexBuffer>> {
        record(&self.calls, format!("create_vertex_buffer({})", vertices.len()));
        Ok(Box::new(MockVertexBuffer::new_static(self.calls.clone(), vertices)))
    }

    fn create_dynamic_vertex_buffer(&self, size: u64) -> Result<Box<dyn VertexBuffer>> {
        record(&self.calls, format!("create_dynamic_vertex_buffer({})", size));
        Ok(Box::new(MockVertexBuffer::new_dynamic(self.calls.clone(), size)))
    }

    fn create_index_buffer(&self, indices: &[u32]) -> Result<Arc<dyn IndexBuffer>> {
        record(&self.calls, format!("create_index_buffer({})", indices.len()));
        Ok(Arc::new(MockIndexBuffer::new(self.calls.clone(), indices.len() as u32)))
    }

    fn create_uniform_buffer(&self, size: u64, binding: u32) -> Result<Arc<dyn UniformBuffer>> {
        record(&self.calls, format!("create_uniform_buffer({}, {})", size, binding));
        Ok(Arc::new(MockUniformBuffer { size, binding, handle: next_handle() }))
    }

    fn create_vertex_array(&self) -> Result<Box<dyn VertexArray>> {
        record(&self.calls, "create_vertex_array");
        Ok(Box::new(MockVertexArray::new(self.calls.clone())))
    }

    fn create_pipeline(&self, spec: PipelineSpecification) -> Result<Arc<dyn Pipeline>> {
        record(&self.calls, format!("create_pipeline({})", spec.name));
        Ok(Arc::new(MockPipeline::new(spec)))
    }

    fn create_render_pass(&self, spec: RenderPassSpecification) -> Result<Box<dyn RenderPass>> {
        record(&self.calls, format!("create_render_pass({})", spec.name));
        Ok(Box::new(MockRenderPass::new(spec)))
    }
}

/// Backend implementing nothing beyond `api()`
pub struct BareBackend(pub GraphicsApi);

impl Backend for BareBackend {
    fn api(&self) -> GraphicsApi {
        self.0
    }
}

// ============================================================================
// Mock Renderer API
// ============================================================================

pub struct MockRendererApi {
    pub calls: CallLog,
}

impl MockRendererApi {
    pub fn new(calls: CallLog) -> Self {
        Self { calls }
    }
}

impl RendererApi for MockRendererApi {
    fn init(&mut self) -> Result<()> {
        record(&self.calls, "init");
        Ok(())
    }

    fn set_viewport(&mut self, x: u32, y: u32, width: u32, height: u32) -> Result<()> {
        record(&self.calls, format!("set_viewport({}, {}, {}, {})", x, y, width, height));
        Ok(())
    }

    fn set_clear_color(&mut self, color: Vec4) -> Result<()> {
        record(&self.calls, format!("set_clear_color({}, {}, {}, {})", color.x, color.y, color.z, color.w));
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        record(&self.calls, "clear");
        Ok(())
    }

    fn clear_depth(&mut self) -> Result<()> {
        record(&self.calls, "clear_depth");
        Ok(())
    }

    fn set_depth_test(&mut self, enabled: bool) -> Result<()> {
        record(&self.calls, format!("set_depth_test({})", enabled));
        Ok(())
    }

    fn set_depth_func(&mut self, func: DepthFunc) -> Result<()> {
        record(&self.calls, format!("set_depth_func({:?})", func));
        Ok(())
    }

    fn draw_indexed(&mut self, vertex_array: &dyn VertexArray, index_count: u32) -> Result<()> {
        let count = resolve_index_count(vertex_array, index_count)?;
        vertex_array.bind();
        record(&self.calls, format!("draw_indexed({})", count));
        Ok(())
    }

    fn draw_array(&mut self, vertex_array: &dyn VertexArray, vertex_count: u32) -> Result<()> {
        vertex_array.bind();
        record(&self.calls, format!("draw_array({})", vertex_count));
        Ok(())
    }
}

// ============================================================================
// Mock Buffers
// ============================================================================

pub struct MockVertexBuffer {
    pub calls: CallLog,
    pub layout: BufferLayout,
    pub usage: VertexBufferUsage,
    pub capacity: u64,
    pub data: Mutex<Vec<u8>>,
    pub handle: u64,
}

impl MockVertexBuffer {
    pub fn new_static(calls: CallLog, vertices: &[f32]) -> Self {
        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        Self {
            calls,
            layout: BufferLayout::default(),
            usage: VertexBufferUsage::Static,
            capacity: bytes.len() as u64,
            data: Mutex::new(bytes.to_vec()),
            handle: next_handle(),
        }
    }

    pub fn new_dynamic(calls: CallLog, size: u64) -> Self {
        Self {
            calls,
            layout: BufferLayout::default(),
            usage: VertexBufferUsage::Dynamic,
            capacity: size,
            data: Mutex::new(Vec::new()),
            handle: next_handle(),
        }
    }
}

impl VertexBuffer for MockVertexBuffer {
    fn bind(&self) {
        record(&self.calls, format!("bind_vertex_buffer({})", self.handle));
    }

    fn unbind(&self) {
        record(&self.calls, "unbind_vertex_buffer");
    }

    fn set_data(&self, data: &[u8]) -> Result<()> {
        check_vertex_write(self.usage, self.capacity, data.len() as u64)?;
        *self.data.lock().unwrap() = data.to_vec();
        record(&self.calls, format!("set_data({})", data.len()));
        Ok(())
    }

    fn layout(&self) -> &BufferLayout {
        &self.layout
    }

    fn set_layout(&mut self, layout: BufferLayout) {
        self.layout = layout;
    }

    fn count(&self) -> u32 {
        match self.layout.stride() {
            0 => 0,
            stride => (self.data.lock().unwrap().len() as u32) / stride,
        }
    }

    fn usage(&self) -> VertexBufferUsage {
        self.usage
    }

    fn capacity(&self) -> u64 {
        self.capacity
    }

    fn native_handle(&self) -> u64 {
        self.handle
    }
}

pub struct MockIndexBuffer {
    pub calls: CallLog,
    pub count: u32,
    pub handle: u64,
}

impl MockIndexBuffer {
    pub fn new(calls: CallLog, count: u32) -> Self {
        Self { calls, count, handle: next_handle() }
    }
}

impl IndexBuffer for MockIndexBuffer {
    fn bind(&self) {
        record(&self.calls, format!("bind_index_buffer({})", self.handle));
    }

    fn unbind(&self) {
        record(&self.calls, "unbind_index_buffer");
    }

    fn count(&self) -> u32 {
        self.count
    }

    fn native_handle(&self) -> u64 {
        self.handle
    }
}

pub struct MockUniformBuffer {
    pub size: u64,
    pub binding: u32,
    pub handle: u64,
}

impl UniformBuffer for MockUniformBuffer {
    fn set_data(&self, data: &[u8], offset: u64) -> Result<()> {
        check_range(offset, data.len() as u64, self.size)
    }

    fn binding(&self) -> u32 {
        self.binding
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn set_debug_name(&self, _name: &str) {}

    fn native_handle(&self) -> u64 {
        self.handle
    }
}

// ============================================================================
// Mock Vertex Array
// ============================================================================

pub struct MockVertexArray {
    pub calls: CallLog,
    pub vertex_buffers: Vec<Arc<dyn VertexBuffer>>,
    pub index_buffer: Option<Arc<dyn IndexBuffer>>,
}

impl MockVertexArray {
    pub fn new(calls: CallLog) -> Self {
        Self { calls, vertex_buffers: Vec::new(), index_buffer: None }
    }
}

impl VertexArray for MockVertexArray {
    fn bind(&self) {
        record(&self.calls, "bind_vertex_array");
    }

    fn unbind(&self) {
        record(&self.calls, "unbind_vertex_array");
    }

    fn add_vertex_buffer(&mut self, vertex_buffer: Arc<dyn VertexBuffer>) -> Result<()> {
        if vertex_buffer.layout().is_empty() {
            engine_bail!("kerberos::mock", @InvalidResource, "vertex buffer has no layout");
        }
        self.vertex_buffers.push(vertex_buffer);
        Ok(())
    }

    fn set_index_buffer(&mut self, index_buffer: Arc<dyn IndexBuffer>) {
        self.index_buffer = Some(index_buffer);
    }

    fn vertex_buffers(&self) -> &[Arc<dyn VertexBuffer>] {
        &self.vertex_buffers
    }

    fn index_buffer(&self) -> Option<&Arc<dyn IndexBuffer>> {
        self.index_buffer.as_ref()
    }

    fn set_debug_name(&self, name: &str) {
        record(&self.calls, format!("set_debug_name({})", name));
    }
}

// ============================================================================
// Mock Pipeline and Render Pass
// ============================================================================

pub struct MockPipeline {
    pub spec: PipelineSpecification,
}

impl MockPipeline {
    pub fn new(spec: PipelineSpecification) -> Self {
        Self { spec }
    }
}

impl Pipeline for MockPipeline {
    fn specification(&self) -> &PipelineSpecification {
        &self.spec
    }

    fn bind(&self) -> Result<()> {
        Ok(())
    }
}

pub struct MockRenderPass {
    pub spec: RenderPassSpecification,
    pub bindings: RenderPassBindings,
}

impl MockRenderPass {
    pub fn new(spec: RenderPassSpecification) -> Self {
        Self { spec, bindings: RenderPassBindings::new("kerberos::mock") }
    }
}

impl RenderPass for MockRenderPass {
    fn specification(&self) -> &RenderPassSpecification {
        &self.spec
    }

    fn state(&self) -> RenderPassState {
        self.bindings.state()
    }

    fn set_input(&mut self, name: &str, texture: Arc<dyn Texture2D>) -> Result<()> {
        self.bindings.set_input(&self.spec, name, texture)
    }

    fn input(&self, name: &str) -> Option<Arc<dyn Texture2D>> {
        self.bindings.input(name).cloned()
    }

    fn output_image(&self, index: u32) -> Result<Arc<dyn Texture2D>> {
        self.bindings.output(&self.spec, index)
    }

    fn validate(&self) -> bool {
        self.bindings.validate(&self.spec)
    }

    fn bake(&mut self) -> Result<()> {
        self.bindings.check_bakeable(&self.spec)?;
        let outputs = match &self.spec.pipeline.specification().target_framebuffer {
            Some(framebuffer) => (0..framebuffer.color_attachment_count())
                .filter_map(|index| framebuffer.color_attachment(index))
                .collect(),
            None => Vec::new(),
        };
        self.bindings.finish_bake(outputs);
        Ok(())
    }

    fn begin(&self) -> Result<()> {
        self.bindings.require_baked(&self.spec, "begin")
    }

    fn end(&self) -> Result<()> {
        self.bindings.require_baked(&self.spec, "end")
    }
}

// ============================================================================
// Mock Collaborators
// ============================================================================

pub struct MockShader {
    pub name: String,
}

impl Shader for MockShader {
    fn name(&self) -> &str {
        &self.name
    }

    fn bind(&self) {}

    fn unbind(&self) {}
}

pub struct MockTexture {
    pub spec: TextureSpecification,
    pub id: u64,
}

impl MockTexture {
    pub fn new(width: u32, height: u32) -> Arc<dyn Texture2D> {
        Arc::new(Self {
            spec: TextureSpecification { width, height, ..TextureSpecification::default() },
            id: next_handle(),
        })
    }
}

impl Texture2D for MockTexture {
    fn specification(&self) -> &TextureSpecification {
        &self.spec
    }

    fn renderer_id(&self) -> u64 {
        self.id
    }

    fn bind(&self, _slot: u32) {}
}

pub struct MockFramebuffer {
    pub spec: FramebufferSpecification,
    pub color_attachments: Vec<Arc<dyn Texture2D>>,
    pub id: u64,
}

impl MockFramebuffer {
    /// Framebuffer with `color_count` RGBA8 attachments plus a depth attachment
    pub fn new(width: u32, height: u32, color_count: usize) -> Arc<dyn Framebuffer> {
        let mut attachments = vec![FramebufferTextureFormat::RGBA8; color_count];
        attachments.push(FramebufferTextureFormat::Depth24Stencil8);
        Arc::new(Self {
            spec: FramebufferSpecification { width, height, attachments, ..FramebufferSpecification::default() },
            color_attachments: (0..color_count).map(|_| MockTexture::new(width, height)).collect(),
            id: next_handle(),
        })
    }
}

impl Framebuffer for MockFramebuffer {
    fn specification(&self) -> &FramebufferSpecification {
        &self.spec
    }

    fn bind(&self) {}

    fn unbind(&self) {}

    fn color_attachment(&self, index: u32) -> Option<Arc<dyn Texture2D>> {
        self.color_attachments.get(index as usize).cloned()
    }

    fn renderer_id(&self) -> u64 {
        self.id
    }
}

/// Pipeline spec named `name` targeting `framebuffer`
pub fn pipeline_spec(name: &str, framebuffer: Option<Arc<dyn Framebuffer>>) -> PipelineSpecification {
    PipelineSpecification {
        shader: Some(Arc::new(MockShader { name: format!("{}Shader", name) })),
        target_framebuffer: framebuffer,
        ..PipelineSpecification::new(name)
    }
}
