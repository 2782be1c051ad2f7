//! Unit tests for render_command.rs
//!
//! Tests setup, the init-once lifecycle and in-order forwarding to the
//! renderer API of the mock backend.

use std::sync::Arc;
use glam::Vec4;
use crate::error::Error;
use crate::renderer::{
    Backend, BackendRegistry, DepthFunc, GraphicsApi, RenderCommand, RenderContext,
    RendererConfig, RendererState, VertexArray,
};
use crate::renderer::mock_backend::{BareBackend, CallLog, MockBackend, MockIndexBuffer, MockVertexArray};

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Context backed by a MockBackend; returns the backend call log too
fn mock_context(api: GraphicsApi, fail_bootstrap: bool) -> (RenderContext, CallLog) {
    let mut backend = MockBackend::new(api);
    backend.fail_bootstrap = fail_bootstrap;
    let calls = backend.calls.clone();
    let backend: Arc<dyn Backend> = Arc::new(backend);

    let mut registry = BackendRegistry::new();
    registry.register(api, move |_config| Ok(backend.clone())).unwrap();
    let context = RenderContext::new(RendererConfig::for_api(api), &registry).unwrap();
    (context, calls)
}

fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

// ============================================================================
// SETUP TESTS
// ============================================================================

#[test]
fn test_setup_creates_uninitialized_command() {
    let (context, log) = mock_context(GraphicsApi::OpenGL, false);
    let command = RenderCommand::setup_renderer_api(&context).unwrap();
    assert_eq!(command.api(), GraphicsApi::OpenGL);
    assert_eq!(command.state(), RendererState::Uninitialized);
    assert_eq!(calls(&log), vec!["create_renderer_api"]);
}

#[test]
fn test_setup_skips_bootstrap_for_immediate_apis() {
    let (context, log) = mock_context(GraphicsApi::D3D11, false);
    RenderCommand::setup_renderer_api(&context).unwrap();
    assert!(!calls(&log).contains(&"bootstrap_pipelines".to_string()));
}

#[test]
fn test_setup_bootstraps_pass_based_apis() {
    let (context, log) = mock_context(GraphicsApi::Vulkan, false);
    RenderCommand::setup_renderer_api(&context).unwrap();
    assert_eq!(calls(&log), vec!["create_renderer_api", "bootstrap_pipelines"]);
}

#[test]
fn test_setup_fails_when_bootstrap_fails() {
    let (context, _log) = mock_context(GraphicsApi::D3D12, true);
    let result = RenderCommand::setup_renderer_api(&context);
    assert!(matches!(result, Err(Error::BackendError(_))));
}

#[test]
fn test_setup_without_renderer_api_is_unsupported() {
    let mut registry = BackendRegistry::new();
    registry
        .register(GraphicsApi::Vulkan, |_config| Ok(Arc::new(BareBackend(GraphicsApi::Vulkan)) as Arc<dyn Backend>))
        .unwrap();
    let context = RenderContext::new(RendererConfig::for_api(GraphicsApi::Vulkan), &registry).unwrap();

    let result = RenderCommand::setup_renderer_api(&context);
    assert!(matches!(
        result,
        Err(Error::UnsupportedBackend { api: GraphicsApi::Vulkan, resource: "RendererAPI" })
    ));
}

#[test]
fn test_second_setup_on_same_context_is_rejected() {
    let (context, log) = mock_context(GraphicsApi::Vulkan, false);
    let mut first = RenderCommand::setup_renderer_api(&context).unwrap();
    assert!(context.has_renderer_api());

    let second = RenderCommand::setup_renderer_api(&context);
    let from_clone = RenderCommand::setup_renderer_api(&context.clone());
    first.init().unwrap();

    assert!(matches!(second, Err(Error::InitializationFailed(_))));
    assert!(matches!(from_clone, Err(Error::InitializationFailed(_))));
    assert_eq!(calls(&log), vec!["create_renderer_api", "bootstrap_pipelines", "init"]);
}

#[test]
fn test_failed_setup_can_be_retried() {
    let (context, _log) = mock_context(GraphicsApi::D3D12, true);
    assert!(RenderCommand::setup_renderer_api(&context).is_err());
    assert!(!context.has_renderer_api());
    // Still failing bootstrap, but the slot is free again: same error, not a lifecycle one
    assert!(matches!(RenderCommand::setup_renderer_api(&context), Err(Error::BackendError(_))));
}

// ============================================================================
// LIFECYCLE TESTS
// ============================================================================

#[test]
fn test_init_once() {
    let (context, _log) = mock_context(GraphicsApi::OpenGL, false);
    let mut command = RenderCommand::setup_renderer_api(&context).unwrap();
    command.init().unwrap();
    assert!(command.is_initialized());
    assert!(matches!(command.init(), Err(Error::InitializationFailed(_))));
}

#[test]
fn test_calls_before_init_are_rejected() {
    let (context, log) = mock_context(GraphicsApi::OpenGL, false);
    let mut command = RenderCommand::setup_renderer_api(&context).unwrap();
    let vertex_array = MockVertexArray::new(log.clone());

    assert!(matches!(command.clear(), Err(Error::InitializationFailed(_))));
    assert!(matches!(command.set_viewport(0, 0, 1, 1), Err(Error::InitializationFailed(_))));
    assert!(matches!(command.draw_array(&vertex_array, 3), Err(Error::InitializationFailed(_))));
    assert_eq!(calls(&log), vec!["create_renderer_api"]);
}

// ============================================================================
// FORWARDING TESTS
// ============================================================================

#[test]
fn test_calls_are_forwarded_in_order() {
    let (context, log) = mock_context(GraphicsApi::OpenGL, false);
    let mut command = RenderCommand::setup_renderer_api(&context).unwrap();
    command.init().unwrap();

    command.set_viewport(0, 0, 800, 600).unwrap();
    command.set_clear_color(Vec4::new(0.5, 0.25, 0.0, 1.0)).unwrap();
    command.clear().unwrap();
    command.clear_depth().unwrap();
    command.set_depth_test(true).unwrap();
    command.set_depth_func(DepthFunc::LessEqual).unwrap();

    assert_eq!(
        calls(&log),
        vec![
            "create_renderer_api",
            "init",
            "set_viewport(0, 0, 800, 600)",
            "set_clear_color(0.5, 0.25, 0, 1)",
            "clear",
            "clear_depth",
            "set_depth_test(true)",
            "set_depth_func(LessEqual)",
        ]
    );
}

#[test]
fn test_draw_indexed_zero_uses_index_buffer_count() {
    let (context, log) = mock_context(GraphicsApi::OpenGL, false);
    let mut command = RenderCommand::setup_renderer_api(&context).unwrap();
    command.init().unwrap();

    let mut vertex_array = MockVertexArray::new(log.clone());
    vertex_array.set_index_buffer(Arc::new(MockIndexBuffer::new(log.clone(), 36)));

    command.draw_indexed(&vertex_array, 0).unwrap();
    command.draw_indexed(&vertex_array, 6).unwrap();

    let log = calls(&log);
    assert!(log.contains(&"draw_indexed(36)".to_string()));
    assert!(log.contains(&"draw_indexed(6)".to_string()));
}

#[test]
fn test_draw_indexed_without_index_buffer() {
    let (context, log) = mock_context(GraphicsApi::OpenGL, false);
    let mut command = RenderCommand::setup_renderer_api(&context).unwrap();
    command.init().unwrap();

    let vertex_array = MockVertexArray::new(log);
    assert!(matches!(command.draw_indexed(&vertex_array, 0), Err(Error::InvalidResource(_))));
}
