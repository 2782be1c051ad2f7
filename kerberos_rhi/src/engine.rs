//! Kerberos Engine - process-wide logger and graphics API selection
//!
//! The graphics API is chosen once per process. `Engine::select_api` builds the
//! [`RenderContext`] for the requested API and keeps it as the global
//! selection, so later code can fetch it with `Engine::render_context`.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::error::{Result, Error};
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
use crate::renderer::{BackendRegistry, GraphicsApi, RenderContext, RendererConfig};

// ===== INTERNAL STATE =====

static ENGINE_STATE: OnceLock<EngineState> = OnceLock::new();

static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

struct EngineState {
    /// The selected render context (None until `select_api` succeeds)
    render_context: RwLock<Option<RenderContext>>,
}

impl EngineState {
    fn new() -> Self {
        Self {
            render_context: RwLock::new(None),
        }
    }
}

fn logger() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::default())))
}

// ===== PUBLIC API =====

/// Engine singleton manager
///
/// # Example
///
/// ```no_run
/// use kerberos_rhi::kerberos::Engine;
/// use kerberos_rhi::kerberos::render::{BackendRegistry, GraphicsApi, RendererConfig};
///
/// let mut registry = BackendRegistry::new();
/// // kerberos_rhi_opengl::register(&mut registry, gl)?;
///
/// Engine::initialize()?;
/// let context = Engine::select_api(RendererConfig::for_api(GraphicsApi::OpenGL), &registry)?;
/// // ... create buffers, pipelines and passes through `context`
/// Engine::shutdown();
/// # Ok::<(), kerberos_rhi::kerberos::Error>(())
/// ```
pub struct Engine;

impl Engine {
    fn log_and_return_error(error: Error) -> Error {
        match &error {
            Error::InitializationFailed(msg) => {
                crate::engine_error!("kerberos::Engine", "Initialization failed: {}", msg);
            }
            _ => {
                crate::engine_error!("kerberos::Engine", "Engine error: {}", error);
            }
        }
        error
    }

    fn state() -> Result<&'static EngineState> {
        ENGINE_STATE.get()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("Engine not initialized. Call Engine::initialize() first.".to_string())
            ))
    }

    /// Initialize the engine (idempotent)
    pub fn initialize() -> Result<()> {
        ENGINE_STATE.get_or_init(EngineState::new);
        Ok(())
    }

    /// Drop the selected render context
    ///
    /// Handles created from the context stay valid until dropped. A new API
    /// can be selected afterwards.
    pub fn shutdown() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut context) = state.render_context.write() {
                if context.take().is_some() {
                    crate::engine_info!("kerberos::Engine", "Render context released");
                }
            }
        }
    }

    /// Select the graphics API for the process
    ///
    /// Builds a [`RenderContext`] from `config` using the backends of
    /// `registry` and stores it as the global selection.
    ///
    /// # Errors
    ///
    /// - the engine is not initialized
    /// - an API was already selected (call `shutdown` first)
    /// - `config.api` is `None` or has no registered backend
    pub fn select_api(config: RendererConfig, registry: &BackendRegistry) -> Result<RenderContext> {
        let state = Self::state()?;

        let mut lock = state.render_context.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("Render context lock poisoned".to_string())
            ))?;

        if let Some(current) = lock.as_ref() {
            return Err(Self::log_and_return_error(
                Error::InitializationFailed(format!(
                    "Graphics API already selected ({}). Call Engine::shutdown() first.",
                    current.api()
                ))
            ));
        }

        let context = RenderContext::new(config, registry)?;
        *lock = Some(context.clone());

        crate::engine_info!("kerberos::Engine", "Graphics API selected: {}", context.api());

        Ok(context)
    }

    /// The render context selected with `select_api`
    pub fn render_context() -> Result<RenderContext> {
        let state = Self::state()?;

        let lock = state.render_context.read()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("Render context lock poisoned".to_string())
            ))?;

        lock.clone()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("No graphics API selected. Call Engine::select_api() first.".to_string())
            ))
    }

    /// The selected graphics API, or `GraphicsApi::None` when nothing is selected
    pub fn selected_api() -> GraphicsApi {
        ENGINE_STATE.get()
            .and_then(|state| state.render_context.read().ok()
                .and_then(|lock| lock.as_ref().map(RenderContext::api)))
            .unwrap_or(GraphicsApi::None)
    }

    #[cfg(test)]
    pub fn reset_for_testing() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut context) = state.render_context.write() {
                *context = None;
            }
        }
    }

    // ===== LOGGING API =====

    /// Replace the engine logger
    pub fn set_logger<L: Logger + 'static>(logger_impl: L) {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(logger_impl);
        }
    }

    /// Restore the [`DefaultLogger`]
    pub fn reset_logger() {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(DefaultLogger::default());
        }
    }

    /// Log without call-site information (used by `engine_trace!` to `engine_warn!`)
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if let Ok(lock) = logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Log with call-site information (used by `engine_error!`)
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if let Ok(lock) = logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
