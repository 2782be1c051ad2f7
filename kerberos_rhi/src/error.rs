//! Error types for the Kerberos render hardware interface
//!
//! Every fallible operation of the RHI returns [`Result`]. Errors are plain
//! values: the code that detects a failure logs it through the engine logger
//! and hands the error back to the caller.

use std::fmt;
use crate::renderer::GraphicsApi;

/// Result type for Kerberos RHI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Kerberos RHI errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The selected graphics API has no implementation for the requested object
    /// (API `None`, backend not registered, or backend lacking that object)
    UnsupportedBackend {
        api: GraphicsApi,
        resource: &'static str,
    },

    /// Lifecycle violation (used before init, initialized twice, API already selected)
    InitializationFailed(String),

    /// Misuse of a handle (invalid data, missing binding, wrong state)
    InvalidResource(String),

    /// A render pass output was requested before the pass was baked
    NotBaked(String),

    /// Native resource failure reported by the backend
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedBackend { api, resource } => {
                write!(f, "Unsupported backend: {} is not implemented for graphics API '{}'", resource, api)
            }
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::NotBaked(msg) => write!(f, "Render pass not baked: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
