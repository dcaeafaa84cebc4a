//! Runtime error types.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while assembling or running the runtime.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Configuration loading failed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Command registration failed.
    #[error("command registration failed: {0}")]
    Registry(#[from] herald_core::RegistryError),

    /// No delivery capability was supplied to the builder.
    #[error("no delivery capability configured")]
    MissingDelivery,
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
