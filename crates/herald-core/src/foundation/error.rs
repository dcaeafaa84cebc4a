//! Unified error types for the Herald core.
//!
//! One error type per failure domain. All of them are absorbed at or below
//! the dispatcher boundary; no single event's failure may terminate the
//! surrounding process.

use thiserror::Error;

// =============================================================================
// Registry Errors
// =============================================================================

/// Errors raised while populating the command registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A command with this name is already registered.
    ///
    /// Registration rejects rather than overwrites, so a later registration
    /// can never silently shadow an earlier one.
    #[error("command '{name}' is already registered")]
    DuplicateCommand {
        /// The contested command name.
        name: String,
    },
}

// =============================================================================
// Handler Errors
// =============================================================================

/// Errors a command handler may surface.
///
/// Handler failures never escape the dispatcher; they are converted into a
/// single generic failure reply to the source channel.
#[derive(Debug, Clone, Error)]
pub enum HandlerError {
    /// The handler failed with the given reason.
    #[error("{0}")]
    Failed(String),
}

impl HandlerError {
    /// Creates a handler failure with the given reason.
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }
}

// =============================================================================
// Capability Errors
// =============================================================================

/// Errors reported by the delivery capability.
#[derive(Debug, Clone, Error)]
pub enum DeliveryError {
    /// The transport is not connected.
    #[error("delivery transport not connected")]
    NotConnected,

    /// The send failed.
    #[error("failed to send reply: {0}")]
    SendFailed(String),
}

/// Errors reported by the permission capability.
#[derive(Debug, Clone, Error)]
pub enum PermissionError {
    /// The lookup could not be completed.
    #[error("permission lookup failed: {0}")]
    LookupFailed(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Result type for command handlers.
pub type HandlerResult<T> = Result<T, HandlerError>;

/// Result type for delivery operations.
pub type DeliveryResult<T> = Result<T, DeliveryError>;

/// Result type for permission lookups.
pub type PermissionResult<T> = Result<T, PermissionError>;
