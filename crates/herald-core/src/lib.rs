//! # Herald Core
//!
//! The core dispatch engine of the Herald chat bot.
//!
//! This crate turns decoded gateway message events into command invocations
//! and outbound replies. It is the only part of the system with decision
//! logic; the gateway connection, permission resolution, and message
//! delivery are external collaborators reached through injected
//! capabilities.
//!
//! ## Architecture Layers
//!
//! ### Foundation Layer
//!
//! Core data types:
//! - **Event Model**: the inbound gateway event ([`MessageEvent`]) and the
//!   opaque permission handle it carries ([`MemberPermissions`])
//! - **Reply Model**: destination-tagged replies ([`Reply`], [`Destination`])
//!   and their resolved addresses ([`ReplyTarget`])
//! - **Errors**: one error type per failure domain
//!
//! ### Framework Layer
//!
//! Event processing and routing:
//! - **Tokenizer**: whitespace splitting of message content ([`tokenize`])
//! - **Command Registry**: startup-built name lookup ([`CommandRegistry`])
//! - **Permission Gate**: allow/deny over privileged commands
//!   ([`PermissionGate`])
//! - **Dispatcher**: the per-event state machine ([`Dispatcher`])
//!
//! ### Integration Layer
//!
//! External collaborator seams:
//! - **Delivery**: outbound sends ([`DeliveryCapability`])
//! - **Permissions**: administrator lookup ([`PermissionCapability`])
//!
//! ## Control Flow
//!
//! ```text
//! ┌─────────────┐     ┌────────────┐     ┌──────────┐     ┌──────────┐
//! │   Gateway   │────▶│ Dispatcher │────▶│ Registry │────▶│ Handler  │
//! │ (external)  │     │            │     │  + Gate  │     │          │
//! └─────────────┘     └─────┬──────┘     └──────────┘     └────┬─────┘
//!                           │            replies               │
//!                           ▼◀──────────────────────────────────┘
//!                     ┌────────────┐
//!                     │  Delivery  │
//!                     │ (external) │
//!                     └────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use herald_core::{
//!     CommandDescriptor, CommandRegistry, Dispatcher, EventPermissions, Reply, handler_fn,
//! };
//!
//! let mut registry = CommandRegistry::new();
//! registry.register(CommandDescriptor::new(
//!     "!ping",
//!     false,
//!     handler_fn(|_event, _args| async { Ok(vec![Reply::source_channel("Pong!")]) }),
//! ))?;
//!
//! let dispatcher = Dispatcher::new(Arc::new(registry), delivery, Arc::new(EventPermissions));
//! let outcome = dispatcher.on_message(event).await;
//! ```

// Architectural layers
pub mod foundation;
pub mod framework;
pub mod integration;

// Re-export foundation types
pub use foundation::{
    DeliveryError, DeliveryResult, Destination, HandlerError, HandlerResult, MemberPermissions,
    MessageEvent, PermissionError, PermissionResult, RegistryError, RegistryResult, Reply,
    ReplyTarget,
};

// Re-export framework types
pub use framework::{
    Authorization, BoxedCommandHandler, CommandDescriptor, CommandHandler, CommandRegistry,
    Dispatcher, DispatchOutcome, HANDLER_FAILURE_TEXT, PERMISSION_DENIED_TEXT, PermissionGate,
    handler_fn, tokenize,
};

// Re-export integration types
pub use integration::{
    BoxedDelivery, BoxedPermissionLookup, DeliveryCapability, EventPermissions,
    PermissionCapability,
};

/// Prelude for common imports.
pub mod prelude {
    pub use super::foundation::*;
    pub use super::framework::{
        Authorization, CommandDescriptor, CommandHandler, CommandRegistry, DispatchOutcome,
        Dispatcher, PermissionGate, handler_fn, tokenize,
    };
    pub use super::integration::{DeliveryCapability, EventPermissions, PermissionCapability};
}
