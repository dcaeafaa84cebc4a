//! Framework layer - Command processing and routing.
//!
//! This module contains the core's processing pipeline:
//! - Tokenizer for splitting message content into command tokens
//! - Command registry with startup-time registration
//! - Permission gate over privileged commands
//! - Central dispatcher driving the per-event state machine

pub mod dispatcher;
pub mod gate;
pub mod registry;
pub mod tokenize;

pub use dispatcher::{
    DispatchOutcome, Dispatcher, HANDLER_FAILURE_TEXT, PERMISSION_DENIED_TEXT,
};
pub use gate::{Authorization, PermissionGate};
pub use registry::{
    BoxedCommandHandler, CommandDescriptor, CommandHandler, CommandRegistry, handler_fn,
};
pub use tokenize::tokenize;
