//! # Herald
//!
//! A capability-injected command bot core for chat platforms.
//!
//! ## Overview
//!
//! Herald turns decoded gateway message events into command invocations
//! and destination-tagged replies. The core holds the only decision logic
//! in the system; the gateway connection, permission resolution, and
//! message delivery are external collaborators reached through injected
//! capabilities.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌────────────┐     ┌──────────────────┐
//! │   Gateway   │────▶│ Dispatcher │────▶│ Registry + Gate  │
//! │ (external)  │     │            │     │    + Handlers    │
//! └─────────────┘     └─────┬──────┘     └──────────────────┘
//!                           │ replies
//!                           ▼
//!                     ┌────────────┐
//!                     │  Delivery  │
//!                     │ (external) │
//!                     └────────────┘
//! ```
//!
//! - **Runtime**: loads configuration, initializes logging, registers
//!   commands, wires capabilities
//! - **Dispatcher**: the per-event state machine
//! - **Capabilities**: delivery and permission seams the deployment
//!   implements
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use herald::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let runtime = HeraldRuntime::builder()
//!         .delivery(delivery_adapter)
//!         .build()?;
//!
//!     runtime.run(event_stream).await;
//!     Ok(())
//! }
//! ```

pub use herald_core as core;
pub use herald_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use herald::prelude::*;
/// ```
pub mod prelude {
    // Runtime - main entry point
    pub use herald_runtime::{HeraldConfig, HeraldRuntime, RuntimeBuilder};

    // Event and reply models
    pub use herald_core::{
        Destination, MemberPermissions, MessageEvent, Reply, ReplyTarget,
    };

    // Command registration
    pub use herald_core::{CommandDescriptor, CommandHandler, HandlerResult, handler_fn};

    // Capability seams
    pub use herald_core::{
        DeliveryCapability, DeliveryResult, EventPermissions, PermissionCapability,
        PermissionResult,
    };

    // Dispatch
    pub use herald_core::{DispatchOutcome, Dispatcher};
}
