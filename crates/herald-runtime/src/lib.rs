//! # Herald Runtime
//!
//! Startup orchestration for the Herald chat bot.
//!
//! This crate owns everything that happens before the first event is
//! dispatched: configuration loading, logging initialization, built-in
//! command registration, and wiring the external capabilities into a
//! dispatcher. The result is a [`HeraldRuntime`] the gateway collaborator
//! feeds decoded events into.
//!
//! ```rust,ignore
//! use herald_runtime::HeraldRuntime;
//!
//! let runtime = HeraldRuntime::builder()
//!     .delivery(delivery_adapter)
//!     .build()?;
//!
//! runtime.run(event_stream).await;
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;

pub use commands::{PING_TEXT, RULES_TEXT, register_builtins};
pub use config::{CommandConfig, ConfigError, ConfigLoader, HeraldConfig, LoggingConfig};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::LoggingBuilder;
pub use runtime::{HeraldRuntime, RuntimeBuilder};
