//! Configuration module for the Herald runtime.
//!
//! Provides layered TOML + environment configuration loading for logging
//! and command settings.

pub mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use schema::{CommandConfig, HeraldConfig, LogFormat, LogLevel, LoggingConfig};
