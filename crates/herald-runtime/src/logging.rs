//! Logging utilities for the Herald runtime.
//!
//! Unified logging setup using `tracing` and `tracing-subscriber`.
//!
//! # Configuration-Based Initialization
//!
//! ```rust,ignore
//! use herald_runtime::config::ConfigLoader;
//! use herald_runtime::logging;
//!
//! let config = ConfigLoader::new().load()?;
//! logging::init_from_config(&config.logging);
//! ```
//!
//! # Manual Initialization
//!
//! ```rust,ignore
//! use herald_runtime::logging::LoggingBuilder;
//! use tracing::Level;
//!
//! LoggingBuilder::new()
//!     .with_level(Level::DEBUG)
//!     .directive("herald_core=trace")
//!     .init();
//! ```

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::{LogFormat, LoggingConfig};

/// Initializes logging from a [`LoggingConfig`].
///
/// Uses `try_init` internally, so calling this after logging has already
/// been initialized is a no-op rather than a panic.
pub fn init_from_config(config: &LoggingConfig) {
    let _ = LoggingBuilder::from_config(config).try_init();
}

/// A builder for configuring logging.
#[derive(Default)]
pub struct LoggingBuilder {
    directives: Vec<String>,
    level: Option<tracing::Level>,
    format: LogFormat,
    with_target: bool,
}

impl LoggingBuilder {
    /// Creates a new logging builder.
    pub fn new() -> Self {
        Self {
            format: LogFormat::Compact,
            with_target: true,
            ..Default::default()
        }
    }

    /// Creates a builder from a [`LoggingConfig`].
    pub fn from_config(config: &LoggingConfig) -> Self {
        let mut builder = Self::new();
        builder.level = Some(config.level.to_tracing_level());
        builder.format = config.format;
        builder
    }

    /// Sets the global log level.
    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Adds a filter directive, e.g. `"herald_core=debug"`.
    pub fn directive(mut self, directive: &str) -> Self {
        self.directives.push(directive.to_string());
        self
    }

    /// Sets the output format.
    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Includes the target (module path) in log output.
    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    /// Builds the filter from the level and directives.
    ///
    /// A `RUST_LOG` environment variable, when present, takes precedence
    /// over the configured base level.
    fn build_filter(&self) -> EnvFilter {
        let base_level = self.level.unwrap_or(tracing::Level::INFO);
        let base_filter = base_level.to_string().to_lowercase();

        let mut filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&base_filter));

        for directive in &self.directives {
            if let Ok(d) = directive.parse() {
                filter = filter.add_directive(d);
            }
        }

        filter
    }

    /// Initializes the logging system.
    pub fn init(self) {
        let _ = self.try_init();
    }

    /// Tries to initialize the logging system, returning an error on
    /// failure (e.g. a subscriber is already installed).
    pub fn try_init(self) -> Result<(), TryInitError> {
        let filter = self.build_filter();

        match self.format {
            LogFormat::Compact => {
                let layer = fmt::layer().compact().with_target(self.with_target);
                tracing_subscriber::registry()
                    .with(layer)
                    .with(filter)
                    .try_init()
            }
            LogFormat::Full => {
                let layer = fmt::layer().with_target(self.with_target);
                tracing_subscriber::registry()
                    .with(layer)
                    .with(filter)
                    .try_init()
            }
            LogFormat::Pretty => {
                let layer = fmt::layer().pretty().with_target(self.with_target);
                tracing_subscriber::registry()
                    .with(layer)
                    .with(filter)
                    .try_init()
            }
        }
    }
}
