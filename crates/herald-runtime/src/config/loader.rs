//! Configuration loader using figment.
//!
//! Layered loading, later sources overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. Configuration file (`herald.toml` / `config.toml`) from the search
//!    paths, or a specific file set via [`ConfigLoader::file`]
//! 3. Environment variables (`HERALD_*`, `__` as nesting separator)
//! 4. Programmatic overrides via [`ConfigLoader::merge`]
//!
//! # Environment Variable Mapping
//!
//! - `HERALD_LOGGING__LEVEL=debug` → `logging.level = "debug"`
//! - `HERALD_COMMANDS__PREFIX=?` → `commands.prefix = "?"`
//!
//! # Example
//!
//! ```rust,ignore
//! use herald_runtime::config::ConfigLoader;
//!
//! // Simple loading from default locations
//! let config = ConfigLoader::new().load()?;
//!
//! // Load from a specific file with env overrides
//! let config = ConfigLoader::new()
//!     .file("./config/herald.toml")
//!     .with_env()
//!     .load()?;
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use tracing::{debug, info, trace, warn};

use super::error::{ConfigError, ConfigResult};
use super::schema::HeraldConfig;

/// File names searched, in order, within each search path.
const CONFIG_FILE_NAMES: &[&str] = &["herald.toml", "config.toml"];

/// Configuration loader with figment-based multi-source support.
pub struct ConfigLoader {
    /// Base figment instance holding programmatic overrides.
    figment: Figment,
    /// Search paths for configuration files.
    search_paths: Vec<PathBuf>,
    /// Whether to load environment variables.
    load_env: bool,
    /// Specific config file to load (overrides search).
    config_file: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a new configuration loader with defaults.
    pub fn new() -> Self {
        Self {
            figment: Figment::new(),
            search_paths: Vec::new(),
            load_env: true,
            config_file: None,
        }
    }

    /// Adds a search path for configuration files.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Adds the current directory to search paths.
    pub fn with_current_dir(self) -> Self {
        if let Ok(cwd) = std::env::current_dir() {
            self.search_path(cwd)
        } else {
            self
        }
    }

    /// Adds the user config directory to search paths.
    pub fn with_user_config_dir(self) -> Self {
        if let Some(config_dir) = dirs::config_dir() {
            self.search_path(config_dir.join("herald"))
        } else {
            self
        }
    }

    /// Sets a specific configuration file to load.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enables loading environment variables (default: true).
    pub fn with_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Merges additional configuration programmatically.
    pub fn merge(mut self, config: HeraldConfig) -> Self {
        self.figment = self.figment.merge(Serialized::defaults(config));
        self
    }

    /// Loads and returns the configuration.
    pub fn load(self) -> ConfigResult<HeraldConfig> {
        let figment = self.build_figment()?;

        let config: HeraldConfig = figment.extract().map_err(|e| {
            ConfigError::ParseError(format!("failed to extract configuration: {e}"))
        })?;

        debug!(
            logging_level = %config.logging.level,
            command_prefix = %config.commands.prefix,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Builds the figment instance with all sources.
    fn build_figment(mut self) -> ConfigResult<Figment> {
        // Start with defaults
        let mut figment = Figment::from(Serialized::defaults(HeraldConfig::default()));

        // Merge user's pre-configured figment
        let user_figment = std::mem::take(&mut self.figment);
        figment = figment.merge(user_figment);

        // Load config files
        if let Some(path) = &self.config_file {
            if path.exists() {
                info!(path = %path.display(), "Loading configuration file");
                figment = figment.merge(Toml::file(path));
            } else {
                return Err(ConfigError::FileNotFound(path.clone()));
            }
        } else {
            figment = self.load_config_files(figment);
        }

        // Load environment variables
        if self.load_env {
            trace!("Loading environment variables with HERALD_ prefix");
            figment = figment.merge(
                Env::prefixed("HERALD_")
                    .split("__")
                    .map(|key| key.as_str().replace("__", ".").into()),
            );
        }

        Ok(figment)
    }

    /// Resolves the effective list of search paths.
    fn resolve_search_paths(&self) -> Vec<PathBuf> {
        if self.search_paths.is_empty() {
            let mut paths = Vec::new();
            if let Ok(cwd) = std::env::current_dir() {
                paths.push(cwd);
            }
            if let Some(config_dir) = dirs::config_dir() {
                paths.push(config_dir.join("herald"));
            }
            paths
        } else {
            self.search_paths.clone()
        }
    }

    /// Searches for and loads the first configuration file found.
    fn load_config_files(&self, mut figment: Figment) -> Figment {
        for search_path in self.resolve_search_paths() {
            for file_name in CONFIG_FILE_NAMES {
                let path = search_path.join(file_name);
                if path.exists() {
                    info!(path = %path.display(), "Loading configuration file");
                    figment = figment.merge(Toml::file(path));
                    return figment;
                }
            }
        }

        warn!("No configuration file found, using defaults");
        figment
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{LogLevel, LoggingConfig};

    #[test]
    fn test_default_config() {
        let config = ConfigLoader::new()
            .search_path("/nonexistent")
            .without_env()
            .load()
            .unwrap();

        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.commands.prefix, "!");
    }

    #[test]
    fn test_missing_explicit_file_errors() {
        let err = ConfigLoader::new()
            .file("/nonexistent/herald.toml")
            .without_env()
            .load()
            .unwrap_err();

        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_programmatic_merge_overrides_defaults() {
        let config = ConfigLoader::new()
            .search_path("/nonexistent")
            .without_env()
            .merge(HeraldConfig {
                logging: LoggingConfig {
                    level: LogLevel::Debug,
                    ..Default::default()
                },
                ..Default::default()
            })
            .load()
            .unwrap();

        assert_eq!(config.logging.level, LogLevel::Debug);
    }
}
