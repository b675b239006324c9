//! Tool settings
//!
//! Precedence: built-in defaults (lowest) -> settings file -> STACKVARS__*
//! environment (highest).

use crate::logging::LoggingConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for the stackvars tooling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings loader.
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings from an optional file with environment overlay.
    pub fn load(path: Option<&Path>) -> Result<Settings, ConfigError> {
        let mut builder = Self::builder_with_defaults()?;
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        let builder = builder.add_source(
            Environment::with_prefix("STACKVARS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );
        builder.build()?.try_deserialize()
    }

    fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let defaults = LoggingConfig::default();
        Config::builder()
            .set_default("logging.enabled", defaults.enabled)?
            .set_default("logging.level", defaults.level)?
            .set_default("logging.format", defaults.format)?
            .set_default("logging.output", defaults.output)?
            .set_default("logging.color", defaults.color)
    }
}
