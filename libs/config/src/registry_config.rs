//! Registry Configuration Module
//!
//! Loads the initial factory configuration from TOML files with
//! `FACTORY_`-prefixed environment overrides. Addresses stay hex strings here;
//! the factory crate parses them into typed addresses.

use anyhow::{Context, Result};
use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default config location relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/factory.toml";

/// Root configuration of a factory instance
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RegistryConfig {
    /// Initial admin (hex address)
    pub admin: String,

    /// Fee receiver handed to deployed pools (hex address)
    pub fee_receiver: String,

    /// Log filter used by [`crate::init_logging`]
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Initial implementation slots
    #[serde(default)]
    pub implementations: ImplementationConfig,
}

/// Initial template references, keyed by implementation index
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ImplementationConfig {
    /// Plain pool templates: index (decimal string) -> address
    #[serde(default)]
    pub plain: BTreeMap<String, String>,

    /// Metapool templates: index (decimal string) -> address
    #[serde(default)]
    pub meta: BTreeMap<String, String>,

    pub math: Option<String>,
    pub gauge: Option<String>,
    pub views: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl RegistryConfig {
    /// Load configuration from a TOML file with environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        info!("Loading factory config: {:?}", path);

        let config = Config::builder()
            .add_source(File::from(path.as_path()).required(true))
            // FACTORY_ADMIN, FACTORY_IMPLEMENTATIONS__MATH, ...
            .add_source(
                Environment::with_prefix("FACTORY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build factory configuration")?;

        let parsed: Self = config
            .try_deserialize()
            .context("Failed to deserialize factory configuration")?;

        debug!(
            "Factory config loaded: {} plain templates, {} meta templates",
            parsed.implementations.plain.len(),
            parsed.implementations.meta.len()
        );
        Ok(parsed)
    }

    /// Parse configuration embedded as a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse factory configuration")
    }
}

/// Convenience function to load configuration from the default location
pub fn load_config() -> Result<RegistryConfig> {
    RegistryConfig::load(None)
}
