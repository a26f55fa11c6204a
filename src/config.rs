//! Service configuration
//!
//! Layered as: built-in defaults, then an optional TOML file, then
//! `STOREFRONT_*` environment variables.

use crate::catalog::loader::CatalogSource;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;

/// File read when no explicit config path is given
pub const DEFAULT_CONFIG_FILE: &str = "storefront.toml";
/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "STOREFRONT_CONFIG";

#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub cart: CartConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub source: CatalogSource,
}

#[derive(Clone, Debug)]
pub struct CartConfig {
    /// How long the "added to cart" notice stays up
    pub notice_ms: u64,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_address: "0.0.0.0".to_string(),
                port: 8000,
            },
            catalog: CatalogConfig {
                source: CatalogSource::File(PathBuf::from("public/products.json")),
            },
            cart: CartConfig { notice_ms: 2000 },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Compact,
            },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

// =============================================================================
// File patch
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigPatch {
    server: Option<ServerPatch>,
    catalog: Option<CatalogPatch>,
    cart: Option<CartPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    bind_address: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    source: Option<CatalogSource>,
}

#[derive(Debug, Default, Deserialize)]
struct CartPatch {
    notice_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

impl StoreConfig {
    /// Loads configuration from the process environment and, if present, the
    /// config file it points at (or `storefront.toml` in the working dir).
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Same as [`StoreConfig::load`] with a custom environment lookup.
    pub fn load_with<F>(env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let path = env(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .or_else(|| Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()));
        if let Some(path) = path {
            config.apply_patch(read_patch(&path)?);
        }

        config.apply_env_overrides(env)?;
        config.validate()?;
        Ok(config)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.cart.notice_ms)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(server) = patch.server {
            if let Some(bind_address) = server.bind_address {
                self.server.bind_address = bind_address;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
        }

        if let Some(source) = patch.catalog.and_then(|c| c.source) {
            self.catalog.source = source;
        }

        if let Some(notice_ms) = patch.cart.and_then(|c| c.notice_ms) {
            self.cart.notice_ms = notice_ms;
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides<F>(&mut self, env: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = env("STOREFRONT_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some(value) = env("STOREFRONT_PORT") {
            self.server.port = parse_env("STOREFRONT_PORT", &value)?;
        }
        if let Some(value) = env("STOREFRONT_CATALOG") {
            self.catalog.source = value.parse().map_err(|_| ConfigError::InvalidEnvOverride {
                key: "STOREFRONT_CATALOG".to_string(),
                value,
            })?;
        }
        if let Some(value) = env("STOREFRONT_NOTICE_MS") {
            self.cart.notice_ms = parse_env("STOREFRONT_NOTICE_MS", &value)?;
        }
        if let Some(value) = env("STOREFRONT_LOG_LEVEL") {
            self.logging.level = value;
        }
        if let Some(value) = env("STOREFRONT_LOG_FORMAT") {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind_address.trim().is_empty() {
            return Err(ConfigError::Validation(
                "server.bind_address must not be empty".to_string(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&raw).map_err(|source| ConfigError::ParseFile {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnvOverride {
            key: key.to_string(),
            value: value.to_string(),
        })
}
