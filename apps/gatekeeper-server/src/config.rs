//! Application configuration.
//!
//! Layers, lowest precedence first: built-in defaults, the YAML file given on
//! the command line, then `GATEKEEPER__`-prefixed environment variables where
//! `__` separates nesting levels (`GATEKEEPER__SERVER__BIND_ADDR`).

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result, bail};
use authn_gate::GateConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use permission_registry_sdk::Permission;
use serde::{Deserialize, Serialize};
use static_token_authenticator::StaticTokenConfig;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "GATEKEEPER__";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub gate: GateConfig,

    /// Static token authenticator; not registered when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_token: Option<StaticTokenConfig>,

    /// Permissions registered at startup.
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8087)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl AppConfig {
    /// Load configuration from defaults, an optional YAML file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` does not exist or the merged configuration
    /// does not deserialize.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::figment(path)?
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("invalid gatekeeper configuration")
    }

    /// Load configuration ignoring the environment.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::load`].
    pub fn load_file(path: &Path) -> Result<Self> {
        Self::figment(Some(path))?
            .extract()
            .context("invalid gatekeeper configuration")
    }

    fn figment(path: Option<&Path>) -> Result<Figment> {
        let figment = Figment::from(Serialized::defaults(Self::default()));
        let Some(path) = path else {
            return Ok(figment);
        };
        if !path.is_file() {
            bail!("config file not found: {}", path.display());
        }
        Ok(figment.merge(Yaml::file(path)))
    }
}
