//! Provider configuration
//!
//! Settings come from the environment:
//! - `INFOBLOX_SERVER`, `INFOBLOX_USERNAME`, `INFOBLOX_PASSWORD` (required)
//! - `WAPI_VERSION` (default `2.7`), `PORT` (default `443`)
//! - `SSLMODE`: verify the appliance certificate (default `false`)
//! - `CONNECT_TIMEOUT` in seconds (default `60`), `POOL_CONNECTIONS` (default `10`)

use crate::error::{ProviderError, Result};
use ibclient::{HostConfig, TransportConfig, WapiClient};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_WAPI_VERSION: &str = "2.7";
pub const DEFAULT_PORT: u16 = 443;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_POOL_CONNECTIONS: usize = 10;

/// Connection settings of the provider
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Grid master host name or address
    pub server: String,
    pub username: String,
    pub password: String,
    #[serde(default = "default_wapi_version")]
    pub wapi_version: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Verify the appliance's TLS certificate
    #[serde(default)]
    pub ssl_verify: bool,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_pool_connections")]
    pub pool_connections: usize,
}

fn default_wapi_version() -> String {
    DEFAULT_WAPI_VERSION.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_pool_connections() -> usize {
    DEFAULT_POOL_CONNECTIONS
}

// The password never reaches logs.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("server", &self.server)
            .field("username", &self.username)
            .field("password", &"***")
            .field("wapi_version", &self.wapi_version)
            .field("port", &self.port)
            .field("ssl_verify", &self.ssl_verify)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("pool_connections", &self.pool_connections)
            .finish()
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key).ok_or_else(|| ProviderError::InvalidConfig(format!("{} environment variable is required", key)))
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ProviderError::InvalidConfig(format!("{} has an invalid value: '{}'", key, raw))),
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        _ => Err(ProviderError::InvalidConfig(format!("{} must be true or false, got '{}'", key, raw))),
    }
}

impl ProviderConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = Self {
            server: required(&lookup, "INFOBLOX_SERVER")?,
            username: required(&lookup, "INFOBLOX_USERNAME")?,
            password: required(&lookup, "INFOBLOX_PASSWORD")?,
            wapi_version: lookup("WAPI_VERSION").unwrap_or_else(default_wapi_version),
            port: parsed(&lookup, "PORT", DEFAULT_PORT)?,
            ssl_verify: lookup("SSLMODE").map(|raw| parse_flag("SSLMODE", &raw)).transpose()?.unwrap_or(false),
            connect_timeout_secs: parsed(&lookup, "CONNECT_TIMEOUT", DEFAULT_CONNECT_TIMEOUT_SECS)?,
            pool_connections: parsed(&lookup, "POOL_CONNECTIONS", DEFAULT_POOL_CONNECTIONS)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.trim().is_empty() {
            return Err(ProviderError::InvalidConfig("server cannot be empty".to_string()));
        }
        if self.username.is_empty() || self.password.is_empty() {
            return Err(ProviderError::InvalidConfig("username and password cannot be empty".to_string()));
        }
        if self.wapi_version.trim().is_empty() {
            return Err(ProviderError::InvalidConfig("WAPI version cannot be empty".to_string()));
        }
        if self.port == 0 {
            return Err(ProviderError::InvalidConfig("port must be > 0".to_string()));
        }
        if self.connect_timeout_secs == 0 {
            return Err(ProviderError::InvalidConfig("connect timeout must be > 0".to_string()));
        }
        if self.pool_connections == 0 {
            return Err(ProviderError::InvalidConfig("pool connections must be > 0".to_string()));
        }
        Ok(())
    }

    /// Grid master address and credentials for the connector
    pub fn host_config(&self) -> HostConfig {
        HostConfig {
            host: self.server.clone(),
            version: self.wapi_version.clone(),
            port: self.port.to_string(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    /// TLS and connection settings for the connector
    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            ssl_verify: self.ssl_verify,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            pool_connections: self.pool_connections,
        }
    }

    /// HTTP connector for the configured grid master
    pub fn connect(&self) -> Result<WapiClient> {
        Ok(WapiClient::new(self.host_config(), self.transport_config())?)
    }
}
