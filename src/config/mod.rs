//! Configuration module for connpool
//!
//! This module provides configuration types and parsing for pools
//! built from a TOML file.

mod pool;
mod transport;

pub use pool::PoolConfig;
pub use transport::TcpConfig;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Pool name, a generated `conn-pool-<N>` name is used when absent
    #[serde(default)]
    pub name: Option<String>,

    /// Address dialed by the TCP connector (e.g., "db.internal:5432")
    #[serde(default)]
    pub remote_addr: Option<String>,

    /// Pool sizing and idle expiry
    #[serde(default)]
    pub pool: PoolConfig,

    /// Socket settings for dialed connections
    #[serde(default)]
    pub tcp: TcpConfig,
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

    parse_config(&content)
}

/// Parse configuration from a TOML string
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse configuration")?;
    config.pool.validate().map_err(|e| anyhow!("Invalid pool configuration: {}", e))?;
    Ok(config)
}
