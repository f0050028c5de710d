//! Connection pool module for connpool
//!
//! This module provides the pool engine: a bounded idle buffer that grows on
//! demand, the wrapper that routes `close` back into the pool, and the
//! counters behind the statistics view.

mod counter;
mod guard;
mod idle;
mod manager;
mod naming;
mod stats;

pub use counter::Counter;
pub use guard::PooledConn;
pub use manager::{PoolBuilder, PoolManager};
pub use naming::{NameSequence, DEFAULT_NAME_PREFIX};
pub use stats::{Available, PoolStats, Stats, StatsSnapshot};

use crate::config::Config;
use crate::error::{PoolError, Result};
use crate::transport::TcpConnector;
use std::sync::Arc;

/// Create a TCP connection pool from a loaded configuration
pub fn create_tcp_pool(config: &Config) -> Result<Arc<PoolManager<TcpConnector>>> {
    let addr = config
        .remote_addr
        .as_deref()
        .ok_or_else(|| PoolError::Config("remote_addr is required for a TCP pool".to_string()))?;

    let connector = TcpConnector::new(addr, &config.tcp);
    let mut builder = PoolManager::builder(config.pool.clone(), connector);
    if let Some(name) = &config.name {
        builder = builder.name(name.clone());
    }
    builder.build()
}
