//! Connection pool configuration
//!
//! Defines sizing and idle-expiry settings for a connection pool.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of connections created at startup
fn default_min_size() -> usize {
    2
}

/// Default upper bound on connections (idle + active)
fn default_max_size() -> usize {
    10
}

/// Default number of connections created per growth step
fn default_increment() -> usize {
    2
}

/// Default idle timeout in milliseconds
fn default_idle_timeout_ms() -> u64 {
    300_000
}

/// Connection pool configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Connections created eagerly when the pool starts
    #[serde(default = "default_min_size")]
    pub min_size: usize,

    /// Maximum number of connections accounted to the pool
    #[serde(default = "default_max_size")]
    pub max_size: usize,

    /// Connections created per growth step when the idle buffer is empty
    #[serde(default = "default_increment")]
    pub increment: usize,

    /// Released connections idle for longer than this are discarded on
    /// retrieval. Zero discards every released connection.
    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig {
            min_size: default_min_size(),
            max_size: default_max_size(),
            increment: default_increment(),
            idle_timeout_ms: default_idle_timeout_ms(),
        }
    }
}

impl PoolConfig {
    /// Create a pool configuration from explicit values
    pub fn new(min_size: usize, max_size: usize, increment: usize, idle_timeout: Duration) -> Self {
        PoolConfig {
            min_size,
            max_size,
            increment,
            idle_timeout_ms: idle_timeout.as_millis() as u64,
        }
    }

    /// Set the minimum pool size
    pub fn with_min_size(mut self, size: usize) -> Self {
        self.min_size = size;
        self
    }

    /// Set the maximum pool size
    pub fn with_max_size(mut self, size: usize) -> Self {
        self.max_size = size;
        self
    }

    /// Set the growth step
    pub fn with_increment(mut self, increment: usize) -> Self {
        self.increment = increment;
        self
    }

    /// Set the idle timeout
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Get the idle timeout
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }

    /// Validate the pool configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_size == 0 {
            return Err("max_size must be greater than 0".to_string());
        }
        if self.min_size > self.max_size {
            return Err("min_size cannot be greater than max_size".to_string());
        }
        if self.increment > self.max_size - self.min_size {
            return Err(format!(
                "increment cannot exceed max_size - min_size ({})",
                self.max_size - self.min_size
            ));
        }
        Ok(())
    }
}
