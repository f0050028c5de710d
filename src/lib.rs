//! # connpool - Bounded Elastic Connection Pool
//!
//! connpool keeps a bounded set of live network connections available for
//! reuse so callers do not pay connection-establishment cost on every
//! request.
//!
//! ## Features
//!
//! - **Eager warm-up**: `min_size` connections are dialed when the pool is built
//! - **Elastic growth**: the pool grows by `increment` up to `max_size` on demand
//! - **Immediate backpressure**: an exhausted pool fails fast instead of queueing
//! - **Lazy idle expiry**: stale connections are replaced when next retrieved
//! - **Live statistics**: available, active, request and success counts
//!
//! ## Usage
//!
//! ```rust,no_run
//! use connpool::config::PoolConfig;
//! use connpool::pool::PoolManager;
//! use connpool::transport::TcpConnector;
//!
//! fn main() -> connpool::Result<()> {
//!     let connector = TcpConnector::with_defaults("127.0.0.1:6379");
//!     let pool = PoolManager::builder(PoolConfig::default(), connector)
//!         .name("cache")
//!         .build()?;
//!
//!     let mut conn = pool.get()?;
//!     // use `conn` as a TcpStream ...
//!     conn.close()?; // back to the pool
//!
//!     pool.stop()
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! get() -> idle buffer -> (empty) grow via factory -> PooledConn
//! PooledConn::close() -> idle buffer | physical close (unusable, full, stopped)
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod pool;
pub mod transport;

// Re-export commonly used items
pub use config::{load_config, Config, PoolConfig};
pub use error::{PoolError, Result};
pub use pool::{PoolManager, PooledConn, Stats};
pub use transport::{Connection, ConnectionFactory, TcpConnector};

/// Version of the connpool library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the library
pub const NAME: &str = env!("CARGO_PKG_NAME");
