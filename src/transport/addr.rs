//! Address handling with DNS caching
//!
//! Provides address resolution with optional caching so a growing pool
//! does not hit the resolver for every new connection.

use parking_lot::RwLock;
use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;

/// Address that may have a cached resolved address
///
/// This type holds an address string and optionally caches the resolved
/// socket address to avoid repeated DNS lookups.
#[derive(Debug, Clone)]
pub struct AddrMaybeCached {
    /// The original address string
    addr: String,
    /// Cached resolved address
    cached: Arc<RwLock<Option<SocketAddr>>>,
}

impl AddrMaybeCached {
    /// Create a new address without cached resolution
    pub fn new(addr: &str) -> Self {
        AddrMaybeCached {
            addr: addr.to_string(),
            cached: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a new address with a pre-resolved address
    pub fn with_cached(addr: &str, resolved: SocketAddr) -> Self {
        AddrMaybeCached {
            addr: addr.to_string(),
            cached: Arc::new(RwLock::new(Some(resolved))),
        }
    }

    /// Get the original address string
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Get the cached address if available
    pub fn get_cached(&self) -> Option<SocketAddr> {
        *self.cached.read()
    }

    /// Clear the cached address
    pub fn clear_cache(&self) {
        *self.cached.write() = None;
    }

    /// Resolve the address, using cache if available
    pub fn resolve(&self) -> io::Result<SocketAddr> {
        if let Some(cached) = self.get_cached() {
            return Ok(cached);
        }

        let resolved = self.resolve_fresh()?;
        *self.cached.write() = Some(resolved);

        Ok(resolved)
    }

    /// Resolve the address without using cache
    pub fn resolve_fresh(&self) -> io::Result<SocketAddr> {
        self.addr.to_socket_addrs()?.next().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("No addresses found for {}", self.addr),
            )
        })
    }
}
