//! Transport module for connpool
//!
//! This module defines the seams the pool depends on: something that can be
//! closed ([`Connection`]) and something that produces connections
//! ([`ConnectionFactory`]). A TCP implementation of both is provided.

mod addr;
mod tcp;

pub use addr::AddrMaybeCached;
pub use tcp::TcpConnector;

use crate::config::TcpConfig;
use std::io;
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

/// A physical connection that can be released
///
/// The pool never reads or writes; it only needs to close connections it
/// evicts. Everything else is reached through the pooled wrapper's deref.
pub trait Connection: Send + 'static {
    /// Release the underlying resource
    fn close(self) -> io::Result<()>;
}

impl Connection for TcpStream {
    fn close(self) -> io::Result<()> {
        match self.shutdown(Shutdown::Both) {
            // Peer already hung up
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            other => other,
        }
    }
}

#[cfg(unix)]
impl Connection for std::os::unix::net::UnixStream {
    fn close(self) -> io::Result<()> {
        match self.shutdown(Shutdown::Both) {
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            other => other,
        }
    }
}

/// Produces new connections for a pool
///
/// Called synchronously by the pool, at most one call at a time per growth
/// step. Any `Fn() -> io::Result<C>` closure is a factory.
pub trait ConnectionFactory: Send + Sync + 'static {
    /// The connection type produced
    type Connection: Connection;

    /// Establish a new connection
    fn connect(&self) -> io::Result<Self::Connection>;
}

impl<C, F> ConnectionFactory for F
where
    C: Connection,
    F: Fn() -> io::Result<C> + Send + Sync + 'static,
{
    type Connection = C;

    fn connect(&self) -> io::Result<C> {
        self()
    }
}

/// Socket options for configuring connections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocketOpts {
    /// Enable TCP_NODELAY
    pub nodelay: bool,
    /// TCP keepalive timeout
    pub keepalive_secs: Option<u64>,
    /// TCP keepalive interval
    pub keepalive_interval: Option<u64>,
}

impl Default for SocketOpts {
    fn default() -> Self {
        SocketOpts {
            nodelay: true,
            keepalive_secs: Some(20),
            keepalive_interval: Some(8),
        }
    }
}

impl SocketOpts {
    /// Create socket options from TCP config
    pub fn from_tcp_config(config: &TcpConfig) -> Self {
        let keepalive = config.keepalive_secs > 0;
        SocketOpts {
            nodelay: config.nodelay,
            keepalive_secs: keepalive.then_some(config.keepalive_secs),
            keepalive_interval: keepalive.then_some(config.keepalive_interval),
        }
    }

    /// Apply socket options to a TCP stream
    pub fn apply(&self, stream: &TcpStream) -> io::Result<()> {
        stream.set_nodelay(self.nodelay)?;

        if let (Some(timeout), Some(interval)) = (self.keepalive_secs, self.keepalive_interval) {
            let socket = socket2::SockRef::from(stream);
            let keepalive = socket2::TcpKeepalive::new()
                .with_time(Duration::from_secs(timeout))
                .with_interval(Duration::from_secs(interval));
            socket.set_tcp_keepalive(&keepalive)?;
        }

        Ok(())
    }
}
