//! TCP transport implementation
//!
//! Provides a connection factory that dials plain TCP connections.

use super::{AddrMaybeCached, ConnectionFactory, SocketOpts};
use crate::config::TcpConfig;
use std::io;
use std::net::TcpStream;
use std::time::Duration;

/// TCP connection factory for a single remote address
#[derive(Debug, Clone)]
pub struct TcpConnector {
    /// Remote address, resolved once and cached
    addr: AddrMaybeCached,
    /// Socket options to apply to connections
    socket_opts: SocketOpts,
    /// Connection timeout
    connect_timeout: Duration,
}

impl TcpConnector {
    /// Create a new TCP connector with default options
    pub fn with_defaults(addr: &str) -> Self {
        TcpConnector {
            addr: AddrMaybeCached::new(addr),
            socket_opts: SocketOpts::default(),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Create a TCP connector from configuration
    pub fn new(addr: &str, config: &TcpConfig) -> Self {
        TcpConnector {
            addr: AddrMaybeCached::new(addr),
            socket_opts: SocketOpts::from_tcp_config(config),
            connect_timeout: Duration::from_millis(config.connect_timeout_ms),
        }
    }

    /// Set socket options
    pub fn with_socket_opts(mut self, opts: SocketOpts) -> Self {
        self.socket_opts = opts;
        self
    }

    /// Set connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Get the remote address
    pub fn addr(&self) -> &str {
        self.addr.addr()
    }
}

impl ConnectionFactory for TcpConnector {
    type Connection = TcpStream;

    fn connect(&self) -> io::Result<TcpStream> {
        let resolved = self.addr.resolve()?;

        let stream = TcpStream::connect_timeout(&resolved, self.connect_timeout).map_err(|e| {
            // Re-resolve on the next dial
            self.addr.clear_cache();
            io::Error::new(
                e.kind(),
                format!("Failed to connect to {}: {}", self.addr.addr(), e),
            )
        })?;

        if let Err(e) = self.socket_opts.apply(&stream) {
            tracing::warn!("Failed to apply socket options: {}", e);
        }

        tracing::debug!("TCP connection established to {}", resolved);

        Ok(stream)
    }
}
