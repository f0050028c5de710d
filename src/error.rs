//! Error types for connpool
//!
//! This module defines the error taxonomy surfaced by the pool.

use std::io;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, PoolError>;

/// Main error type for pool operations
#[derive(Error, Debug)]
pub enum PoolError {
    /// Invalid pool configuration, raised only at construction
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operation attempted on a stopped or never-started pool
    #[error("pool is closed")]
    Closed,

    /// Every connection is checked out and the pool is at capacity
    #[error("Pool exhausted: all {0} connections are in use")]
    Exhausted(usize),

    /// The connection factory failed
    #[error("Factory error: {0}")]
    Factory(#[source] io::Error),

    /// The wrapper no longer holds a connection
    #[error("Invalid connection: {0}")]
    InvalidConnection(String),

    /// One or more idle connections failed to close during stop
    #[error("Shutdown error: {0}")]
    Shutdown(String),

    /// IO error while physically closing a connection
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl PoolError {
    /// Whether the caller may reasonably retry the operation later
    pub fn is_retryable(&self) -> bool {
        matches!(self, PoolError::Exhausted(_) | PoolError::Factory(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_pool_error_display() {
        let err = PoolError::Config("max_size must be greater than 0".to_string());
        assert_eq!(
            format!("{}", err),
            "Configuration error: max_size must be greater than 0"
        );

        let err = PoolError::Closed;
        assert_eq!(format!("{}", err), "pool is closed");

        let err = PoolError::Exhausted(5);
        assert_eq!(
            format!("{}", err),
            "Pool exhausted: all 5 connections are in use"
        );

        let err = PoolError::InvalidConnection("already released".to_string());
        assert_eq!(format!("{}", err), "Invalid connection: already released");

        let err = PoolError::Shutdown("error: broken pipe".to_string());
        assert_eq!(format!("{}", err), "Shutdown error: error: broken pipe");
    }

    #[test]
    fn test_pool_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::Other, "io error");
        let err: PoolError = io_err.into();
        assert!(matches!(err, PoolError::Io(_)));
    }

    #[test]
    fn test_factory_error_keeps_source() {
        let io_err = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        let err = PoolError::Factory(io_err);

        let source = err.source().unwrap();
        let io_source = source.downcast_ref::<io::Error>().unwrap();
        assert_eq!(io_source.kind(), io::ErrorKind::ConnectionRefused);
    }

    #[test]
    fn test_is_retryable() {
        assert!(PoolError::Exhausted(1).is_retryable());
        assert!(PoolError::Factory(io::Error::new(io::ErrorKind::Other, "x")).is_retryable());
        assert!(!PoolError::Closed.is_retryable());
        assert!(!PoolError::Config("bad".to_string()).is_retryable());
    }
}
