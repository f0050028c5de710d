//! Pooled connection wrapper
//!
//! A checked-out connection. Closing it (explicitly or by dropping it)
//! hands the connection back to its pool instead of releasing the socket.

use crate::error::{PoolError, Result};
use crate::transport::Connection;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Weak;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Something a pooled connection can be handed back to
pub(crate) trait Release<C>: Send + Sync {
    /// Take a connection back from a caller
    fn release(&self, conn: C, created_at: Instant, unusable: bool) -> Result<()>;
}

/// A connection checked out of a pool
///
/// Derefs to the underlying connection for reads and writes. Call
/// [`PooledConn::close`] (or drop the wrapper) to return it.
pub struct PooledConn<C: Connection> {
    /// The connection, `None` once released
    conn: Option<C>,
    /// When the physical connection was created
    created_at: Instant,
    /// One-way flag, set by `PoolManager::mark_unusable`
    unusable: AtomicBool,
    /// Owning pool, not kept alive by this handle
    pool: Weak<dyn Release<C>>,
}

impl<C: Connection> PooledConn<C> {
    pub(crate) fn new(conn: C, created_at: Instant, pool: Weak<dyn Release<C>>) -> Self {
        PooledConn {
            conn: Some(conn),
            created_at,
            unusable: AtomicBool::new(false),
            pool,
        }
    }

    /// Return the connection to its pool
    ///
    /// An unusable connection is physically closed instead. Fails with
    /// [`PoolError::InvalidConnection`] if the wrapper was already closed.
    pub fn close(&mut self) -> Result<()> {
        let conn = self.conn.take().ok_or_else(|| {
            PoolError::InvalidConnection("connection already released".to_string())
        })?;
        self.release(conn)
    }

    /// Whether the connection has been marked unusable
    pub fn is_unusable(&self) -> bool {
        self.unusable.load(Ordering::SeqCst)
    }

    /// Whether the wrapper still holds its connection
    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Time since the physical connection was created
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// Set the unusable flag, returning `true` only on the first call
    pub(crate) fn mark_unusable(&self) -> bool {
        !self.unusable.swap(true, Ordering::SeqCst)
    }

    /// Whether this wrapper was handed out by `pool`
    pub(crate) fn belongs_to<P>(&self, pool: &P) -> bool {
        std::ptr::addr_eq(self.pool.as_ptr(), pool as *const P)
    }

    fn release(&self, conn: C) -> Result<()> {
        match self.pool.upgrade() {
            Some(pool) => pool.release(conn, self.created_at, self.is_unusable()),
            None => {
                debug!("Pool dropped, closing connection");
                conn.close().map_err(PoolError::from)
            }
        }
    }
}

impl<C: Connection> Deref for PooledConn<C> {
    type Target = C;

    fn deref(&self) -> &Self::Target {
        self.conn.as_ref().expect("connection already released")
    }
}

impl<C: Connection> DerefMut for PooledConn<C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.conn.as_mut().expect("connection already released")
    }
}

impl<C: Connection> Drop for PooledConn<C> {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err(e) = self.release(conn) {
                warn!("Failed to release dropped connection: {}", e);
            }
        }
    }
}

impl<C: Connection> fmt::Debug for PooledConn<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledConn")
            .field("open", &self.is_open())
            .field("unusable", &self.is_unusable())
            .field("age", &self.age())
            .finish()
    }
}
