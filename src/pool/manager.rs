//! Pool manager
//!
//! Owns the idle buffer and coordinates growth, retrieval, release,
//! invalidation and shutdown.

use super::guard::{PooledConn, Release};
use super::idle::IdleConn;
use super::naming::NameSequence;
use super::stats::{Available, PoolStats, Stats};
use crate::config::PoolConfig;
use crate::error::{PoolError, Result};
use crate::transport::{Connection, ConnectionFactory};
use crossbeam_queue::ArrayQueue;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Instant;
use tracing::{debug, info, warn};

type Conn<F> = <F as ConnectionFactory>::Connection;

/// Bounded, elastic pool of connections
///
/// Starts with `min_size` idle connections and grows by `increment` (never
/// past `max_size`) when a caller finds the idle buffer empty. A caller that
/// finds the pool at capacity gets [`PoolError::Exhausted`] immediately.
pub struct PoolManager<F: ConnectionFactory> {
    /// Pool name
    name: String,
    /// Configuration
    config: PoolConfig,
    /// Produces new connections
    factory: F,
    /// Idle connections; `None` once the pool is stopped
    idle: RwLock<Option<ArrayQueue<IdleConn<Conn<F>>>>>,
    /// Set once warm-up completes, cleared by `stop`
    running: AtomicBool,
    /// Serializes growth and shutdown
    grow_lock: Mutex<()>,
    /// Statistics
    stats: PoolStats,
    /// Handed to wrappers so they can find their way back
    me: Weak<Self>,
}

/// Builder for [`PoolManager`]
pub struct PoolBuilder<F: ConnectionFactory> {
    config: PoolConfig,
    factory: F,
    name: Option<String>,
    names: Option<Arc<NameSequence>>,
}

impl<F: ConnectionFactory> PoolBuilder<F> {
    /// Name the pool instead of generating a name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Draw the generated name from `names` instead of the process sequence
    pub fn name_sequence(mut self, names: Arc<NameSequence>) -> Self {
        self.names = Some(names);
        self
    }

    /// Validate the configuration, create `min_size` connections and start
    pub fn build(self) -> Result<Arc<PoolManager<F>>> {
        self.config.validate().map_err(PoolError::Config)?;

        let name = match (self.name, self.names) {
            (Some(name), _) if !name.is_empty() => name,
            (_, Some(names)) => names.next_name(),
            (_, None) => NameSequence::process().next_name(),
        };

        let config = self.config;
        let factory = self.factory;
        let pool = Arc::new_cyclic(|me| PoolManager {
            idle: RwLock::new(Some(ArrayQueue::new(config.max_size))),
            name,
            config,
            factory,
            running: AtomicBool::new(false),
            grow_lock: Mutex::new(()),
            stats: PoolStats::new(),
            me: me.clone(),
        });

        pool.start()?;
        Ok(pool)
    }
}

impl<F: ConnectionFactory> PoolManager<F> {
    /// Create a pool with a generated name
    pub fn new(config: PoolConfig, factory: F) -> Result<Arc<Self>> {
        Self::builder(config, factory).build()
    }

    /// Start building a pool
    pub fn builder(config: PoolConfig, factory: F) -> PoolBuilder<F> {
        PoolBuilder {
            config,
            factory,
            name: None,
            names: None,
        }
    }

    /// Pool name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pool configuration
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Whether the pool is accepting `get` calls
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Live statistics view
    pub fn stats(&self) -> Stats<'_> {
        Stats::new(&self.stats, self)
    }

    /// Log current statistics at debug level
    pub fn log_stats(&self) {
        debug!("Pool {} stats: {}", self.name, self.stats().snapshot());
    }

    /// Check out a connection
    ///
    /// Serves an idle connection, discarding any found idle past the
    /// timeout, or grows the pool when none is idle. Never waits for
    /// another caller to release.
    pub fn get(&self) -> Result<PooledConn<Conn<F>>> {
        let result = self.checkout();
        self.stats.record_request(result.is_ok());
        result
    }

    /// Mark a checked-out connection as unusable
    ///
    /// It is removed from the pool's accounting right away and physically
    /// closed when the caller closes it. A marked connection that is never
    /// closed is no longer counted although its socket stays open.
    /// Connections from another pool and wrappers already closed are
    /// ignored.
    pub fn mark_unusable(&self, conn: &PooledConn<Conn<F>>) {
        if !conn.belongs_to(self) {
            debug!("Ignoring connection from another pool in {}", self.name);
            return;
        }
        if !conn.is_open() {
            debug!("Ignoring released connection in pool {}", self.name);
            return;
        }
        if conn.mark_unusable() {
            self.stats.size.decrement();
            debug!("Connection marked unusable in pool {}", self.name);
        }
    }

    /// Stop the pool and close every idle connection
    ///
    /// Only the first call does any work. Checked-out connections are
    /// closed when their holders release them.
    pub fn stop(&self) -> Result<()> {
        if self
            .running
            .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(());
        }

        let _guard = self.grow_lock.lock();
        self.log_stats();
        self.stats.reset();

        let queue = self.idle.write().take();
        let errors = queue.as_ref().map(drain).unwrap_or_default();

        info!("Connection pool {} stopped", self.name);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PoolError::Shutdown(errors.join("\n")))
        }
    }

    fn start(&self) -> Result<()> {
        let _guard = self.grow_lock.lock();

        if let Err(e) = self.add_connections(self.config.min_size) {
            let queue = self.idle.write().take();
            if let Some(queue) = queue {
                drain(&queue);
            }
            self.stats.reset();
            return Err(e);
        }

        self.running.store(true, Ordering::SeqCst);
        info!(
            "Connection pool {} started with {} connections (max {})",
            self.name, self.config.min_size, self.config.max_size
        );
        Ok(())
    }

    fn checkout(&self) -> Result<PooledConn<Conn<F>>> {
        if !self.is_running() {
            return Err(PoolError::Closed);
        }

        loop {
            let Some(idle) = self.pop_idle()? else {
                self.grow()?;
                continue;
            };

            if idle.is_stale(self.config.idle_timeout()) {
                debug!(
                    "Discarding connection idle for {:?} in pool {}",
                    idle.idle_time(),
                    self.name
                );
                self.discard(idle.conn);
                continue;
            }

            let pool: Weak<dyn Release<Conn<F>>> = self.me.clone();
            return Ok(PooledConn::new(idle.conn, idle.created_at, pool));
        }
    }

    fn pop_idle(&self) -> Result<Option<IdleConn<Conn<F>>>> {
        let idle = self.idle.read();
        let queue = idle.as_ref().ok_or(PoolError::Closed)?;
        Ok(queue.pop())
    }

    fn grow(&self) -> Result<()> {
        let _guard = self.grow_lock.lock();

        if !self.is_running() {
            return Err(PoolError::Closed);
        }
        // Refilled by another caller while we waited for the lock
        if self.available() > 0 {
            return Ok(());
        }

        let max = self.config.max_size;
        let size = self.size();
        if size >= max {
            return Err(PoolError::Exhausted(max));
        }

        let n = self.config.increment.max(1).min(max - size);
        debug!("Growing pool {} by {} (size {})", self.name, n, size);
        self.add_connections(n)
    }

    /// Create up to `n` connections into the idle buffer. Caller holds the
    /// grow lock.
    fn add_connections(&self, n: usize) -> Result<()> {
        for _ in 0..n {
            if self.size() >= self.config.max_size {
                return Ok(());
            }

            let conn = self.factory.connect().map_err(|e| {
                warn!("Failed to create connection for pool {}: {}", self.name, e);
                PoolError::Factory(e)
            })?;

            self.stats.size.increment();
            let rejected = match self.idle.read().as_ref() {
                Some(queue) => queue.push(IdleConn::fresh(conn)).err(),
                None => Some(IdleConn::fresh(conn)),
            };
            if let Some(idle) = rejected {
                self.discard(idle.conn);
            }
        }
        Ok(())
    }

    /// Close a connection outside the idle buffer and drop it from the count
    fn discard(&self, conn: Conn<F>) {
        self.stats.size.decrement();
        if let Err(e) = conn.close() {
            warn!("Failed to close connection in pool {}: {}", self.name, e);
        }
    }

    fn size(&self) -> usize {
        self.stats.size.read().max(0) as usize
    }
}

impl<F: ConnectionFactory> Release<Conn<F>> for PoolManager<F> {
    fn release(&self, conn: Conn<F>, created_at: Instant, unusable: bool) -> Result<()> {
        if unusable {
            debug!("Closing unusable connection from pool {}", self.name);
            return conn.close().map_err(PoolError::from);
        }

        let idle = self.idle.read();
        let stopped = idle.is_none();
        let pushed = match idle.as_ref() {
            Some(queue) => queue
                .push(IdleConn::returned(conn, created_at))
                .map_err(|rejected| rejected.conn),
            None => Err(conn),
        };
        drop(idle);

        match pushed {
            Ok(()) => Ok(()),
            // Stopped pools already zeroed their accounting
            Err(conn) if stopped => conn.close().map_err(PoolError::from),
            Err(conn) => {
                debug!("Idle buffer of pool {} full, closing connection", self.name);
                self.discard(conn);
                Ok(())
            }
        }
    }
}

impl<F: ConnectionFactory> Available for PoolManager<F> {
    fn available(&self) -> usize {
        self.idle.read().as_ref().map_or(0, |queue| queue.len())
    }
}

impl<F: ConnectionFactory> Drop for PoolManager<F> {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            warn!("Errors while dropping pool {}: {}", self.name, e);
        }
    }
}

impl<F: ConnectionFactory> fmt::Debug for PoolManager<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolManager")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("running", &self.is_running())
            .field("stats", &self.stats().snapshot())
            .finish()
    }
}

/// Close every connection left in `queue`, collecting failures
fn drain<C: Connection>(queue: &ArrayQueue<IdleConn<C>>) -> Vec<String> {
    let mut errors = Vec::new();
    while let Some(idle) = queue.pop() {
        if let Err(e) = idle.conn.close() {
            errors.push(format!("error: {}", e));
        }
    }
    errors
}
