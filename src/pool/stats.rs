//! Pool statistics
//!
//! The pool owns a set of counters; [`Stats`] is a live view that combines
//! them with the current idle-buffer length.

use super::counter::Counter;
use std::fmt;

/// Source of the "currently idle" count
pub trait Available {
    /// Number of idle connections in the buffer right now
    fn available(&self) -> usize;
}

/// Counters maintained by a pool
#[derive(Debug, Default)]
pub struct PoolStats {
    /// Connections accounted to the pool, idle and active
    pub(crate) size: Counter,
    /// Total `get` attempts
    pub(crate) request: Counter,
    /// Total successful `get` calls
    pub(crate) success: Counter,
}

impl PoolStats {
    /// Create zeroed pool counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a `get` attempt and whether it succeeded
    pub fn record_request(&self, succeeded: bool) {
        self.request.increment();
        if succeeded {
            self.success.increment();
        }
    }

    /// Zero every counter
    pub fn reset(&self) {
        self.size.reset();
        self.request.reset();
        self.success.reset();
    }
}

/// Live statistics view over a pool
///
/// Each accessor reads at the instant of the call; values are not
/// consistent with each other under concurrent use.
pub struct Stats<'a> {
    counters: &'a PoolStats,
    source: &'a dyn Available,
}

fn non_negative(v: i64) -> usize {
    v.max(0) as usize
}

impl<'a> Stats<'a> {
    pub(crate) fn new(counters: &'a PoolStats, source: &'a dyn Available) -> Self {
        Stats { counters, source }
    }

    /// Idle connections in the pool
    pub fn available(&self) -> usize {
        self.source.available()
    }

    /// Connections checked out by callers
    pub fn active(&self) -> usize {
        non_negative(self.counters.size.read() - self.source.available() as i64)
    }

    /// Connections accounted to the pool, idle and active
    pub fn size(&self) -> usize {
        non_negative(self.counters.size.read())
    }

    /// Total number of `get` attempts
    pub fn request(&self) -> usize {
        non_negative(self.counters.request.read())
    }

    /// Total number of successful `get` calls
    pub fn success(&self) -> usize {
        non_negative(self.counters.success.read())
    }

    /// Copy the current values
    pub fn snapshot(&self) -> StatsSnapshot {
        let size = self.size();
        let available = self.available();
        StatsSnapshot {
            available,
            active: size.saturating_sub(available),
            size,
            request: self.request(),
            success: self.success(),
        }
    }
}

impl fmt::Debug for Stats<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.snapshot(), f)
    }
}

/// Snapshot of pool statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Idle connections
    pub available: usize,
    /// Checked-out connections
    pub active: usize,
    /// Idle plus checked-out connections
    pub size: usize,
    /// Total `get` attempts
    pub request: usize,
    /// Total successful `get` calls
    pub success: usize,
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "available={}, active={}, size={}, request={}, success={}",
            self.available, self.active, self.size, self.request, self.success
        )
    }
}
