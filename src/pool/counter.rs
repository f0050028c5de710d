//! Lock-free counter used for pool accounting

use std::sync::atomic::{AtomicI64, Ordering};

/// Atomically mutated integer
///
/// Signed so that a decrement racing with [`Counter::reset`] is visible as a
/// negative value instead of wrapping around.
#[derive(Debug, Default)]
pub struct Counter(AtomicI64);

impl Counter {
    /// Create a counter starting at zero
    pub const fn new() -> Self {
        Counter(AtomicI64::new(0))
    }

    /// Add one and return the new value
    pub fn increment(&self) -> i64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Subtract one and return the new value
    pub fn decrement(&self) -> i64 {
        self.0.fetch_sub(1, Ordering::SeqCst) - 1
    }

    /// Swap the value to zero and return the previous value
    pub fn reset(&self) -> i64 {
        self.0.swap(0, Ordering::SeqCst)
    }

    /// Read the current value
    pub fn read(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}
