//! Default pool names

use std::sync::atomic::{AtomicU64, Ordering};

/// Prefix for generated pool names
pub const DEFAULT_NAME_PREFIX: &str = "conn-pool";

static PROCESS_SEQUENCE: NameSequence = NameSequence::new();

/// Monotonic generator for `conn-pool-<N>` names
///
/// Pools built with [`PoolManager::new`](super::PoolManager::new) draw from
/// the process-wide sequence; inject a dedicated one through the builder to
/// keep unrelated pools independent.
#[derive(Debug, Default)]
pub struct NameSequence {
    next: AtomicU64,
}

impl NameSequence {
    /// Create a sequence whose first name ends in `-1`
    pub const fn new() -> Self {
        NameSequence {
            next: AtomicU64::new(0),
        }
    }

    /// The process-wide sequence
    pub fn process() -> &'static NameSequence {
        &PROCESS_SEQUENCE
    }

    /// Produce the next name
    pub fn next_name(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", DEFAULT_NAME_PREFIX, n)
    }
}
