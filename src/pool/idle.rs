//! Idle buffer entry
//!
//! A connection sitting in the idle buffer, with the metadata needed for
//! lazy expiry.

use std::time::{Duration, Instant};

/// A connection waiting in the idle buffer
#[derive(Debug)]
pub(crate) struct IdleConn<C> {
    /// The underlying connection
    pub(crate) conn: C,
    /// When the connection was created
    pub(crate) created_at: Instant,
    /// When the connection was last returned; `None` until first release
    pub(crate) last_used: Option<Instant>,
}

impl<C> IdleConn<C> {
    /// Wrap a connection fresh from the factory
    pub(crate) fn fresh(conn: C) -> Self {
        IdleConn {
            conn,
            created_at: Instant::now(),
            last_used: None,
        }
    }

    /// Wrap a connection being returned by a caller
    pub(crate) fn returned(conn: C, created_at: Instant) -> Self {
        IdleConn {
            conn,
            created_at,
            last_used: Some(Instant::now()),
        }
    }

    /// Whether the connection sat idle for longer than `idle_timeout`.
    /// Never-released connections are not stale.
    pub(crate) fn is_stale(&self, idle_timeout: Duration) -> bool {
        self.last_used.map_or(false, |t| t.elapsed() > idle_timeout)
    }

    /// Time since last release
    pub(crate) fn idle_time(&self) -> Option<Duration> {
        self.last_used.map(|t| t.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_is_never_stale() {
        let idle = IdleConn::fresh(42);
        assert!(idle.last_used.is_none());
        assert!(idle.idle_time().is_none());
        assert!(!idle.is_stale(Duration::ZERO));
    }

    #[test]
    fn test_returned_is_stale_after_timeout() {
        let idle = IdleConn::returned("conn", Instant::now());

        assert!(!idle.is_stale(Duration::from_secs(1)));

        std::thread::sleep(Duration::from_millis(5));
        assert!(idle.is_stale(Duration::from_millis(1)));
        assert!(idle.is_stale(Duration::ZERO));
        assert!(idle.idle_time().unwrap() >= Duration::from_millis(5));
    }

    #[test]
    fn test_returned_keeps_creation_time() {
        let created_at = Instant::now() - Duration::from_secs(10);
        let idle = IdleConn::returned(0u8, created_at);
        assert_eq!(idle.created_at, created_at);
        assert!(idle.last_used.unwrap() > created_at);
    }
}
