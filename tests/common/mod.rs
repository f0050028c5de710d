//! Test utilities for connpool integration tests
//!
//! Provides a local TCP server that accepts and holds connections, plus
//! helpers for counting factories and log output.

#![allow(dead_code)]

use parking_lot::Mutex;
use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing_subscriber::EnvFilter;

/// Install a test subscriber once; honours `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// TCP server that accepts connections and keeps them open
pub struct TestServer {
    addr: SocketAddr,
    accepted: Arc<AtomicUsize>,
    streams: Arc<Mutex<Vec<TcpStream>>>,
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl TestServer {
    /// Bind to an ephemeral localhost port and start accepting
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let accepted = Arc::new(AtomicUsize::new(0));
        let streams = Arc::new(Mutex::new(Vec::new()));
        let shutdown = Arc::new(AtomicBool::new(false));

        let handle = {
            let accepted = accepted.clone();
            let streams = streams.clone();
            let shutdown = shutdown.clone();
            thread::spawn(move || {
                for stream in listener.incoming() {
                    if shutdown.load(Ordering::SeqCst) {
                        break;
                    }
                    if let Ok(stream) = stream {
                        accepted.fetch_add(1, Ordering::SeqCst);
                        streams.lock().push(stream);
                    }
                }
            })
        };

        TestServer {
            addr,
            accepted,
            streams,
            shutdown,
            handle: Some(handle),
        }
    }

    /// Address the server listens on
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Number of connections accepted so far
    pub fn accepted(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }

    /// A factory dialing this server, plus a count of successful dials
    pub fn factory(
        &self,
    ) -> (
        impl Fn() -> io::Result<TcpStream> + Send + Sync + 'static,
        Arc<AtomicUsize>,
    ) {
        let addr = self.addr;
        let dialed = Arc::new(AtomicUsize::new(0));
        let counter = dialed.clone();
        let factory = move || -> io::Result<TcpStream> {
            let stream = TcpStream::connect(addr)?;
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(stream)
        };
        (factory, dialed)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        // Wake the accept loop
        let _ = TcpStream::connect(self.addr);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        self.streams.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_server_accepts() {
        let server = TestServer::start();
        let _a = TcpStream::connect(server.addr()).unwrap();
        let _b = TcpStream::connect(server.addr()).unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        while server.accepted() < 2 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(server.accepted(), 2);
    }

    #[test]
    fn test_server_factory_counts() {
        let server = TestServer::start();
        let (factory, dialed) = server.factory();
        let _conn = factory().unwrap();
        assert_eq!(dialed.load(Ordering::SeqCst), 1);
    }
}
