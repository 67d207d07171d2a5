// Connection handling module
// Accepts a single TCP connection and serves it with hyper

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use crate::config::{AppState, PerformanceConfig};
use crate::handler;
use crate::logger;

/// Accept and process a connection, checking limits and logging.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address
/// * `state` - Shared application state
/// * `conn_counter` - Active connection counter
pub fn accept_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<AppState>,
    conn_counter: &Arc<AtomicUsize>,
) {
    // Increment counter first, then check limit (prevents race condition)
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            // Exceeded limit: rollback counter and reject
            conn_counter.fetch_sub(1, Ordering::SeqCst);
            logger::log_warning(&format!(
                "Max connections reached: {prev_count}/{max_conn}. Connection from {peer_addr} rejected."
            ));
            drop(stream);
            return;
        }
    }

    logger::log_connection_accepted(&peer_addr);

    handle_connection(stream, peer_addr, Arc::clone(state), Arc::clone(conn_counter));
}

/// Upper bound on a connection's lifetime.
///
/// `max(read_timeout, write_timeout)`, extended to `keep_alive_timeout` when keep-alive
/// is enabled (non-zero) so idle keep-alive connections are not cut early.
fn connection_timeout(performance: &PerformanceConfig) -> Duration {
    let io_secs = performance.read_timeout.max(performance.write_timeout);
    Duration::from_secs(io_secs.max(performance.keep_alive_timeout))
}

/// Serve one connection in a local task.
///
/// The active connection counter is decremented when it ends, however it ends.
fn handle_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
    conn_counter: Arc<AtomicUsize>,
) {
    tokio::task::spawn_local(async move {
        let io = TokioIo::new(stream);

        let performance = &state.config.performance;
        let timeout_duration = connection_timeout(performance);

        // Build HTTP/1 connection with keep-alive support
        let mut builder = http1::Builder::new();
        builder.keep_alive(performance.keep_alive_timeout > 0);

        let service_state = Arc::clone(&state);
        let service = service_fn(move |req| {
            handler::handle_request(req, Arc::clone(&service_state), peer_addr)
        });
        let conn = builder.serve_connection(io, service);

        match tokio::time::timeout(timeout_duration, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => {
                logger::log_warning(&format!(
                    "Connection from {peer_addr} timed out after {} seconds",
                    timeout_duration.as_secs()
                ));
            }
        }

        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn performance(
        keep_alive_timeout: u64,
        read_timeout: u64,
        write_timeout: u64,
    ) -> PerformanceConfig {
        PerformanceConfig {
            keep_alive_timeout,
            read_timeout,
            write_timeout,
            max_connections: None,
        }
    }

    #[test]
    fn test_keep_alive_extends_connection_timeout() {
        assert_eq!(connection_timeout(&performance(75, 30, 30)), Duration::from_secs(75));
        assert_eq!(connection_timeout(&performance(10, 30, 45)), Duration::from_secs(45));
    }

    #[test]
    fn test_disabled_keep_alive_uses_io_timeouts() {
        assert_eq!(connection_timeout(&performance(0, 30, 20)), Duration::from_secs(30));
    }
}
