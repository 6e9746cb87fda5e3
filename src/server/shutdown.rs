// Graceful shutdown module
// Waits for in-flight connections after the listener has been closed

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::logger;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Wait until `active_connections` reaches zero or `timeout` elapses.
///
/// Returns the number of connections still open when it gave up (0 on a
/// clean drain). Open connections are not killed here; they end with the
/// runtime.
pub async fn drain_connections(active_connections: &AtomicUsize, timeout: Duration) -> usize {
    logger::log_shutdown_started(active_connections.load(Ordering::SeqCst));

    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        let remaining = active_connections.load(Ordering::SeqCst);
        if remaining == 0 || tokio::time::Instant::now() >= deadline {
            logger::log_shutdown_complete(remaining);
            return remaining;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}
