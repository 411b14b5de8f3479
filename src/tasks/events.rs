//! Event Logger Task
//!
//! Background task that drains cache events from a channel and logs them.

use serde_json::Value;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheEvent, EventKind};

/// Spawns a task that logs every event received on `rx`.
///
/// The task ends once every sender is dropped, returning the number of
/// events it saw, and can also be aborted during shutdown.
///
/// # Example
/// ```ignore
/// let rx = state.subscribe_events().await;
/// let logger = spawn_event_logger(rx);
/// // Later, during shutdown:
/// logger.abort();
/// ```
pub fn spawn_event_logger(rx: UnboundedReceiver<CacheEvent<Value>>) -> JoinHandle<u64> {
    tokio::spawn(drain_events(rx))
}

async fn drain_events(mut rx: UnboundedReceiver<CacheEvent<Value>>) -> u64 {
    info!("Starting cache event logger");

    let mut seen = 0u64;
    while let Some(event) = rx.recv().await {
        seen += 1;
        log_event(&event);
    }

    info!("Cache event logger stopped after {} events", seen);
    seen
}

fn log_event(event: &CacheEvent<Value>) {
    match event.kind {
        // Reads are frequent, keep them out of the default level
        EventKind::Hit | EventKind::Missed => {
            debug!(kind = %event.kind, key = %event.key, "cache event");
        }
        _ => {
            info!(
                kind = %event.kind,
                key = %event.key,
                old = ?event.old_value,
                new = ?event.new_value,
                "cache event"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AppState;
    use crate::cache::{Cache, EntryOptions};
    use serde_json::json;
    use tokio::sync::mpsc;

    #[test]
    fn test_drain_counts_events_until_senders_drop() {
        let (tx, rx) = mpsc::unbounded_channel();
        for kind in EventKind::ALL {
            tx.send(CacheEvent::new(kind, "k")).unwrap();
        }
        drop(tx);

        let seen = tokio_test::block_on(drain_events(rx));
        assert_eq!(seen, EventKind::ALL.len() as u64);
    }

    #[tokio::test]
    async fn test_logger_receives_cache_events() {
        let state = AppState::new(Cache::new());
        let rx = state.subscribe_events().await;
        let logger = spawn_event_logger(rx);

        {
            let mut cache = state.cache.lock().await;
            cache.set("a", json!(1), EntryOptions::new());
            cache.get("a");
            cache.get("missing");
            cache.clear("a");
            // Dropping the callback drops the only sender
            cache.deregister_event_callback();
        }

        let seen = logger.await.unwrap();
        assert_eq!(seen, 4);
    }

    #[tokio::test]
    async fn test_logger_can_be_aborted() {
        let (_tx, rx) = mpsc::unbounded_channel::<CacheEvent<Value>>();
        let logger = spawn_event_logger(rx);

        logger.abort();
        let result = logger.await;
        assert!(result.unwrap_err().is_cancelled());
    }
}
