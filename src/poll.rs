//! Background status polling.
//!
//! The chat front-end keeps a status panel current by polling the backend's
//! health and store-statistics endpoints on a fixed interval. Ticks are
//! independent: a slow response never blocks the next scheduled tick, and
//! overlapping fetches are not deduplicated. Each tick carries a monotone
//! sequence number so a late-arriving stale response can never overwrite a
//! newer one.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::client::Deskmate;
use crate::observability::{
    POLL_HEALTH_FAILURES, POLL_STALE_DROPS, POLL_STATS_FAILURES, POLL_TICKS,
};

/// Default polling interval, matching the backend's expectations.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// The poller's published view of the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// Whether the last applied health probe reported healthy.
    pub connected: bool,
    /// Entries in the memory store, per the last successful stats fetch.
    pub memory_count: u64,
    /// Documents in the vector index, per the last successful stats fetch.
    pub vector_count: u64,
    /// Sequence number of the tick this snapshot was built from.
    pub seq: u64,
}

/// Result of one polling pass. Stats are `None` on fetch failure so a failed
/// read preserves the previously applied count instead of zeroing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOutcome {
    /// Health probe result; any failure collapses to false.
    pub connected: bool,
    /// Memory-store count, if the fetch succeeded.
    pub memory: Option<u64>,
    /// Vector-index count, if the fetch succeeded.
    pub vector: Option<u64>,
}

/// Periodic health/stats poller with an explicit cancellation handle.
pub struct StatusPoller {
    ticker: JoinHandle<()>,
    rx: watch::Receiver<StatusSnapshot>,
}

impl StatusPoller {
    /// Starts polling immediately and then on every interval tick.
    pub fn spawn(client: Deskmate, interval: Duration) -> Self {
        let (tx, rx) = watch::channel(StatusSnapshot::default());
        let tx = Arc::new(tx);

        let ticker = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            let mut next_seq: u64 = 0;
            loop {
                ticker.tick().await;
                POLL_TICKS.click();
                next_seq += 1;
                let seq = next_seq;
                let client = client.clone();
                let tx = Arc::clone(&tx);
                tokio::spawn(async move {
                    let outcome = poll_once(&client).await;
                    apply(&tx, seq, outcome);
                });
            }
        });

        Self { ticker, rx }
    }

    /// Returns a receiver for status updates.
    pub fn subscribe(&self) -> watch::Receiver<StatusSnapshot> {
        self.rx.clone()
    }

    /// Returns the latest applied snapshot.
    pub fn snapshot(&self) -> StatusSnapshot {
        *self.rx.borrow()
    }

    /// Stops the ticker. Fetches already in flight settle harmlessly against
    /// the final snapshot.
    pub fn shutdown(self) {
        self.ticker.abort();
    }
}

/// One polling pass: the health probe, then both stats endpoints fetched
/// concurrently, each fault-isolated.
async fn poll_once(client: &Deskmate) -> PollOutcome {
    let connected = client.is_healthy().await;
    if !connected {
        POLL_HEALTH_FAILURES.click();
    }

    let (memory, vector) =
        futures::future::join(client.memory_stats(), client.vector_stats()).await;
    let memory = match memory {
        Ok(stats) => Some(stats.total_memories),
        Err(_) => {
            POLL_STATS_FAILURES.click();
            None
        }
    };
    let vector = match vector {
        Ok(stats) => Some(stats.total_documents),
        Err(_) => {
            POLL_STATS_FAILURES.click();
            None
        }
    };

    PollOutcome {
        connected,
        memory,
        vector,
    }
}

/// Applies a poll outcome unless a newer tick already landed.
fn apply(tx: &watch::Sender<StatusSnapshot>, seq: u64, outcome: PollOutcome) {
    tx.send_if_modified(|snapshot| {
        if seq <= snapshot.seq {
            POLL_STALE_DROPS.click();
            return false;
        }
        snapshot.seq = seq;
        snapshot.connected = outcome.connected;
        if let Some(count) = outcome.memory {
            snapshot.memory_count = count;
        }
        if let Some(count) = outcome.vector {
            snapshot.vector_count = count;
        }
        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(connected: bool, memory: Option<u64>, vector: Option<u64>) -> PollOutcome {
        PollOutcome {
            connected,
            memory,
            vector,
        }
    }

    #[test]
    fn apply_updates_snapshot() {
        let (tx, rx) = watch::channel(StatusSnapshot::default());
        apply(&tx, 1, outcome(true, Some(10), Some(3)));
        let snapshot = *rx.borrow();
        assert!(snapshot.connected);
        assert_eq!(snapshot.memory_count, 10);
        assert_eq!(snapshot.vector_count, 3);
        assert_eq!(snapshot.seq, 1);
    }

    #[test]
    fn stale_result_discarded() {
        let (tx, rx) = watch::channel(StatusSnapshot::default());
        apply(&tx, 2, outcome(true, Some(10), Some(3)));
        // Tick 1 arrives late, after tick 2 already landed.
        apply(&tx, 1, outcome(false, Some(999), Some(999)));
        let snapshot = *rx.borrow();
        assert!(snapshot.connected);
        assert_eq!(snapshot.memory_count, 10);
        assert_eq!(snapshot.seq, 2);
    }

    #[test]
    fn failed_stats_fetch_keeps_previous_count() {
        let (tx, rx) = watch::channel(StatusSnapshot::default());
        apply(&tx, 1, outcome(true, Some(10), Some(3)));
        apply(&tx, 2, outcome(true, None, Some(4)));
        let snapshot = *rx.borrow();
        assert_eq!(snapshot.memory_count, 10);
        assert_eq!(snapshot.vector_count, 4);
    }

    #[test]
    fn health_failure_always_applies() {
        let (tx, rx) = watch::channel(StatusSnapshot::default());
        apply(&tx, 1, outcome(true, Some(10), Some(3)));
        apply(&tx, 2, outcome(false, None, None));
        let snapshot = *rx.borrow();
        assert!(!snapshot.connected);
        // Counts survive the outage.
        assert_eq!(snapshot.memory_count, 10);
        assert_eq!(snapshot.vector_count, 3);
    }

    #[tokio::test]
    async fn poller_reports_unreachable_backend_disconnected() {
        // Discard port; the connection is refused immediately.
        let client = Deskmate::new(Some("http://127.0.0.1:9".to_string())).unwrap();
        let poller = StatusPoller::spawn(client, Duration::from_millis(10));
        let mut rx = poller.subscribe();

        let changed = tokio::time::timeout(Duration::from_secs(5), rx.changed()).await;
        assert!(changed.is_ok(), "poller never published a snapshot");
        assert!(!rx.borrow().connected);
        poller.shutdown();
    }
}
