//! Background writer for one persisted slice.
//!
//! Each mutation publishes the freshly serialized slice into a `watch`
//! channel. The writer task only ever sees the newest value, so bursts of
//! mutations collapse into fewer writes while the last state always lands.

use std::sync::Arc;

use quickbite_core::Slice;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::store::KvStore;

/// A serialized slice waiting to be written.
#[derive(Debug, Default)]
struct Pending {
    version: u64,
    payload: Option<Arc<Vec<u8>>>,
}

/// Handle to the writer task of one slice.
#[derive(Debug)]
pub(super) struct SliceWriter {
    pending: watch::Sender<Pending>,
    written: watch::Receiver<u64>,
}

impl SliceWriter {
    /// Spawn the writer task for `slice`.
    ///
    /// The task exits once this handle is dropped.
    pub(super) fn spawn(slice: Slice, store: Arc<dyn KvStore>) -> Self {
        let (pending_tx, mut pending_rx) = watch::channel(Pending::default());
        let (written_tx, written_rx) = watch::channel(0_u64);
        let key = slice.storage_key();

        tokio::spawn(async move {
            while pending_rx.changed().await.is_ok() {
                let (version, payload) = {
                    let pending = pending_rx.borrow_and_update();
                    (pending.version, pending.payload.clone())
                };
                let Some(payload) = payload else { continue };

                match store.set(key, payload.as_ref().clone()).await {
                    Ok(()) => debug!(key, version, "Persisted slice"),
                    Err(e) => warn!(key, version, error = %e, "Failed to persist slice"),
                }
                // Acknowledge the attempt even on failure; the next mutation
                // writes the whole slice again.
                written_tx.send_replace(version);
            }
            debug!(key, "Slice writer stopped");
        });

        Self {
            pending: pending_tx,
            written: written_rx,
        }
    }

    /// Queue `payload` as the newest value of the slice.
    pub(super) fn publish(&self, payload: Vec<u8>) {
        let payload = Arc::new(payload);
        self.pending.send_modify(|pending| {
            pending.version += 1;
            pending.payload = Some(payload);
        });
    }

    /// Wait until every value published so far has been attempted.
    pub(super) async fn flush(&self) {
        let target = self.pending.borrow().version;
        let mut written = self.written.clone();
        // An error means the task is gone; nothing left to wait for.
        let _ = written.wait_for(|&version| version >= target).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_last_publish_wins() {
        let store = Arc::new(MemoryStore::new());
        let writer = SliceWriter::spawn(Slice::Cart, store.clone());

        for i in 0..50 {
            writer.publish(format!("[{i}]").into_bytes());
        }
        writer.flush().await;

        assert_eq!(
            store.get("cart-state").await.unwrap(),
            Some(b"[49]".to_vec())
        );
    }

    #[tokio::test]
    async fn test_flush_without_publish_returns() {
        let store = Arc::new(MemoryStore::new());
        let writer = SliceWriter::spawn(Slice::Favorites, store.clone());
        writer.flush().await;
        assert!(store.get("favorites-state").await.unwrap().is_none());
    }
}
