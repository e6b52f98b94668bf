//! Realtime fan-out to connected dashboard viewers
//!
//! Built on a tokio broadcast channel. Delivery is best-effort: a slow or
//! absent viewer never blocks order intake, and a lagging receiver skips
//! ahead instead of backing up the sender.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::broadcast;

use shared::util::now_millis;
use shared::RealtimeMessage;

/// Fan-out hub, cheap to clone
#[derive(Clone)]
pub struct BroadcastHub {
    tx: broadcast::Sender<String>,
    /// Connected viewer IDs with connect timestamps, for logging
    viewers: Arc<DashMap<String, i64>>,
}

impl BroadcastHub {
    /// Create a hub whose channel buffers up to `capacity` messages per viewer
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self {
            tx,
            viewers: Arc::new(DashMap::new()),
        }
    }

    /// Subscribe to the message stream
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }

    /// Track a connected viewer
    pub fn register_viewer(&self, viewer_id: &str) {
        self.viewers.insert(viewer_id.to_string(), now_millis());
        tracing::info!(viewer_id = %viewer_id, viewers = self.viewer_count(), "Viewer connected");
    }

    /// Drop a disconnected viewer
    pub fn unregister_viewer(&self, viewer_id: &str) {
        self.viewers.remove(viewer_id);
        tracing::info!(viewer_id = %viewer_id, viewers = self.viewer_count(), "Viewer disconnected");
    }

    pub fn viewer_count(&self) -> usize {
        self.viewers.len()
    }

    /// Publish a message to every connected viewer
    ///
    /// Serialization problems and the no-receivers case are logged and
    /// swallowed; publishing never fails the caller.
    pub fn publish(&self, message: &RealtimeMessage) {
        let text = match serde_json::to_string(message) {
            Ok(text) => text,
            Err(err) => {
                tracing::error!(error = %err, "Failed to serialize realtime message");
                return;
            }
        };

        match self.tx.send(text) {
            Ok(receivers) => {
                tracing::debug!(receivers, "Realtime message published");
            }
            Err(_) => {
                // No viewers connected, nothing to deliver
                tracing::debug!("Realtime message dropped, no viewers connected");
            }
        }
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new(64)
    }
}
