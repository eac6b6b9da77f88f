//! Bounded push adapter between the event bus and a subscriber task.
//!
//! [`crate::server::GatewayServer`] hands each WebSocket subscriber a
//! bounded channel. The [`PushAdapter`] is the sending half plugged into
//! the [`EventBus`](bluewire_events::EventBus): publishing never blocks
//! the caller, and a subscriber that cannot keep up loses events rather
//! than stalling the daemon.

use bluewire_events::{EventEnvelope, EventSink};
use tokio::sync::mpsc;
use tracing::warn;

/// Non-blocking sink that forwards envelopes into a bounded channel.
#[derive(Debug)]
pub struct PushAdapter {
    tx: mpsc::Sender<EventEnvelope>,
}

impl PushAdapter {
    /// Creates a push adapter and the receiving half for the subscriber
    /// task, with room for `capacity` buffered envelopes.
    ///
    /// A zero capacity is treated as 1; `tokio::sync::mpsc` panics on
    /// zero-capacity channels.
    #[must_use]
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<EventEnvelope>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }
}

impl EventSink for PushAdapter {
    fn deliver(&self, envelope: EventEnvelope) {
        if let Err(err) = self.tx.try_send(envelope) {
            match err {
                mpsc::error::TrySendError::Full(dropped) => {
                    warn!(event = %dropped.name, "subscriber buffer full, dropping event");
                }
                mpsc::error::TrySendError::Closed(_) => {
                    // Subscriber task already exited. Its bus slot is
                    // released on its way out.
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bluewire_events::EventKind;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn delivers_in_order() {
        let (adapter, mut rx) = PushAdapter::channel(4);

        adapter.deliver(EventEnvelope::new(EventKind::Adapter, json!({"n": 1})));
        adapter.deliver(EventEnvelope::new(EventKind::Device, json!({"n": 2})));

        assert_eq!(rx.recv().await.unwrap().id, EventKind::Adapter.tag());
        assert_eq!(rx.recv().await.unwrap().id, EventKind::Device.tag());
    }

    #[tokio::test]
    async fn drops_when_full() {
        let (adapter, mut rx) = PushAdapter::channel(1);

        adapter.deliver(EventEnvelope::new(EventKind::Adapter, json!({"n": 1})));
        adapter.deliver(EventEnvelope::new(EventKind::Adapter, json!({"n": 2})));

        let first = rx.recv().await.unwrap();
        assert_eq!(first.payload, json!({"n": 1}));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn zero_capacity_is_clamped() {
        let (adapter, mut rx) = PushAdapter::channel(0);

        adapter.deliver(EventEnvelope::new(EventKind::Adapter, json!({"n": 1})));
        assert_eq!(rx.recv().await.unwrap().payload, json!({"n": 1}));
    }

    #[tokio::test]
    async fn closed_receiver_is_ignored() {
        let (adapter, rx) = PushAdapter::channel(1);
        drop(rx);

        // Must not panic.
        adapter.deliver(EventEnvelope::new(EventKind::Error, json!({})));
    }
}
