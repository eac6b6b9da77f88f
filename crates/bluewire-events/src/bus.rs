//! The single-subscriber event bus.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use serde::Serialize;
use tracing::{trace, warn};

use crate::envelope::{EventEnvelope, EventKind};

/// Identifies one registration on the bus.
///
/// Registration replaces any previous subscriber; the id lets the replaced
/// subscriber's deferred cleanup recognize that the slot is no longer its
/// own (see [`EventBus::release`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(u64);

/// Where published envelopes go.
///
/// `deliver` is called on the publisher's task and must not block: a slow or
/// gone client may at most cost the publisher a failed handoff, never a
/// stall. Implementations buffer or drop.
pub trait EventSink: Send + Sync {
    /// Hand one envelope to the subscriber.
    fn deliver(&self, envelope: EventEnvelope);
}

struct Slot {
    id: SubscriberId,
    sink: Arc<dyn EventSink>,
}

/// Process-wide publish/subscribe hub with at most one active subscriber.
///
/// Starts disabled; [`register_subscriber`](Self::register_subscriber)
/// enables fan-out and [`disable`](Self::disable)/[`release`](Self::release)
/// turn it back off. While disabled, `publish` is a cheap no-op so the
/// device stack pays nothing when nobody is listening.
pub struct EventBus {
    slot: RwLock<Option<Slot>>,
    enabled: AtomicBool,
    next_id: AtomicU64,
}

impl EventBus {
    /// Create a bus with no subscriber; events start disabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
            enabled: AtomicBool::new(false),
            next_id: AtomicU64::new(0),
        }
    }

    /// Whether events are currently enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Install `sink` as the sole subscriber and enable events.
    ///
    /// Any previously installed subscriber is dropped; it observes nothing
    /// further.
    pub fn register_subscriber(&self, sink: Arc<dyn EventSink>) -> SubscriberId {
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed).wrapping_add(1));

        let mut slot = self.slot.write().expect("event bus lock poisoned");
        if let Some(old) = slot.replace(Slot { id, sink }) {
            trace!(replaced = old.id.0, "event subscriber replaced");
        }
        self.enabled.store(true, Ordering::Release);

        id
    }

    /// Disable events and drop the current subscriber. Idempotent.
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Release);
        self.slot.write().expect("event bus lock poisoned").take();
    }

    /// Disable events only if `id` still owns the subscriber slot.
    ///
    /// Called by a departing subscriber; a no-op when the slot has already
    /// been handed to a replacement.
    pub fn release(&self, id: SubscriberId) {
        let mut slot = self.slot.write().expect("event bus lock poisoned");
        if slot.as_ref().is_some_and(|s| s.id == id) {
            slot.take();
            self.enabled.store(false, Ordering::Release);
        }
    }

    /// Publish `payload` as a `kind` event to the current subscriber.
    ///
    /// No-op when disabled or when the payload fails to serialize (the
    /// latter is logged; payload types are workspace-defined so this does
    /// not happen in practice).
    pub fn publish<T: Serialize>(&self, kind: EventKind, payload: &T) {
        if !self.enabled.load(Ordering::Acquire) {
            return;
        }

        let payload = match serde_json::to_value(payload) {
            Ok(v) => v,
            Err(e) => {
                warn!(kind = %kind, error = %e, "failed to serialize event payload");
                return;
            }
        };

        let slot = self.slot.read().expect("event bus lock poisoned");
        if let Some(s) = slot.as_ref() {
            trace!(kind = %kind, "publishing event");
            s.sink.deliver(EventEnvelope::new(kind, payload));
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("enabled", &self.is_enabled())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Sink that records every delivered envelope.
    #[derive(Default)]
    struct RecordingSink {
        seen: Mutex<Vec<EventEnvelope>>,
    }

    impl EventSink for RecordingSink {
        fn deliver(&self, envelope: EventEnvelope) {
            self.seen.lock().unwrap().push(envelope);
        }
    }

    impl RecordingSink {
        fn count(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    #[test]
    fn starts_disabled_and_publish_is_noop() {
        let bus = EventBus::new();
        assert!(!bus.is_enabled());

        // Nothing to observe, but must not panic or block.
        bus.publish(EventKind::Adapter, &serde_json::json!({"powered": true}));
    }

    #[test]
    fn register_enables_and_delivers() {
        let bus = EventBus::new();
        let sink = Arc::new(RecordingSink::default());
        bus.register_subscriber(Arc::clone(&sink) as Arc<dyn EventSink>);

        assert!(bus.is_enabled());
        bus.publish(EventKind::Auth, &serde_json::json!({"auth_id": 1}));

        let seen = sink.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].id, 100);
        assert_eq!(seen[0].name, "auth");
        assert_eq!(seen[0].payload["auth_id"], 1);
    }

    #[test]
    fn disable_stops_delivery() {
        let bus = EventBus::new();
        let sink = Arc::new(RecordingSink::default());
        bus.register_subscriber(Arc::clone(&sink) as Arc<dyn EventSink>);

        bus.publish(EventKind::Device, &serde_json::json!({}));
        bus.disable();
        assert!(!bus.is_enabled());
        bus.publish(EventKind::Device, &serde_json::json!({}));

        assert_eq!(sink.count(), 1);

        // Idempotent.
        bus.disable();
    }

    #[test]
    fn new_subscriber_replaces_previous() {
        let bus = EventBus::new();
        let first = Arc::new(RecordingSink::default());
        let second = Arc::new(RecordingSink::default());

        bus.register_subscriber(Arc::clone(&first) as Arc<dyn EventSink>);
        bus.publish(EventKind::Auth, &serde_json::json!({"auth_id": 1}));

        bus.register_subscriber(Arc::clone(&second) as Arc<dyn EventSink>);
        bus.publish(EventKind::Auth, &serde_json::json!({"auth_id": 2}));

        assert_eq!(first.count(), 1);
        assert_eq!(second.count(), 1);
        assert_eq!(second.seen.lock().unwrap()[0].payload["auth_id"], 2);
    }

    #[test]
    fn release_by_stale_id_keeps_successor() {
        let bus = EventBus::new();
        let first = Arc::new(RecordingSink::default());
        let second = Arc::new(RecordingSink::default());

        let first_id = bus.register_subscriber(Arc::clone(&first) as Arc<dyn EventSink>);
        bus.register_subscriber(Arc::clone(&second) as Arc<dyn EventSink>);

        // The replaced subscriber's cleanup must not tear down the new one.
        bus.release(first_id);
        assert!(bus.is_enabled());

        bus.publish(EventKind::Error, &serde_json::json!({"message": "x"}));
        assert_eq!(second.count(), 1);
    }

    #[test]
    fn release_by_current_id_disables() {
        let bus = EventBus::new();
        let sink = Arc::new(RecordingSink::default());
        let id = bus.register_subscriber(Arc::clone(&sink) as Arc<dyn EventSink>);

        bus.release(id);
        assert!(!bus.is_enabled());

        bus.publish(EventKind::Error, &serde_json::json!({}));
        assert_eq!(sink.count(), 0);
    }

    #[test]
    fn delivery_preserves_publish_order() {
        let bus = EventBus::new();
        let sink = Arc::new(RecordingSink::default());
        bus.register_subscriber(Arc::clone(&sink) as Arc<dyn EventSink>);

        for i in 0..10u32 {
            bus.publish(EventKind::Device, &serde_json::json!({ "seq": i }));
        }

        let seen = sink.seen.lock().unwrap();
        let seqs: Vec<u64> = seen
            .iter()
            .map(|e| e.payload["seq"].as_u64().unwrap())
            .collect();
        assert_eq!(seqs, (0..10).collect::<Vec<_>>());
    }
}
