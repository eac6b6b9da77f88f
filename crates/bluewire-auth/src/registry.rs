//! The pending authorization request registry.

use dashmap::DashMap;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::sequence::AuthId;

/// A client's answer to an authorization request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthReply {
    /// Whether the request was accepted.
    pub accepted: bool,
    /// Optional human-supplied reason (meaningful when rejecting).
    pub reason: String,
}

impl AuthReply {
    /// An accepting reply.
    #[must_use]
    pub fn accept() -> Self {
        Self {
            accepted: true,
            reason: String::new(),
        }
    }

    /// A rejecting reply with an optional reason.
    #[must_use]
    pub fn reject(reason: impl Into<String>) -> Self {
        Self {
            accepted: false,
            reason: reason.into(),
        }
    }
}

/// Concurrent map of outstanding authorization requests.
///
/// Each entry pairs an [`AuthId`] with the sender half of a one-shot reply
/// channel; the waiting authorizer holds the receiver half. Removal is a
/// single atomic step (`DashMap::remove`), so a reply is consumable exactly
/// once no matter how many clients race to answer the same id.
#[derive(Debug, Default)]
pub struct PendingRequests {
    requests: DashMap<AuthId, oneshot::Sender<AuthReply>>,
}

impl PendingRequests {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests currently awaiting a reply.
    ///
    /// Includes entries whose waiter has already timed out but whose reply
    /// has not yet arrived (see [`deliver`](Self::deliver)).
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Whether no requests are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Park a reply channel under `id` and return the receiving half.
    ///
    /// Ids come from [`RequestSequence`], so a collision is a programming
    /// error rather than a runtime condition.
    ///
    /// [`RequestSequence`]: crate::RequestSequence
    pub fn register(&self, id: AuthId) -> oneshot::Receiver<AuthReply> {
        let (tx, rx) = oneshot::channel();
        let previous = self.requests.insert(id, tx);
        debug_assert!(previous.is_none(), "duplicate authorization id {id}");
        debug!(auth_id = %id, "authorization request registered");
        rx
    }

    /// Atomically consume the entry for `id` and send `reply` into it.
    ///
    /// Returns `false` when `id` is unknown or already consumed; the caller
    /// surfaces that as a not-found error. Returns `true` when the entry was
    /// consumed, even if the waiter already gave up on its receiver — a late
    /// reply to a timed-out request is accepted and dropped silently rather
    /// than left to sit in the registry.
    pub fn deliver(&self, id: AuthId, reply: AuthReply) -> bool {
        let Some((_, tx)) = self.requests.remove(&id) else {
            return false;
        };

        if tx.send(reply).is_err() {
            warn!(auth_id = %id, "reply arrived after the authorization wait ended");
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn deliver_reaches_registered_receiver() {
        let registry = PendingRequests::new();
        let rx = registry.register(AuthId::new(1));

        assert!(registry.deliver(AuthId::new(1), AuthReply::accept()));

        let reply = rx.await.unwrap();
        assert!(reply.accepted);
    }

    #[tokio::test]
    async fn deliver_is_at_most_once() {
        let registry = PendingRequests::new();
        let _rx = registry.register(AuthId::new(7));

        assert!(registry.deliver(AuthId::new(7), AuthReply::reject("no")));
        assert!(!registry.deliver(AuthId::new(7), AuthReply::accept()));
        assert!(!registry.deliver(AuthId::new(7), AuthReply::accept()));
    }

    #[tokio::test]
    async fn deliver_unknown_id_fails() {
        let registry = PendingRequests::new();
        assert!(!registry.deliver(AuthId::new(99), AuthReply::accept()));
    }

    #[tokio::test]
    async fn deliver_after_receiver_dropped_still_consumes() {
        let registry = PendingRequests::new();
        let rx = registry.register(AuthId::new(3));
        drop(rx); // Waiter timed out and walked away.

        // First delivery consumes the entry without error.
        assert!(registry.deliver(AuthId::new(3), AuthReply::accept()));
        // The entry is gone afterwards.
        assert!(!registry.deliver(AuthId::new(3), AuthReply::accept()));
        assert!(registry.is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_delivery_succeeds_exactly_once() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let registry = Arc::new(PendingRequests::new());
        let _rx = registry.register(AuthId::new(5));

        let successes = Arc::new(AtomicUsize::new(0));
        let mut handles = Vec::new();
        for _ in 0..16 {
            let registry = Arc::clone(&registry);
            let successes = Arc::clone(&successes);
            handles.push(tokio::spawn(async move {
                if registry.deliver(AuthId::new(5), AuthReply::accept()) {
                    successes.fetch_add(1, Ordering::SeqCst);
                }
            }));
        }
        for h in handles {
            h.await.unwrap();
        }

        assert_eq!(successes.load(Ordering::SeqCst), 1);
    }
}
