//! Monotonic authorization request ids.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use serde::{Deserialize, Serialize};

/// Identifies one authorization request for the lifetime of the process.
///
/// Always positive; clients echo it back when replying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthId(i64);

impl AuthId {
    /// Wrap a raw id received from a client.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw id value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Whether this id could ever have been issued.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for AuthId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Issues strictly increasing [`AuthId`]s, starting from 1.
///
/// Safe under concurrent use; cannot fail. A 64-bit counter does not wrap
/// within a process lifetime.
#[derive(Debug, Default)]
pub struct RequestSequence {
    counter: AtomicI64,
}

impl RequestSequence {
    /// Create a sequence whose first issued id is 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next id.
    #[must_use]
    pub fn next(&self) -> AuthId {
        AuthId(self.counter.fetch_add(1, Ordering::Relaxed).wrapping_add(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn starts_at_one_and_increases() {
        let seq = RequestSequence::new();
        assert_eq!(seq.next(), AuthId::new(1));
        assert_eq!(seq.next(), AuthId::new(2));
        assert_eq!(seq.next(), AuthId::new(3));
    }

    #[test]
    fn ids_are_valid() {
        let seq = RequestSequence::new();
        assert!(seq.next().is_valid());
        assert!(!AuthId::new(0).is_valid());
        assert!(!AuthId::new(-7).is_valid());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_ids_are_unique() {
        let seq = Arc::new(RequestSequence::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let seq = Arc::clone(&seq);
            handles.push(tokio::spawn(async move {
                (0..250).map(|_| seq.next()).collect::<Vec<_>>()
            }));
        }

        let mut all = HashSet::new();
        for h in handles {
            for id in h.await.unwrap() {
                assert!(id.is_valid());
                assert!(all.insert(id), "duplicate id issued: {id}");
            }
        }
        assert_eq!(all.len(), 2000);
    }

    #[test]
    fn serde_is_transparent() {
        let id = AuthId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let back: AuthId = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);
    }
}
