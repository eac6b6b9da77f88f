//! Per-call deadline for authorization waits.

use std::time::Duration;

/// Default authorization deadline when the caller does not supply one.
const DEFAULT_AUTH_TIMEOUT: Duration = Duration::from_secs(30);

/// The deadline supplied to each [`SessionAuthorizer`] call.
///
/// The device stack decides how long it is willing to keep a callback
/// blocked; the authorizer guarantees the call resolves within this bound.
///
/// [`SessionAuthorizer`]: crate::SessionAuthorizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthTimeout(Duration);

impl AuthTimeout {
    /// Wrap an explicit duration.
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self(duration)
    }

    /// Shorthand for a whole-second deadline.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    /// The wrapped duration.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.0
    }
}

impl Default for AuthTimeout {
    fn default() -> Self {
        Self(DEFAULT_AUTH_TIMEOUT)
    }
}

impl From<Duration> for AuthTimeout {
    fn from(duration: Duration) -> Self {
        Self(duration)
    }
}
