//! Error taxonomy shared across the Bluewire workspace.

use thiserror::Error;

/// The reason reported when a wait concludes without an explicit answer
/// (timeout) or when the client rejects without supplying one.
pub const DEFAULT_REJECTION_REASON: &str = "the authorization request was not accepted";

/// Convenience alias for results carrying a [`SessionError`].
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors surfaced by the session layer.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// A request argument failed validation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An authorization id is unknown, already consumed, or never issued.
    #[error("authorization request not found: {id}")]
    NotFound {
        /// The id that could not be resolved.
        id: i64,
    },

    /// An authorization wait concluded with an explicit "no" or a timeout.
    #[error("authorization rejected: {reason}")]
    AuthorizationRejected {
        /// Human-supplied reason, or [`DEFAULT_REJECTION_REASON`].
        reason: String,
    },

    /// A device stack operation failed.
    #[error("session error: {0}")]
    Stack(String),
}

impl SessionError {
    /// Build an [`SessionError::AuthorizationRejected`], substituting the
    /// default reason when the supplied one is empty.
    #[must_use]
    pub fn rejected(reason: &str) -> Self {
        let reason = if reason.is_empty() {
            DEFAULT_REJECTION_REASON.to_string()
        } else {
            reason.to_string()
        };
        Self::AuthorizationRejected { reason }
    }

    /// Build the rejection used when no reply arrives before the deadline.
    #[must_use]
    pub fn rejection_timeout() -> Self {
        Self::AuthorizationRejected {
            reason: DEFAULT_REJECTION_REASON.to_string(),
        }
    }
}
