//! Bluewire Auth - authorization correlation for the Bluewire daemon.
//!
//! The device stack asks its questions synchronously: a pairing callback
//! blocks until someone says yes or no. The client that can answer sits on
//! the other side of a push stream. This crate bridges the two:
//!
//! 1. [`RequestSequence`] issues a process-unique id for the question.
//! 2. [`PendingRequests`] parks a one-shot reply channel under that id.
//! 3. [`EventAuthorizer`] publishes the question as an `auth` event and
//!    blocks the stack's callback on reply-or-timeout.
//! 4. The reply intake (in the gateway) delivers the correlated
//!    [`AuthReply`], waking the callback.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod authorizer;
mod event;
mod registry;
mod sequence;

pub use authorizer::EventAuthorizer;
pub use event::{AuthParams, AuthRequestEvent, PairingKind, PairingParams, TransferParams};
pub use registry::{AuthReply, PendingRequests};
pub use sequence::{AuthId, RequestSequence};
