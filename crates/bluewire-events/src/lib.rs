//! Bluewire Events - event fan-out for the Bluewire device session daemon.
//!
//! All session activity — authorization prompts included — is multiplexed
//! onto one outbound push stream. This crate provides the hub for that:
//! a process-wide [`EventBus`] with at most one active subscriber, an
//! enable/disable lifecycle, and a non-blocking publish path.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod bus;
mod envelope;

pub use bus::{EventBus, EventSink, SubscriberId};
pub use envelope::{EventEnvelope, EventKind};
