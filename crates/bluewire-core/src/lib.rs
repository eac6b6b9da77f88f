//! Bluewire Core - shared types for the Bluewire device session daemon.
//!
//! This crate defines the domain vocabulary that the rest of the workspace
//! builds on:
//! - [`MacAddress`] — parsed and validated Bluetooth device addresses
//! - Adapter, device and file-transfer property data
//! - [`SessionAuthorizer`] — the callback contract the device stack invokes
//!   when an operation needs a human decision
//! - [`DeviceSession`] — the read-facing boundary to the device stack
//! - [`SessionError`] — the error taxonomy shared across the workspace

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod address;
mod authorizer;
mod error;
mod session;
mod timeout;
mod types;

pub use address::{MacAddress, ParseMacError};
pub use authorizer::SessionAuthorizer;
pub use error::{DEFAULT_REJECTION_REASON, SessionError, SessionResult};
pub use session::DeviceSession;
pub use timeout::AuthTimeout;
pub use types::{AdapterData, DeviceData, FileTransferData, FileTransferStatus};
