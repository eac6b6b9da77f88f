//! JSON-RPC API definition for daemon ↔ client communication.
//!
//! Uses jsonrpsee proc macros to define the RPC interface.
//! The daemon implements the server side; clients (agents answering
//! authorization requests) implement the client side.

use bluewire_core::{AdapterData, DeviceData};
use bluewire_events::EventEnvelope;
use jsonrpsee::proc_macros::rpc;
use jsonrpsee::types::ErrorObjectOwned;
use serde::{Deserialize, Serialize};

// ---------- Wire types ----------

/// A client's verdict on a pending authorization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthVerdict {
    /// Accept the request.
    Yes,
    /// Reject the request.
    No,
}

impl AuthVerdict {
    /// Whether this verdict accepts the request.
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Yes)
    }
}

/// Status information about the running daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonStatus {
    /// Whether the daemon is running.
    pub running: bool,
    /// How long the daemon has been running (seconds).
    pub uptime_secs: u64,
    /// Daemon version.
    pub version: String,
    /// Whether an event subscriber is currently attached and enabled.
    pub events_enabled: bool,
    /// Number of authorization requests waiting on a verdict.
    pub pending_auth_count: usize,
}

// ---------- RPC API ----------

/// The Bluewire daemon RPC API.
///
/// Implemented by the daemon (server side).
/// Called by clients (client side).
#[rpc(server, client, namespace = "bluewire")]
pub trait BluewireRpc {
    /// Answer a pending authorization request.
    #[method(name = "authReply")]
    async fn auth_reply(
        &self,
        auth_id: i64,
        verdict: AuthVerdict,
        reason: Option<String>,
    ) -> Result<(), ErrorObjectOwned>;

    /// List known Bluetooth adapters.
    #[method(name = "listAdapters")]
    async fn list_adapters(&self) -> Result<Vec<AdapterData>, ErrorObjectOwned>;

    /// List devices known to an adapter, addressed by MAC.
    #[method(name = "listDevices")]
    async fn list_devices(&self, adapter: String) -> Result<Vec<DeviceData>, ErrorObjectOwned>;

    /// Get daemon status.
    #[method(name = "status")]
    async fn status(&self) -> Result<DaemonStatus, ErrorObjectOwned>;

    /// Shutdown the daemon.
    #[method(name = "shutdown")]
    async fn shutdown(&self) -> Result<(), ErrorObjectOwned>;

    /// Subscribe to daemon events (real-time streaming).
    ///
    /// Only one subscriber is active at a time; a new subscription
    /// displaces the previous one.
    #[subscription(name = "subscribeEvents" => "event", unsubscribe = "unsubscribeEvents", item = EventEnvelope)]
    async fn subscribe_events(&self) -> jsonrpsee::core::SubscriptionResult;
}

/// Error codes for the RPC API.
pub mod error_codes {
    /// Malformed parameter (non-positive auth ID, unparsable address).
    pub const INVALID_ARGUMENT: i32 = -32001;
    /// No pending request (or no device) matches the given identifier.
    pub const NOT_FOUND: i32 = -32002;
    /// Internal daemon error.
    pub const INTERNAL_ERROR: i32 = -32003;
}
