//! Bluewire Gateway - the RPC surface of the Bluewire device session daemon.
//!
//! Serves the [`BluewireRpc`] API over a `jsonrpsee` `WebSocket` server:
//! clients subscribe to the event stream (authorization prompts included)
//! and answer outstanding prompts via `authReply`.
//!
//! # Architecture
//!
//! ```text
//! device stack ──SessionAuthorizer──▶ EventAuthorizer (bluewire-auth)
//!                                        │ publish            ▲ reply
//!                                        ▼                    │
//!                                     EventBus ──▶ PushAdapter ─▶ client
//!                                     (bluewire-events)   client ─▶ authReply
//! ```
//!
//! [`BluewireRpc`]: rpc::BluewireRpc

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config;
pub mod error;
pub mod push;
pub mod rpc;
pub mod server;

pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use push::PushAdapter;
pub use rpc::{AuthVerdict, BluewireRpcClient, BluewireRpcServer, DaemonStatus};
pub use server::GatewayServer;
