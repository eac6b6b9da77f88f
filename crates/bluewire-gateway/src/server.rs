//! Gateway server: binds the jsonrpsee WebSocket server and wires the
//! RPC surface to the event bus, pending-request registry, and
//! authorizer.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use bluewire_auth::{AuthId, AuthReply, EventAuthorizer, PendingRequests};
use bluewire_core::{AdapterData, AuthTimeout, DeviceData, DeviceSession, MacAddress, SessionError};
use bluewire_events::EventBus;
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::types::ErrorObjectOwned;
use jsonrpsee::{PendingSubscriptionSink, SubscriptionMessage};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::push::PushAdapter;
use crate::rpc::{AuthVerdict, BluewireRpcServer, DaemonStatus, error_codes};

/// A running gateway.
///
/// Owns the shared state behind the RPC surface and hands out the
/// [`EventAuthorizer`] the Bluetooth session layer uses to raise
/// authorization requests.
pub struct GatewayServer {
    authorizer: Arc<EventAuthorizer>,
    bus: Arc<EventBus>,
    pending: Arc<PendingRequests>,
    auth_timeout: AuthTimeout,
    shutdown_tx: broadcast::Sender<()>,
}

impl GatewayServer {
    /// Create and start a new gateway server.
    ///
    /// Binds to `config.listen_addr` (port 0 lets the OS pick a free
    /// port) and returns the server handle for lifecycle management.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Server`] if the server cannot bind.
    pub async fn start(
        config: &GatewayConfig,
        session: Arc<dyn DeviceSession>,
    ) -> GatewayResult<(Self, ServerHandle, SocketAddr)> {
        let bus = Arc::new(EventBus::new());
        let pending = Arc::new(PendingRequests::new());
        let authorizer = Arc::new(EventAuthorizer::new(
            Arc::clone(&pending),
            Arc::clone(&bus),
        ));

        let server = Server::builder()
            .build(&config.listen_addr)
            .await
            .map_err(|e| GatewayError::Server(format!("failed to bind server: {e}")))?;

        let addr = server
            .local_addr()
            .map_err(|e| GatewayError::Server(format!("failed to get address: {e}")))?;

        let (shutdown_tx, _) = broadcast::channel(1);

        let rpc_impl = RpcImpl {
            session,
            bus: Arc::clone(&bus),
            pending: Arc::clone(&pending),
            started_at: Instant::now(),
            shutdown_tx: shutdown_tx.clone(),
            event_buffer: config.event_buffer,
        };

        let handle = server.start(rpc_impl.into_rpc());

        info!(addr = %addr, "gateway server started");

        let gateway = Self {
            authorizer,
            bus,
            pending,
            auth_timeout: config.auth_timeout(),
            shutdown_tx,
        };

        Ok((gateway, handle, addr))
    }

    /// The authorizer the session layer raises requests through.
    #[must_use]
    pub fn authorizer(&self) -> Arc<EventAuthorizer> {
        Arc::clone(&self.authorizer)
    }

    /// The event bus events are published through.
    #[must_use]
    pub fn event_bus(&self) -> Arc<EventBus> {
        Arc::clone(&self.bus)
    }

    /// The registry of authorization requests awaiting a verdict.
    #[must_use]
    pub fn pending(&self) -> Arc<PendingRequests> {
        Arc::clone(&self.pending)
    }

    /// The configured timeout for blocking authorization requests.
    #[must_use]
    pub fn auth_timeout(&self) -> AuthTimeout {
        self.auth_timeout
    }

    /// A receiver that fires when a client requests shutdown via RPC.
    #[must_use]
    pub fn subscribe_shutdown(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }
}

impl std::fmt::Debug for GatewayServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayServer")
            .field("auth_timeout", &self.auth_timeout)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

/// The jsonrpsee RPC method handler.
struct RpcImpl {
    session: Arc<dyn DeviceSession>,
    bus: Arc<EventBus>,
    pending: Arc<PendingRequests>,
    started_at: Instant,
    shutdown_tx: broadcast::Sender<()>,
    event_buffer: usize,
}

/// Map a session-layer error onto the RPC error codes.
fn rpc_error(err: &SessionError) -> ErrorObjectOwned {
    let code = match err {
        SessionError::InvalidArgument(_) => error_codes::INVALID_ARGUMENT,
        SessionError::NotFound { .. } => error_codes::NOT_FOUND,
        _ => error_codes::INTERNAL_ERROR,
    };
    ErrorObjectOwned::owned(code, err.to_string(), None::<()>)
}

#[jsonrpsee::core::async_trait]
impl BluewireRpcServer for RpcImpl {
    async fn auth_reply(
        &self,
        auth_id: i64,
        verdict: AuthVerdict,
        reason: Option<String>,
    ) -> Result<(), ErrorObjectOwned> {
        let id = AuthId::new(auth_id);
        if !id.is_valid() {
            return Err(ErrorObjectOwned::owned(
                error_codes::INVALID_ARGUMENT,
                format!("invalid authorization ID: {auth_id}"),
                None::<()>,
            ));
        }

        let reply = if verdict.is_accepted() {
            AuthReply::accept()
        } else {
            AuthReply::reject(reason.unwrap_or_default())
        };

        if self.pending.deliver(id, reply) {
            debug!(%id, ?verdict, "authorization reply delivered");
            Ok(())
        } else {
            Err(ErrorObjectOwned::owned(
                error_codes::NOT_FOUND,
                format!("no pending authorization request with ID {auth_id}"),
                None::<()>,
            ))
        }
    }

    async fn list_adapters(&self) -> Result<Vec<AdapterData>, ErrorObjectOwned> {
        Ok(self.session.adapters())
    }

    async fn list_devices(&self, adapter: String) -> Result<Vec<DeviceData>, ErrorObjectOwned> {
        let address: MacAddress = adapter.parse().map_err(|e| {
            ErrorObjectOwned::owned(
                error_codes::INVALID_ARGUMENT,
                format!("invalid adapter address: {e}"),
                None::<()>,
            )
        })?;

        self.session.devices(address).map_err(|e| rpc_error(&e))
    }

    async fn status(&self) -> Result<DaemonStatus, ErrorObjectOwned> {
        Ok(DaemonStatus {
            running: true,
            uptime_secs: self.started_at.elapsed().as_secs(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            events_enabled: self.bus.is_enabled(),
            pending_auth_count: self.pending.len(),
        })
    }

    async fn shutdown(&self) -> Result<(), ErrorObjectOwned> {
        let _ = self.shutdown_tx.send(());
        info!("shutdown requested via RPC");
        Ok(())
    }

    async fn subscribe_events(
        &self,
        pending: PendingSubscriptionSink,
    ) -> jsonrpsee::core::SubscriptionResult {
        let sink = pending.accept().await?;

        // Register only after the handshake succeeds so a failed accept
        // cannot displace the current subscriber.
        let (adapter, mut rx) = PushAdapter::channel(self.event_buffer);
        let token = self.bus.register_subscriber(Arc::new(adapter));
        debug!(subscriber = ?token, "event subscriber attached");

        let bus = Arc::clone(&self.bus);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    () = sink.closed() => break,
                    maybe = rx.recv() => {
                        // None means the bus dropped our adapter: a new
                        // subscriber took the slot.
                        let Some(envelope) = maybe else { break };
                        match SubscriptionMessage::from_json(&envelope) {
                            Ok(msg) => {
                                if sink.send(msg).await.is_err() {
                                    break; // Client disconnected.
                                }
                            }
                            Err(e) => {
                                warn!(error = %e, "failed to serialize event");
                            }
                        }
                    }
                }
            }

            bus.release(token);
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_errors_map_to_rpc_codes() {
        let err = rpc_error(&SessionError::InvalidArgument("bad".into()));
        assert_eq!(err.code(), error_codes::INVALID_ARGUMENT);

        let err = rpc_error(&SessionError::NotFound { id: 7 });
        assert_eq!(err.code(), error_codes::NOT_FOUND);

        let err = rpc_error(&SessionError::Stack("dbus gone".into()));
        assert_eq!(err.code(), error_codes::INTERNAL_ERROR);
    }
}
