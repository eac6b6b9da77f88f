//! The authorization correlator.
//!
//! [`EventAuthorizer`] implements the stack's [`SessionAuthorizer`] contract
//! by publishing each question as an `auth` event and, for questions that
//! expect an answer, blocking the stack's callback on a race between the
//! correlated reply and the caller-supplied timeout.

use std::sync::Arc;

use async_trait::async_trait;
use bluewire_core::{
    AuthTimeout, FileTransferData, MacAddress, SessionAuthorizer, SessionError, SessionResult,
};
use bluewire_events::{EventBus, EventKind};
use tracing::debug;
use uuid::Uuid;

use crate::event::{AuthParams, AuthRequestEvent, PairingKind, PairingParams, TransferParams};
use crate::registry::{AuthReply, PendingRequests};
use crate::sequence::{AuthId, RequestSequence};

/// Bridges the stack's blocking authorization callbacks to the event stream.
///
/// Shares the [`PendingRequests`] registry with the reply intake and the
/// [`EventBus`] with the push adapter; owns the id sequence.
pub struct EventAuthorizer {
    sequence: RequestSequence,
    pending: Arc<PendingRequests>,
    bus: Arc<EventBus>,
}

impl EventAuthorizer {
    /// Create an authorizer publishing on `bus` and correlating replies
    /// through `pending`.
    #[must_use]
    pub fn new(pending: Arc<PendingRequests>, bus: Arc<EventBus>) -> Self {
        Self {
            sequence: RequestSequence::new(),
            pending,
            bus,
        }
    }

    /// Assign an id to `params` and publish it; fire-and-forget.
    fn notify(&self, params: AuthParams) -> AuthId {
        let auth_id = self.sequence.next();
        self.bus.publish(
            EventKind::Auth,
            &AuthRequestEvent {
                auth_id,
                reply_required: false,
                params,
            },
        );

        auth_id
    }

    /// Publish `params` as a reply-required request and block until the
    /// correlated reply arrives or `timeout` elapses.
    ///
    /// The pending entry is registered before the publish so a client
    /// replying immediately cannot miss it. On timeout the entry is left in
    /// place; a late reply consumes it and is dropped by the registry.
    async fn notify_and_wait(&self, timeout: AuthTimeout, params: AuthParams) -> SessionResult<()> {
        let auth_id = self.sequence.next();
        let rx = self.pending.register(auth_id);

        self.bus.publish(
            EventKind::Auth,
            &AuthRequestEvent {
                auth_id,
                reply_required: true,
                params,
            },
        );

        debug!(auth_id = %auth_id, "waiting for authorization reply");

        match tokio::time::timeout(timeout.duration(), rx).await {
            Ok(Ok(AuthReply { accepted: true, .. })) => Ok(()),
            Ok(Ok(AuthReply { reason, .. })) => Err(SessionError::rejected(&reason)),
            // Sender dropped without a reply (registry torn down) or the
            // deadline elapsed: both conclude as a generic rejection.
            Ok(Err(_)) | Err(_) => Err(SessionError::rejection_timeout()),
        }
    }
}

#[async_trait]
impl SessionAuthorizer for EventAuthorizer {
    async fn display_pin_code(
        &self,
        _timeout: AuthTimeout,
        address: MacAddress,
        pincode: &str,
    ) -> SessionResult<()> {
        self.notify(AuthParams::Pairing {
            pairing_params: PairingParams {
                pincode: Some(pincode.to_string()),
                ..PairingParams::new(PairingKind::DisplayPincode, address)
            },
        });

        Ok(())
    }

    async fn display_passkey(
        &self,
        _timeout: AuthTimeout,
        address: MacAddress,
        passkey: u32,
        entered: u16,
    ) -> SessionResult<()> {
        self.notify(AuthParams::Pairing {
            pairing_params: PairingParams {
                passkey: Some(passkey),
                entered: Some(entered),
                ..PairingParams::new(PairingKind::DisplayPasskey, address)
            },
        });

        Ok(())
    }

    async fn confirm_passkey(
        &self,
        timeout: AuthTimeout,
        address: MacAddress,
        passkey: u32,
    ) -> SessionResult<()> {
        self.notify_and_wait(
            timeout,
            AuthParams::Pairing {
                pairing_params: PairingParams {
                    passkey: Some(passkey),
                    ..PairingParams::new(PairingKind::ConfirmPasskey, address)
                },
            },
        )
        .await
    }

    async fn authorize_pairing(
        &self,
        timeout: AuthTimeout,
        address: MacAddress,
    ) -> SessionResult<()> {
        self.notify_and_wait(
            timeout,
            AuthParams::Pairing {
                pairing_params: PairingParams::new(PairingKind::AuthorizePairing, address),
            },
        )
        .await
    }

    async fn authorize_service(
        &self,
        timeout: AuthTimeout,
        address: MacAddress,
        service: Uuid,
    ) -> SessionResult<()> {
        self.notify_and_wait(
            timeout,
            AuthParams::Pairing {
                pairing_params: PairingParams {
                    service_uuid: Some(service),
                    ..PairingParams::new(PairingKind::AuthorizeService, address)
                },
            },
        )
        .await
    }

    async fn authorize_transfer(
        &self,
        timeout: AuthTimeout,
        properties: FileTransferData,
    ) -> SessionResult<()> {
        self.notify_and_wait(
            timeout,
            AuthParams::Transfer {
                transfer_params: TransferParams {
                    file_properties: properties,
                },
            },
        )
        .await
    }
}
