//! The authorization callback contract consumed from the device stack.

use async_trait::async_trait;
use uuid::Uuid;

use crate::address::MacAddress;
use crate::error::SessionResult;
use crate::timeout::AuthTimeout;
use crate::types::FileTransferData;

/// Callbacks the device stack invokes when an operation needs a human
/// decision.
///
/// The stack calls these synchronously from within a pairing or transfer
/// flow and blocks on the result. Implementations bridge each call to
/// whatever surface can reach a human — Bluewire's implementation publishes
/// the question to the event stream and waits for a correlated reply.
///
/// The display methods are informational: they notify and return
/// immediately. The remaining methods block until the user answers or
/// `timeout` elapses, and return [`SessionError::AuthorizationRejected`]
/// on "no" or timeout.
///
/// [`SessionError::AuthorizationRejected`]: crate::SessionError::AuthorizationRejected
#[async_trait]
pub trait SessionAuthorizer: Send + Sync {
    /// Show a pincode the user must enter on the remote device.
    async fn display_pin_code(
        &self,
        timeout: AuthTimeout,
        address: MacAddress,
        pincode: &str,
    ) -> SessionResult<()>;

    /// Show a passkey and how many digits the remote side has entered.
    async fn display_passkey(
        &self,
        timeout: AuthTimeout,
        address: MacAddress,
        passkey: u32,
        entered: u16,
    ) -> SessionResult<()>;

    /// Ask the user to confirm that `passkey` matches the remote display.
    async fn confirm_passkey(
        &self,
        timeout: AuthTimeout,
        address: MacAddress,
        passkey: u32,
    ) -> SessionResult<()>;

    /// Ask the user to authorize an incoming pairing request.
    async fn authorize_pairing(&self, timeout: AuthTimeout, address: MacAddress)
    -> SessionResult<()>;

    /// Ask the user to authorize a connection to a service profile.
    async fn authorize_service(
        &self,
        timeout: AuthTimeout,
        address: MacAddress,
        service: Uuid,
    ) -> SessionResult<()>;

    /// Ask the user to accept an incoming file transfer.
    async fn authorize_transfer(
        &self,
        timeout: AuthTimeout,
        properties: FileTransferData,
    ) -> SessionResult<()>;
}
