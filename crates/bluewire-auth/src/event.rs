//! Wire payloads for `auth` events.

use bluewire_core::{FileTransferData, MacAddress};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::sequence::AuthId;

/// The sub-type of a pairing authorization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PairingKind {
    /// Show a pincode to be typed on the remote device.
    DisplayPincode,
    /// Show a passkey and entered-digit progress.
    DisplayPasskey,
    /// Confirm that a passkey matches the remote display.
    ConfirmPasskey,
    /// Authorize an incoming pairing request.
    AuthorizePairing,
    /// Authorize a connection to a service profile.
    AuthorizeService,
}

/// Parameters of a `pairing` authorization request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairingParams {
    /// The kind of pairing interaction requested.
    pub pairing_type: PairingKind,
    /// The address of the device involved.
    pub address: MacAddress,
    /// Pincode to display, for [`PairingKind::DisplayPincode`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    /// Passkey to display or confirm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passkey: Option<u32>,
    /// Digits entered so far, for [`PairingKind::DisplayPasskey`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entered: Option<u16>,
    /// Service profile UUID, for [`PairingKind::AuthorizeService`].
    #[serde(default, rename = "uuid", skip_serializing_if = "Option::is_none")]
    pub service_uuid: Option<Uuid>,
}

impl PairingParams {
    /// Bare parameters for `kind` with only the device address set.
    #[must_use]
    pub fn new(kind: PairingKind, address: MacAddress) -> Self {
        Self {
            pairing_type: kind,
            address,
            pincode: None,
            passkey: None,
            entered: None,
            service_uuid: None,
        }
    }
}

/// Parameters of a `transfer` authorization request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferParams {
    /// The properties of the offered file.
    pub file_properties: FileTransferData,
}

/// Kind-specific parameters, tagged by `auth_type` on the wire.
///
/// A tagged union rather than two optional fields: an envelope can never
/// claim to be a pairing request while carrying transfer parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "auth_type", rename_all = "lowercase")]
pub enum AuthParams {
    /// A pairing-related request.
    Pairing {
        /// The pairing parameters.
        pairing_params: PairingParams,
    },
    /// A file-transfer request.
    Transfer {
        /// The transfer parameters.
        transfer_params: TransferParams,
    },
}

/// One authorization question posed to the client, as published on the
/// event stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthRequestEvent {
    /// The id to echo back when replying.
    pub auth_id: AuthId,
    /// Whether a reply is expected; informational events set this to
    /// `false` and carry no pending registry entry.
    pub reply_required: bool,
    /// Kind-specific request parameters.
    #[serde(flatten)]
    pub params: AuthParams,
}
