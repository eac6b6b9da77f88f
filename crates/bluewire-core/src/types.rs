//! Property data reported by the device stack.
//!
//! These are wire types: they cross the RPC boundary verbatim, so field
//! names follow the published JSON schema rather than internal naming.

use serde::{Deserialize, Serialize};

use crate::address::MacAddress;

/// Properties of a Bluetooth adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterData {
    /// The adapter's own address.
    pub address: MacAddress,
    /// Adapter name (e.g. `hci0`).
    pub name: String,
    /// Human-readable alias.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Whether the adapter is powered on.
    pub powered: bool,
    /// Whether the adapter is discoverable by other devices.
    pub discoverable: bool,
    /// Whether the adapter accepts pairing requests.
    pub pairable: bool,
}

/// Properties of a remote Bluetooth device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceData {
    /// The device address.
    pub address: MacAddress,
    /// The adapter this device is associated with.
    pub associated_adapter: MacAddress,
    /// Device name as advertised.
    pub name: String,
    /// Whether the device is currently paired.
    pub paired: bool,
    /// Whether the device is currently connected.
    pub connected: bool,
    /// Received signal strength, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rssi: Option<i16>,
}

/// State of an OBEX file transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileTransferStatus {
    /// Transfer is queued but not started.
    Queued,
    /// Transfer is in progress.
    Active,
    /// Transfer is suspended.
    Suspended,
    /// Transfer completed successfully.
    Complete,
    /// Transfer errored out.
    Error,
}

/// Properties of an OBEX file transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileTransferData {
    /// Transfer display name.
    pub name: String,
    /// The remote device the transfer belongs to.
    pub address: MacAddress,
    /// Local filename of the transfer.
    pub filename: String,
    /// Total size in bytes.
    pub size: u64,
    /// Bytes transferred so far.
    pub transferred: u64,
    /// Current transfer status.
    pub status: FileTransferStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_status_wire_names() {
        let json = serde_json::to_string(&FileTransferStatus::Active).unwrap();
        assert_eq!(json, "\"active\"");

        let status: FileTransferStatus = serde_json::from_str("\"complete\"").unwrap();
        assert_eq!(status, FileTransferStatus::Complete);
    }

    #[test]
    fn adapter_data_omits_empty_alias() {
        let data = AdapterData {
            address: "00:11:22:33:44:55".parse().unwrap(),
            name: "hci0".to_string(),
            alias: None,
            powered: true,
            discoverable: false,
            pairable: true,
        };
        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("alias").is_none());
        assert_eq!(json["address"], "00:11:22:33:44:55");
    }
}
