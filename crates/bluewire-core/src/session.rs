//! The read-facing boundary to the device stack.

use crate::address::MacAddress;
use crate::error::SessionResult;
use crate::types::{AdapterData, DeviceData};

/// A live device stack session.
///
/// The concrete implementation (BlueZ, a platform backend, or a test fake)
/// lives outside this workspace; the gateway only reads adapter and device
/// properties through this trait and never drives protocol behavior.
pub trait DeviceSession: Send + Sync {
    /// All adapters known to the session.
    fn adapters(&self) -> Vec<AdapterData>;

    /// Devices associated with the given adapter.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Stack`] if the adapter is unknown.
    ///
    /// [`SessionError::Stack`]: crate::SessionError::Stack
    fn devices(&self, adapter: MacAddress) -> SessionResult<Vec<DeviceData>>;
}
