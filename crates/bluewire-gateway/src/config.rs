//! Gateway configuration.
//!
//! Configuration is loaded from a TOML file. Every field carries a
//! sensible default so an empty file (or no file at all) yields a
//! working gateway bound to an ephemeral localhost port.

use std::path::Path;
use std::time::Duration;

use bluewire_core::AuthTimeout;
use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, GatewayResult};

/// Default listen address. Port 0 asks the OS for an ephemeral port.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:0";

/// Default capacity of the per-subscriber event buffer.
pub const DEFAULT_EVENT_BUFFER: usize = 128;

/// Default authorization timeout in seconds.
pub const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 30;

/// Gateway runtime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GatewayConfig {
    /// Socket address the WebSocket server binds to.
    pub listen_addr: String,

    /// Capacity of the bounded channel between the event bus and each
    /// subscriber. Events published while the buffer is full are dropped.
    pub event_buffer: usize,

    /// Seconds to wait for a client verdict on blocking authorization
    /// requests before rejecting them.
    pub auth_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_owned(),
            event_buffer: DEFAULT_EVENT_BUFFER,
            auth_timeout_secs: DEFAULT_AUTH_TIMEOUT_SECS,
        }
    }
}

impl GatewayConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ConfigRead`] if the file cannot be read,
    /// [`GatewayError::ConfigParse`] if it is not valid TOML, and
    /// [`GatewayError::ConfigInvalid`] if a field is out of range.
    pub fn load(path: impl AsRef<Path>) -> GatewayResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| GatewayError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&raw).map_err(|source| GatewayError::ConfigParse {
            path: path.display().to_string(),
            source,
        })?;

        if config.event_buffer == 0 {
            return Err(GatewayError::ConfigInvalid {
                path: path.display().to_string(),
                reason: "event_buffer must be at least 1".to_string(),
            });
        }

        Ok(config)
    }

    /// The configured authorization timeout.
    #[must_use]
    pub fn auth_timeout(&self) -> AuthTimeout {
        AuthTimeout::from(Duration::from_secs(self.auth_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.listen_addr, DEFAULT_LISTEN_ADDR);
        assert_eq!(config.event_buffer, DEFAULT_EVENT_BUFFER);
        assert_eq!(config.auth_timeout_secs, DEFAULT_AUTH_TIMEOUT_SECS);
    }

    #[test]
    fn empty_file_yields_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.flush().unwrap();

        let config = GatewayConfig::load(file.path()).unwrap();
        assert_eq!(config.listen_addr, DEFAULT_LISTEN_ADDR);
    }

    #[test]
    fn partial_file_overrides_some_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "listen_addr = \"0.0.0.0:9632\"").unwrap();
        writeln!(file, "auth_timeout_secs = 5").unwrap();
        file.flush().unwrap();

        let config = GatewayConfig::load(file.path()).unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:9632");
        assert_eq!(config.auth_timeout_secs, 5);
        assert_eq!(config.event_buffer, DEFAULT_EVENT_BUFFER);
        assert_eq!(config.auth_timeout().duration(), Duration::from_secs(5));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "listne_addr = \"oops\"").unwrap();
        file.flush().unwrap();

        let err = GatewayConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, GatewayError::ConfigParse { .. }));
    }

    #[test]
    fn zero_event_buffer_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "event_buffer = 0").unwrap();
        file.flush().unwrap();

        let err = GatewayConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, GatewayError::ConfigInvalid { .. }));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = GatewayConfig::load("/nonexistent/bluewire.toml").unwrap_err();
        assert!(matches!(err, GatewayError::ConfigRead { .. }));
    }
}
