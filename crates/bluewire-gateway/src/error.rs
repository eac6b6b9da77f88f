//! Gateway error types.

use thiserror::Error;

/// Convenience alias for results carrying a [`GatewayError`].
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors raised by the gateway layer.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        /// Path that was being parsed.
        path: String,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration parsed but failed validation.
    #[error("invalid config {path}: {reason}")]
    ConfigInvalid {
        /// Path that was being loaded.
        path: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The RPC server failed to bind or start.
    #[error("server error: {0}")]
    Server(String),
}
