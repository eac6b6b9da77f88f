//! Bluetooth MAC address parsing and formatting.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error returned when a MAC address string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid Bluetooth address '{input}': {reason}")]
pub struct ParseMacError {
    /// The input that failed to parse.
    pub input: String,
    /// Why parsing failed.
    pub reason: &'static str,
}

/// A 48-bit Bluetooth device address.
///
/// Serialized on the wire as the canonical colon-separated uppercase hex
/// form, e.g. `11:22:33:AA:BB:CC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    /// Create an address from raw octets.
    #[must_use]
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// The raw octets of this address.
    #[must_use]
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

impl FromStr for MacAddress {
    type Err = ParseMacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut octets = [0u8; 6];
        let mut parts = s.split(':');

        for octet in &mut octets {
            let part = parts.next().ok_or_else(|| ParseMacError {
                input: s.to_string(),
                reason: "expected 6 colon-separated octets",
            })?;
            // `from_str_radix` alone would admit sign prefixes like "+6".
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(ParseMacError {
                    input: s.to_string(),
                    reason: "octet is not two hex digits",
                });
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| ParseMacError {
                input: s.to_string(),
                reason: "octet is not two hex digits",
            })?;
        }

        if parts.next().is_some() {
            return Err(ParseMacError {
                input: s.to_string(),
                reason: "expected 6 colon-separated octets",
            });
        }

        Ok(Self(octets))
    }
}

impl Serialize for MacAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MacAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}
