//! Event kinds and the wire envelope pushed to subscribers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The families of events carried on the push stream.
///
/// Each kind has a fixed integer tag and a wire name; the payload schema is
/// fixed per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Adapter property changes.
    Adapter,
    /// Device property changes.
    Device,
    /// Stack-level error reports.
    Error,
    /// Media player state changes.
    MediaPlayer,
    /// OBEX file transfer progress.
    FileTransfer,
    /// Authorization prompts awaiting (or not requiring) a reply.
    Auth,
}

impl EventKind {
    /// The integer tag used as the push-stream message id.
    ///
    /// Tags are part of the wire contract and never change per kind.
    #[must_use]
    pub const fn tag(self) -> u32 {
        match self {
            Self::Adapter => 1,
            Self::Device => 2,
            Self::Error => 3,
            Self::MediaPlayer => 4,
            Self::FileTransfer => 5,
            Self::Auth => 100,
        }
    }

    /// The event name on the wire.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Adapter => "adapter",
            Self::Device => "device",
            Self::Error => "error",
            Self::MediaPlayer => "mediaplayer",
            Self::FileTransfer => "filetransfer",
            Self::Auth => "auth",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One message on the push stream.
///
/// `id` is the kind's tag, `name` the kind's wire name, and `payload` the
/// kind-specific JSON body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Event-kind tag (constant per `name`).
    pub id: u32,
    /// Event type name.
    pub name: String,
    /// Kind-specific payload.
    pub payload: serde_json::Value,
}

impl EventEnvelope {
    /// Build an envelope for `kind` around an already-serialized payload.
    #[must_use]
    pub fn new(kind: EventKind, payload: serde_json::Value) -> Self {
        Self {
            id: kind.tag(),
            name: kind.name().to_string(),
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_tag_is_stable() {
        assert_eq!(EventKind::Auth.tag(), 100);
        assert_eq!(EventKind::Auth.name(), "auth");
    }

    #[test]
    fn envelope_serde_round_trip() {
        let env = EventEnvelope::new(EventKind::Device, serde_json::json!({"connected": true}));
        let json = serde_json::to_string(&env).unwrap();
        let back: EventEnvelope = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, 2);
        assert_eq!(back.name, "device");
        assert_eq!(back.payload["connected"], true);
    }
}
