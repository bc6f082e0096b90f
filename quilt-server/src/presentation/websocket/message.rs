use crate::domain::{Patch, QuiltEvent, format_timestamp};
use serde::{Deserialize, Serialize};

/// WebSocket incoming message
///
/// Frames look like `{"event": "new_patch", "data": {...}}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientMessage {
    NewPatch(NewPatchPayload),
}

/// A patch submission; unknown fields (e.g. a client timestamp) are ignored
#[derive(Debug, Clone, Deserialize)]
pub struct NewPatchPayload {
    pub color: String,
    pub message: String,
    #[serde(default)]
    pub ai_line: Option<String>,
}

/// WebSocket outgoing message
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    /// A stored patch, sent to every connected client
    UpdateQuilt(PatchBroadcast),
    /// Sent only to the client whose frame was rejected
    Error(ErrorPayload),
}

/// Live update payload; the store id stays server-side
#[derive(Debug, Clone, Serialize)]
pub struct PatchBroadcast {
    pub color: String,
    pub message: String,
    pub ai_line: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    pub message: String,
}

impl From<&Patch> for PatchBroadcast {
    fn from(patch: &Patch) -> Self {
        PatchBroadcast {
            color: patch.color.clone(),
            message: patch.message.clone(),
            ai_line: patch.ai_line.clone(),
            timestamp: format_timestamp(&patch.timestamp),
        }
    }
}

impl ServerMessage {
    pub fn from_event(event: &QuiltEvent) -> Self {
        match event {
            QuiltEvent::PatchSewn(patch) => ServerMessage::UpdateQuilt(patch.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error(ErrorPayload {
            message: message.into(),
        })
    }
}
