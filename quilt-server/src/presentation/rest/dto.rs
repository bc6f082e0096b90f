use crate::domain::{Patch, format_timestamp};
use serde::{Deserialize, Serialize};

/// One history entry for `GET /patches`
///
/// Carries `ai_line` too, so history and live updates share one shape.
#[derive(Debug, Clone, Serialize)]
pub struct PatchResponse {
    pub id: i64,
    pub color: String,
    pub message: String,
    pub ai_line: String,
    pub timestamp: String,
}

impl From<&Patch> for PatchResponse {
    fn from(patch: &Patch) -> Self {
        PatchResponse {
            id: patch.id.get(),
            color: patch.color.clone(),
            message: patch.message.clone(),
            ai_line: patch.ai_line.clone(),
            timestamp: format_timestamp(&patch.timestamp),
        }
    }
}

/// Body of `POST /reflection`; a missing or null `text` counts as empty
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReflectionRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReflectionResponse {
    pub line: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub patches: usize,
    pub clients: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: i32,
    pub msg: String,
}

impl ErrorResponse {
    pub fn new(code: i32, msg: impl Into<String>) -> Self {
        ErrorResponse {
            code,
            msg: msg.into(),
        }
    }
}
