use crate::domain::value_objects::{PatchId, Timestamp};
use thiserror::Error;

pub const MAX_COLOR_LEN: usize = 20;
pub const MAX_MESSAGE_LEN: usize = 300;
pub const MAX_AI_LINE_LEN: usize = 500;

/// A single quilt square, as persisted
///
/// Immutable once stored: there is no update or delete path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub id: PatchId,
    pub color: String,
    pub message: String,
    /// Reflection text; empty when the client had none
    pub ai_line: String,
    /// Assigned by the store at persistence time
    pub timestamp: Timestamp,
}

/// A patch submission before the store has assigned id and timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatch {
    pub color: String,
    pub message: String,
    pub ai_line: String,
}

impl NewPatch {
    pub fn new(color: impl Into<String>, message: impl Into<String>) -> Self {
        NewPatch {
            color: color.into(),
            message: message.into(),
            ai_line: String::new(),
        }
    }

    pub fn with_ai_line(mut self, ai_line: impl Into<String>) -> Self {
        self.ai_line = ai_line.into();
        self
    }

    /// Check the column length bounds
    pub fn validate(&self) -> Result<(), PatchValidationError> {
        check_len("color", &self.color, MAX_COLOR_LEN)?;
        check_len("message", &self.message, MAX_MESSAGE_LEN)?;
        check_len("ai_line", &self.ai_line, MAX_AI_LINE_LEN)?;
        Ok(())
    }

    pub fn into_patch(self, id: PatchId, timestamp: Timestamp) -> Patch {
        Patch {
            id,
            color: self.color,
            message: self.message,
            ai_line: self.ai_line,
            timestamp,
        }
    }
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), PatchValidationError> {
    let len = value.chars().count();
    if len > max {
        return Err(PatchValidationError::TooLong { field, max, len });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchValidationError {
    #[error("Field '{field}' exceeds {max} characters (got {len})")]
    TooLong {
        field: &'static str,
        max: usize,
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_new_patch_defaults_ai_line_to_empty() {
        let patch = NewPatch::new("#ff0000", "hello");
        assert_eq!(patch.ai_line, "");
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_long_message() {
        let patch = NewPatch::new("blue", "x".repeat(MAX_MESSAGE_LEN + 1));
        assert_eq!(
            patch.validate(),
            Err(PatchValidationError::TooLong {
                field: "message",
                max: MAX_MESSAGE_LEN,
                len: MAX_MESSAGE_LEN + 1,
            })
        );
    }

    #[test]
    fn test_validate_counts_chars_not_bytes() {
        // 20 multi-byte chars fit exactly
        let patch = NewPatch::new("💙".repeat(MAX_COLOR_LEN), "ok");
        assert!(patch.validate().is_ok());

        let patch = NewPatch::new("💙".repeat(MAX_COLOR_LEN + 1), "ok");
        assert!(matches!(
            patch.validate(),
            Err(PatchValidationError::TooLong { field: "color", .. })
        ));
    }

    #[test]
    fn test_validate_ai_line_bound() {
        let at_limit = NewPatch::new("red", "hi").with_ai_line("a".repeat(MAX_AI_LINE_LEN));
        assert!(at_limit.validate().is_ok());

        let over = NewPatch::new("red", "hi").with_ai_line("a".repeat(MAX_AI_LINE_LEN + 1));
        assert!(over.validate().is_err());
    }

    #[test]
    fn test_into_patch_keeps_fields() {
        let now = Utc::now();
        let patch = NewPatch::new("#00ff00", "calm")
            .with_ai_line("a quiet line")
            .into_patch(PatchId::new(7), now);

        assert_eq!(patch.id.get(), 7);
        assert_eq!(patch.color, "#00ff00");
        assert_eq!(patch.message, "calm");
        assert_eq!(patch.ai_line, "a quiet line");
        assert_eq!(patch.timestamp, now);
    }
}
