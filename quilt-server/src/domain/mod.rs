pub mod entities;
pub mod events;
pub mod services;
pub mod value_objects;

pub use entities::{
    MAX_AI_LINE_LEN, MAX_COLOR_LEN, MAX_MESSAGE_LEN, NewPatch, Patch, PatchValidationError,
};
pub use events::QuiltEvent;
pub use services::Clock;
pub use value_objects::{ClientId, PatchId, TIMESTAMP_FORMAT, Timestamp, format_timestamp};
