mod handler;
mod message;

pub use handler::{WsState, ws_handler};
pub use message::{ClientMessage, ErrorPayload, NewPatchPayload, PatchBroadcast, ServerMessage};
