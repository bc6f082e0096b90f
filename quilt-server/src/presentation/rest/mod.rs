mod dto;
mod error;
mod handlers;
mod router;

pub use dto::*;
pub use error::{AI_ON_BREAK_LINE, ApiError, ReflectionFailure};
pub use router::{AppState, create_router};
