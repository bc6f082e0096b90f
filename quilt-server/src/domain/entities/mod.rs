mod patch;

pub use patch::{
    MAX_AI_LINE_LEN, MAX_COLOR_LEN, MAX_MESSAGE_LEN, NewPatch, Patch, PatchValidationError,
};
