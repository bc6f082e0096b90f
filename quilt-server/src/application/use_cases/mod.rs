mod list_patches;
mod reflect;
mod sew_patch;

pub use list_patches::ListPatchesUseCase;
pub use reflect::{FALLBACK_LINE, PROMPT_BACK_LINE, ReflectUseCase, build_prompt};
pub use sew_patch::{SewError, SewPatchCommand, SewPatchUseCase};
