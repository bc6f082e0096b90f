pub mod ports;
pub mod use_cases;

pub use ports::{EventPublisher, GenerationError, PatchRepository, StoreError, TextGenerator};
pub use use_cases::{
    FALLBACK_LINE, ListPatchesUseCase, PROMPT_BACK_LINE, ReflectUseCase, SewError,
    SewPatchCommand, SewPatchUseCase, build_prompt,
};
