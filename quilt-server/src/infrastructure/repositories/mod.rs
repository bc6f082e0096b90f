mod in_memory_patch;
mod sqlite_patch;

pub use in_memory_patch::InMemoryPatchRepository;
pub use sqlite_patch::SqlitePatchRepository;
