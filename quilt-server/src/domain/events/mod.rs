use crate::domain::entities::Patch;

/// Domain events emitted by the quilt
#[derive(Debug, Clone)]
pub enum QuiltEvent {
    /// A patch was durably stored and should reach every connected client
    PatchSewn(Patch),
}
