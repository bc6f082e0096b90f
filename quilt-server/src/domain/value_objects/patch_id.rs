use std::fmt;

/// Store-assigned patch identifier
///
/// Strictly increasing in insertion order; never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatchId(i64);

impl PatchId {
    pub fn new(raw: i64) -> Self {
        PatchId(raw)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
