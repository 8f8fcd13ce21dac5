//! Opaque identifier for a source buffer owned by the host compiler.

use serde::{Deserialize, Serialize};

/// Identifies the source buffer a [`Span`](crate::Span) points into.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct FileId(u32);

impl FileId {
    /// File id used for synthesized nodes that have no real source location.
    pub const DUMMY: FileId = FileId(u32::MAX);

    /// Creates a `FileId` from a raw value.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}
