//! Byte ranges within a source buffer.

use crate::file_id::FileId;
use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` in one source file.
///
/// Every syntax node carries one, bound expressions copy it from their
/// syntax, and diagnostics point at it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Span {
    /// The file the range belongs to.
    pub file: FileId,
    /// Inclusive start offset.
    pub start: u32,
    /// Exclusive end offset.
    pub end: u32,
}

impl Span {
    /// Placeholder for nodes without a source location.
    pub const DUMMY: Span = Span {
        file: FileId::DUMMY,
        start: 0,
        end: 0,
    };

    /// Creates a span covering `start..end` in `file`.
    pub fn new(file: FileId, start: u32, end: u32) -> Self {
        Self { file, start, end }
    }

    /// Returns the smallest span covering both `self` and `other`.
    ///
    /// A dummy operand yields the other span unchanged.
    ///
    /// # Panics
    ///
    /// Panics if both spans are real and belong to different files.
    pub fn merge(self, other: Span) -> Span {
        if self.is_dummy() {
            return other;
        }
        if other.is_dummy() {
            return self;
        }
        assert_eq!(
            self.file, other.file,
            "cannot merge spans from different files"
        );
        Span {
            file: self.file,
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Returns `true` for a zero-length span.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if this is [`Span::DUMMY`] or another span in the dummy file.
    pub fn is_dummy(&self) -> bool {
        self.file == FileId::DUMMY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file() -> FileId {
        FileId::from_raw(0)
    }

    #[test]
    fn merge_covers_both() {
        let a = Span::new(file(), 5, 15);
        let b = Span::new(file(), 10, 25);
        assert_eq!(a.merge(b), Span::new(file(), 5, 25));
        assert_eq!(a.merge(b), b.merge(a));
    }

    #[test]
    fn merge_with_dummy_keeps_real_span() {
        let a = Span::new(file(), 3, 4);
        assert_eq!(a.merge(Span::DUMMY), a);
        assert_eq!(Span::DUMMY.merge(a), a);
    }

    #[test]
    fn len_and_empty() {
        let s = Span::new(file(), 10, 20);
        assert_eq!(s.len(), 10);
        assert!(!s.is_empty());
        assert!(Span::new(file(), 5, 5).is_empty());
    }

    #[test]
    fn dummy_detection() {
        assert!(Span::DUMMY.is_dummy());
        assert!(!Span::new(file(), 0, 0).is_dummy());
    }

    #[test]
    fn serde_roundtrip() {
        let s = Span::new(FileId::from_raw(1), 10, 20);
        let json = serde_json::to_string(&s).unwrap();
        let back: Span = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}
