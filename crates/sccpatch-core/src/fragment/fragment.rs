// crates/sccpatch-core/src/fragment/fragment.rs

use std::ops::Range;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    /// Where it came from (file name), for logs.
    pub origin: String,
    pub offset: u32,
    pub bytes: Vec<u8>,
}

impl Fragment {
    pub fn new(origin: impl Into<String>, offset: u32, bytes: Vec<u8>) -> Self {
        Self {
            origin: origin.into(),
            offset,
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Destination range in the image.
    pub fn span(&self) -> Range<usize> {
        let start = self.offset as usize;
        start..start + self.bytes.len()
    }

    pub fn overlaps(&self, other: &Fragment) -> bool {
        let (a, b) = (self.span(), other.span());
        !self.is_empty() && !other.is_empty() && a.start < b.end && b.start < a.end
    }
}
