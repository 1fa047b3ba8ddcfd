// crates/sccpatch-core/src/rom.rs
//
// The memory image under construction.
//
// Grows only while it is being composed (append/pad). Every write after that
// is bounds checked and never resizes the buffer.

use std::ops::Range;

use crate::error::{PatchError, Result};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RomImage {
    bytes: Vec<u8>,
}

impl RomImage {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    /// Composition: append raw bytes at the end.
    pub fn append(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Composition: append `len` copies of `fill`.
    pub fn pad(&mut self, fill: u8, len: usize) {
        self.bytes.resize(self.bytes.len() + len, fill);
    }

    pub fn get(&self, offset: usize) -> Result<u8> {
        self.bytes
            .get(offset)
            .copied()
            .ok_or_else(|| out_of_range(offset, 1, self.bytes.len()))
    }

    pub fn set(&mut self, offset: usize, value: u8) -> Result<()> {
        let len = self.bytes.len();
        let slot = self
            .bytes
            .get_mut(offset)
            .ok_or_else(|| out_of_range(offset, 1, len))?;
        *slot = value;
        Ok(())
    }

    pub fn slice(&self, range: Range<usize>) -> Result<&[u8]> {
        let len = self.bytes.len();
        if range.start > range.end || range.end > len {
            return Err(out_of_range(range.start, range.end.saturating_sub(range.start), len));
        }
        Ok(&self.bytes[range])
    }

    /// Overwrite `data.len()` bytes starting at `offset`.
    pub fn write_at(&mut self, offset: usize, data: &[u8]) -> Result<()> {
        let len = self.bytes.len();
        let end = offset
            .checked_add(data.len())
            .ok_or_else(|| out_of_range(offset, data.len(), len))?;
        if end > len {
            return Err(out_of_range(offset, data.len(), len));
        }
        self.bytes[offset..end].copy_from_slice(data);
        Ok(())
    }
}

impl AsRef<[u8]> for RomImage {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

pub(crate) fn out_of_range(offset: usize, len: usize, buf_len: usize) -> PatchError {
    PatchError::OutOfRange(format!(
        "0x{offset:05x}+{len} exceeds buffer of {buf_len} bytes"
    ))
}
