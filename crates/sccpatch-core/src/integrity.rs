// crates/sccpatch-core/src/integrity.rs
//
// Content digests gating every input before it is allowed into the image.

use std::ops::Range;

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{PatchError, Result};
use crate::rom::out_of_range;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    Md5,
    Sha256,
    Blake3,
}

impl DigestAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            DigestAlgorithm::Md5 => "md5",
            DigestAlgorithm::Sha256 => "sha256",
            DigestAlgorithm::Blake3 => "blake3",
        }
    }

    /// Lowercase hex digest of `bytes`.
    pub fn hex_digest(self, bytes: &[u8]) -> String {
        match self {
            DigestAlgorithm::Md5 => hex::encode(Md5::digest(bytes)),
            DigestAlgorithm::Sha256 => hex::encode(Sha256::digest(bytes)),
            DigestAlgorithm::Blake3 => blake3::hash(bytes).to_hex().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedDigest {
    pub algorithm: DigestAlgorithm,
    pub hex: String,
}

impl ExpectedDigest {
    pub fn md5(hex: &str) -> Self {
        Self {
            algorithm: DigestAlgorithm::Md5,
            hex: hex.to_string(),
        }
    }

    pub fn matches(&self, bytes: &[u8]) -> bool {
        self.algorithm
            .hex_digest(bytes)
            .eq_ignore_ascii_case(self.hex.trim())
    }
}

/// Fail with `Integrity` unless `bytes` hash to `expected`.
pub fn verify(subject: &str, bytes: &[u8], expected: &ExpectedDigest) -> Result<()> {
    let actual = expected.algorithm.hex_digest(bytes);
    if !actual.eq_ignore_ascii_case(expected.hex.trim()) {
        return Err(PatchError::Integrity {
            subject: subject.to_string(),
            algorithm: expected.algorithm.name().to_string(),
            expected: expected.hex.trim().to_ascii_lowercase(),
            actual,
        });
    }
    tracing::debug!(subject, algorithm = expected.algorithm.name(), "digest ok");
    Ok(())
}

/// Gate a sub-range of `bytes` and return it.
pub fn verify_range<'a>(
    subject: &str,
    bytes: &'a [u8],
    range: Range<usize>,
    expected: &ExpectedDigest,
) -> Result<&'a [u8]> {
    if range.start > range.end || range.end > bytes.len() {
        return Err(out_of_range(
            range.start,
            range.end.saturating_sub(range.start),
            bytes.len(),
        ));
    }
    let slice = &bytes[range];
    verify(subject, slice, expected)?;
    Ok(slice)
}
