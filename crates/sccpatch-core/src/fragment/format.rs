// crates/sccpatch-core/src/fragment/format.rs

use crate::error::{PatchError, Result};
use crate::fragment::fragment::Fragment;

const MAGIC: &[u8; 4] = b"SPF1";
const HEADER_LEN: usize = 4 + 4 + 4;
const CRC_LEN: usize = 4;

/// Structured patch fragment, so the destination no longer rides in a file
/// name. Layout (little-endian):
/// MAGIC[4]
/// offset:u32
/// len:u32
/// bytes[len]
/// crc32:u32          (over everything before crc32)
pub fn encode(f: &Fragment) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + f.bytes.len() + CRC_LEN);
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&f.offset.to_le_bytes());
    out.extend_from_slice(&(f.bytes.len() as u32).to_le_bytes());
    out.extend_from_slice(&f.bytes);

    let crc = crc32(&out);
    out.extend_from_slice(&crc.to_le_bytes());
    out
}

pub fn decode(origin: &str, bytes: &[u8]) -> Result<Fragment> {
    if bytes.len() < HEADER_LEN + CRC_LEN {
        return Err(PatchError::Fragment(format!("{origin}: too small")));
    }
    if &bytes[0..4] != MAGIC {
        return Err(PatchError::Fragment(format!("{origin}: bad magic")));
    }

    let crc_off = bytes.len() - CRC_LEN;
    let crc_expected = read_u32(bytes, crc_off);
    if crc32(&bytes[..crc_off]) != crc_expected {
        return Err(PatchError::Fragment(format!("{origin}: crc32 mismatch")));
    }

    let offset = read_u32(bytes, 4);
    let len = read_u32(bytes, 8) as usize;
    if HEADER_LEN + len != crc_off {
        return Err(PatchError::Fragment(format!(
            "{origin}: len {len} does not match payload of {} bytes",
            crc_off - HEADER_LEN
        )));
    }

    Ok(Fragment::new(
        origin,
        offset,
        bytes[HEADER_LEN..crc_off].to_vec(),
    ))
}

pub fn is_structured(bytes: &[u8]) -> bool {
    bytes.len() >= 4 && &bytes[0..4] == MAGIC
}

fn read_u32(bytes: &[u8], i: usize) -> u32 {
    u32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]])
}

fn crc32(bytes: &[u8]) -> u32 {
    let mut h = crc32fast::Hasher::new();
    h.update(bytes);
    h.finalize()
}
