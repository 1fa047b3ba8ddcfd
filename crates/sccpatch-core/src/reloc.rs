// crates/sccpatch-core/src/reloc.rs
//
// 16-bit little-endian address arithmetic. Wraps mod 65536 like the Z80
// register it ends up in.

use crate::error::Result;
use crate::rom::out_of_range;

pub fn read_u16_le(buf: &[u8], offset: usize) -> Result<u16> {
    match buf.get(offset..offset.saturating_add(2)) {
        Some(&[lo, hi]) => Ok(u16::from_le_bytes([lo, hi])),
        _ => Err(out_of_range(offset, 2, buf.len())),
    }
}

pub fn write_u16_le(buf: &mut [u8], offset: usize, value: u16) -> Result<()> {
    let len = buf.len();
    match buf.get_mut(offset..offset.saturating_add(2)) {
        Some(slot) if slot.len() == 2 => {
            slot.copy_from_slice(&value.to_le_bytes());
            Ok(())
        }
        _ => Err(out_of_range(offset, 2, len)),
    }
}

/// Add `delta` to the address stored at `offset`. Returns the new address.
pub fn relocate(buf: &mut [u8], offset: usize, delta: i32) -> Result<u16> {
    let addr = read_u16_le(buf, offset)?;
    // i32 -> u16 keeps the low 16 bits, which is the delta mod 65536.
    let moved = addr.wrapping_add(delta as u16);
    write_u16_le(buf, offset, moved)?;
    Ok(moved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_little_endian() {
        let mut b: [u8; 2] = [0x34, 0xE0];
        assert_eq!(relocate(&mut b, 0, 0x0E00).unwrap(), 0xEE34);
        assert_eq!(b, [0x34, 0xEE]);
    }

    #[test]
    fn wraps_both_ways() {
        let mut b: [u8; 2] = [0x00, 0xE0];
        relocate(&mut b, 0, 0x3000).unwrap();
        assert_eq!(b, [0x00, 0x10]);
        relocate(&mut b, 0, -0xC000).unwrap();
        assert_eq!(b, [0x00, 0x50]);
    }

    #[test]
    fn last_byte_is_out_of_range() {
        let mut b = [0u8; 3];
        assert!(relocate(&mut b, 2, 1).is_err());
        assert_eq!(b, [0, 0, 0]);
    }
}
