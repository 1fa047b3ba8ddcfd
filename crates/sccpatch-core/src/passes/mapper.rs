// crates/sccpatch-core/src/passes/mapper.rs
//
// Konami4 -> Konami5 (SCC) bank switching.
// Konami4 selects banks by writing 6000h/8000h/A000h; Konami5 uses
// 7000h/9000h/B000h, i.e. the high byte of the target plus 10h.

use crate::error::Result;
use crate::scan::pattern::MAPPER_PATTERNS;
use crate::scan::scanner::visit;

pub const KONAMI5_STEP: u8 = 0x10;

/// Rewrite every mapper-select in the whole buffer. Run it once, on a freshly
/// composed image: the Konami5 values are outside the select set, so a second
/// pass finds no sites and leaves the buffer alone.
pub fn patch_mapper(buf: &mut [u8]) -> Result<usize> {
    let n = visit(buf, 0..buf.len(), MAPPER_PATTERNS, None, |b, m| {
        let old = b[m.operand];
        b[m.operand] = old.wrapping_add(KONAMI5_STEP);
        tracing::debug!(offset = m.offset, "mapper {:02x}00h -> {:02x}00h", old, b[m.operand]);
        Ok(())
    })?;
    tracing::info!(count = n, "mapper writes patched");
    Ok(n)
}
