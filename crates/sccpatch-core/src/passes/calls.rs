// crates/sccpatch-core/src/passes/calls.rs

use std::ops::Range;

use crate::error::Result;
use crate::reloc::write_u16_le;
use crate::scan::pattern::CALL_PATTERNS;
use crate::scan::scanner::visit;

/// Point every `call 0093h` (BIOS WRTPSG) in `range` at `replacement`.
pub fn patch_calls(buf: &mut [u8], range: Range<usize>, replacement: u16) -> Result<usize> {
    let n = visit(buf, range, CALL_PATTERNS, None, |b, m| {
        tracing::debug!(offset = m.offset, "call 0093h -> {:04x}h", replacement);
        write_u16_le(b, m.operand, replacement)
    })?;
    tracing::info!(count = n, "psg calls redirected to {:04x}h", replacement);
    Ok(n)
}
