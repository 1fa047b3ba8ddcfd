// crates/sccpatch-core/src/passes/channels.rs
//
// Move the SCC player's channel state out of 0E000h-0E3FFh.
//
// The player hard-codes its state addresses in `ld ix,nn` and the `ld` forms
// of the immediate-load family. Every such operand inside the player range is
// shifted by the relocation delta. A few byte runs in the range look like
// those instructions without being code; their offsets live in the ignore
// set, which was curated by hand. Recompiled music data can introduce new
// look-alikes, which is what `audit_channel_locations` is for.

use std::ops::Range;

use crate::error::Result;
use crate::reloc::relocate;
use crate::scan::pattern::CHANNEL_PATTERNS;
use crate::scan::scanner::{scan, visit, IgnoreSet, Match};

pub fn patch_channel_locations(
    buf: &mut [u8],
    range: Range<usize>,
    ignore: &IgnoreSet,
    delta: i32,
) -> Result<usize> {
    let n = visit(buf, range, CHANNEL_PATTERNS, Some(ignore), |b, m| {
        let moved = relocate(b, m.operand, delta)?;
        tracing::debug!(
            offset = m.offset,
            pattern = m.pattern.name(),
            "channel address -> {:04x}h",
            moved
        );
        Ok(())
    })?;
    tracing::info!(count = n, ignored = ignore.len(), delta, "channel locations relocated");
    Ok(n)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChannelAudit {
    /// Matches the pass would relocate.
    pub sites: Vec<Match>,
    /// Matches sitting on an ignored offset.
    pub suppressed: Vec<Match>,
    /// Ignore entries outside the range or matching nothing.
    pub stale: Vec<usize>,
}

/// Read-only preview of `patch_channel_locations` on an unpatched image.
///
/// `sites` is a static scan: it does not model rewrites suppressing later
/// overlapping matches, so it can list a tail match the pass itself skips.
pub fn audit_channel_locations(
    buf: &[u8],
    range: Range<usize>,
    ignore: &IgnoreSet,
) -> ChannelAudit {
    let all = scan(buf, range.clone(), CHANNEL_PATTERNS, None);
    let (suppressed, sites): (Vec<Match>, Vec<Match>) =
        all.into_iter().partition(|m| ignore.contains(m.offset));

    let stale = ignore
        .iter()
        .filter(|&off| !range.contains(&off) || !suppressed.iter().any(|m| m.offset == off))
        .collect();

    ChannelAudit {
        sites,
        suppressed,
        stale,
    }
}
