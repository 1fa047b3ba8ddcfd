// crates/sccpatch-core/src/scan/scanner.rs
//
// Linear scanner over a pattern table.
//
// Every offset in the range is tested against every pattern, in table order.
// No skipping after a match: overlapping matches are all reported.
//
// `visit` runs over the live buffer. The callback may rewrite bytes, and the
// rewrite is seen by every test made afterwards (later patterns at the same
// offset, later offsets). Relocating `ld ix,0E0xxh` to 0EExxh therefore stops
// the `21 xx E0` tail from matching again one byte later.

use std::collections::BTreeSet;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scan::pattern::{Pattern, PatternId};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Match {
    pub offset: usize,
    pub pattern: PatternId,
    /// Absolute offset of the operand.
    pub operand: usize,
    pub operand_width: usize,
}

/// Absolute offsets a relocation pass must not touch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IgnoreSet(BTreeSet<usize>);

impl IgnoreSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.0.contains(&offset)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<usize> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn match_at(buf: &[u8], offset: usize, p: &Pattern) -> Option<Match> {
    if !p.matches_at(buf, offset) {
        return None;
    }
    Some(Match {
        offset,
        pattern: p.id,
        operand: offset + p.operand.offset(),
        operand_width: p.operand.width(),
    })
}

/// Walk `range` and hand each match to `f` with mutable access to the buffer.
/// Offsets in `ignore` are not visited. Returns the number of matches.
pub fn visit<F>(
    buf: &mut [u8],
    range: Range<usize>,
    patterns: &[Pattern],
    ignore: Option<&IgnoreSet>,
    mut f: F,
) -> Result<usize>
where
    F: FnMut(&mut [u8], &Match) -> Result<()>,
{
    let end = range.end.min(buf.len());
    let mut count = 0usize;

    for offset in range.start..end {
        if ignore.is_some_and(|ig| ig.contains(offset)) {
            continue;
        }
        for p in patterns {
            // Re-tested against the current bytes: earlier callbacks may
            // have rewritten them.
            if let Some(m) = match_at(buf, offset, p) {
                f(buf, &m)?;
                count += 1;
            }
        }
    }
    Ok(count)
}

/// Read-only scan, ascending offset order.
pub fn scan(
    buf: &[u8],
    range: Range<usize>,
    patterns: &[Pattern],
    ignore: Option<&IgnoreSet>,
) -> Vec<Match> {
    let end = range.end.min(buf.len());
    let mut out = Vec::new();
    for offset in range.start..end {
        if ignore.is_some_and(|ig| ig.contains(offset)) {
            continue;
        }
        out.extend(patterns.iter().filter_map(|p| match_at(buf, offset, p)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::pattern::{CHANNEL_PATTERNS, IMMEDIATE_LOAD, INDEXED_LOAD};

    #[test]
    fn overlapping_matches_are_all_reported() {
        // DD 21 34 E0: indexed-load at 0; `21 34 E0` is an immediate-load at 1.
        let buf: [u8; 4] = [0xDD, 0x21, 0x34, 0xE0];
        let ms = scan(&buf, 0..buf.len(), CHANNEL_PATTERNS, None);
        let got: Vec<(usize, PatternId)> = ms.iter().map(|m| (m.offset, m.pattern)).collect();
        assert_eq!(
            got,
            vec![(0, PatternId::IndexedLoad), (1, PatternId::ImmediateLoad)]
        );
        assert_eq!(ms[0].operand, 2);
        assert_eq!(ms[1].operand, 2);
    }

    #[test]
    fn visit_sees_its_own_rewrites() {
        let mut buf: [u8; 4] = [0xDD, 0x21, 0x34, 0xE0];
        let n = visit(&mut buf, 0..4, &[INDEXED_LOAD, IMMEDIATE_LOAD], None, |b, m| {
            b[m.operand + 1] = 0xEE;
            Ok(())
        })
        .unwrap();
        assert_eq!(n, 1);
    }

    #[test]
    fn ignored_offsets_are_skipped() {
        let buf: [u8; 6] = [0x21, 0x00, 0xE0, 0x21, 0x00, 0xE0];
        let ignore: IgnoreSet = [3usize].into_iter().collect();
        let ms = scan(&buf, 0..buf.len(), CHANNEL_PATTERNS, Some(&ignore));
        assert_eq!(ms.len(), 1);
        assert_eq!(ms[0].offset, 0);
    }

    #[test]
    fn range_end_is_clamped_to_buffer() {
        let buf: [u8; 3] = [0x21, 0x00, 0xE0];
        assert_eq!(scan(&buf, 0..100, CHANNEL_PATTERNS, None).len(), 1);
    }
}
