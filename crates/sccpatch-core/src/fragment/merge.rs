// crates/sccpatch-core/src/fragment/merge.rs

use crate::error::Result;
use crate::fragment::fragment::Fragment;
use crate::rom::RomImage;

/// Copy each fragment into the image at its offset, in the given order.
/// Fragments are expected not to overlap; if they do the later one wins.
/// Bounds are checked for all fragments before anything is written.
pub fn merge_fragments(rom: &mut RomImage, fragments: &[Fragment]) -> Result<usize> {
    for f in fragments {
        rom.slice(f.span())?;
    }

    for (i, f) in fragments.iter().enumerate() {
        if let Some(prev) = fragments[..i].iter().find(|p| p.overlaps(f)) {
            tracing::warn!(
                fragment = %f.origin,
                earlier = %prev.origin,
                "fragments overlap, later one wins"
            );
        }
        rom.write_at(f.offset as usize, &f.bytes)?;
        tracing::debug!(fragment = %f.origin, offset = f.offset, len = f.len(), "merged");
    }
    tracing::info!(count = fragments.len(), "fragments merged");
    Ok(fragments.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_fragment_wins_on_overlap() {
        let mut rom = RomImage::from_vec(vec![0u8; 8]);
        let frags = [
            Fragment::new("a", 1, vec![1, 1, 1]),
            Fragment::new("b", 2, vec![2, 2]),
        ];
        merge_fragments(&mut rom, &frags).unwrap();
        assert_eq!(rom.as_slice(), &[0, 1, 2, 2, 0, 0, 0, 0]);
    }

    #[test]
    fn out_of_bounds_fragment_writes_nothing() {
        let mut rom = RomImage::from_vec(vec![0u8; 4]);
        let frags = [
            Fragment::new("ok", 0, vec![9]),
            Fragment::new("bad", 3, vec![9, 9]),
        ];
        assert!(merge_fragments(&mut rom, &frags).is_err());
        assert_eq!(rom.as_slice(), &[0, 0, 0, 0]);
    }
}
