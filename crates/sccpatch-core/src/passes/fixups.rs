// crates/sccpatch-core/src/passes/fixups.rs
//
// Hand-placed single byte writes on the composed image (drum envelopes,
// stack pointer). Guards pin the bytes the writes were worked out against.
// Nothing is written unless every guard holds and every poke is in bounds.

use serde::{Deserialize, Serialize};

use crate::error::{PatchError, Result};
use crate::rom::{out_of_range, RomImage};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guard {
    pub label: String,
    pub offset: usize,
    pub expect: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poke {
    pub label: String,
    pub offset: usize,
    pub value: u8,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixups {
    #[serde(default)]
    pub guards: Vec<Guard>,
    #[serde(default)]
    pub pokes: Vec<Poke>,
}

pub fn apply_fixups(rom: &mut RomImage, fixups: &Fixups) -> Result<usize> {
    for g in &fixups.guards {
        let found = rom.get(g.offset)?;
        if found != g.expect {
            return Err(PatchError::GuardMismatch {
                label: g.label.clone(),
                offset: g.offset,
                expected: g.expect,
                found,
            });
        }
    }
    if let Some(p) = fixups.pokes.iter().find(|p| p.offset >= rom.len()) {
        return Err(out_of_range(p.offset, 1, rom.len()));
    }

    for p in &fixups.pokes {
        rom.set(p.offset, p.value)?;
        tracing::debug!(label = %p.label, offset = p.offset, value = p.value, "poke");
    }
    tracing::info!(guards = fixups.guards.len(), pokes = fixups.pokes.len(), "fixups applied");
    Ok(fixups.pokes.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poke(offset: usize, value: u8) -> Poke {
        Poke { label: format!("p{offset}"), offset, value }
    }

    #[test]
    fn guard_mismatch_writes_nothing() {
        let mut rom = RomImage::from_vec(vec![0x0A, 0x00, 0x00]);
        let fx = Fixups {
            guards: vec![Guard { label: "kick".into(), offset: 0, expect: 0x0B }],
            pokes: vec![poke(1, 0x90)],
        };
        let err = apply_fixups(&mut rom, &fx).unwrap_err();
        assert!(matches!(err, PatchError::GuardMismatch { found: 0x0A, .. }));
        assert_eq!(rom.as_slice(), &[0x0A, 0x00, 0x00]);
    }

    #[test]
    fn out_of_bounds_poke_writes_nothing() {
        let mut rom = RomImage::from_vec(vec![0u8; 2]);
        let fx = Fixups { guards: vec![], pokes: vec![poke(0, 1), poke(5, 1)] };
        assert!(apply_fixups(&mut rom, &fx).is_err());
        assert_eq!(rom.as_slice(), &[0, 0]);
    }

    #[test]
    fn pokes_apply_in_order() {
        let mut rom = RomImage::from_vec(vec![0x0A, 0, 0]);
        let fx = Fixups {
            guards: vec![Guard { label: "g".into(), offset: 0, expect: 0x0A }],
            pokes: vec![poke(1, 0x90), poke(2, 0x11), poke(1, 0x91)],
        };
        assert_eq!(apply_fixups(&mut rom, &fx).unwrap(), 3);
        assert_eq!(rom.as_slice(), &[0x0A, 0x91, 0x11]);
    }
}
