// crates/sccpatch-core/src/profile/defaults.rs
//
// Vampire Killer (Konami4, PSG) converted to the Nemesis 3 SCC sound
// player on a Konami5 mapper.

use crate::container::PageMap;
use crate::fragment::naming::FragmentNaming;
use crate::integrity::ExpectedDigest;
use crate::passes::fixups::{Fixups, Guard, Poke};
use crate::profile::profile::*;

fn poke(label: &str, offset: usize, value: u8) -> Poke {
    Poke {
        label: label.to_string(),
        offset,
        value,
    }
}

pub fn vampire_killer_scc() -> Profile {
    Profile {
        name: "vkiller-scc".into(),
        output: "vkilscc.rom".into(),

        primary: PrimaryInput {
            path: "vkiller.rom".into(),
            digest: ExpectedDigest::md5("66da3107684286d1eba45efb8eae9113"),
        },

        // SCC player and its tables from Nemesis 3.
        secondary: SecondaryInput {
            path: "nemesis3.rom".into(),
            start: 0x14000,
            end: 0x1a000,
            digest: ExpectedDigest::md5("61c33112a5a2cefd1df81dc1434aa42a"),
        },

        // Room for the compiled music; image ends up 256 KiB.
        padding: Padding { fill: b' ', len: 0x1a000 },

        fixups: Fixups {
            // Drum table the pokes below were worked out against.
            guards: vec![Guard {
                label: "kick envelope".into(),
                offset: 0x21484,
                expect: 0x0a,
            }],
            pokes: vec![
                poke("kick fix lo", 0x21485, 0x90),
                poke("kick fix hi", 0x21486, 0x00),
                poke("snare fix lo", 0x21487, 0x90),
                poke("snare fix hi", 0x21488, 0x00),
                poke("kick lo", 0x213e0, 0xc0),
                poke("kick hi", 0x213e1, 0x00),
                poke("snare click lo", 0x21404, 0xa0),
                poke("snare click hi", 0x21405, 0x00),
                // Stack to 0FAF0h (BASIC PAINT scratch), freeing 0EE00h-0F100h
                // for the SCC player state.
                poke("stack hi", 0x0078, 0xfa),
                poke("stack lo", 0x0077, 0xf0),
            ],
        },

        music: MusicParams {
            source: "mml/vkiller_scc.mml".into(),
            game: "nemesis3".into(),
            insert_offset: 0x1a000,
            params: vec![0x7510, 0x8000],
            command: None,
        },

        kss: KssParams {
            header: "nemesis3_kss_header.bin".into(),
            output: "vkiller_scc.kss".into(),
            pages: PageMap::new(&[0x10, 0x00, 0x00, 0x11, 0x12, 0x13]),
        },

        // 0E000h -> 0EE00h
        channels: ChannelParams {
            start: 0x20000,
            end: 0x213f0,
            delta: 0x0e00,
            ignore: [0x20daa, 0x23340, 0x20beb].into_iter().collect(),
        },

        calls: CallParams {
            start: 0x20000,
            tail: 4,
            replacement: 0x7ee8,
        },

        assembler: AssemblerParams {
            command: CommandSpec {
                program: "sjasmplus".into(),
                args: vec!["vkiller_scc.asm".into()],
            },
            fragments: FragmentNaming::new("vkiller_patch", ".bin", 5),
        },
    }
}

impl Default for Profile {
    fn default() -> Self {
        vampire_killer_scc()
    }
}
