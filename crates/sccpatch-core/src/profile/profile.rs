// crates/sccpatch-core/src/profile/profile.rs
//
// Everything that is specific to one conversion: input digests, image
// layout, patch ranges, the ignore set, collaborator commands. Paths are
// relative to the work directory chosen by the caller.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::container::PageMap;
use crate::fragment::naming::FragmentNaming;
use crate::integrity::ExpectedDigest;
use crate::passes::fixups::Fixups;
use crate::scan::scanner::IgnoreSet;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    /// Patched image path.
    pub output: String,
    pub primary: PrimaryInput,
    pub secondary: SecondaryInput,
    pub padding: Padding,
    #[serde(default)]
    pub fixups: Fixups,
    pub music: MusicParams,
    pub kss: KssParams,
    pub channels: ChannelParams,
    pub calls: CallParams,
    pub assembler: AssemblerParams,
}

/// Image the build starts from, gated as a whole.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryInput {
    pub path: String,
    pub digest: ExpectedDigest,
}

/// Donor image; only `start..end` is gated and appended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryInput {
    pub path: String,
    pub start: usize,
    pub end: usize,
    pub digest: ExpectedDigest,
}

impl SecondaryInput {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    pub fill: u8,
    pub len: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicParams {
    pub source: String,
    pub game: String,
    pub insert_offset: usize,
    #[serde(default)]
    pub params: Vec<u32>,
    /// External compiler. Without one the music stage is skipped.
    #[serde(default)]
    pub command: Option<CommandSpec>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KssParams {
    pub header: String,
    pub output: String,
    pub pages: PageMap,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelParams {
    pub start: usize,
    pub end: usize,
    pub delta: i32,
    #[serde(default)]
    pub ignore: IgnoreSet,
}

impl ChannelParams {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallParams {
    pub start: usize,
    /// Scan stops this many bytes before the end of the image.
    pub tail: usize,
    pub replacement: u16,
}

impl CallParams {
    pub fn range(&self, image_len: usize) -> Range<usize> {
        self.start..image_len.saturating_sub(self.tail)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblerParams {
    pub command: CommandSpec,
    pub fragments: FragmentNaming,
}

impl Profile {
    /// Size of the image after composition.
    pub fn composed_len(&self, primary_len: usize) -> usize {
        primary_len + (self.secondary.end - self.secondary.start) + self.padding.len
    }
}
