// crates/sccpatch-core/src/pipeline.rs
//
// The ordered build. One image value is threaded through every stage:
//
//   gate primary -> gate secondary slice -> compose -> fixups -> music
//   -> kss container -> mapper -> channel locations -> psg calls
//   -> assembler fragments -> merge
//
// The order is part of the contract: the container is cut before the mapper
// pass, and the fragments are built against the fully patched image.

use crate::container::assemble_container;
use crate::error::Result;
use crate::fragment::fragment::Fragment;
use crate::fragment::merge::merge_fragments;
use crate::integrity::{verify, verify_range};
use crate::passes::{apply_fixups, patch_calls, patch_channel_locations, patch_mapper};
use crate::profile::profile::{MusicParams, Profile};
use crate::rom::RomImage;
use crate::validate::validate_profile;

/// Request handed to the music compiler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MusicJob {
    pub source: String,
    pub game: String,
    pub insert_offset: usize,
    pub params: Vec<u32>,
}

impl From<&MusicParams> for MusicJob {
    fn from(m: &MusicParams) -> Self {
        Self {
            source: m.source.clone(),
            game: m.game.clone(),
            insert_offset: m.insert_offset,
            params: m.params.clone(),
        }
    }
}

/// Compiles music source into the image in place.
pub trait MusicCompiler {
    fn compile(&mut self, rom: &mut RomImage, job: &MusicJob) -> Result<()>;
}

/// Produces the patch fragments to merge into the patched image.
pub trait FragmentSource {
    fn fragments(&mut self, rom: &RomImage) -> Result<Vec<Fragment>>;
}

/// Leaves whatever music the image already carries.
pub struct SkipMusic;

impl MusicCompiler for SkipMusic {
    fn compile(&mut self, _rom: &mut RomImage, job: &MusicJob) -> Result<()> {
        tracing::warn!(source = %job.source, "music compile skipped");
        Ok(())
    }
}

/// A fixed, already decoded fragment list.
pub struct StaticFragments(pub Vec<Fragment>);

impl FragmentSource for StaticFragments {
    fn fragments(&mut self, _rom: &RomImage) -> Result<Vec<Fragment>> {
        Ok(std::mem::take(&mut self.0))
    }
}

pub struct Inputs<'a> {
    pub primary: &'a [u8],
    pub secondary: &'a [u8],
    pub kss_header: &'a [u8],
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub composed_len: usize,
    pub pokes: usize,
    pub mapper: usize,
    pub channels: usize,
    pub calls: usize,
    /// (origin, offset, len)
    pub fragments: Vec<(String, u32, usize)>,
}

pub struct BuildOutput {
    pub rom: RomImage,
    pub container: Vec<u8>,
    pub report: BuildReport,
}

pub struct Pipeline {
    profile: Profile,
}

impl Pipeline {
    pub fn new(profile: Profile) -> Result<Self> {
        validate_profile(&profile)?;
        Ok(Self { profile })
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Gate both inputs without building anything.
    pub fn verify_inputs(&self, primary: &[u8], secondary: &[u8]) -> Result<()> {
        let p = &self.profile;
        verify(&p.primary.path, primary, &p.primary.digest)?;
        verify_range(&p.secondary.path, secondary, p.secondary.range(), &p.secondary.digest)?;
        Ok(())
    }

    /// Gate the inputs, then lay out primary ++ secondary slice ++ padding.
    pub fn compose(&self, primary: &[u8], secondary: &[u8]) -> Result<RomImage> {
        let p = &self.profile;
        verify(&p.primary.path, primary, &p.primary.digest)?;
        let donor = verify_range(
            &p.secondary.path,
            secondary,
            p.secondary.range(),
            &p.secondary.digest,
        )?;

        let mut rom = RomImage::new();
        rom.append(primary);
        rom.append(donor);
        rom.pad(p.padding.fill, p.padding.len);
        tracing::info!(
            primary = primary.len(),
            donor = donor.len(),
            padding = p.padding.len,
            total = rom.len(),
            "image composed"
        );
        Ok(rom)
    }

    /// Patch stages that run after the container has been cut.
    pub fn patch(&self, rom: &mut RomImage, report: &mut BuildReport) -> Result<()> {
        let p = &self.profile;
        let len = rom.len();
        report.mapper = patch_mapper(rom.as_mut_slice())?;
        report.channels = patch_channel_locations(
            rom.as_mut_slice(),
            p.channels.range(),
            &p.channels.ignore,
            p.channels.delta,
        )?;
        report.calls = patch_calls(rom.as_mut_slice(), p.calls.range(len), p.calls.replacement)?;
        Ok(())
    }

    pub fn run(
        &self,
        inputs: &Inputs<'_>,
        music: &mut dyn MusicCompiler,
        source: &mut dyn FragmentSource,
    ) -> Result<BuildOutput> {
        let p = &self.profile;
        let mut report = BuildReport::default();

        let mut rom = self.compose(inputs.primary, inputs.secondary)?;
        report.composed_len = rom.len();

        report.pokes = apply_fixups(&mut rom, &p.fixups)?;

        music.compile(&mut rom, &MusicJob::from(&p.music))?;

        let container = assemble_container(inputs.kss_header, rom.as_slice(), &p.kss.pages)?;

        self.patch(&mut rom, &mut report)?;

        let fragments = source.fragments(&rom)?;
        merge_fragments(&mut rom, &fragments)?;
        report.fragments = fragments
            .iter()
            .map(|f| (f.origin.clone(), f.offset, f.len()))
            .collect();

        Ok(BuildOutput {
            rom,
            container,
            report,
        })
    }
}
