// crates/sccpatch-cli/src/cmd/build.rs

use anyhow::Context;
use clap::Args;
use sccpatch_core::pipeline::{Inputs, SkipMusic};
use sccpatch_core::{MusicCompiler, Pipeline};

use crate::cmd::ProfileSel;
use crate::io::{fragments::AssemblerFragments, music::ExternalMusic, profile_file, rom_file};

#[derive(Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub sel: ProfileSel,

    /// Keep the music already in the image (do not run the music compiler)
    #[arg(long)]
    pub skip_music: bool,

    /// Do not run the assembler; merge the fragment files already present
    #[arg(long)]
    pub skip_assembler: bool,

    /// Output ROM path (overrides the profile, relative to the current directory)
    #[arg(long)]
    pub out: Option<String>,

    /// Output KSS path (overrides the profile, relative to the current directory)
    #[arg(long)]
    pub kss_out: Option<String>,
}

pub fn run(args: BuildArgs) -> anyhow::Result<()> {
    let profile = profile_file::select(&args.sel)?;
    let wd = args.sel.workdir.clone();

    let primary = rom_file::load(&wd.join(&profile.primary.path))?;
    let secondary = rom_file::load(&wd.join(&profile.secondary.path))?;
    let header = rom_file::load(&wd.join(&profile.kss.header))?;

    let mut skip = SkipMusic;
    let mut external;
    let music: &mut dyn MusicCompiler = match (&profile.music.command, args.skip_music) {
        (Some(cmd), false) => {
            external = ExternalMusic {
                workdir: wd.clone(),
                command: cmd.clone(),
                scratch_name: format!("{}.music.tmp", profile.name),
            };
            &mut external
        }
        _ => &mut skip,
    };

    let mut fragments = AssemblerFragments {
        workdir: wd.clone(),
        command: profile.assembler.command.clone(),
        naming: profile.assembler.fragments.clone(),
        run_assembler: !args.skip_assembler,
    };

    let rom_out = args
        .out
        .clone()
        .map(Into::into)
        .unwrap_or_else(|| wd.join(&profile.output));
    let kss_out = args
        .kss_out
        .clone()
        .map(Into::into)
        .unwrap_or_else(|| wd.join(&profile.kss.output));

    let pipeline = Pipeline::new(profile)?;
    let inputs = Inputs {
        primary: &primary,
        secondary: &secondary,
        kss_header: &header,
    };
    let out = pipeline
        .run(&inputs, music, &mut fragments)
        .with_context(|| format!("build {}", pipeline.profile().name))?;

    // Only now, with every stage done, does anything reach the disk.
    rom_file::save_all(&[
        (rom_out.as_path(), out.rom.as_slice()),
        (kss_out.as_path(), out.container.as_slice()),
    ])?;

    let r = &out.report;
    eprintln!(
        "build ok: profile={} rom={} ({} bytes) kss={} ({} bytes) pokes={} mapper={} channels={} calls={} fragments={}",
        pipeline.profile().name,
        rom_out.display(),
        out.rom.len(),
        kss_out.display(),
        out.container.len(),
        r.pokes,
        r.mapper,
        r.channels,
        r.calls,
        r.fragments.len()
    );
    for (origin, offset, len) in &r.fragments {
        eprintln!("  fragment {origin} -> 0x{offset:05x} ({len} bytes)");
    }
    Ok(())
}
