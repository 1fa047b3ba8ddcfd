// crates/sccpatch-cli/src/cmd/fragment.rs

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Subcommand};
use sccpatch_core::fragment::format;

use crate::cmd::ProfileSel;
use crate::io::{fragments, profile_file, rom_file};

#[derive(Args)]
pub struct FragmentArgs {
    #[command(subcommand)]
    pub cmd: FragmentCmd,
}

#[derive(Subcommand)]
pub enum FragmentCmd {
    /// Wrap a named assembler fragment (prefix + hex offset + suffix) as SPF1
    Pack(PackArgs),
    /// Print offset/length of a fragment file (SPF1 or named raw)
    Inspect(InspectArgs),
}

#[derive(Args)]
pub struct PackArgs {
    /// Named raw fragment, e.g. vkiller_patch1a3f0.bin
    #[arg(long)]
    pub r#in: PathBuf,

    /// Output .spf path
    #[arg(long)]
    pub out: PathBuf,

    #[command(flatten)]
    pub sel: ProfileSel,
}

#[derive(Args)]
pub struct InspectArgs {
    #[arg(long)]
    pub r#in: PathBuf,

    #[command(flatten)]
    pub sel: ProfileSel,
}

pub fn run(args: FragmentArgs) -> anyhow::Result<()> {
    match args.cmd {
        FragmentCmd::Pack(a) => cmd_pack(a),
        FragmentCmd::Inspect(a) => cmd_inspect(a),
    }
}

fn cmd_pack(a: PackArgs) -> anyhow::Result<()> {
    let profile = profile_file::select(&a.sel)?;
    let frag = fragments::load(&a.r#in, &profile.assembler.fragments)
        .with_context(|| format!("load fragment {}", a.r#in.display()))?;
    let bytes = format::encode(&frag);
    rom_file::save(&a.out, &bytes)?;
    eprintln!(
        "pack ok: in={} out={} offset=0x{:05x} len={}",
        a.r#in.display(),
        a.out.display(),
        frag.offset,
        frag.len()
    );
    Ok(())
}

fn cmd_inspect(a: InspectArgs) -> anyhow::Result<()> {
    let profile = profile_file::select(&a.sel)?;
    let frag = fragments::load(&a.r#in, &profile.assembler.fragments)
        .with_context(|| format!("load fragment {}", a.r#in.display()))?;
    let span = frag.span();
    println!("fragment = {}", a.r#in.display());
    println!("offset   = 0x{:05x}", frag.offset);
    println!("len      = {}", frag.len());
    println!("span     = 0x{:05x}..0x{:05x}", span.start, span.end);
    Ok(())
}
