// crates/sccpatch-cli/src/cmd/verify.rs

use clap::Args;
use sccpatch_core::Pipeline;

use crate::cmd::ProfileSel;
use crate::io::{profile_file, rom_file};

#[derive(Args)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub sel: ProfileSel,
}

pub fn run(args: VerifyArgs) -> anyhow::Result<()> {
    let profile = profile_file::select(&args.sel)?;
    let wd = &args.sel.workdir;

    let primary = rom_file::load(&wd.join(&profile.primary.path))?;
    let secondary = rom_file::load(&wd.join(&profile.secondary.path))?;

    let pipeline = Pipeline::new(profile)?;
    pipeline.verify_inputs(&primary, &secondary)?;

    let p = pipeline.profile();
    println!("primary    = {} ({} bytes)", p.primary.path, primary.len());
    println!("  {}      = {}", p.primary.digest.algorithm.name(), p.primary.digest.hex);
    println!(
        "secondary  = {} [0x{:05x}..0x{:05x}]",
        p.secondary.path, p.secondary.start, p.secondary.end
    );
    println!("  {}      = {}", p.secondary.digest.algorithm.name(), p.secondary.digest.hex);
    eprintln!("verify ok: profile={}", p.name);
    Ok(())
}
