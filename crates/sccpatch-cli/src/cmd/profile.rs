// crates/sccpatch-cli/src/cmd/profile.rs

use clap::{Args, Subcommand};

use crate::cmd::ProfileSel;
use crate::io::profile_file;

#[derive(Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub cmd: ProfileCmd,
}

#[derive(Subcommand)]
pub enum ProfileCmd {
    /// Print the built-in profile as TOML (a starting point for --profile)
    Dump(DumpArgs),
    /// Parse and validate a profile file
    Check(CheckArgs),
}

#[derive(Args)]
pub struct DumpArgs {
    /// Write to this file instead of stdout
    #[arg(long)]
    pub out: Option<String>,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub sel: ProfileSel,
}

pub fn run(args: ProfileArgs) -> anyhow::Result<()> {
    match args.cmd {
        ProfileCmd::Dump(a) => {
            let p = sccpatch_core::Profile::default();
            match a.out.as_deref() {
                Some(path) => profile_file::save_toml(path, &p)?,
                None => print!("{}", profile_file::to_toml(&p)?),
            }
            Ok(())
        }
        ProfileCmd::Check(a) => {
            let p = profile_file::select(&a.sel)?;
            eprintln!(
                "profile ok: name={} ignore={} pokes={} pages={}",
                p.name,
                p.channels.ignore.len(),
                p.fixups.pokes.len(),
                p.kss.pages.banks.len()
            );
            Ok(())
        }
    }
}
