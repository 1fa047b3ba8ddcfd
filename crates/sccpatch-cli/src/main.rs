// crates/sccpatch-cli/src/main.rs

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sccpatch_core::PatchError;

mod cmd;
mod io;

#[derive(Parser)]
#[command(name = "sccpatch")]
#[command(about = "Konami4 -> Konami5 SCC cartridge patcher", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Gate inputs, compose, patch, merge fragments; write ROM + KSS
    Build(cmd::build::BuildArgs),

    /// Check input digests only
    Verify(cmd::verify::VerifyArgs),

    /// Report pattern matches in an image (channel pass also audits the ignore set)
    Scan(cmd::scan::ScanArgs),

    /// Structured patch fragment tools (SPF1)
    Fragment(cmd::fragment::FragmentArgs),

    /// Built-in profile tools
    Profile(cmd::profile::ProfileArgs),
}

/// Exit status when the external assembler (or music compiler) fails.
const EXIT_TOOL_FAILED: u8 = 255;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let res = match cli.cmd {
        Commands::Build(args) => cmd::build::run(args),
        Commands::Verify(args) => cmd::verify::run(args),
        Commands::Scan(args) => cmd::scan::run(args),
        Commands::Fragment(args) => cmd::fragment::run(args),
        Commands::Profile(args) => cmd::profile::run(args),
    };

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

fn report(e: &anyhow::Error) -> ExitCode {
    let tool_failure = e
        .chain()
        .find_map(|c| match c.downcast_ref::<PatchError>() {
            Some(PatchError::ExternalTool { output, .. }) => Some(output),
            _ => None,
        });

    if let Some(output) = tool_failure {
        eprint!("{output}");
        if !output.ends_with('\n') {
            eprintln!();
        }
        eprintln!("error: {e:#}");
        return ExitCode::from(EXIT_TOOL_FAILED);
    }

    eprintln!("error: {e:#}");
    ExitCode::FAILURE
}
