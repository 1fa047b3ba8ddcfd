// crates/sccpatch-cli/src/cmd/scan.rs

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use sccpatch_core::passes::audit_channel_locations;
use sccpatch_core::reloc::read_u16_le;
use sccpatch_core::scan::pattern::{CALL_PATTERNS, CHANNEL_PATTERNS, MAPPER_PATTERNS};
use sccpatch_core::scan::{scan, Match, Pattern};

use crate::cmd::{parse_offset, ProfileSel};
use crate::io::{profile_file, rom_file};

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum PatternSet {
    /// ld ix,nn / ld ..,nn with nn in 0E000h-0E3FFh
    Channel,
    /// ld (6000h|8000h|A000h),a
    Mapper,
    /// call 0093h
    Call,
}

#[derive(Args)]
pub struct ScanArgs {
    /// Image to scan (e.g. a composed but unpatched ROM)
    #[arg(long)]
    pub r#in: PathBuf,

    #[arg(long, value_enum, default_value_t = PatternSet::Channel)]
    pub set: PatternSet,

    /// Scan start (defaults to the profile's range for the set)
    #[arg(long, value_parser = parse_offset)]
    pub start: Option<usize>,

    /// Scan end, exclusive (defaults to the profile's range for the set)
    #[arg(long, value_parser = parse_offset)]
    pub end: Option<usize>,

    /// Print at most this many matches
    #[arg(long, default_value_t = 64)]
    pub limit: usize,

    #[command(flatten)]
    pub sel: ProfileSel,
}

pub fn run(args: ScanArgs) -> anyhow::Result<()> {
    let profile = profile_file::select(&args.sel)?;
    let image = rom_file::load(&args.r#in)?;

    let (patterns, default_range): (&[Pattern], _) = match args.set {
        PatternSet::Channel => (CHANNEL_PATTERNS, profile.channels.range()),
        PatternSet::Mapper => (MAPPER_PATTERNS, 0..image.len()),
        PatternSet::Call => (CALL_PATTERNS, profile.calls.range(image.len())),
    };
    let range = args.start.unwrap_or(default_range.start)..args.end.unwrap_or(default_range.end);

    eprintln!("--- scan ---");
    eprintln!("file       = {}", args.r#in.display());
    eprintln!("set        = {:?}", args.set);
    eprintln!("range      = 0x{:05x}..0x{:05x}", range.start, range.end);

    if let PatternSet::Channel = args.set {
        let ignore = &profile.channels.ignore;
        let audit = audit_channel_locations(&image, range, ignore);
        eprintln!("sites      = {}", audit.sites.len());
        print_matches(&image, &audit.sites, args.limit);
        eprintln!("--- ignore set ({} entries) ---", ignore.len());
        for m in &audit.suppressed {
            eprintln!("suppressed {}", describe(&image, m));
        }
        for off in &audit.stale {
            eprintln!("stale      0x{off:05x} (no match in range)");
        }
        return Ok(());
    }

    let matches = scan(&image, range, patterns, None);
    eprintln!("matches    = {}", matches.len());
    print_matches(&image, &matches, args.limit);
    Ok(())
}

fn print_matches(image: &[u8], matches: &[Match], limit: usize) {
    for m in matches.iter().take(limit) {
        println!("{}", describe(image, m));
    }
    if matches.len() > limit {
        println!("... {} more", matches.len() - limit);
    }
}

fn describe(image: &[u8], m: &Match) -> String {
    let operand = if m.operand_width == 2 {
        read_u16_le(image, m.operand)
            .map(|a| format!("{a:04x}h"))
            .unwrap_or_else(|_| "????".into())
    } else {
        format!("{:02x}h", image[m.operand])
    };
    format!(
        "0x{:05x} {:<14} operand@0x{:05x} = {}",
        m.offset,
        m.pattern.name(),
        m.operand,
        operand
    )
}
