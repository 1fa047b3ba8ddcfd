// crates/sccpatch-cli/src/cmd/mod.rs

use std::path::PathBuf;

use clap::Args;

pub mod build;
pub mod fragment;
pub mod profile;
pub mod scan;
pub mod verify;

/// Profile selection shared by the commands that read inputs.
#[derive(Args, Debug, Clone)]
pub struct ProfileSel {
    /// Directory the profile's relative paths resolve against
    #[arg(long, default_value = ".")]
    pub workdir: PathBuf,

    /// Profile file (.toml). If omitted, uses the built-in vkiller-scc profile.
    #[arg(long)]
    pub profile: Option<String>,
}

/// Accepts `0x1a3f0`, `1a3f0h` or plain decimal.
pub fn parse_offset(s: &str) -> Result<usize, String> {
    let t = s.trim();
    let (digits, radix) = if let Some(h) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        (h, 16)
    } else if let Some(h) = t.strip_suffix('h').or_else(|| t.strip_suffix('H')) {
        (h, 16)
    } else {
        (t, 10)
    };
    usize::from_str_radix(&digits.replace('_', ""), radix).map_err(|e| format!("bad offset {s:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::parse_offset;

    #[test]
    fn offsets_in_all_spellings() {
        assert_eq!(parse_offset("0x20000"), Ok(0x20000));
        assert_eq!(parse_offset("213f0h"), Ok(0x213f0));
        assert_eq!(parse_offset("0x2_0000"), Ok(0x20000));
        assert_eq!(parse_offset("128"), Ok(128));
        assert!(parse_offset("0xzz").is_err());
    }
}
