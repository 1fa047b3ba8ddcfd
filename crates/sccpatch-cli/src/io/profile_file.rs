// crates/sccpatch-cli/src/io/profile_file.rs

use anyhow::{Context, Result};
use sccpatch_core::validate::validate_profile;
use sccpatch_core::Profile;

use crate::cmd::ProfileSel;

/// Load a profile TOML file and validate it.
pub fn load_toml(path: &str) -> Result<Profile> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read profile {path}"))?;
    let profile: Profile = toml::from_str(&text).with_context(|| format!("parse profile {path}"))?;
    validate_profile(&profile).with_context(|| format!("validate profile {path}"))?;
    Ok(profile)
}

pub fn save_toml(path: &str, profile: &Profile) -> Result<()> {
    let text = to_toml(profile)?;
    std::fs::write(path, text).with_context(|| format!("write profile {path}"))
}

pub fn to_toml(profile: &Profile) -> Result<String> {
    toml::to_string_pretty(profile).context("serialize profile")
}

/// `--profile` if given, else the built-in profile.
pub fn select(sel: &ProfileSel) -> Result<Profile> {
    match sel.profile.as_deref() {
        Some(p) => load_toml(p),
        None => Ok(Profile::default()),
    }
}
