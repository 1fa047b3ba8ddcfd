use crate::error::{PatchError, Result};
use crate::profile::profile::Profile;

pub fn validate_profile(p: &Profile) -> Result<()> {
    if p.secondary.start >= p.secondary.end {
        return Err(PatchError::Profile("secondary.start must be < secondary.end".into()));
    }
    if p.channels.start >= p.channels.end {
        return Err(PatchError::Profile("channels.start must be < channels.end".into()));
    }
    if p.kss.pages.page_size == 0 {
        return Err(PatchError::Profile("kss.pages.page_size must be non-zero".into()));
    }
    if p.kss.pages.banks.is_empty() {
        return Err(PatchError::Profile("kss.pages.banks must not be empty".into()));
    }

    // Eight hex digits is all a u32 offset can hold.
    let naming = &p.assembler.fragments;
    if naming.width == 0 || naming.width > 8 {
        return Err(PatchError::Profile("assembler.fragments.width must be 1..=8".into()));
    }

    for (what, hex) in [
        ("primary.digest", &p.primary.digest.hex),
        ("secondary.digest", &p.secondary.digest.hex),
    ] {
        if hex.trim().is_empty() || !hex.trim().bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PatchError::Profile(format!("{what} is not a hex string")));
        }
    }

    Ok(())
}
