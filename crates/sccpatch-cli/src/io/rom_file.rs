// crates/sccpatch-cli/src/io/rom_file.rs

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub fn load(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read {}", path.display()))
}

pub fn save(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}

/// Write every output or none of them.
///
/// Each file is written next to its destination first and only renamed into
/// place once all of them were written.
pub fn save_all(outputs: &[(&Path, &[u8])]) -> Result<()> {
    let mut staged = Vec::with_capacity(outputs.len());
    for (path, bytes) in outputs {
        let tmp = staging_path(path);
        if let Err(e) = save(&tmp, bytes) {
            discard(&staged);
            return Err(e);
        }
        staged.push((tmp, *path));
    }
    for (i, (tmp, path)) in staged.iter().enumerate() {
        if let Err(e) = std::fs::rename(tmp, path) {
            discard(&staged[i..]);
            return Err(e).with_context(|| format!("move {} into place", path.display()));
        }
    }
    Ok(())
}

fn discard(staged: &[(PathBuf, &Path)]) {
    for (tmp, _) in staged {
        let _ = std::fs::remove_file(tmp);
    }
}
