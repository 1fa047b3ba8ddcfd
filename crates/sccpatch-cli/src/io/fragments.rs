// crates/sccpatch-cli/src/io/fragments.rs

use std::path::{Path, PathBuf};

use sccpatch_core::fragment::{format, FragmentNaming};
use sccpatch_core::profile::profile::CommandSpec;
use sccpatch_core::{Fragment, FragmentSource, Result, RomImage};

use crate::io::process::run_tool;

/// Fragments produced by the external assembler in the work directory.
///
/// Stale fragment files are removed first so a fragment the current source no
/// longer emits cannot sneak into the image. With `run_assembler` off the
/// files already present are used as they are.
pub struct AssemblerFragments {
    pub workdir: PathBuf,
    pub command: CommandSpec,
    pub naming: FragmentNaming,
    pub run_assembler: bool,
}

impl FragmentSource for AssemblerFragments {
    fn fragments(&mut self, _rom: &RomImage) -> Result<Vec<Fragment>> {
        if self.run_assembler {
            for stale in list(&self.workdir, &self.naming)? {
                std::fs::remove_file(&stale)?;
                tracing::debug!(file = %stale.display(), "removed stale fragment");
            }
            run_tool(&self.command, &[], &self.workdir)?;
        }

        let files = list(&self.workdir, &self.naming)?;
        let mut out = Vec::with_capacity(files.len());
        for path in files {
            out.push(load(&path, &self.naming)?);
        }
        tracing::info!(count = out.len(), "fragments collected");
        Ok(out)
    }
}

/// Fragment files in `dir` (named raw and SPF1), sorted by name.
pub fn list(dir: &Path, naming: &FragmentNaming) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if naming.is_candidate(name) || naming.is_structured_name(name) {
                files.push(entry.path());
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Structured (SPF1) files carry their own offset; anything else is raw
/// bytes placed at the offset spelled in the file name.
pub fn load(path: &Path, naming: &FragmentNaming) -> Result<Fragment> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let bytes = std::fs::read(path)?;
    if naming.is_structured_name(&name) || format::is_structured(&bytes) {
        return format::decode(&name, &bytes);
    }
    let offset = naming.decode_offset(&name)?;
    Ok(Fragment::new(name, offset, bytes))
}
