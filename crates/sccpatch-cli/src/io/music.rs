// crates/sccpatch-cli/src/io/music.rs

use std::path::PathBuf;

use sccpatch_core::profile::profile::CommandSpec;
use sccpatch_core::{MusicCompiler, MusicJob, PatchError, Result, RomImage};

use crate::io::process::run_tool;

/// Music compiler run as a separate program that edits an image file in
/// place. It is invoked from the work directory as
///
///   program args.. <image> <source> <game> <insert_offset> <params..>
///
/// with offsets and params in `0x` hex. The image must come back the same size.
pub struct ExternalMusic {
    pub workdir: PathBuf,
    pub command: CommandSpec,
    pub scratch_name: String,
}

impl MusicCompiler for ExternalMusic {
    fn compile(&mut self, rom: &mut RomImage, job: &MusicJob) -> Result<()> {
        let scratch = self.workdir.join(&self.scratch_name);
        std::fs::write(&scratch, rom.as_slice())?;

        let mut extra = vec![
            scratch.display().to_string(),
            job.source.clone(),
            job.game.clone(),
            format!("0x{:x}", job.insert_offset),
        ];
        extra.extend(job.params.iter().map(|p| format!("0x{p:x}")));

        let res = run_tool(&self.command, &extra, &self.workdir).and_then(|_| {
            let edited = std::fs::read(&scratch)?;
            if edited.len() != rom.len() {
                return Err(PatchError::OutOfRange(format!(
                    "music compiler resized the image from {} to {} bytes",
                    rom.len(),
                    edited.len()
                )));
            }
            rom.write_at(0, &edited)
        });
        let _ = std::fs::remove_file(&scratch);
        res?;

        tracing::info!(source = %job.source, game = %job.game, "music compiled");
        Ok(())
    }
}
