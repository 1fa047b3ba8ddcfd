// crates/sccpatch-cli/src/io/process.rs
//
// Runs collaborator tools to completion with their output captured.
// A failing tool becomes `PatchError::ExternalTool` carrying that output.

use std::path::Path;
use std::process::Command;

use sccpatch_core::profile::profile::CommandSpec;
use sccpatch_core::{PatchError, Result};

pub fn run_tool(spec: &CommandSpec, extra: &[String], cwd: &Path) -> Result<String> {
    tracing::info!(tool = %spec.program, cwd = %cwd.display(), "running");

    let out = Command::new(&spec.program)
        .args(&spec.args)
        .args(extra)
        .current_dir(cwd)
        .output()
        .map_err(|e| PatchError::ExternalTool {
            tool: spec.program.clone(),
            code: "not started".into(),
            output: format!("{e}\n"),
        })?;

    let mut text = String::from_utf8_lossy(&out.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&out.stderr));

    if !out.status.success() {
        return Err(PatchError::ExternalTool {
            tool: spec.program.clone(),
            code: out
                .status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            output: text,
        });
    }

    tracing::debug!(tool = %spec.program, "{}", text.trim_end());
    Ok(text)
}
