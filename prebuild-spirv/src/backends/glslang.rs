use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::compile::{CompileConfig, CompileError};
use crate::scan::SourceFile;

const TOOL: &str = "glslangValidator";

/// Hands the source to an external `glslangValidator`, which writes the
/// SPIR-V binary itself. Diagnostics go straight to the inherited stderr.
pub(crate) fn compile(
    source: &SourceFile,
    out_path: &Path,
    cfg: &CompileConfig,
) -> Result<(), CompileError> {
    let mut cmd = Command::new(TOOL);
    cmd.args(build_args(&source.path, out_path, cfg));
    log::debug!("running {:?}", cmd);

    let status = cmd.status().map_err(|e| CompileError::Spawn {
        tool: TOOL,
        source: e,
    })?;
    if !status.success() {
        return Err(CompileError::Tool {
            tool: TOOL,
            status,
            path: source.path.clone(),
        });
    }
    Ok(())
}

fn build_args(src: &Path, out: &Path, cfg: &CompileConfig) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["--target-env".into(), "vulkan1.2".into()];
    for (name, value) in &cfg.defs {
        let def = match value {
            Some(value) => format!("-D{}={}", name, value),
            None => format!("-D{}", name),
        };
        args.push(def.into());
    }
    for dir in &cfg.incl_dirs {
        let mut arg = OsString::from("-I");
        arg.push(dir);
        args.push(arg);
    }
    args.push("-e".into());
    args.push(cfg.entry.clone().into());
    if cfg.debug {
        args.push("-g".into());
    }
    args.push("--quiet".into());
    args.push(src.into());
    args.push("-o".into());
    args.push(out.into());
    args
}
