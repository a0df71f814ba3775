use std::path::Path;

use crate::compile::{CompileConfig, CompileError};
use crate::scan::SourceFile;

#[cfg(feature = "wgsl")]
pub(crate) fn compile(
    source: &SourceFile,
    out_path: &Path,
    cfg: &CompileConfig,
) -> Result<(), CompileError> {
    use naga::back::spv::WriterFlags;
    use naga::valid::{Capabilities, ValidationFlags, Validator};

    let src = std::fs::read_to_string(&source.path)?;

    let module = naga::front::wgsl::parse_str(&src)
        .map_err(|e| CompileError::Backend(e.emit_to_string(&src)))?;

    let mut opts = naga::back::spv::Options::default();
    opts.lang_version = (1, 5);
    if cfg.debug {
        opts.flags.insert(WriterFlags::DEBUG);
    } else {
        opts.flags.remove(WriterFlags::DEBUG);
    }

    // naga compiles the whole module; the entry point and preprocessor
    // definitions from the config do not apply to WGSL.
    let info = Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(&module)
        .map_err(|e| CompileError::Backend(format!("{:?}", e)))?;
    let spv = naga::back::spv::write_vec(&module, &info, &opts, None)
        .map_err(|e| CompileError::Backend(e.to_string()))?;

    let bytes: Vec<u8> = spv.into_iter().flat_map(u32::to_le_bytes).collect();
    std::fs::write(out_path, bytes)?;
    Ok(())
}

#[cfg(not(feature = "wgsl"))]
pub(crate) fn compile(
    _: &SourceFile,
    _: &Path,
    _: &CompileConfig,
) -> Result<(), CompileError> {
    Err(CompileError::Backend(
        "wgsl backend is not enabled".to_owned(),
    ))
}
