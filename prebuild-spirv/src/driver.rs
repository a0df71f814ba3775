use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use packed_spirv::ShaderUnit;

use crate::compile::{self, CompileConfig, CompileError};
use crate::scan::{self, SourceFile};

/// Directory of shader sources, relative to the working directory.
pub const SHADER_DIR: &str = "shaders";
/// Directory receiving one `.spv` per compiled source.
pub const OUTPUT_DIR: &str = "prebuilt_shaders";
/// Generated C file embedding the packed blob.
pub const GENERATED_FILE: &str = "generated/packed_spv.c";
/// Array symbol the consumer links against.
pub const PACKED_SYMBOL: &str = "raw_packed_shaders";

/// The fixed relative layout a run operates on.
#[derive(Debug, Clone)]
pub struct Layout {
    pub shader_dir: PathBuf,
    pub output_dir: PathBuf,
    pub generated_file: PathBuf,
}

impl Layout {
    pub fn under(root: &Path) -> Layout {
        Layout {
            shader_dir: root.join(SHADER_DIR),
            output_dir: root.join(OUTPUT_DIR),
            generated_file: root.join(GENERATED_FILE),
        }
    }
}

/// One full batch run: enumerate, compile, pack, emit.
pub fn run(layout: &Layout) -> Result<()> {
    run_with(layout, compile::compile)
}

/// Same as [`run`] with the per-source compile step injected, which keeps
/// the batch logic testable without a shader compiler on the machine.
///
/// Sources are processed one at a time in sorted order; the first failure
/// aborts the run before anything is packed or emitted.
pub fn run_with<C>(layout: &Layout, compile_one: C) -> Result<()>
where
    C: Fn(&SourceFile, &Path, &CompileConfig) -> Result<(), CompileError>,
{
    let sources = scan::enumerate_sources(&layout.shader_dir)?;
    log::info!(
        "found {} shader source(s) in {}",
        sources.len(),
        layout.shader_dir.display()
    );

    prepare_output_dir(&layout.output_dir)?;

    let cfg = CompileConfig {
        defs: vec![("USE_SPEVAR".to_owned(), Some("1".to_owned()))],
        ..CompileConfig::default()
    };

    let mut units = Vec::with_capacity(sources.len());
    for source in &sources {
        let out_path = layout.output_dir.join(format!("{}.spv", source.stem));
        log::info!("compiling {}", source.path.display());
        compile_one(source, &out_path, &cfg)?;
        let payload = fs::read(&out_path)
            .with_context(|| format!("cannot read compiled shader {}", out_path.display()))?;
        units.push(ShaderUnit::new(source.stem.clone(), payload));
    }

    let blob = packed_spirv::pack(&units)?;
    log::info!("packed {} shader(s) into {} bytes", units.len(), blob.len());

    if let Some(parent) = layout.generated_file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("cannot create {}", parent.display()))?;
    }
    let rendered = packed_spirv::render_c_array(PACKED_SYMBOL, &blob);
    fs::write(&layout.generated_file, rendered)
        .with_context(|| format!("cannot write {}", layout.generated_file.display()))?;
    log::info!("wrote {}", layout.generated_file.display());
    Ok(())
}

/// Creates the output directory, or clears stale `.spv` files out of an
/// existing one. Other files are left alone.
fn prepare_output_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return fs::create_dir_all(dir)
            .with_context(|| format!("cannot create output directory {}", dir.display()));
    }
    for entry in
        fs::read_dir(dir).with_context(|| format!("cannot read output directory {}", dir.display()))?
    {
        let path = entry?.path();
        if path.extension().map_or(false, |ext| ext == "spv") {
            fs::remove_file(&path)
                .with_context(|| format!("cannot remove stale {}", path.display()))?;
        }
    }
    Ok(())
}

/// Process exit code for a failed run. A compiler rejection surfaces the
/// external tool's own status; everything else is a plain failure.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(CompileError::Tool { status, .. }) = err.downcast_ref::<CompileError>() {
        if let Some(code) = status.code() {
            return u8::try_from(code).unwrap_or(1);
        }
    }
    1
}
