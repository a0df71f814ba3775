use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use thiserror::Error;

use crate::backends;
use crate::scan::SourceFile;

/// Language of a shader source file, derived from its suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    Glsl,
    Wgsl,
}

/// Knobs shared by every backend.
#[derive(Debug, Clone)]
pub struct CompileConfig {
    /// Entry point function name.
    pub entry: String,
    /// Preprocessor definitions, `(name, optional value)`.
    pub defs: Vec<(String, Option<String>)>,
    /// Extra include search directories.
    pub incl_dirs: Vec<PathBuf>,
    /// Keep debug information in the produced SPIR-V.
    pub debug: bool,
}

impl Default for CompileConfig {
    fn default() -> CompileConfig {
        CompileConfig {
            entry: "main".to_owned(),
            defs: Vec::new(),
            incl_dirs: Vec::new(),
            debug: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("failed to invoke {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The external compiler ran and rejected the source; its status is
    /// preserved so the driver can exit with it.
    #[error("{tool} exited with {status} while compiling {}", .path.display())]
    Tool {
        tool: &'static str,
        status: ExitStatus,
        path: PathBuf,
    },

    /// An in-process backend rejected the source.
    #[error("shader compilation failed: {0}")]
    Backend(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Compiles one source file, leaving the SPIR-V binary at `out_path`.
///
/// Blocks until the backend finishes. Every backend either produces the
/// output file or returns an error; there is no partial output.
pub fn compile(
    source: &SourceFile,
    out_path: &Path,
    cfg: &CompileConfig,
) -> Result<(), CompileError> {
    match source.lang {
        SourceLanguage::Glsl => {
            if cfg!(feature = "shaderc") {
                backends::shaderc::compile(source, out_path, cfg)
            } else {
                backends::glslang::compile(source, out_path, cfg)
            }
        }
        SourceLanguage::Wgsl => backends::naga::compile(source, out_path, cfg),
    }
}
