use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::compile::SourceLanguage;

/// One shader source picked up from the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// File name without the language suffix; becomes the packed unit name.
    pub stem: String,
    pub path: PathBuf,
    pub lang: SourceLanguage,
}

const GLSL_SUFFIX: &str = ".comp";
#[cfg(feature = "wgsl")]
const WGSL_SUFFIX: &str = ".wgsl";

/// Enumerates shader sources in `dir`, non-recursively, sorted by stem so a
/// run always packs in the same order.
pub fn enumerate_sources(dir: &Path) -> Result<Vec<SourceFile>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("cannot read shader directory {}", dir.display()))?;

    let mut sources = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("cannot read entry in {}", dir.display()))?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            bail!(
                "shader directory entry {} is not valid UTF-8",
                entry.path().display()
            );
        };

        if let Some(stem) = file_name.strip_suffix(GLSL_SUFFIX) {
            sources.push(source_file(stem, entry.path(), SourceLanguage::Glsl)?);
        }
        #[cfg(feature = "wgsl")]
        if let Some(stem) = file_name.strip_suffix(WGSL_SUFFIX) {
            sources.push(source_file(stem, entry.path(), SourceLanguage::Wgsl)?);
        }
    }

    sources.sort_by(|a, b| a.stem.cmp(&b.stem).then_with(|| a.path.cmp(&b.path)));
    Ok(sources)
}

fn source_file(stem: &str, path: PathBuf, lang: SourceLanguage) -> Result<SourceFile> {
    // The stem becomes a packed unit name, which the blob format restricts
    // to non-empty ASCII.
    if stem.is_empty() || !stem.is_ascii() {
        bail!(
            "shader file {} does not have a packable name (non-empty ASCII required)",
            path.display()
        );
    }
    Ok(SourceFile {
        stem: stem.to_owned(),
        path,
        lang,
    })
}
