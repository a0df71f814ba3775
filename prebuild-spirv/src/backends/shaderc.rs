use std::path::Path;

use crate::compile::{CompileConfig, CompileError};
use crate::scan::SourceFile;

#[cfg(feature = "shaderc")]
pub(crate) fn compile(
    source: &SourceFile,
    out_path: &Path,
    cfg: &CompileConfig,
) -> Result<(), CompileError> {
    let src = std::fs::read_to_string(&source.path)?;

    let mut opt = shaderc::CompileOptions::new()
        .ok_or_else(|| CompileError::Backend("cannot create `shaderc::CompileOptions`".to_owned()))?;
    opt.set_target_env(
        shaderc::TargetEnv::Vulkan,
        shaderc::EnvVersion::Vulkan1_2 as u32,
    );
    opt.set_source_language(shaderc::SourceLanguage::GLSL);
    let incl_dirs = cfg.incl_dirs.clone();
    opt.set_include_callback(move |name, ty, src_path, _depth| {
        use shaderc::{IncludeType, ResolvedInclude};
        let path = match ty {
            IncludeType::Relative => {
                let cur_dir = Path::new(src_path).parent().ok_or(
                    "the shader source is not living in a filesystem, \
                     but attempts to include a relative path",
                )?;
                cur_dir.join(name)
            }
            IncludeType::Standard => incl_dirs
                .iter()
                .find_map(|incl_dir| {
                    let path = incl_dir.join(name);
                    if path.exists() {
                        Some(path)
                    } else {
                        None
                    }
                })
                .ok_or(format!("cannot find \"{}\" in include directories", name))?,
        };

        let path_lit = path.to_string_lossy().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read from \"{}\": {}", path_lit, e))?;
        Ok(ResolvedInclude {
            resolved_name: path_lit,
            content,
        })
    });
    for (name, value) in cfg.defs.iter() {
        opt.add_macro_definition(name, value.as_deref());
    }
    if cfg.debug {
        opt.set_generate_debug_info();
    }

    let mut compiler = shaderc::Compiler::new()
        .ok_or_else(|| CompileError::Backend("cannot create `shaderc::Compiler`".to_owned()))?;
    let input_name = source.path.to_string_lossy();
    let out = compiler
        .compile_into_spirv(
            &src,
            shaderc::ShaderKind::DefaultCompute,
            &input_name,
            &cfg.entry,
            Some(&opt),
        )
        .map_err(|e| CompileError::Backend(e.to_string()))?;
    if out.get_num_warnings() != 0 {
        return Err(CompileError::Backend(out.get_warning_messages()));
    }

    std::fs::write(out_path, out.as_binary_u8())?;
    Ok(())
}

#[cfg(not(feature = "shaderc"))]
pub(crate) fn compile(
    _: &SourceFile,
    _: &Path,
    _: &CompileConfig,
) -> Result<(), CompileError> {
    Err(CompileError::Backend(
        "shaderc backend is not enabled".to_owned(),
    ))
}
