use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::process::Command;

use prebuild_spirv::compile::{CompileConfig, CompileError};
use prebuild_spirv::driver::{run, run_with, Layout};
use prebuild_spirv::scan::SourceFile;

fn scratch_layout(tag: &str) -> Layout {
    let root = std::env::temp_dir().join(format!(
        "prebuild-spirv-driver-{}-{}",
        tag,
        std::process::id()
    ));
    if root.exists() {
        fs::remove_dir_all(&root).unwrap();
    }
    fs::create_dir_all(root.join("shaders")).unwrap();
    Layout::under(&root)
}

fn cleanup(layout: &Layout) {
    let root = layout.shader_dir.parent().unwrap();
    fs::remove_dir_all(root).unwrap();
}

fn parse_generated(layout: &Layout) -> Vec<u8> {
    let text = fs::read_to_string(&layout.generated_file).unwrap();
    let body = text
        .strip_prefix("const unsigned char raw_packed_shaders[] = {")
        .unwrap()
        .strip_suffix("};\n")
        .unwrap();
    if body.is_empty() {
        return Vec::new();
    }
    body.split(',').map(|b| b.parse().unwrap()).collect()
}

/// Stand-in for a compiler: writes a payload derived from the stem.
fn fake_compile(
    source: &SourceFile,
    out_path: &Path,
    _cfg: &CompileConfig,
) -> Result<(), CompileError> {
    let mut payload = source.stem.as_bytes().to_vec();
    payload.push(0x5F);
    fs::write(out_path, payload)?;
    Ok(())
}

#[test]
fn full_run_round_trips_through_the_generated_source() {
    let layout = scratch_layout("roundtrip");
    for name in ["blur.comp", "sharpen.comp"] {
        fs::write(layout.shader_dir.join(name), "void main() {}").unwrap();
    }

    run_with(&layout, fake_compile).unwrap();

    let blob = parse_generated(&layout);
    let units = packed_spirv::unpack(&blob).unwrap();
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].name, "blur");
    assert_eq!(units[0].payload, b"blur\x5F");
    assert_eq!(units[1].name, "sharpen");
    assert_eq!(units[1].payload, b"sharpen\x5F");

    // The per-shader binaries are left behind for consumers that want loose
    // files.
    assert!(layout.output_dir.join("blur.spv").exists());
    assert!(layout.output_dir.join("sharpen.spv").exists());

    cleanup(&layout);
}

#[test]
fn sources_are_compiled_in_sorted_order() {
    let layout = scratch_layout("order");
    for name in ["zeta.comp", "alpha.comp", "mid.comp"] {
        fs::write(layout.shader_dir.join(name), "void main() {}").unwrap();
    }

    let seen = RefCell::new(Vec::new());
    run_with(&layout, |source, out_path, _cfg| {
        seen.borrow_mut().push(source.stem.clone());
        fs::write(out_path, [0u8; 4])?;
        Ok(())
    })
    .unwrap();

    assert_eq!(*seen.borrow(), ["alpha", "mid", "zeta"]);
    cleanup(&layout);
}

#[test]
fn empty_source_directory_packs_a_bare_header() {
    let layout = scratch_layout("empty");

    run_with(&layout, fake_compile).unwrap();

    assert_eq!(parse_generated(&layout), [0, 0, 0, 0]);
    cleanup(&layout);
}

#[test]
fn failure_on_second_source_aborts_without_output() {
    let layout = scratch_layout("abort");
    for name in ["a.comp", "b.comp", "c.comp"] {
        fs::write(layout.shader_dir.join(name), "void main() {}").unwrap();
    }

    let compiled = RefCell::new(Vec::new());
    let err = run_with(&layout, |source, out_path, cfg| {
        if source.stem == "b" {
            return Err(CompileError::Backend("deliberate failure".to_owned()));
        }
        compiled.borrow_mut().push(source.stem.clone());
        fake_compile(source, out_path, cfg)
    })
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CompileError>(),
        Some(CompileError::Backend(_))
    ));
    // Work stopped at the failure; nothing was packed or emitted.
    assert_eq!(*compiled.borrow(), ["a"]);
    assert!(!layout.generated_file.exists());

    cleanup(&layout);
}

#[test]
fn stale_spv_files_are_cleared_and_others_kept() {
    let layout = scratch_layout("stale");
    fs::create_dir_all(&layout.output_dir).unwrap();
    fs::write(layout.output_dir.join("old.spv"), [1, 2, 3]).unwrap();
    fs::write(layout.output_dir.join("notes.txt"), "keep me").unwrap();

    run_with(&layout, fake_compile).unwrap();

    assert!(!layout.output_dir.join("old.spv").exists());
    assert!(layout.output_dir.join("notes.txt").exists());

    cleanup(&layout);
}

#[test]
fn missing_source_directory_fails_the_run() {
    let layout = scratch_layout("nosrc");
    fs::remove_dir_all(&layout.shader_dir).unwrap();

    assert!(run_with(&layout, fake_compile).is_err());

    cleanup(&layout);
}

/// End-to-end against the real external compiler, when it is installed.
#[test]
fn real_glslang_run_if_available() {
    if Command::new("glslangValidator")
        .arg("--version")
        .output()
        .is_err()
    {
        eprintln!("glslangValidator not found, skipping");
        return;
    }

    let layout = scratch_layout("glslang");
    fs::write(
        layout.shader_dir.join("noop.comp"),
        "#version 450\nlayout(local_size_x = 1) in;\nvoid main() {}\n",
    )
    .unwrap();

    run(&layout).unwrap();

    let blob = parse_generated(&layout);
    let units = packed_spirv::unpack(&blob).unwrap();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].name, "noop");
    // SPIR-V magic, little-endian on disk.
    assert_eq!(&units[0].payload[..4], &[0x03, 0x02, 0x23, 0x07]);

    cleanup(&layout);
}

#[cfg(feature = "wgsl")]
#[test]
fn wgsl_source_compiles_in_process() {
    let layout = scratch_layout("wgsl");
    fs::write(
        layout.shader_dir.join("fill.wgsl"),
        "@compute @workgroup_size(1)\nfn main() {}\n",
    )
    .unwrap();

    run(&layout).unwrap();

    let blob = parse_generated(&layout);
    let units = packed_spirv::unpack(&blob).unwrap();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].name, "fill");
    assert_eq!(&units[0].payload[..4], &[0x03, 0x02, 0x23, 0x07]);

    cleanup(&layout);
}
