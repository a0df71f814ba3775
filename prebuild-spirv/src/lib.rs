//! # prebuild-spirv
//!
//! Batch shader prebuilder. Compiles every compute shader under `shaders/`
//! to SPIR-V, writes the binaries to `prebuilt_shaders/`, then packs them
//! into a single blob emitted as `generated/packed_spv.c` for static linking
//! into the consumer. See the `packed-spirv` crate for the blob layout.
//!
//! The run is strictly sequential: sources are compiled one at a time in
//! sorted order, and the first failure aborts the whole run before any blob
//! is written. By default each source is handed to an external
//! `glslangValidator`; the `shaderc` feature switches GLSL compilation to
//! in-process libshaderc, and the `wgsl` feature additionally picks up
//! `.wgsl` sources compiled with naga.

mod backends;
pub mod compile;
pub mod driver;
pub mod scan;
