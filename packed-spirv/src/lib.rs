//! # packed-spirv
//!
//! Container format for prebuilt shader binaries. A packed blob carries any
//! number of named SPIR-V modules in one flat byte buffer, so a build
//! pipeline can link compiled shaders straight into an executable instead of
//! shipping loose `.spv` files.
//!
//! ## Layout
//!
//! ```text
//! offset 0               u32 count
//! offset 4               count x { u32 name_offset, u32 payload_offset, u32 payload_size }
//! offset 4 + 12 * count  NUL-terminated ASCII names, back to back,
//!                        zero-padded to the next 4-byte boundary
//! then                   payload bytes, back to back, no padding in between
//! ```
//!
//! Every integer is a little-endian `u32`. `name_offset` and `payload_offset`
//! are absolute offsets from the start of the blob. The format carries no
//! magic number, no version field and no checksum; a consumer must trust the
//! producer.
//!
//! Names must be non-empty ASCII without embedded NUL. Duplicate names are
//! representable; the format does not enforce uniqueness.
//!
//! [`pack`] and [`unpack`] are exact inverses for any valid unit list, and
//! [`render_c_array`] turns a blob into a C translation unit suitable for
//! compiling into the consumer.

mod decode;
mod encode;
mod error;
mod render;

pub use decode::unpack;
pub use encode::pack;
pub use error::{PackError, UnpackError};
pub use render::render_c_array;

/// One named shader binary, prior to packing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderUnit {
    /// Non-empty ASCII, no embedded NUL.
    pub name: String,
    /// Compiled shader bytecode.
    pub payload: Vec<u8>,
}

impl ShaderUnit {
    pub fn new(name: impl Into<String>, payload: Vec<u8>) -> ShaderUnit {
        ShaderUnit {
            name: name.into(),
            payload,
        }
    }
}

/// Bytes occupied by the count field plus one offset triple per unit.
pub(crate) fn header_len(count: usize) -> usize {
    4 + 12 * count
}
