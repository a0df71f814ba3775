use thiserror::Error;

/// Reasons a unit list cannot be packed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PackError {
    #[error("shader name is empty")]
    EmptyName,

    #[error("shader name {0:?} contains non-ASCII or NUL bytes")]
    InvalidName(String),

    /// A recorded offset, size or the unit count does not fit in a `u32`.
    #[error("packed blob exceeds the 32-bit offset range")]
    OffsetOverflow,
}

/// Reasons a byte buffer cannot be decoded as a packed blob.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnpackError {
    #[error("blob truncated: need {need} bytes, have {have}")]
    Truncated { need: usize, have: usize },

    #[error("name offset {offset} is out of bounds")]
    NameOutOfBounds { offset: usize },

    #[error("name at offset {offset} is not NUL-terminated")]
    UnterminatedName { offset: usize },

    #[error("name at offset {offset} is not ASCII")]
    NonAsciiName { offset: usize },

    #[error("payload of unit {index} runs past the end of the blob")]
    PayloadOutOfBounds { index: usize },
}
