use crate::error::PackError;
use crate::{header_len, ShaderUnit};

/// Serializes `units` into a single blob per the crate-level layout.
///
/// Units are written in the order given. An empty list yields the 4-byte
/// header alone.
pub fn pack(units: &[ShaderUnit]) -> Result<Vec<u8>, PackError> {
    for unit in units {
        validate_name(&unit.name)?;
    }
    let count = u32::try_from(units.len()).map_err(|_| PackError::OffsetOverflow)?;

    let mut blob = vec![0u8; header_len(units.len())];

    let mut name_offsets = Vec::with_capacity(units.len());
    for unit in units {
        name_offsets.push(offset_u32(blob.len())?);
        blob.extend_from_slice(unit.name.as_bytes());
        blob.push(0);
    }

    // 0-3 zero bytes so the payload region starts 4-byte aligned.
    let pad = (4 - blob.len() % 4) % 4;
    blob.resize(blob.len() + pad, 0);

    let mut payload_spans = Vec::with_capacity(units.len());
    for unit in units {
        let offset = offset_u32(blob.len())?;
        let size = u32::try_from(unit.payload.len()).map_err(|_| PackError::OffsetOverflow)?;
        payload_spans.push((offset, size));
        blob.extend_from_slice(&unit.payload);
    }

    let mut header = Vec::with_capacity(header_len(units.len()));
    header.extend_from_slice(&count.to_le_bytes());
    for (name_offset, (payload_offset, payload_size)) in name_offsets.iter().zip(&payload_spans) {
        header.extend_from_slice(&name_offset.to_le_bytes());
        header.extend_from_slice(&payload_offset.to_le_bytes());
        header.extend_from_slice(&payload_size.to_le_bytes());
    }
    blob[..header.len()].copy_from_slice(&header);

    Ok(blob)
}

fn validate_name(name: &str) -> Result<(), PackError> {
    if name.is_empty() {
        return Err(PackError::EmptyName);
    }
    if !name.bytes().all(|b| b != 0 && b.is_ascii()) {
        return Err(PackError::InvalidName(name.to_owned()));
    }
    Ok(())
}

fn offset_u32(offset: usize) -> Result<u32, PackError> {
    u32::try_from(offset).map_err(|_| PackError::OffsetOverflow)
}
