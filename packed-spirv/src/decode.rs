use crate::error::UnpackError;
use crate::{header_len, ShaderUnit};

/// Recovers the ordered unit list from a packed blob.
///
/// Validates that every header entry indexes into the buffer; it does not
/// police overlaps or duplicate names, which the format permits.
pub fn unpack(blob: &[u8]) -> Result<Vec<ShaderUnit>, UnpackError> {
    let count = read_u32(blob, 0)? as usize;
    let header = header_len(count);
    if blob.len() < header {
        return Err(UnpackError::Truncated {
            need: header,
            have: blob.len(),
        });
    }

    let mut units = Vec::with_capacity(count);
    for index in 0..count {
        let base = 4 + 12 * index;
        let name_offset = read_u32(blob, base)? as usize;
        let payload_offset = read_u32(blob, base + 4)? as usize;
        let payload_size = read_u32(blob, base + 8)? as usize;

        let name = read_name(blob, name_offset)?;

        let end = payload_offset
            .checked_add(payload_size)
            .ok_or(UnpackError::PayloadOutOfBounds { index })?;
        if end > blob.len() {
            return Err(UnpackError::PayloadOutOfBounds { index });
        }

        units.push(ShaderUnit {
            name,
            payload: blob[payload_offset..end].to_vec(),
        });
    }
    Ok(units)
}

fn read_u32(blob: &[u8], at: usize) -> Result<u32, UnpackError> {
    let end = at.checked_add(4).ok_or(UnpackError::Truncated {
        need: usize::MAX,
        have: blob.len(),
    })?;
    let bytes = blob.get(at..end).ok_or(UnpackError::Truncated {
        need: end,
        have: blob.len(),
    })?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn read_name(blob: &[u8], offset: usize) -> Result<String, UnpackError> {
    let tail = blob
        .get(offset..)
        .filter(|t| !t.is_empty())
        .ok_or(UnpackError::NameOutOfBounds { offset })?;
    let len = tail
        .iter()
        .position(|&b| b == 0)
        .ok_or(UnpackError::UnterminatedName { offset })?;
    std::str::from_utf8(&tail[..len])
        .ok()
        .filter(|name| name.is_ascii())
        .map(str::to_owned)
        .ok_or(UnpackError::NonAsciiName { offset })
}
