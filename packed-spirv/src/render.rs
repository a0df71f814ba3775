use std::fmt::Write;

/// Renders `blob` as a C translation unit defining `symbol` as an unsigned
/// char array, one decimal byte per element.
///
/// The output is a complete file body, newline-terminated, ready to be
/// compiled into the consumer.
pub fn render_c_array(symbol: &str, blob: &[u8]) -> String {
    // "255," is the widest element.
    let mut out = String::with_capacity(blob.len() * 4 + symbol.len() + 32);
    out.push_str("const unsigned char ");
    out.push_str(symbol);
    out.push_str("[] = {");
    for (i, byte) in blob.iter().enumerate() {
        if i != 0 {
            out.push(',');
        }
        // Infallible for String destinations.
        let _ = write!(out, "{}", byte);
    }
    out.push_str("};\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_bytes_as_decimal_initializer() {
        assert_eq!(
            render_c_array("raw_packed_shaders", &[0, 1, 2, 255]),
            "const unsigned char raw_packed_shaders[] = {0,1,2,255};\n"
        );
    }

    #[test]
    fn renders_empty_initializer() {
        assert_eq!(
            render_c_array("raw_packed_shaders", &[]),
            "const unsigned char raw_packed_shaders[] = {};\n"
        );
    }

    #[test]
    fn bare_header_blob() {
        let blob = crate::pack(&[]).unwrap();
        assert_eq!(
            render_c_array("raw_packed_shaders", &blob),
            "const unsigned char raw_packed_shaders[] = {0,0,0,0};\n"
        );
    }
}
