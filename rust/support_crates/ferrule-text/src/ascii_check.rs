//! ASCII string validation.

/// Returns true if all bytes in `src` are 7-bit values (0x00..0x7F).
/// Otherwise, returns false.
#[inline]
pub fn is_ascii_string(src: &[u8]) -> bool {
    src.iter().all(|&b| b & 0x80 == 0)
}

/// Returns true if all characters in `src` are 7-bit values.
#[inline]
pub fn is_ascii_str(src: &str) -> bool {
    is_ascii_string(src.as_bytes())
}
