//! Four-character tags packed into a `u32`.
//!
//! Tags are the short ASCII identifiers used in container and chunk
//! headers. The packed form is big-endian, so the first character lands in
//! the most significant byte and a tag compares and prints in reading
//! order. Absent trailing characters are NUL.

use crate::endian::Endianness;
use crate::fixed;

/// Packs the first four characters of `text` into a tag.
///
/// Characters beyond U+00FF cannot be represented and pack as `?`. Shorter
/// input leaves the remaining positions NUL; an empty string packs to 0.
pub fn tag_from_str(text: &str) -> u32 {
    let mut bytes = [0u8; 4];
    for (slot, ch) in bytes.iter_mut().zip(text.chars()) {
        *slot = if (ch as u32) <= 0xFF { ch as u8 } else { b'?' };
    }
    fixed::read_u32(bytes, Endianness::Big)
}

/// Unpacks a tag into its text form, dropping trailing NUL padding.
///
/// The zero tag unpacks to the empty string.
pub fn tag_to_string(tag: u32) -> String {
    if tag == 0 {
        return String::new();
    }
    let bytes = fixed::write_u32(tag, Endianness::Big);
    let len = bytes.iter().rposition(|&b| b != 0).map_or(0, |at| at + 1);
    bytes[..len].iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packing_is_big_endian() {
        assert_eq!(tag_from_str("RIFF"), 0x5249_4646);
        assert_eq!(tag_from_str("fmt "), 0x666D_7420);
    }

    #[test]
    fn test_short_tags_pad_with_nul() {
        assert_eq!(tag_from_str("AB"), 0x4142_0000);
        assert_eq!(tag_to_string(0x4142_0000), "AB");
        assert_eq!(tag_from_str(""), 0);
        assert_eq!(tag_to_string(0), "");
    }

    #[test]
    fn test_long_input_truncates_to_four() {
        assert_eq!(tag_from_str("HEADER"), tag_from_str("HEAD"));
    }

    #[test]
    fn test_unrepresentable_chars_pack_as_question_mark() {
        assert_eq!(tag_from_str("A\u{263A}B"), tag_from_str("A?B"));
        assert_eq!(tag_from_str("\u{00E9}x"), u32::from_be_bytes([0xE9, b'x', 0, 0]));
    }

    #[test]
    fn test_round_trip() {
        for tag in ["DATA", "x", "ab1", "\u{00FF}\u{00FF}"] {
            assert_eq!(tag_to_string(tag_from_str(tag)), tag);
        }
    }
}
