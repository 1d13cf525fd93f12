//! Byte encodings for text fields.
//!
//! [`TextEncoding`] is the four-operation capability the buffer and stream
//! layers call for every text field: size a string in encoded bytes, encode
//! it, size a byte run in characters, decode it. [`EncodingKind`] names the
//! closed set of supported encodings and hands out the shared instance for
//! each one.
//!
//! Decoding never fails. Malformed input decodes with the replacement
//! character (or `?` for the single-byte encodings) substituted, and
//! encoding substitutes `?` for characters the target encoding cannot
//! represent.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use ferrule_common::{error::Error, Result};

use crate::ascii_check::is_ascii_string;

/// A byte encoding for text: sizing, encoding and lossy decoding.
pub trait TextEncoding {
    /// Number of bytes `encode` would produce for `text`.
    fn byte_count(&self, text: &str) -> usize;

    /// Encodes `text`, substituting `?` for unrepresentable characters.
    fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]>;

    /// Number of characters `decode` would produce for `bytes`.
    fn char_count(&self, bytes: &[u8]) -> usize;

    /// Decodes `bytes`, substituting for malformed input.
    fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str>;
}

/// The supported text encodings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EncodingKind {
    #[default]
    Utf8,
    Ascii,
    Latin1,
    Utf16Le,
    Utf16Be,
}

static UTF8: Utf8Encoding = Utf8Encoding;
static ASCII: AsciiEncoding = AsciiEncoding;
static LATIN1: Latin1Encoding = Latin1Encoding;
static UTF16_LE: Utf16Encoding = Utf16Encoding { big_endian: false };
static UTF16_BE: Utf16Encoding = Utf16Encoding { big_endian: true };

impl EncodingKind {
    /// The shared encoding instance for this kind.
    pub fn encoding(self) -> &'static dyn TextEncoding {
        match self {
            EncodingKind::Utf8 => &UTF8,
            EncodingKind::Ascii => &ASCII,
            EncodingKind::Latin1 => &LATIN1,
            EncodingKind::Utf16Le => &UTF16_LE,
            EncodingKind::Utf16Be => &UTF16_BE,
        }
    }

    /// Canonical name, accepted back by `from_str`.
    pub fn name(self) -> &'static str {
        match self {
            EncodingKind::Utf8 => "utf-8",
            EncodingKind::Ascii => "ascii",
            EncodingKind::Latin1 => "latin-1",
            EncodingKind::Utf16Le => "utf-16le",
            EncodingKind::Utf16Be => "utf-16be",
        }
    }

    pub fn byte_count(self, text: &str) -> usize {
        self.encoding().byte_count(text)
    }

    pub fn encode(self, text: &str) -> Cow<'_, [u8]> {
        self.encoding().encode(text)
    }

    pub fn char_count(self, bytes: &[u8]) -> usize {
        self.encoding().char_count(bytes)
    }

    pub fn decode(self, bytes: &[u8]) -> Cow<'_, str> {
        self.encoding().decode(bytes)
    }
}

impl fmt::Display for EncodingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EncodingKind {
    type Err = Error;

    /// Resolves an encoding name, ignoring case, hyphens and underscores.
    fn from_str(name: &str) -> Result<EncodingKind> {
        let mut key = String::with_capacity(name.len());
        for c in name.chars() {
            if c != '-' && c != '_' {
                key.push(c.to_ascii_lowercase());
            }
        }
        match key.as_str() {
            "utf8" => Ok(EncodingKind::Utf8),
            "ascii" | "usascii" => Ok(EncodingKind::Ascii),
            "latin1" | "iso88591" => Ok(EncodingKind::Latin1),
            "utf16" | "utf16le" => Ok(EncodingKind::Utf16Le),
            "utf16be" => Ok(EncodingKind::Utf16Be),
            _ => Err(Error::unsupported(format!("text encoding '{name}'"))),
        }
    }
}

/// UTF-8. `str` is already UTF-8, so both directions borrow valid input.
struct Utf8Encoding;

impl TextEncoding for Utf8Encoding {
    fn byte_count(&self, text: &str) -> usize {
        text.len()
    }

    fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
        Cow::Borrowed(text.as_bytes())
    }

    fn char_count(&self, bytes: &[u8]) -> usize {
        String::from_utf8_lossy(bytes).chars().count()
    }

    fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        String::from_utf8_lossy(bytes)
    }
}

/// 7-bit ASCII, one byte per character, `?` for everything outside it.
struct AsciiEncoding;

impl TextEncoding for AsciiEncoding {
    fn byte_count(&self, text: &str) -> usize {
        text.chars().count()
    }

    fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
        if text.is_ascii() {
            Cow::Borrowed(text.as_bytes())
        } else {
            Cow::Owned(
                text.chars()
                    .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
                    .collect(),
            )
        }
    }

    fn char_count(&self, bytes: &[u8]) -> usize {
        bytes.len()
    }

    fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        if is_ascii_string(bytes) {
            if let Ok(text) = std::str::from_utf8(bytes) {
                return Cow::Borrowed(text);
            }
        }
        Cow::Owned(
            bytes
                .iter()
                .map(|&b| if b & 0x80 == 0 { b as char } else { '?' })
                .collect(),
        )
    }
}

/// ISO-8859-1, a byte per character over U+0000..=U+00FF.
struct Latin1Encoding;

impl TextEncoding for Latin1Encoding {
    fn byte_count(&self, text: &str) -> usize {
        text.chars().count()
    }

    fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
        if text.is_ascii() {
            Cow::Borrowed(text.as_bytes())
        } else {
            Cow::Owned(
                text.chars()
                    .map(|c| if (c as u32) <= 0xFF { c as u8 } else { b'?' })
                    .collect(),
            )
        }
    }

    fn char_count(&self, bytes: &[u8]) -> usize {
        bytes.len()
    }

    fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        if is_ascii_string(bytes) {
            if let Ok(text) = std::str::from_utf8(bytes) {
                return Cow::Borrowed(text);
            }
        }
        Cow::Owned(bytes.iter().map(|&b| b as char).collect())
    }
}

/// UTF-16 in either byte order, without a BOM. Lone surrogates and a
/// dangling half unit decode as the replacement character.
struct Utf16Encoding {
    big_endian: bool,
}

impl Utf16Encoding {
    fn units<'a>(&self, bytes: &'a [u8]) -> impl Iterator<Item = u16> + 'a {
        let big_endian = self.big_endian;
        bytes.chunks_exact(2).map(move |pair| {
            let pair = [pair[0], pair[1]];
            if big_endian {
                u16::from_be_bytes(pair)
            } else {
                u16::from_le_bytes(pair)
            }
        })
    }
}

impl TextEncoding for Utf16Encoding {
    fn byte_count(&self, text: &str) -> usize {
        text.chars().map(|c| c.len_utf16() * 2).sum()
    }

    fn encode<'a>(&self, text: &'a str) -> Cow<'a, [u8]> {
        let mut bytes = Vec::with_capacity(text.len() * 2);
        for unit in text.encode_utf16() {
            let pair = if self.big_endian {
                unit.to_be_bytes()
            } else {
                unit.to_le_bytes()
            };
            bytes.extend_from_slice(&pair);
        }
        Cow::Owned(bytes)
    }

    fn char_count(&self, bytes: &[u8]) -> usize {
        char::decode_utf16(self.units(bytes)).count() + usize::from(bytes.len() % 2 != 0)
    }

    fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        let mut text: String = char::decode_utf16(self.units(bytes))
            .map(|unit| unit.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect();
        if bytes.len() % 2 != 0 {
            text.push(char::REPLACEMENT_CHARACTER);
        }
        Cow::Owned(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_borrows_both_ways() {
        let kind = EncodingKind::Utf8;
        assert!(matches!(kind.encode("héllo"), Cow::Borrowed(_)));
        assert!(matches!(kind.decode(b"h\xC3\xA9llo"), Cow::Borrowed(_)));
        assert_eq!(kind.decode(b"h\xC3\xA9llo"), "héllo");
        assert_eq!(kind.byte_count("héllo"), 6);
        assert_eq!(kind.char_count(b"h\xC3\xA9llo"), 5);
    }

    #[test]
    fn test_utf8_lossy_decode() {
        let kind = EncodingKind::Utf8;
        assert_eq!(kind.decode(b"a\xFFb"), "a\u{FFFD}b");
        assert_eq!(kind.char_count(b"a\xFFb"), 3);
    }

    #[test]
    fn test_ascii_substitution() {
        let kind = EncodingKind::Ascii;
        assert_eq!(kind.encode("héllo").as_ref(), b"h?llo");
        assert_eq!(kind.byte_count("héllo"), 5);
        assert_eq!(kind.decode(b"h\x80llo"), "h?llo");
        assert!(matches!(kind.encode("plain"), Cow::Borrowed(_)));
        assert!(matches!(kind.decode(b"plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_latin1_round_trip() {
        let kind = EncodingKind::Latin1;
        assert_eq!(kind.encode("héllo").as_ref(), b"h\xE9llo");
        assert_eq!(kind.decode(b"h\xE9llo"), "héllo");
        assert_eq!(kind.byte_count("héllo"), 5);
        assert_eq!(kind.char_count(b"h\xE9llo"), 5);
        assert_eq!(kind.encode("中").as_ref(), b"?");
    }

    #[test]
    fn test_utf16_byte_orders() {
        assert_eq!(
            EncodingKind::Utf16Le.encode("ab").as_ref(),
            &[0x61, 0x00, 0x62, 0x00]
        );
        assert_eq!(
            EncodingKind::Utf16Be.encode("ab").as_ref(),
            &[0x00, 0x61, 0x00, 0x62]
        );
        assert_eq!(EncodingKind::Utf16Le.decode(&[0x61, 0x00, 0x62, 0x00]), "ab");
        assert_eq!(EncodingKind::Utf16Be.decode(&[0x00, 0x61, 0x00, 0x62]), "ab");
    }

    #[test]
    fn test_utf16_surrogate_pairs() {
        let kind = EncodingKind::Utf16Le;
        let bytes = kind.encode("𝄞");
        assert_eq!(bytes.as_ref(), &[0x34, 0xD8, 0x1E, 0xDD]);
        assert_eq!(kind.byte_count("𝄞"), 4);
        assert_eq!(kind.char_count(&bytes), 1);
        assert_eq!(kind.decode(&bytes), "𝄞");
    }

    #[test]
    fn test_utf16_malformed_input() {
        let kind = EncodingKind::Utf16Le;
        // Lone high surrogate.
        assert_eq!(kind.decode(&[0x34, 0xD8]), "\u{FFFD}");
        // Dangling half unit.
        assert_eq!(kind.decode(&[0x61, 0x00, 0x62]), "a\u{FFFD}");
        assert_eq!(kind.char_count(&[0x61, 0x00, 0x62]), 2);
    }

    #[test]
    fn test_kind_from_str() {
        for name in ["utf-8", "UTF8", "Utf_8"] {
            assert_eq!(name.parse::<EncodingKind>().unwrap(), EncodingKind::Utf8);
        }
        assert_eq!("us-ascii".parse::<EncodingKind>().unwrap(), EncodingKind::Ascii);
        assert_eq!(
            "ISO-8859-1".parse::<EncodingKind>().unwrap(),
            EncodingKind::Latin1
        );
        assert_eq!("utf-16".parse::<EncodingKind>().unwrap(), EncodingKind::Utf16Le);
        assert_eq!(
            "UTF-16BE".parse::<EncodingKind>().unwrap(),
            EncodingKind::Utf16Be
        );
        assert!("ebcdic".parse::<EncodingKind>().is_err());
    }

    #[test]
    fn test_names_round_trip() {
        for kind in [
            EncodingKind::Utf8,
            EncodingKind::Ascii,
            EncodingKind::Latin1,
            EncodingKind::Utf16Le,
            EncodingKind::Utf16Be,
        ] {
            assert_eq!(kind.name().parse::<EncodingKind>().unwrap(), kind);
        }
        assert_eq!(EncodingKind::default(), EncodingKind::Utf8);
    }

    #[test]
    fn test_counts_match_actual_output() {
        let samples = ["", "plain", "héllo wörld", "mixed 中文 and 𝄞"];
        for kind in [
            EncodingKind::Utf8,
            EncodingKind::Ascii,
            EncodingKind::Latin1,
            EncodingKind::Utf16Le,
            EncodingKind::Utf16Be,
        ] {
            for text in samples {
                let bytes = kind.encode(text);
                assert_eq!(kind.byte_count(text), bytes.len(), "{kind} {text:?}");
                assert_eq!(
                    kind.char_count(&bytes),
                    kind.decode(&bytes).chars().count(),
                    "{kind} {text:?}"
                );
            }
        }
    }
}
