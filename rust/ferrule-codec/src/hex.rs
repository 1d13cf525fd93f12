//! Hexadecimal text codec.
//!
//! Encoding is two digits per byte, high nibble first, in the requested
//! letter case. Decoding is forgiving rather than validating: any character
//! outside `0-9a-fA-F` contributes the nibble value 0, and an odd-length
//! input treats its first digit as a standalone low-nibble byte, so `"ABC"`
//! decodes to `[0x0A, 0xBC]`.

/// Letter case used for the digits `A` through `F`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HexCase {
    #[default]
    Lower,
    Upper,
}

/// Renders `bytes` as hex text, two digits per byte.
pub fn encode_hex(bytes: &[u8], case: HexCase) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for &byte in bytes {
        out.push(hex_digit(byte >> 4, case));
        out.push(hex_digit(byte & 0xF, case));
    }
    out
}

/// Parses hex text back into bytes.
pub fn decode_hex(text: &str) -> Vec<u8> {
    let digits = text.chars().count();
    let mut bytes = Vec::with_capacity(digits / 2 + 1);
    let mut chars = text.chars();
    if digits % 2 != 0 {
        if let Some(lone) = chars.next() {
            bytes.push(hex_digit_value(lone));
        }
    }
    while let (Some(hi), Some(lo)) = (chars.next(), chars.next()) {
        bytes.push((hex_digit_value(hi) << 4) | hex_digit_value(lo));
    }
    bytes
}

/// Returns the digit character for a nibble; only the low four bits of
/// `value` participate.
#[inline]
pub fn hex_digit(value: u8, case: HexCase) -> char {
    let value = value & 0xF;
    if value < 10 {
        (b'0' + value) as char
    } else {
        let base = match case {
            HexCase::Lower => b'a',
            HexCase::Upper => b'A',
        };
        (base + value - 10) as char
    }
}

/// Returns the nibble value of a digit character, or 0 when the character
/// is not a hex digit.
#[inline]
pub fn hex_digit_value(digit: char) -> u8 {
    match digit {
        '0'..='9' => digit as u8 - b'0',
        'a'..='f' => digit as u8 - b'a' + 10,
        'A'..='F' => digit as u8 - b'A' + 10,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_cases() {
        assert_eq!(encode_hex(&[0xDE, 0xAD, 0x01], HexCase::Lower), "dead01");
        assert_eq!(encode_hex(&[0xDE, 0xAD, 0x01], HexCase::Upper), "DEAD01");
        assert_eq!(encode_hex(&[], HexCase::Lower), "");
        assert_eq!(encode_hex(&[0x0F], HexCase::Upper), "0F");
    }

    #[test]
    fn test_decode_even_length() {
        assert_eq!(decode_hex("dead01"), vec![0xDE, 0xAD, 0x01]);
        assert_eq!(decode_hex("DeAd01"), vec![0xDE, 0xAD, 0x01]);
        assert_eq!(decode_hex(""), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_odd_length_leads_with_lone_nibble() {
        assert_eq!(decode_hex("ABC"), vec![0x0A, 0xBC]);
        assert_eq!(decode_hex("1"), vec![0x01]);
        assert_eq!(decode_hex("F00"), vec![0x0F, 0x00]);
    }

    #[test]
    fn test_invalid_digits_read_as_zero() {
        assert_eq!(decode_hex("zz"), vec![0x00]);
        assert_eq!(decode_hex("g1"), vec![0x01]);
        assert_eq!(decode_hex("1g"), vec![0x10]);
        assert_eq!(decode_hex("\u{00E9}F"), vec![0x0F]);
    }

    #[test]
    fn test_round_trip() {
        fastrand::seed(99);
        let bytes: Vec<u8> = (0..257).map(|_| fastrand::u8(..)).collect();
        assert_eq!(decode_hex(&encode_hex(&bytes, HexCase::Lower)), bytes);
        assert_eq!(decode_hex(&encode_hex(&bytes, HexCase::Upper)), bytes);
    }

    #[test]
    fn test_digit_helpers() {
        assert_eq!(hex_digit(0xB, HexCase::Lower), 'b');
        assert_eq!(hex_digit(0xB, HexCase::Upper), 'B');
        assert_eq!(hex_digit(0xF5, HexCase::Lower), '5');
        assert_eq!(hex_digit_value('c'), 12);
        assert_eq!(hex_digit_value('?'), 0);
    }
}
