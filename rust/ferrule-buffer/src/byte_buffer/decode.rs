//! Typed reads at byte offsets.

use ferrule_codec::{fixed, varint, zigzag, Endianness};
use ferrule_common::{error::Error, Result};
use ferrule_text::EncodingKind;
use half::f16;

use super::ByteBuffer;

macro_rules! fixed_get {
    ($name:ident, $ty:ty, $n:expr, $read:path, $what:literal) => {
        #[doc = concat!("Reads ", $what, " at `offset`.")]
        pub fn $name(&self, offset: usize, endian: Endianness) -> Result<$ty> {
            let bytes: [u8; $n] = self.read_array(offset, stringify!($name))?;
            Ok($read(bytes, endian))
        }
    };
}

impl ByteBuffer {
    /// Reads the byte at `offset` as a boolean; any nonzero value is true.
    pub fn get_bool(&self, offset: usize) -> Result<bool> {
        Ok(self.get_u8(offset)? != 0)
    }

    /// Reads the byte at `offset`.
    pub fn get_u8(&self, offset: usize) -> Result<u8> {
        Ok(self.field_bytes(offset, 1, "get_u8")?[0])
    }

    pub fn get_i8(&self, offset: usize) -> Result<i8> {
        Ok(self.get_u8(offset)? as i8)
    }

    /// Reads the byte at `offset` as a character in U+0000..=U+00FF.
    pub fn get_char8(&self, offset: usize) -> Result<char> {
        Ok(self.get_u8(offset)? as char)
    }

    /// Reads one UTF-16 unit at `offset`. A surrogate half decodes as
    /// U+FFFD.
    pub fn get_char16(&self, offset: usize, endian: Endianness) -> Result<char> {
        let unit = self.get_u16(offset, endian)?;
        Ok(char::from_u32(unit as u32).unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    fixed_get!(get_i16, i16, 2, fixed::read_i16, "an `i16`");
    fixed_get!(get_u16, u16, 2, fixed::read_u16, "a `u16`");
    fixed_get!(get_i24, i32, 3, fixed::read_i24, "a sign-extended 24-bit integer");
    fixed_get!(get_u24, u32, 3, fixed::read_u24, "an unsigned 24-bit integer");
    fixed_get!(get_i32, i32, 4, fixed::read_i32, "an `i32`");
    fixed_get!(get_u32, u32, 4, fixed::read_u32, "a `u32`");
    fixed_get!(get_i64, i64, 8, fixed::read_i64, "an `i64`");
    fixed_get!(get_u64, u64, 8, fixed::read_u64, "a `u64`");
    fixed_get!(get_i128, i128, 16, fixed::read_i128, "an `i128`");
    fixed_get!(get_u128, u128, 16, fixed::read_u128, "a `u128`");
    fixed_get!(get_f16, f16, 2, fixed::read_f16, "a half-precision float");
    fixed_get!(get_f32, f32, 4, fixed::read_f32, "an `f32`");
    fixed_get!(get_f64, f64, 8, fixed::read_f64, "an `f64`");

    /// Decodes a 32-bit varint at `offset`, returning the value and the
    /// number of bytes it occupied.
    pub fn get_varint(&self, offset: usize) -> Result<(u32, usize)> {
        varint::decode_varint32(self.tail_bytes(offset, "get_varint")?)
    }

    /// Decodes a 64-bit varint at `offset`, returning the value and the
    /// number of bytes it occupied.
    pub fn get_varint64(&self, offset: usize) -> Result<(u64, usize)> {
        varint::decode_varint64(self.tail_bytes(offset, "get_varint64")?)
    }

    /// Decodes a zigzag-folded signed varint at `offset`.
    pub fn get_zigzag(&self, offset: usize) -> Result<(i32, usize)> {
        let (raw, consumed) = self.get_varint(offset)?;
        Ok((zigzag::decode_zigzag32(raw), consumed))
    }

    pub fn get_zigzag64(&self, offset: usize) -> Result<(i64, usize)> {
        let (raw, consumed) = self.get_varint64(offset)?;
        Ok((zigzag::decode_zigzag64(raw), consumed))
    }

    /// Decodes `byte_len` bytes at `offset` as text. The range clamps to
    /// the end of the buffer, so a truncated field decodes short rather
    /// than failing.
    pub fn get_string(
        &self,
        offset: usize,
        byte_len: usize,
        encoding: EncodingKind,
    ) -> Result<String> {
        if self.is_disposed() {
            return Err(Error::disposed("get_string"));
        }
        let view = self.view(offset..offset.saturating_add(byte_len));
        Ok(encoding.decode(view).into_owned())
    }

    /// Decodes everything from `offset` through the end of the buffer.
    pub fn get_string_to_end(&self, offset: usize, encoding: EncodingKind) -> Result<String> {
        if self.is_disposed() {
            return Err(Error::disposed("get_string_to_end"));
        }
        Ok(encoding.decode(self.view(offset..)).into_owned())
    }

    /// Reads text framed by a one-byte length prefix.
    ///
    /// Returns the text and the total bytes consumed, prefix included. A
    /// payload cut off by the end of the buffer decodes short.
    pub fn get_string_len8(
        &self,
        offset: usize,
        encoding: EncodingKind,
    ) -> Result<(String, usize)> {
        let declared = self.get_u8(offset)? as usize;
        self.get_prefixed(offset + 1, declared, 1, encoding)
    }

    /// Reads text framed by a two-byte length prefix.
    pub fn get_string_len16(
        &self,
        offset: usize,
        encoding: EncodingKind,
        endian: Endianness,
    ) -> Result<(String, usize)> {
        let declared = self.get_u16(offset, endian)? as usize;
        self.get_prefixed(offset + 2, declared, 2, encoding)
    }

    /// Reads text framed by a four-byte length prefix.
    pub fn get_string_len32(
        &self,
        offset: usize,
        encoding: EncodingKind,
        endian: Endianness,
    ) -> Result<(String, usize)> {
        let declared = self.get_u32(offset, endian)? as usize;
        self.get_prefixed(offset + 4, declared, 4, encoding)
    }

    /// Reads text framed by an eight-byte length prefix.
    pub fn get_string_len64(
        &self,
        offset: usize,
        encoding: EncodingKind,
        endian: Endianness,
    ) -> Result<(String, usize)> {
        let declared = usize::try_from(self.get_u64(offset, endian)?).unwrap_or(usize::MAX);
        self.get_prefixed(offset + 8, declared, 8, encoding)
    }

    /// Reads text framed by a 32-bit varint length prefix.
    pub fn get_string_varlen(
        &self,
        offset: usize,
        encoding: EncodingKind,
    ) -> Result<(String, usize)> {
        let (declared, prefix_len) = self.get_varint(offset)?;
        self.get_prefixed(offset + prefix_len, declared as usize, prefix_len, encoding)
    }

    /// Reads text framed by a 64-bit varint length prefix.
    pub fn get_string_varlen64(
        &self,
        offset: usize,
        encoding: EncodingKind,
    ) -> Result<(String, usize)> {
        let (declared, prefix_len) = self.get_varint64(offset)?;
        let declared = usize::try_from(declared).unwrap_or(usize::MAX);
        self.get_prefixed(offset + prefix_len, declared, prefix_len, encoding)
    }

    /// Reads text up to (not including) the next 0x00 byte. The terminator
    /// is counted in the consumed length; a buffer that ends before one is
    /// an error.
    pub fn get_cstring(&self, offset: usize, encoding: EncodingKind) -> Result<(String, usize)> {
        let tail = self.tail_bytes(offset, "get_cstring")?;
        match tail.iter().position(|&b| b == 0) {
            Some(nul) => Ok((encoding.decode(&tail[..nul]).into_owned(), nul + 1)),
            None => Err(Error::out_of_range(self.len(), self.len())),
        }
    }

    /// Reads text up to the next line terminator: "\r\n", a lone '\r', or
    /// a lone '\n'. The terminator is counted in the consumed length; a
    /// buffer that ends before one is an error.
    pub fn get_line(&self, offset: usize, encoding: EncodingKind) -> Result<(String, usize)> {
        let tail = self.tail_bytes(offset, "get_line")?;
        for (at, &byte) in tail.iter().enumerate() {
            let terminator = match byte {
                b'\n' => 1,
                b'\r' if tail.get(at + 1) == Some(&b'\n') => 2,
                b'\r' => 1,
                _ => continue,
            };
            return Ok((encoding.decode(&tail[..at]).into_owned(), at + terminator));
        }
        Err(Error::out_of_range(self.len(), self.len()))
    }

    fn get_prefixed(
        &self,
        payload_at: usize,
        declared: usize,
        prefix_len: usize,
        encoding: EncodingKind,
    ) -> Result<(String, usize)> {
        let available = self.len().saturating_sub(payload_at).min(declared);
        let text = self.get_string(payload_at, declared, encoding)?;
        Ok((text, prefix_len + available))
    }
}
