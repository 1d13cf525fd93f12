//! Typed writes at byte offsets.

use ferrule_codec::{fixed, varint, zigzag, Endianness};
use ferrule_common::{verify_arg, Result};
use ferrule_text::EncodingKind;
use half::f16;

use super::{ByteBuffer, LINE_TERMINATOR};

macro_rules! fixed_set {
    ($name:ident, $ty:ty, $write:path, $what:literal) => {
        #[doc = concat!("Writes ", $what, " at `offset`.")]
        pub fn $name(&mut self, offset: usize, value: $ty, endian: Endianness) -> Result<()> {
            self.write_array(offset, $write(value, endian), stringify!($name))
        }
    };
}

impl ByteBuffer {
    /// Writes a boolean at `offset` as a single byte, 1 or 0.
    pub fn set_bool(&mut self, offset: usize, value: bool) -> Result<()> {
        self.set_u8(offset, value as u8)
    }

    /// Writes a byte at `offset`.
    pub fn set_u8(&mut self, offset: usize, value: u8) -> Result<()> {
        self.field_bytes_mut(offset, 1, "set_u8")?[0] = value;
        Ok(())
    }

    pub fn set_i8(&mut self, offset: usize, value: i8) -> Result<()> {
        self.set_u8(offset, value as u8)
    }

    /// Writes the low byte of `c` at `offset`.
    pub fn set_char8(&mut self, offset: usize, c: char) -> Result<()> {
        self.set_u8(offset, c as u8)
    }

    /// Writes `c` as one UTF-16 unit at `offset`. A character beyond the
    /// basic plane stores as U+FFFD.
    pub fn set_char16(&mut self, offset: usize, c: char, endian: Endianness) -> Result<()> {
        let unit = if (c as u32) <= 0xFFFF {
            c as u32 as u16
        } else {
            0xFFFD
        };
        self.set_u16(offset, unit, endian)
    }

    fixed_set!(set_i16, i16, fixed::write_i16, "an `i16`");
    fixed_set!(set_u16, u16, fixed::write_u16, "a `u16`");
    fixed_set!(set_i24, i32, fixed::write_i24, "the low 24 bits of an `i32`");
    fixed_set!(set_u24, u32, fixed::write_u24, "the low 24 bits of a `u32`");
    fixed_set!(set_i32, i32, fixed::write_i32, "an `i32`");
    fixed_set!(set_u32, u32, fixed::write_u32, "a `u32`");
    fixed_set!(set_i64, i64, fixed::write_i64, "an `i64`");
    fixed_set!(set_u64, u64, fixed::write_u64, "a `u64`");
    fixed_set!(set_i128, i128, fixed::write_i128, "an `i128`");
    fixed_set!(set_u128, u128, fixed::write_u128, "a `u128`");
    fixed_set!(set_f16, f16, fixed::write_f16, "a half-precision float");
    fixed_set!(set_f32, f32, fixed::write_f32, "an `f32`");
    fixed_set!(set_f64, f64, fixed::write_f64, "an `f64`");

    /// Encodes `value` as a 32-bit varint at `offset`, returning the bytes
    /// written. The whole encoded form is bounds-checked up front; a
    /// varint write never grows the buffer and never writes partially.
    pub fn set_varint(&mut self, offset: usize, value: u32) -> Result<usize> {
        let mut buf = [0u8; varint::MAX_VARINT32_BYTES];
        let n = varint::encode_varint32(value, &mut buf);
        self.field_bytes_mut(offset, n, "set_varint")?
            .copy_from_slice(&buf[..n]);
        Ok(n)
    }

    /// Encodes `value` as a 64-bit varint at `offset`, returning the bytes
    /// written.
    pub fn set_varint64(&mut self, offset: usize, value: u64) -> Result<usize> {
        let mut buf = [0u8; varint::MAX_VARINT64_BYTES];
        let n = varint::encode_varint64(value, &mut buf);
        self.field_bytes_mut(offset, n, "set_varint64")?
            .copy_from_slice(&buf[..n]);
        Ok(n)
    }

    /// Encodes `value` zigzag-folded as a varint at `offset`.
    pub fn set_zigzag(&mut self, offset: usize, value: i32) -> Result<usize> {
        self.set_varint(offset, zigzag::encode_zigzag32(value))
    }

    pub fn set_zigzag64(&mut self, offset: usize, value: i64) -> Result<usize> {
        self.set_varint64(offset, zigzag::encode_zigzag64(value))
    }

    /// Encodes `text` at `offset` with no framing, returning the bytes
    /// written. The buffer grows when the field ends past the current
    /// size; `offset` itself must lie within it.
    pub fn set_string(&mut self, offset: usize, text: &str, encoding: EncodingKind) -> Result<usize> {
        let bytes = encoding.encode(text);
        self.grow_for_field(offset, bytes.len(), "set_string")?;
        self.copy_from_slice(&bytes, 0, offset, bytes.len())?;
        Ok(bytes.len())
    }

    /// Encodes `text` framed by a one-byte length prefix, returning the
    /// total bytes written. The encoded length must fit the prefix.
    pub fn set_string_len8(
        &mut self,
        offset: usize,
        text: &str,
        encoding: EncodingKind,
    ) -> Result<usize> {
        let bytes = encoding.encode(text);
        verify_arg!(text, bytes.len() <= u8::MAX as usize);
        self.grow_for_field(offset, 1 + bytes.len(), "set_string_len8")?;
        self.set_u8(offset, bytes.len() as u8)?;
        self.copy_from_slice(&bytes, 0, offset + 1, bytes.len())?;
        Ok(1 + bytes.len())
    }

    /// Encodes `text` framed by a two-byte length prefix.
    pub fn set_string_len16(
        &mut self,
        offset: usize,
        text: &str,
        encoding: EncodingKind,
        endian: Endianness,
    ) -> Result<usize> {
        let bytes = encoding.encode(text);
        verify_arg!(text, bytes.len() <= u16::MAX as usize);
        self.grow_for_field(offset, 2 + bytes.len(), "set_string_len16")?;
        self.set_u16(offset, bytes.len() as u16, endian)?;
        self.copy_from_slice(&bytes, 0, offset + 2, bytes.len())?;
        Ok(2 + bytes.len())
    }

    /// Encodes `text` framed by a four-byte length prefix.
    pub fn set_string_len32(
        &mut self,
        offset: usize,
        text: &str,
        encoding: EncodingKind,
        endian: Endianness,
    ) -> Result<usize> {
        let bytes = encoding.encode(text);
        verify_arg!(text, bytes.len() as u64 <= u32::MAX as u64);
        self.grow_for_field(offset, 4 + bytes.len(), "set_string_len32")?;
        self.set_u32(offset, bytes.len() as u32, endian)?;
        self.copy_from_slice(&bytes, 0, offset + 4, bytes.len())?;
        Ok(4 + bytes.len())
    }

    /// Encodes `text` framed by an eight-byte length prefix.
    pub fn set_string_len64(
        &mut self,
        offset: usize,
        text: &str,
        encoding: EncodingKind,
        endian: Endianness,
    ) -> Result<usize> {
        let bytes = encoding.encode(text);
        self.grow_for_field(offset, 8 + bytes.len(), "set_string_len64")?;
        self.set_u64(offset, bytes.len() as u64, endian)?;
        self.copy_from_slice(&bytes, 0, offset + 8, bytes.len())?;
        Ok(8 + bytes.len())
    }

    /// Encodes `text` framed by a 32-bit varint length prefix.
    pub fn set_string_varlen(
        &mut self,
        offset: usize,
        text: &str,
        encoding: EncodingKind,
    ) -> Result<usize> {
        let bytes = encoding.encode(text);
        verify_arg!(text, bytes.len() as u64 <= u32::MAX as u64);
        let prefix_len = varint::varint32_len(bytes.len() as u32);
        self.grow_for_field(offset, prefix_len + bytes.len(), "set_string_varlen")?;
        self.set_varint(offset, bytes.len() as u32)?;
        self.copy_from_slice(&bytes, 0, offset + prefix_len, bytes.len())?;
        Ok(prefix_len + bytes.len())
    }

    /// Encodes `text` framed by a 64-bit varint length prefix.
    pub fn set_string_varlen64(
        &mut self,
        offset: usize,
        text: &str,
        encoding: EncodingKind,
    ) -> Result<usize> {
        let bytes = encoding.encode(text);
        let prefix_len = varint::varint64_len(bytes.len() as u64);
        self.grow_for_field(offset, prefix_len + bytes.len(), "set_string_varlen64")?;
        self.set_varint64(offset, bytes.len() as u64)?;
        self.copy_from_slice(&bytes, 0, offset + prefix_len, bytes.len())?;
        Ok(prefix_len + bytes.len())
    }

    /// Encodes `text` followed by a single 0x00, returning the total bytes
    /// written.
    pub fn set_cstring(
        &mut self,
        offset: usize,
        text: &str,
        encoding: EncodingKind,
    ) -> Result<usize> {
        let bytes = encoding.encode(text);
        self.grow_for_field(offset, bytes.len() + 1, "set_cstring")?;
        self.copy_from_slice(&bytes, 0, offset, bytes.len())?;
        self.set_u8(offset + bytes.len(), 0)?;
        Ok(bytes.len() + 1)
    }

    /// Encodes `text` followed by the platform line terminator, both in
    /// `encoding`, returning the total bytes written.
    pub fn set_line(&mut self, offset: usize, text: &str, encoding: EncodingKind) -> Result<usize> {
        let payload = encoding.encode(text);
        let terminator = encoding.encode(LINE_TERMINATOR);
        let total = payload.len() + terminator.len();
        self.grow_for_field(offset, total, "set_line")?;
        self.copy_from_slice(&payload, 0, offset, payload.len())?;
        self.copy_from_slice(&terminator, 0, offset + payload.len(), terminator.len())?;
        Ok(total)
    }
}
