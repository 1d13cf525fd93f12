//! Typed writes over a forward-only byte sink.
//!
//! [`BinaryWrite`] mirrors the byte-buffer setter surface for any
//! [`std::io::Write`]: same wire forms, same prefix-width checks, with
//! the sink growing as a stream naturally does instead of through
//! explicit reallocation. [`AlignWrite`] adds position alignment, which
//! needs to know where the sink currently is and therefore requires
//! [`std::io::Seek`]. Both traits are blanket-implemented.

use std::io::{Seek, Write};

use ferrule_codec::{fixed, layout, varint, zigzag, Endianness};
use ferrule_common::{error::Error, verify_arg, Result};
use ferrule_text::EncodingKind;
use half::f16;

#[cfg(windows)]
const LINE_TERMINATOR: &str = "\r\n";
#[cfg(not(windows))]
const LINE_TERMINATOR: &str = "\n";

/// Chunk size for repeated-byte fills, so a large fill never allocates.
const FILL_CHUNK: usize = 1024;

fn write_all_ctx<W: Write + ?Sized>(writer: &mut W, bytes: &[u8], operation: &str) -> Result<()> {
    writer.write_all(bytes).map_err(|e| Error::io(operation, e))
}

macro_rules! fixed_write {
    ($name:ident, $ty:ty, $write:path, $what:literal) => {
        #[doc = concat!("Writes ", $what, ".")]
        fn $name(&mut self, value: $ty, endian: Endianness) -> Result<()> {
            write_all_ctx(self, &$write(value, endian), stringify!($name))
        }
    };
}

/// Typed writes for any sequential byte sink.
pub trait BinaryWrite: Write {
    /// Writes a boolean as a single byte, 1 or 0.
    fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(value as u8)
    }

    /// Writes one byte.
    fn write_u8(&mut self, value: u8) -> Result<()> {
        write_all_ctx(self, &[value], "write_u8")
    }

    fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_u8(value as u8)
    }

    /// Writes the low byte of `c`.
    fn write_char8(&mut self, c: char) -> Result<()> {
        self.write_u8(c as u8)
    }

    /// Writes `c` as one UTF-16 unit. A character beyond the basic
    /// plane stores as U+FFFD.
    fn write_char16(&mut self, c: char, endian: Endianness) -> Result<()> {
        let unit = if (c as u32) <= 0xFFFF {
            c as u32 as u16
        } else {
            0xFFFD
        };
        self.write_u16(unit, endian)
    }

    fixed_write!(write_i16, i16, fixed::write_i16, "an `i16`");
    fixed_write!(write_u16, u16, fixed::write_u16, "a `u16`");
    fixed_write!(write_i24, i32, fixed::write_i24, "the low 24 bits of an `i32`");
    fixed_write!(write_u24, u32, fixed::write_u24, "the low 24 bits of a `u32`");
    fixed_write!(write_i32, i32, fixed::write_i32, "an `i32`");
    fixed_write!(write_u32, u32, fixed::write_u32, "a `u32`");
    fixed_write!(write_i64, i64, fixed::write_i64, "an `i64`");
    fixed_write!(write_u64, u64, fixed::write_u64, "a `u64`");
    fixed_write!(write_i128, i128, fixed::write_i128, "an `i128`");
    fixed_write!(write_u128, u128, fixed::write_u128, "a `u128`");
    fixed_write!(write_f16, f16, fixed::write_f16, "a half-precision float");
    fixed_write!(write_f32, f32, fixed::write_f32, "an `f32`");
    fixed_write!(write_f64, f64, fixed::write_f64, "an `f64`");

    /// Writes raw bytes with no framing.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        write_all_ctx(self, bytes, "write_bytes")
    }

    /// Encodes `value` as a 32-bit varint, returning the bytes written.
    fn write_varint(&mut self, value: u32) -> Result<usize> {
        let mut buf = [0u8; varint::MAX_VARINT32_BYTES];
        let n = varint::encode_varint32(value, &mut buf);
        write_all_ctx(self, &buf[..n], "write_varint")?;
        Ok(n)
    }

    /// Encodes `value` as a 64-bit varint, returning the bytes written.
    fn write_varint64(&mut self, value: u64) -> Result<usize> {
        let mut buf = [0u8; varint::MAX_VARINT64_BYTES];
        let n = varint::encode_varint64(value, &mut buf);
        write_all_ctx(self, &buf[..n], "write_varint64")?;
        Ok(n)
    }

    /// Encodes `value` zigzag-folded as a varint.
    fn write_zigzag(&mut self, value: i32) -> Result<usize> {
        self.write_varint(zigzag::encode_zigzag32(value))
    }

    fn write_zigzag64(&mut self, value: i64) -> Result<usize> {
        self.write_varint64(zigzag::encode_zigzag64(value))
    }

    /// Encodes `text` with no framing, returning the bytes written.
    fn write_string(&mut self, text: &str, encoding: EncodingKind) -> Result<usize> {
        let bytes = encoding.encode(text);
        write_all_ctx(self, &bytes, "write_string")?;
        Ok(bytes.len())
    }

    /// Encodes `text` framed by a one-byte length prefix, returning the
    /// total bytes written. The encoded length must fit the prefix.
    fn write_string_len8(&mut self, text: &str, encoding: EncodingKind) -> Result<usize> {
        let bytes = encoding.encode(text);
        verify_arg!(text, bytes.len() <= u8::MAX as usize);
        self.write_u8(bytes.len() as u8)?;
        write_all_ctx(self, &bytes, "write_string_len8")?;
        Ok(1 + bytes.len())
    }

    /// Encodes `text` framed by a two-byte length prefix.
    fn write_string_len16(
        &mut self,
        text: &str,
        encoding: EncodingKind,
        endian: Endianness,
    ) -> Result<usize> {
        let bytes = encoding.encode(text);
        verify_arg!(text, bytes.len() <= u16::MAX as usize);
        self.write_u16(bytes.len() as u16, endian)?;
        write_all_ctx(self, &bytes, "write_string_len16")?;
        Ok(2 + bytes.len())
    }

    /// Encodes `text` framed by a four-byte length prefix.
    fn write_string_len32(
        &mut self,
        text: &str,
        encoding: EncodingKind,
        endian: Endianness,
    ) -> Result<usize> {
        let bytes = encoding.encode(text);
        verify_arg!(text, bytes.len() as u64 <= u32::MAX as u64);
        self.write_u32(bytes.len() as u32, endian)?;
        write_all_ctx(self, &bytes, "write_string_len32")?;
        Ok(4 + bytes.len())
    }

    /// Encodes `text` framed by an eight-byte length prefix.
    fn write_string_len64(
        &mut self,
        text: &str,
        encoding: EncodingKind,
        endian: Endianness,
    ) -> Result<usize> {
        let bytes = encoding.encode(text);
        self.write_u64(bytes.len() as u64, endian)?;
        write_all_ctx(self, &bytes, "write_string_len64")?;
        Ok(8 + bytes.len())
    }

    /// Encodes `text` framed by a 32-bit varint length prefix.
    fn write_string_varlen(&mut self, text: &str, encoding: EncodingKind) -> Result<usize> {
        let bytes = encoding.encode(text);
        verify_arg!(text, bytes.len() as u64 <= u32::MAX as u64);
        let prefix_len = self.write_varint(bytes.len() as u32)?;
        write_all_ctx(self, &bytes, "write_string_varlen")?;
        Ok(prefix_len + bytes.len())
    }

    /// Encodes `text` framed by a 64-bit varint length prefix.
    fn write_string_varlen64(&mut self, text: &str, encoding: EncodingKind) -> Result<usize> {
        let bytes = encoding.encode(text);
        let prefix_len = self.write_varint64(bytes.len() as u64)?;
        write_all_ctx(self, &bytes, "write_string_varlen64")?;
        Ok(prefix_len + bytes.len())
    }

    /// Encodes `text` followed by a single 0x00, returning the total
    /// bytes written.
    fn write_cstring(&mut self, text: &str, encoding: EncodingKind) -> Result<usize> {
        let bytes = encoding.encode(text);
        write_all_ctx(self, &bytes, "write_cstring")?;
        self.write_u8(0)?;
        Ok(bytes.len() + 1)
    }

    /// Encodes `text` followed by the platform line terminator, both in
    /// `encoding`, returning the total bytes written.
    fn write_line(&mut self, text: &str, encoding: EncodingKind) -> Result<usize> {
        let payload = encoding.encode(text);
        let terminator = encoding.encode(LINE_TERMINATOR);
        write_all_ctx(self, &payload, "write_line")?;
        write_all_ctx(self, &terminator, "write_line")?;
        Ok(payload.len() + terminator.len())
    }

    /// Writes `count` copies of `padding`.
    fn fill(&mut self, count: usize, padding: u8) -> Result<()> {
        let chunk = [padding; FILL_CHUNK];
        let mut remaining = count;
        while remaining > 0 {
            let n = remaining.min(FILL_CHUNK);
            write_all_ctx(self, &chunk[..n], "fill")?;
            remaining -= n;
        }
        Ok(())
    }
}

impl<W: Write + ?Sized> BinaryWrite for W {}

/// Position alignment for seekable sinks.
pub trait AlignWrite: Write + Seek {
    /// Pads with `padding` bytes until the position is a multiple of
    /// `block`, returning the number written. Any positive block size
    /// works; zero is a no-op.
    fn align_to(&mut self, block: u64, padding: u8) -> Result<usize> {
        let position = self.stream_position().map_err(|e| Error::io("align_to", e))?;
        let pad = layout::padding_len(position, block);
        let pad = usize::try_from(pad)
            .map_err(|_| Error::invalid_arg("block", "padding amount exceeds the address space"))?;
        self.fill(pad, padding)?;
        Ok(pad)
    }
}

impl<W: Write + Seek + ?Sized> AlignWrite for W {}
