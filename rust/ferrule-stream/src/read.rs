//! Typed reads over a forward-only byte source.
//!
//! [`BinaryRead`] mirrors the byte-buffer getter surface for any
//! [`std::io::Read`]: same wire forms, same error taxonomy, with the
//! stream position taking the place of an explicit offset. [`PeekRead`]
//! adds the operations that need one byte of lookahead and therefore a
//! seekable source. Both traits are blanket-implemented, so bringing
//! them into scope is all a call site needs.
//!
//! Unlike the buffer getters, a declared-length read here cannot clamp
//! to "whatever is left": the source ends where it ends, so running out
//! of bytes mid-field is a [`ShortRead`](ferrule_common::error::ErrorKind).

use std::io::{Read, Seek, SeekFrom};

use ferrule_codec::{fixed, varint, zigzag, Endianness};
use ferrule_common::{error::Error, Result};
use ferrule_text::EncodingKind;
use half::f16;

/// Initial capacities for the growable scratch behind terminator scans.
const CSTRING_SCRATCH: usize = 256;
const LINE_SCRATCH: usize = 512;

fn read_exact_or_short<R: Read + ?Sized>(
    reader: &mut R,
    buf: &mut [u8],
    operation: &str,
) -> Result<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        std::io::ErrorKind::UnexpectedEof => Error::short_read(operation),
        _ => Error::io(operation, e),
    })
}

/// Reads a single byte, returning `None` at end of stream. Interrupted
/// reads are retried.
fn read_byte_raw<R: Read + ?Sized>(reader: &mut R, operation: &str) -> Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(Error::io(operation, e)),
        }
    }
}

macro_rules! fixed_read {
    ($name:ident, $ty:ty, $n:expr, $read:path, $what:literal) => {
        #[doc = concat!("Reads ", $what, ".")]
        fn $name(&mut self, endian: Endianness) -> Result<$ty> {
            let mut bytes = [0u8; $n];
            read_exact_or_short(self, &mut bytes, stringify!($name))?;
            Ok($read(bytes, endian))
        }
    };
}

/// Typed reads for any sequential byte source.
pub trait BinaryRead: Read {
    /// Reads one byte as a boolean; any nonzero value is true.
    fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Reads one byte.
    fn read_u8(&mut self) -> Result<u8> {
        let mut byte = [0u8; 1];
        read_exact_or_short(self, &mut byte, "read_u8")?;
        Ok(byte[0])
    }

    fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Reads one byte as a character in U+0000..=U+00FF.
    fn read_char8(&mut self) -> Result<char> {
        Ok(self.read_u8()? as char)
    }

    /// Reads one UTF-16 unit. A surrogate half decodes as U+FFFD.
    fn read_char16(&mut self, endian: Endianness) -> Result<char> {
        let unit = self.read_u16(endian)?;
        Ok(char::from_u32(unit as u32).unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    fixed_read!(read_i16, i16, 2, fixed::read_i16, "an `i16`");
    fixed_read!(read_u16, u16, 2, fixed::read_u16, "a `u16`");
    fixed_read!(read_i24, i32, 3, fixed::read_i24, "a sign-extended 24-bit integer");
    fixed_read!(read_u24, u32, 3, fixed::read_u24, "an unsigned 24-bit integer");
    fixed_read!(read_i32, i32, 4, fixed::read_i32, "an `i32`");
    fixed_read!(read_u32, u32, 4, fixed::read_u32, "a `u32`");
    fixed_read!(read_i64, i64, 8, fixed::read_i64, "an `i64`");
    fixed_read!(read_u64, u64, 8, fixed::read_u64, "a `u64`");
    fixed_read!(read_i128, i128, 16, fixed::read_i128, "an `i128`");
    fixed_read!(read_u128, u128, 16, fixed::read_u128, "a `u128`");
    fixed_read!(read_f16, f16, 2, fixed::read_f16, "a half-precision float");
    fixed_read!(read_f32, f32, 4, fixed::read_f32, "an `f32`");
    fixed_read!(read_f64, f64, 8, fixed::read_f64, "an `f64`");

    /// Decodes a 32-bit varint, consuming one byte at a time. A value
    /// cut off by end of stream is a short read; a fifth continuation
    /// byte is malformed.
    fn read_varint(&mut self) -> Result<u32> {
        let mut value = 0u32;
        let mut shift = 0u32;
        let mut n = 0;
        loop {
            if n == varint::MAX_VARINT32_BYTES {
                return Err(Error::malformed_varint(varint::MAX_VARINT32_BYTES));
            }
            let mut byte = [0u8; 1];
            read_exact_or_short(self, &mut byte, "read_varint")?;
            n += 1;
            value |= ((byte[0] & 0x7F) as u32) << shift;
            if byte[0] & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }

    /// Decodes a 64-bit varint, consuming one byte at a time.
    fn read_varint64(&mut self) -> Result<u64> {
        let mut value = 0u64;
        let mut shift = 0u32;
        let mut n = 0;
        loop {
            if n == varint::MAX_VARINT64_BYTES {
                return Err(Error::malformed_varint(varint::MAX_VARINT64_BYTES));
            }
            let mut byte = [0u8; 1];
            read_exact_or_short(self, &mut byte, "read_varint64")?;
            n += 1;
            value |= ((byte[0] & 0x7F) as u64) << shift;
            if byte[0] & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }

    /// Decodes a zigzag-folded signed varint.
    fn read_zigzag(&mut self) -> Result<i32> {
        Ok(zigzag::decode_zigzag32(self.read_varint()?))
    }

    fn read_zigzag64(&mut self) -> Result<i64> {
        Ok(zigzag::decode_zigzag64(self.read_varint64()?))
    }

    /// Reads exactly `count` bytes.
    fn read_byte_vec(&mut self, count: usize) -> Result<Vec<u8>> {
        let mut bytes = vec![0u8; count];
        read_exact_or_short(self, &mut bytes, "read_byte_vec")?;
        Ok(bytes)
    }

    /// Reads exactly `byte_len` bytes and decodes them as text.
    fn read_string(&mut self, byte_len: usize, encoding: EncodingKind) -> Result<String> {
        let bytes = self.read_byte_vec(byte_len)?;
        Ok(encoding.decode(&bytes).into_owned())
    }

    /// Reads text framed by a one-byte length prefix.
    fn read_string_len8(&mut self, encoding: EncodingKind) -> Result<String> {
        let declared = self.read_u8()? as usize;
        self.read_string(declared, encoding)
    }

    /// Reads text framed by a two-byte length prefix.
    fn read_string_len16(&mut self, encoding: EncodingKind, endian: Endianness) -> Result<String> {
        let declared = self.read_u16(endian)? as usize;
        self.read_string(declared, encoding)
    }

    /// Reads text framed by a four-byte length prefix.
    fn read_string_len32(&mut self, encoding: EncodingKind, endian: Endianness) -> Result<String> {
        let declared = self.read_u32(endian)? as usize;
        self.read_string(declared, encoding)
    }

    /// Reads text framed by an eight-byte length prefix.
    fn read_string_len64(&mut self, encoding: EncodingKind, endian: Endianness) -> Result<String> {
        let declared = usize::try_from(self.read_u64(endian)?)
            .map_err(|_| Error::invalid_arg("byte_len", "declared length exceeds the address space"))?;
        self.read_string(declared, encoding)
    }

    /// Reads text framed by a 32-bit varint length prefix.
    fn read_string_varlen(&mut self, encoding: EncodingKind) -> Result<String> {
        let declared = self.read_varint()? as usize;
        self.read_string(declared, encoding)
    }

    /// Reads text framed by a 64-bit varint length prefix.
    fn read_string_varlen64(&mut self, encoding: EncodingKind) -> Result<String> {
        let declared = usize::try_from(self.read_varint64()?)
            .map_err(|_| Error::invalid_arg("byte_len", "declared length exceeds the address space"))?;
        self.read_string(declared, encoding)
    }

    /// Reads text up to the next 0x00 byte or the end of the stream,
    /// whichever comes first. The terminator is consumed and excluded
    /// from the text.
    fn read_cstring(&mut self, encoding: EncodingKind) -> Result<String> {
        let mut bytes = Vec::with_capacity(CSTRING_SCRATCH);
        loop {
            match read_byte_raw(self, "read_cstring")? {
                None | Some(0) => break,
                Some(byte) => bytes.push(byte),
            }
        }
        Ok(encoding.decode(&bytes).into_owned())
    }

    /// Reads every byte remaining in the stream.
    fn read_remaining(&mut self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.read_to_end(&mut bytes)
            .map_err(|e| Error::io("read_remaining", e))?;
        Ok(bytes)
    }

    /// Decodes every byte remaining in the stream as text.
    fn read_remaining_string(&mut self, encoding: EncodingKind) -> Result<String> {
        let bytes = self.read_remaining()?;
        Ok(encoding.decode(&bytes).into_owned())
    }
}

impl<R: Read + ?Sized> BinaryRead for R {}

/// Lookahead reads for seekable sources.
pub trait PeekRead: Read + Seek {
    /// Returns the next byte without consuming it, or `None` at end of
    /// stream.
    fn peek_byte(&mut self) -> Result<Option<u8>> {
        let position = self.stream_position().map_err(|e| Error::io("peek_byte", e))?;
        match read_byte_raw(self, "peek_byte")? {
            Some(byte) => {
                self.seek(SeekFrom::Start(position))
                    .map_err(|e| Error::io("peek_byte", e))?;
                Ok(Some(byte))
            }
            None => Ok(None),
        }
    }

    /// Reads through the next line terminator: "\r\n", a lone '\r', or a
    /// lone '\n'. The terminator is consumed and excluded from the text.
    ///
    /// Returns `None` only when the stream is already exhausted; a final
    /// line without a terminator is still returned. Telling a trailing
    /// '\r' from "\r\n" needs one byte of lookahead, which is why this
    /// lives on the seekable trait.
    fn read_line(&mut self, encoding: EncodingKind) -> Result<Option<String>> {
        let mut bytes = Vec::with_capacity(LINE_SCRATCH);
        let mut saw_any = false;
        loop {
            match read_byte_raw(self, "read_line")? {
                None if saw_any => break,
                None => return Ok(None),
                Some(byte) => {
                    saw_any = true;
                    match byte {
                        b'\n' => break,
                        b'\r' => {
                            if self.peek_byte()? == Some(b'\n') {
                                let _ = read_byte_raw(self, "read_line")?;
                            }
                            break;
                        }
                        other => bytes.push(other),
                    }
                }
            }
        }
        Ok(Some(encoding.decode(&bytes).into_owned()))
    }
}

impl<R: Read + Seek + ?Sized> PeekRead for R {}
