//! Base-128 variable-length integer codec.
//!
//! Values are emitted least-significant group first, seven bits per byte,
//! with the high bit of each byte acting as a continuation flag. A 32-bit
//! value therefore occupies at most [`MAX_VARINT32_BYTES`] bytes and a
//! 64-bit value at most [`MAX_VARINT64_BYTES`].

use ferrule_common::{error::Error, Result};

/// Longest wire form of a 32-bit varint.
pub const MAX_VARINT32_BYTES: usize = 5;

/// Longest wire form of a 64-bit varint.
pub const MAX_VARINT64_BYTES: usize = 10;

/// Encodes `value` into `buf`, returning the number of bytes written.
pub fn encode_varint32(value: u32, buf: &mut [u8; MAX_VARINT32_BYTES]) -> usize {
    let mut v = value;
    let mut n = 0;
    while v > 0x7F {
        buf[n] = (v as u8) | 0x80;
        n += 1;
        v >>= 7;
    }
    buf[n] = v as u8;
    n + 1
}

/// Encodes `value` into `buf`, returning the number of bytes written.
pub fn encode_varint64(value: u64, buf: &mut [u8; MAX_VARINT64_BYTES]) -> usize {
    let mut v = value;
    let mut n = 0;
    while v > 0x7F {
        buf[n] = (v as u8) | 0x80;
        n += 1;
        v >>= 7;
    }
    buf[n] = v as u8;
    n + 1
}

/// Returns the encoded length of `value` without producing the bytes.
pub fn varint32_len(value: u32) -> usize {
    let mut v = value;
    let mut n = 1;
    while v > 0x7F {
        v >>= 7;
        n += 1;
    }
    n
}

/// Returns the encoded length of `value` without producing the bytes.
pub fn varint64_len(value: u64) -> usize {
    let mut v = value;
    let mut n = 1;
    while v > 0x7F {
        v >>= 7;
        n += 1;
    }
    n
}

/// Decodes a 32-bit varint from the front of `bytes`.
///
/// Returns the value and the number of bytes it occupied. Running out of
/// input before the final byte is a short read; a fifth byte that still has
/// its continuation bit set makes the sequence malformed.
pub fn decode_varint32(bytes: &[u8]) -> Result<(u32, usize)> {
    let mut value = 0u32;
    let mut shift = 0;
    let mut n = 0;
    loop {
        if n == MAX_VARINT32_BYTES {
            return Err(Error::malformed_varint(MAX_VARINT32_BYTES));
        }
        let Some(&byte) = bytes.get(n) else {
            return Err(Error::short_read("varint32"));
        };
        n += 1;
        value |= ((byte & 0x7F) as u32) << shift;
        if byte & 0x80 == 0 {
            return Ok((value, n));
        }
        shift += 7;
    }
}

/// Decodes a 64-bit varint from the front of `bytes`.
///
/// Same contract as [`decode_varint32`], with a ten-byte bound.
pub fn decode_varint64(bytes: &[u8]) -> Result<(u64, usize)> {
    let mut value = 0u64;
    let mut shift = 0;
    let mut n = 0;
    loop {
        if n == MAX_VARINT64_BYTES {
            return Err(Error::malformed_varint(MAX_VARINT64_BYTES));
        }
        let Some(&byte) = bytes.get(n) else {
            return Err(Error::short_read("varint64"));
        };
        n += 1;
        value |= ((byte & 0x7F) as u64) << shift;
        if byte & 0x80 == 0 {
            return Ok((value, n));
        }
        shift += 7;
    }
}
