//! ZigZag mapping between signed integers and their unsigned varint forms.
//!
//! Small magnitudes of either sign land on small unsigned values, so a
//! zigzagged number stays short under the base-128 encoding: 0 maps to 0,
//! -1 to 1, 1 to 2, -2 to 3 and so on.

/// Maps a signed 32-bit value onto the zigzag unsigned range.
#[inline]
pub fn encode_zigzag32(value: i32) -> u32 {
    ((value << 1) ^ (value >> 31)) as u32
}

/// Inverse of [`encode_zigzag32`].
#[inline]
pub fn decode_zigzag32(value: u32) -> i32 {
    ((value >> 1) as i32) ^ -((value & 1) as i32)
}

/// Maps a signed 64-bit value onto the zigzag unsigned range.
#[inline]
pub fn encode_zigzag64(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`encode_zigzag64`].
#[inline]
pub fn decode_zigzag64(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}
