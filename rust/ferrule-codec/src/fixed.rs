//! Fixed-width integer and float codecs over value-sized byte arrays.
//!
//! Each reader takes the exact wire-form array and each writer returns one,
//! so length errors are impossible at this layer. Callers that work with
//! slices (the buffer and stream crates) do their own bounds accounting and
//! then hand the array over.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use half::f16;

use crate::endian::Endianness;

macro_rules! fixed_width {
    ($ty:ty, $n:expr, $read_fn:ident => $read:ident, $write_fn:ident => $write:ident) => {
        #[doc = concat!("Reads a `", stringify!($ty), "` from its ", stringify!($n), "-byte wire form.")]
        #[inline]
        pub fn $read_fn(bytes: [u8; $n], endian: Endianness) -> $ty {
            match endian {
                Endianness::Little => LittleEndian::$read(&bytes),
                Endianness::Big => BigEndian::$read(&bytes),
            }
        }

        #[doc = concat!("Writes a `", stringify!($ty), "` as its ", stringify!($n), "-byte wire form.")]
        #[inline]
        pub fn $write_fn(value: $ty, endian: Endianness) -> [u8; $n] {
            let mut bytes = [0u8; $n];
            match endian {
                Endianness::Little => LittleEndian::$write(&mut bytes, value),
                Endianness::Big => BigEndian::$write(&mut bytes, value),
            }
            bytes
        }
    };
}

fixed_width!(i16, 2, read_i16 => read_i16, write_i16 => write_i16);
fixed_width!(u16, 2, read_u16 => read_u16, write_u16 => write_u16);
fixed_width!(i32, 4, read_i32 => read_i32, write_i32 => write_i32);
fixed_width!(u32, 4, read_u32 => read_u32, write_u32 => write_u32);
fixed_width!(i64, 8, read_i64 => read_i64, write_i64 => write_i64);
fixed_width!(u64, 8, read_u64 => read_u64, write_u64 => write_u64);
fixed_width!(i128, 16, read_i128 => read_i128, write_i128 => write_i128);
fixed_width!(u128, 16, read_u128 => read_u128, write_u128 => write_u128);
fixed_width!(f32, 4, read_f32 => read_f32, write_f32 => write_f32);
fixed_width!(f64, 8, read_f64 => read_f64, write_f64 => write_f64);

/// Reads a signed 24-bit integer, sign-extending bit 23 into the `i32`.
#[inline]
pub fn read_i24(bytes: [u8; 3], endian: Endianness) -> i32 {
    match endian {
        Endianness::Little => LittleEndian::read_i24(&bytes),
        Endianness::Big => BigEndian::read_i24(&bytes),
    }
}

/// Writes the low 24 bits of `value`; higher bits are discarded.
#[inline]
pub fn write_i24(value: i32, endian: Endianness) -> [u8; 3] {
    write_u24(value as u32, endian)
}

/// Reads an unsigned 24-bit integer into the low bits of a `u32`.
#[inline]
pub fn read_u24(bytes: [u8; 3], endian: Endianness) -> u32 {
    match endian {
        Endianness::Little => LittleEndian::read_u24(&bytes),
        Endianness::Big => BigEndian::read_u24(&bytes),
    }
}

/// Writes the low 24 bits of `value`; higher bits are discarded.
#[inline]
pub fn write_u24(value: u32, endian: Endianness) -> [u8; 3] {
    let value = value & 0x00FF_FFFF;
    let mut bytes = [0u8; 3];
    match endian {
        Endianness::Little => LittleEndian::write_u24(&mut bytes, value),
        Endianness::Big => BigEndian::write_u24(&mut bytes, value),
    }
    bytes
}

/// Reads an IEEE 754 half-precision float from its two-byte wire form.
#[inline]
pub fn read_f16(bytes: [u8; 2], endian: Endianness) -> f16 {
    f16::from_bits(read_u16(bytes, endian))
}

/// Writes an IEEE 754 half-precision float as its two-byte wire form.
#[inline]
pub fn write_f16(value: f16, endian: Endianness) -> [u8; 2] {
    write_u16(value.to_bits(), endian)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_order_layouts() {
        assert_eq!(write_u16(0x1122, Endianness::Little), [0x22, 0x11]);
        assert_eq!(write_u16(0x1122, Endianness::Big), [0x11, 0x22]);
        assert_eq!(
            write_u32(0x1122_3344, Endianness::Little),
            [0x44, 0x33, 0x22, 0x11]
        );
        assert_eq!(
            write_u32(0x1122_3344, Endianness::Big),
            [0x11, 0x22, 0x33, 0x44]
        );
        assert_eq!(
            write_u64(0x0102_0304_0506_0708, Endianness::Big),
            [1, 2, 3, 4, 5, 6, 7, 8]
        );
    }

    #[test]
    fn test_round_trips_both_orders() {
        for endian in [Endianness::Little, Endianness::Big] {
            assert_eq!(read_i16(write_i16(i16::MIN, endian), endian), i16::MIN);
            assert_eq!(read_u16(write_u16(u16::MAX, endian), endian), u16::MAX);
            assert_eq!(read_i32(write_i32(-7, endian), endian), -7);
            assert_eq!(read_u32(write_u32(u32::MAX, endian), endian), u32::MAX);
            assert_eq!(read_i64(write_i64(i64::MIN, endian), endian), i64::MIN);
            assert_eq!(read_u64(write_u64(u64::MAX, endian), endian), u64::MAX);
            assert_eq!(read_i128(write_i128(i128::MIN, endian), endian), i128::MIN);
            assert_eq!(read_u128(write_u128(u128::MAX, endian), endian), u128::MAX);
        }
    }

    #[test]
    fn test_random_round_trips() {
        fastrand::seed(0x5eed);
        for _ in 0..1000 {
            let v = fastrand::u64(..);
            for endian in [Endianness::Little, Endianness::Big] {
                assert_eq!(read_u64(write_u64(v, endian), endian), v);
                assert_eq!(read_u32(write_u32(v as u32, endian), endian), v as u32);
                assert_eq!(read_i16(write_i16(v as i16, endian), endian), v as i16);
            }
        }
    }

    #[test]
    fn test_i24_sign_extension() {
        assert_eq!(read_i24([0xFF, 0xFF, 0xFF], Endianness::Little), -1);
        assert_eq!(read_i24([0x00, 0x00, 0x80], Endianness::Little), -0x0080_0000);
        assert_eq!(read_i24([0x80, 0x00, 0x00], Endianness::Big), -0x0080_0000);
        assert_eq!(read_i24([0xFF, 0xFF, 0x7F], Endianness::Little), 0x007F_FFFF);
    }

    #[test]
    fn test_24_bit_truncation() {
        assert_eq!(write_u24(0x0123_4567, Endianness::Little), [0x67, 0x45, 0x23]);
        assert_eq!(write_u24(0x0123_4567, Endianness::Big), [0x23, 0x45, 0x67]);
        assert_eq!(write_i24(-1, Endianness::Big), [0xFF, 0xFF, 0xFF]);
        assert_eq!(
            read_u24(write_u24(0xFF00_0001, Endianness::Little), Endianness::Little),
            0x0000_0001
        );
        assert_eq!(
            read_i24(write_i24(-2, Endianness::Big), Endianness::Big),
            -2
        );
    }

    #[test]
    fn test_floats() {
        for endian in [Endianness::Little, Endianness::Big] {
            let h = f16::from_f32(1.5);
            assert_eq!(read_f16(write_f16(h, endian), endian), h);
            assert_eq!(read_f32(write_f32(-0.25, endian), endian), -0.25);
            assert_eq!(read_f64(write_f64(1e300, endian), endian), 1e300);
        }
        assert_eq!(write_f32(1.0, Endianness::Big), [0x3F, 0x80, 0x00, 0x00]);
    }
}
