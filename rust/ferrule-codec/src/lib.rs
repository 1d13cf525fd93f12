//! Byte-exact wire primitives shared by the buffer and stream layers.
//!
//! Everything in this crate operates on plain byte arrays or slices and is
//! independent of where those bytes live. Fixed-width integers and floats
//! go through [`fixed`], variable-length integers through [`varint`] and
//! [`zigzag`], and the text-adjacent encodings through [`hex`] and [`tag`].
//! [`layout`] holds the block padding arithmetic used when aligning output.

pub mod endian;
pub mod fixed;
pub mod hex;
pub mod layout;
pub mod tag;
pub mod varint;
pub mod zigzag;

pub use endian::Endianness;
pub use hex::HexCase;
