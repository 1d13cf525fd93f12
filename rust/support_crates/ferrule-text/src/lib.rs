//! Text support routines: byte encodings, ASCII validation and
//! length-preserving case conversion.

pub mod ascii_check;
pub mod case_conversions;
pub mod encodings;

pub use encodings::{EncodingKind, TextEncoding};
