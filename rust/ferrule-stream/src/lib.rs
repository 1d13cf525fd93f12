//! Stream counterparts of the byte-buffer codec surface.
//!
//! Extension traits over [`std::io`] that read and write the same wire
//! forms as `ferrule-buffer`'s offset-addressed accessors, byte for
//! byte, against a forward-only source or sink. [`PeekRead`] and
//! [`AlignWrite`] gate the few position-aware conveniences behind
//! [`std::io::Seek`] so a non-seekable source can never reach them.

pub mod read;
pub mod write;

pub use read::{BinaryRead, PeekRead};
pub use write::{AlignWrite, BinaryWrite};
