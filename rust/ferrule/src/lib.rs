//! # Ferrule: Binary Buffer and Codec Substrate
//!
//! Ferrule is the low-level byte-handling layer that format encoders,
//! wire protocols and file writers are built on: a manually managed
//! memory owner, typed offset-addressed buffers, and the matching
//! sequential-stream codecs, all sharing one set of bit-exact wire
//! forms.
//!
//! ## Key Features
//!
//! * **Owned memory blocks**: a single-owner, exactly-once-freed block
//!   of any plain-data element type, with explicit reallocation and
//!   windowed searching
//! * **Typed buffer access**: fixed-width integers and floats, varints,
//!   zigzag folding and six string framings, addressed by byte offset
//!   in either endianness
//! * **Stream mirror**: the same wire forms as extension traits over
//!   [`std::io::Read`] and [`std::io::Write`], byte-for-byte compatible
//!   with the buffer accessors
//! * **Native text buffers**: a character-array string representation
//!   with in-place case folding, trimming and allocation-free
//!   comparison
//! * **Pluggable text encodings**: UTF-8, ASCII, Latin-1 and UTF-16
//!   behind one capability trait, selected by conventional names
//!
//! ## Module Organization
//!
//! This crate is a convenience entry point re-exporting the workspace
//! members:
//!
//! * [`buffer`] - memory owner, byte buffer and text buffer
//! * [`codec`] - endianness, fixed-width and varint codecs, hex,
//!   four-char tags and block padding arithmetic
//! * [`common`] - the shared error taxonomy and `Result` alias
//! * [`stream`] - buffer-compatible reads and writes over `std::io`
//!
//! ### Support Modules
//!
//! The [`support`] module holds utilities that are not specific to this
//! substrate:
//!
//! * [`support::text`] - text encoding capability and implementations
//!
//! ## Getting Started
//!
//! ```
//! use ferrule::buffer::ByteBuffer;
//! use ferrule::codec::Endianness;
//!
//! fn demo() -> ferrule::common::Result<()> {
//!     let mut buffer = ByteBuffer::with_size(8);
//!     buffer.set_u32(0, 0xC0FFEE, Endianness::Little)?;
//!     assert_eq!(buffer.get_u32(0, Endianness::Little)?, 0xC0FFEE);
//!     Ok(())
//! }
//! # demo().unwrap();
//! ```

pub use ferrule_buffer as buffer;
pub use ferrule_codec as codec;
pub use ferrule_common as common;
pub use ferrule_stream as stream;

pub mod support {
    pub use ferrule_text as text;
}
