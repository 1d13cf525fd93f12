//! Owning buffers and their typed facades.
//!
//! [`MemoryOwner`] is the exclusively owned, manually managed element block
//! everything else builds on. [`ByteBuffer`] specializes it over bytes and
//! adds the offset-addressed codec surface; [`TextBuffer`] specializes it
//! over characters and adds native string semantics.

pub mod byte_buffer;
pub mod owner;
pub mod text;

pub use byte_buffer::ByteBuffer;
pub use owner::MemoryOwner;
pub use text::TextBuffer;
