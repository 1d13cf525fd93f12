//! Offset-addressed binary codec over an owned byte block.
//!
//! [`ByteBuffer`] wraps a [`MemoryOwner<u8>`] and reads or writes typed
//! fields at explicit byte offsets: fixed-width integers and floats in
//! either byte order, varints, and text in several framings. Fixed-width
//! and varint writes are bounds-checked and never resize the buffer;
//! string-family writes grow it when the whole field ends past the current
//! size. Getters for variable-length fields return the decoded value along
//! with the number of bytes it occupied, so callers can walk a buffer
//! field by field.

use std::ops::{Deref, DerefMut};

use ferrule_common::{error::Error, Result};

use crate::owner::MemoryOwner;

mod decode;
mod encode;

#[cfg(windows)]
const LINE_TERMINATOR: &str = "\r\n";
#[cfg(not(windows))]
const LINE_TERMINATOR: &str = "\n";

/// An owned byte block with typed, offset-addressed accessors.
#[derive(Debug, Default)]
pub struct ByteBuffer {
    owner: MemoryOwner<u8>,
}

impl ByteBuffer {
    /// Creates a buffer with no allocation behind it.
    pub fn new() -> ByteBuffer {
        ByteBuffer {
            owner: MemoryOwner::new(),
        }
    }

    /// Allocates a zeroed buffer of `size` bytes.
    pub fn with_size(size: usize) -> ByteBuffer {
        ByteBuffer {
            owner: MemoryOwner::with_size(size),
        }
    }

    /// Allocates a buffer holding a copy of `bytes`.
    pub fn from_slice(bytes: &[u8]) -> ByteBuffer {
        ByteBuffer {
            owner: MemoryOwner::from_elements(bytes),
        }
    }

    /// Unwraps the buffer into its backing owner.
    pub fn into_owner(self) -> MemoryOwner<u8> {
        self.owner
    }

    /// Borrows the bytes of a fixed-size field, failing when any part of
    /// it falls outside the buffer.
    fn field_bytes(&self, offset: usize, count: usize, operation: &str) -> Result<&[u8]> {
        if self.is_disposed() {
            return Err(Error::disposed(operation));
        }
        match offset.checked_add(count) {
            Some(end) if end <= self.len() => Ok(self.view(offset..end)),
            _ => Err(Error::out_of_range(
                offset.saturating_add(count).saturating_sub(1),
                self.len(),
            )),
        }
    }

    fn field_bytes_mut(&mut self, offset: usize, count: usize, operation: &str) -> Result<&mut [u8]> {
        if self.is_disposed() {
            return Err(Error::disposed(operation));
        }
        match offset.checked_add(count) {
            Some(end) if end <= self.len() => Ok(self.owner.view_mut(offset..end)),
            _ => Err(Error::out_of_range(
                offset.saturating_add(count).saturating_sub(1),
                self.len(),
            )),
        }
    }

    /// Borrows everything from `offset` to the end of the buffer.
    fn tail_bytes(&self, offset: usize, operation: &str) -> Result<&[u8]> {
        if self.is_disposed() {
            return Err(Error::disposed(operation));
        }
        if offset > self.len() {
            return Err(Error::out_of_range(offset, self.len()));
        }
        Ok(self.view(offset..))
    }

    fn read_array<const N: usize>(&self, offset: usize, operation: &str) -> Result<[u8; N]> {
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(self.field_bytes(offset, N, operation)?);
        Ok(bytes)
    }

    fn write_array<const N: usize>(
        &mut self,
        offset: usize,
        bytes: [u8; N],
        operation: &str,
    ) -> Result<()> {
        self.field_bytes_mut(offset, N, operation)?
            .copy_from_slice(&bytes);
        Ok(())
    }

    /// Grows the buffer so a field of `field_len` bytes fits at `offset`.
    /// The offset itself must lie within the current size.
    fn grow_for_field(&mut self, offset: usize, field_len: usize, operation: &str) -> Result<()> {
        if self.is_disposed() {
            return Err(Error::disposed(operation));
        }
        if offset > self.len() {
            return Err(Error::out_of_range(offset, self.len()));
        }
        let required = offset.saturating_add(field_len);
        if required > self.len() {
            self.owner.reallocate(required)?;
        }
        Ok(())
    }
}

impl Deref for ByteBuffer {
    type Target = MemoryOwner<u8>;

    fn deref(&self) -> &MemoryOwner<u8> {
        &self.owner
    }
}

impl DerefMut for ByteBuffer {
    fn deref_mut(&mut self) -> &mut MemoryOwner<u8> {
        &mut self.owner
    }
}

impl From<MemoryOwner<u8>> for ByteBuffer {
    fn from(owner: MemoryOwner<u8>) -> ByteBuffer {
        ByteBuffer { owner }
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        self.owner.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let buf = ByteBuffer::new();
        assert!(buf.is_empty());
        let buf = ByteBuffer::with_size(5);
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.as_slice(), &[0; 5]);
        let buf = ByteBuffer::from_slice(&[1, 2, 3]);
        assert_eq!(buf.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_owner_surface_through_deref() {
        let mut buf = ByteBuffer::from_slice(b"hello world");
        assert_eq!(buf.index_of(b"world", 0), Some(6));
        buf.fill(b'-', 5, 1);
        assert_eq!(buf.as_slice(), b"hello-world");
        buf.dispose();
        assert!(buf.is_disposed());
    }

    #[test]
    fn test_owner_round_trip() {
        let buf = ByteBuffer::from_slice(&[9, 9]);
        let owner = buf.into_owner();
        let buf = ByteBuffer::from(owner);
        assert_eq!(buf.as_slice(), &[9, 9]);
    }
}
