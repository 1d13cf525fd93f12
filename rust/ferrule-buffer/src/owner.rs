//! Manually managed, exclusively owned element blocks.
//!
//! [`MemoryOwner`] allocates a zero-initialized block of plain-data elements
//! through the global allocator and keeps sole ownership of it until it is
//! disposed or dropped. Unlike `Vec`, the block has no spare capacity: the
//! element count is the allocation, and [`MemoryOwner::reallocate`] is the
//! only way to change it. Growth zeroes the new tail, so every element a
//! caller can see has been initialized.
//!
//! Element types are constrained to [`NoUninit`] + [`Zeroable`], which keeps
//! byte-level moves and zero-fill valid for any `T` stored here.

use std::alloc::{self, Layout};

use bytemuck::{NoUninit, Zeroable};
use ferrule_common::{error::Error, Result};

/// Widest scan window used by the search routines. Larger buffers are
/// searched in overlapping windows of this many elements.
const SCAN_WINDOW: usize = i32::MAX as usize;

const fn max_element_count<T>() -> usize {
    match size_of::<T>() {
        0 => 0,
        elem => isize::MAX as usize / elem,
    }
}

#[inline]
fn clamp_signed(index: isize) -> usize {
    index.max(0) as usize
}

fn find_in_window<T: PartialEq>(window: &[T], needle: &[T]) -> Option<usize> {
    window
        .windows(needle.len())
        .position(|candidate| candidate == needle)
}

/// An exclusively owned, manually managed block of `T` elements.
///
/// The block is zero-initialized on allocation and on growth. Requested
/// sizes are silently capped at [`MemoryOwner::MAX_SIZE`], the largest
/// element count the platform can address for `T`. Disposal is explicit
/// and idempotent; a dropped owner disposes itself.
pub struct MemoryOwner<T: NoUninit + Zeroable> {
    ptr: *mut T,
    size: usize,
    disposed: bool,
}

impl<T: NoUninit + Zeroable> MemoryOwner<T> {
    /// Largest element count the platform can address for this element
    /// type. Zero-sized element types never allocate and report 0.
    pub const MAX_SIZE: usize = max_element_count::<T>();

    /// Creates an owner with no allocation behind it.
    pub fn new() -> MemoryOwner<T> {
        MemoryOwner {
            ptr: std::ptr::null_mut(),
            size: 0,
            disposed: false,
        }
    }

    /// Allocates a zero-initialized block of `size` elements.
    pub fn with_size(size: usize) -> MemoryOwner<T> {
        let size = size.min(Self::MAX_SIZE);
        if size == 0 {
            return MemoryOwner::new();
        }
        let layout = Self::layout_for(size);
        let ptr = unsafe { alloc::alloc_zeroed(layout) as *mut T };
        if ptr.is_null() {
            alloc::handle_alloc_error(layout);
        }
        MemoryOwner {
            ptr,
            size,
            disposed: false,
        }
    }

    /// Allocates an owner holding a copy of `elements`.
    pub fn from_elements(elements: &[T]) -> MemoryOwner<T> {
        let mut owner = MemoryOwner::with_size(elements.len());
        owner.as_mut_slice().copy_from_slice(elements);
        owner
    }

    /// Number of elements in the block. Zero once disposed.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Reads the element at `index`.
    pub fn element_at(&self, index: usize) -> Result<T> {
        self.ensure_alive("element_at")?;
        if index >= self.size {
            return Err(Error::out_of_range(index, self.size));
        }
        Ok(unsafe { self.ptr.add(index).read() })
    }

    /// Reads the element at `index`, treating a negative index as 0.
    pub fn element_at_signed(&self, index: isize) -> Result<T> {
        self.element_at(clamp_signed(index))
    }

    /// Overwrites the element at `index`.
    pub fn set_element(&mut self, index: usize, value: T) -> Result<()> {
        self.ensure_alive("set_element")?;
        if index >= self.size {
            return Err(Error::out_of_range(index, self.size));
        }
        unsafe { self.ptr.add(index).write(value) };
        Ok(())
    }

    /// Overwrites the element at `index`, treating a negative index as 0.
    pub fn set_element_signed(&mut self, index: isize, value: T) -> Result<()> {
        self.set_element(clamp_signed(index), value)
    }

    /// Resizes the block to exactly `size` elements.
    ///
    /// The retained prefix keeps its contents; any new tail is zeroed.
    /// Resizing to 0 releases the allocation but leaves the owner usable.
    pub fn reallocate(&mut self, size: usize) -> Result<()> {
        self.ensure_alive("reallocate")?;
        let new_size = size.min(Self::MAX_SIZE);
        if new_size == self.size {
            return Ok(());
        }
        if new_size == 0 {
            self.free_block();
            return Ok(());
        }
        let new_layout = Self::layout_for(new_size);
        if self.ptr.is_null() {
            let ptr = unsafe { alloc::alloc_zeroed(new_layout) as *mut T };
            if ptr.is_null() {
                alloc::handle_alloc_error(new_layout);
            }
            self.ptr = ptr;
        } else {
            let old_layout = Self::layout_for(self.size);
            let ptr = unsafe {
                alloc::realloc(self.ptr as *mut u8, old_layout, new_layout.size()) as *mut T
            };
            if ptr.is_null() {
                alloc::handle_alloc_error(new_layout);
            }
            if new_size > self.size {
                // realloc leaves the grown tail uninitialized
                unsafe { ptr.add(self.size).write_bytes(0, new_size - self.size) };
            }
            self.ptr = ptr;
        }
        self.size = new_size;
        Ok(())
    }

    /// Copies `count` elements out of `src`, growing this owner when the
    /// destination range ends past the current size.
    ///
    /// A zero count, an empty source, or a disposed side is a no-op. The
    /// count is clamped to what the source holds past `src_offset`.
    pub fn copy_from(
        &mut self,
        src: &MemoryOwner<T>,
        src_offset: usize,
        dst_offset: usize,
        count: usize,
    ) -> Result<()> {
        if count == 0 || src.is_empty() || self.disposed || src.disposed {
            return Ok(());
        }
        if src_offset > src.size {
            return Err(Error::out_of_range(src_offset, src.size));
        }
        if dst_offset > self.size {
            return Err(Error::out_of_range(dst_offset, self.size));
        }
        let count = count.min(src.size - src_offset);
        self.grow_to_fit(dst_offset, count)?;
        let count = count.min(self.size.saturating_sub(dst_offset));
        if count == 0 {
            return Ok(());
        }
        // distinct owners never alias
        unsafe {
            std::ptr::copy_nonoverlapping(
                src.ptr.add(src_offset),
                self.ptr.add(dst_offset),
                count,
            );
        }
        Ok(())
    }

    /// Copies `count` elements out of a borrowed slice, growing this owner
    /// when the destination range ends past the current size.
    pub fn copy_from_slice(
        &mut self,
        src: &[T],
        src_offset: usize,
        dst_offset: usize,
        count: usize,
    ) -> Result<()> {
        if count == 0 || src.is_empty() || self.disposed {
            return Ok(());
        }
        if src_offset > src.len() {
            return Err(Error::out_of_range(src_offset, src.len()));
        }
        if dst_offset > self.size {
            return Err(Error::out_of_range(dst_offset, self.size));
        }
        let count = count.min(src.len() - src_offset);
        self.grow_to_fit(dst_offset, count)?;
        let count = count.min(self.size.saturating_sub(dst_offset));
        if count == 0 {
            return Ok(());
        }
        unsafe {
            std::ptr::copy_nonoverlapping(
                src.as_ptr().add(src_offset),
                self.ptr.add(dst_offset),
                count,
            );
        }
        Ok(())
    }

    /// Copies `count` elements into another owner, growing the destination
    /// when needed.
    pub fn copy_to(
        &self,
        dst: &mut MemoryOwner<T>,
        src_offset: usize,
        dst_offset: usize,
        count: usize,
    ) -> Result<()> {
        dst.copy_from(self, src_offset, dst_offset, count)
    }

    /// Copies `count` elements into a borrowed slice. The slice cannot
    /// grow, so the count is clamped to what fits past `dst_offset`.
    pub fn copy_to_slice(
        &self,
        dst: &mut [T],
        src_offset: usize,
        dst_offset: usize,
        count: usize,
    ) -> Result<()> {
        if count == 0 || dst.is_empty() || self.is_empty() || self.disposed {
            return Ok(());
        }
        if src_offset > self.size {
            return Err(Error::out_of_range(src_offset, self.size));
        }
        if dst_offset > dst.len() {
            return Err(Error::out_of_range(dst_offset, dst.len()));
        }
        let count = count
            .min(self.size - src_offset)
            .min(dst.len() - dst_offset);
        if count == 0 {
            return Ok(());
        }
        unsafe {
            std::ptr::copy_nonoverlapping(
                self.ptr.add(src_offset),
                dst.as_mut_ptr().add(dst_offset),
                count,
            );
        }
        Ok(())
    }

    /// Moves `count` elements from `src_offset` to `dst_offset` within the
    /// block. The ranges may overlap; elements move as if through a
    /// temporary copy.
    ///
    /// Offsets at or past the end are ignored and the count is clamped so
    /// neither range leaves the block.
    pub fn move_within(&mut self, src_offset: usize, dst_offset: usize, count: usize) {
        if self.disposed || self.size == 0 || count == 0 || src_offset == dst_offset {
            return;
        }
        if src_offset >= self.size || dst_offset >= self.size {
            return;
        }
        let count = count.min(self.size - src_offset.max(dst_offset));
        unsafe {
            std::ptr::copy(self.ptr.add(src_offset), self.ptr.add(dst_offset), count);
        }
    }

    /// Fills elements starting at `start` with `value`. A zero count means
    /// "through the end"; a start at or past the end is a no-op.
    pub fn fill(&mut self, value: T, start: usize, count: usize) {
        if self.disposed || self.size == 0 || start >= self.size {
            return;
        }
        let available = self.size - start;
        let count = if count == 0 {
            available
        } else {
            count.min(available)
        };
        self.view_mut(start..start + count).fill(value);
    }

    /// Zeroes the whole block.
    pub fn clear(&mut self) {
        if self.disposed || self.size == 0 {
            return;
        }
        unsafe { self.ptr.write_bytes(0, self.size) };
    }

    /// Position of the first occurrence of `needle` at or after
    /// `start_offset`, or `None`.
    pub fn index_of(&self, needle: &[T], start_offset: usize) -> Option<usize>
    where
        T: PartialEq,
    {
        self.scan_windows(needle, start_offset, SCAN_WINDOW)
    }

    /// [`MemoryOwner::index_of`] with a negative start treated as 0.
    pub fn index_of_signed(&self, needle: &[T], start_offset: isize) -> Option<usize>
    where
        T: PartialEq,
    {
        self.index_of(needle, clamp_signed(start_offset))
    }

    /// Position of the first occurrence of a single element at or after
    /// `start_offset`, or `None`.
    pub fn index_of_element(&self, value: T, start_offset: usize) -> Option<usize>
    where
        T: PartialEq,
    {
        self.index_of(std::slice::from_ref(&value), start_offset)
    }

    /// [`MemoryOwner::index_of_element`] with a negative start treated as 0.
    pub fn index_of_element_signed(&self, value: T, start_offset: isize) -> Option<usize>
    where
        T: PartialEq,
    {
        self.index_of_element(value, clamp_signed(start_offset))
    }

    /// Searches in overlapping windows of `window` elements. Each window
    /// after the first starts `needle.len() - 1` elements early so a match
    /// straddling a window boundary is still seen.
    fn scan_windows(&self, needle: &[T], start_offset: usize, window: usize) -> Option<usize>
    where
        T: PartialEq,
    {
        if needle.is_empty() || self.disposed || self.size == 0 || start_offset >= self.size {
            return None;
        }
        if self.size - start_offset < needle.len() {
            return None;
        }
        let window = window.max(needle.len());
        let max_start = self.size - needle.len();
        let mut offset = start_offset;
        while offset <= max_start {
            let window_len = window.min(self.size - offset);
            let view = self.view(offset..offset + window_len);
            if let Some(at) = find_in_window(view, needle) {
                return Some(offset + at);
            }
            offset += window_len - needle.len() + 1;
        }
        None
    }

    /// Borrows a range of the block, clamping the range to the current
    /// size. A disposed owner yields an empty slice.
    pub fn view(&self, range: impl std::ops::RangeBounds<usize>) -> &[T] {
        let (offset, len) = self.clamp_range(range);
        if len == 0 {
            return &[];
        }
        unsafe { std::slice::from_raw_parts(self.ptr.add(offset), len) }
    }

    /// Mutably borrows a range of the block, clamping like [`MemoryOwner::view`].
    pub fn view_mut(&mut self, range: impl std::ops::RangeBounds<usize>) -> &mut [T] {
        let (offset, len) = self.clamp_range(range);
        if len == 0 {
            return &mut [];
        }
        unsafe { std::slice::from_raw_parts_mut(self.ptr.add(offset), len) }
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.view(..)
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.view_mut(..)
    }

    /// Copies a range of the block into a `Vec`, clamping like
    /// [`MemoryOwner::view`].
    pub fn to_vec(&self, range: impl std::ops::RangeBounds<usize>) -> Vec<T> {
        self.view(range).to_vec()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Releases the block and marks the owner disposed. Safe to call more
    /// than once; later calls do nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.free_block();
        self.disposed = true;
    }

    fn ensure_alive(&self, operation: &str) -> Result<()> {
        if self.disposed {
            return Err(Error::disposed(operation));
        }
        Ok(())
    }

    fn grow_to_fit(&mut self, dst_offset: usize, count: usize) -> Result<()> {
        let required = dst_offset + count;
        if required > self.size {
            self.reallocate(required)?;
        }
        Ok(())
    }

    fn free_block(&mut self) {
        if !self.ptr.is_null() {
            unsafe { alloc::dealloc(self.ptr as *mut u8, Self::layout_for(self.size)) };
            self.ptr = std::ptr::null_mut();
        }
        self.size = 0;
    }

    fn layout_for(size: usize) -> Layout {
        // size is capped at MAX_SIZE, so the byte count fits in isize
        Layout::array::<T>(size).expect("layout")
    }

    fn clamp_range(&self, range: impl std::ops::RangeBounds<usize>) -> (usize, usize) {
        use std::ops::Bound;
        let start = match range.start_bound() {
            Bound::Unbounded => 0,
            Bound::Included(&at) => at,
            Bound::Excluded(&at) => at.saturating_add(1),
        };
        let end = match range.end_bound() {
            Bound::Unbounded => self.size,
            Bound::Included(&at) => at.saturating_add(1),
            Bound::Excluded(&at) => at,
        };
        let start = start.min(self.size);
        let end = end.clamp(start, self.size);
        (start, end - start)
    }
}

impl<T: NoUninit + Zeroable> Drop for MemoryOwner<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<T: NoUninit + Zeroable> Default for MemoryOwner<T> {
    fn default() -> MemoryOwner<T> {
        MemoryOwner::new()
    }
}

impl<T: NoUninit + Zeroable> std::ops::Deref for MemoryOwner<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: NoUninit + Zeroable> std::ops::DerefMut for MemoryOwner<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: NoUninit + Zeroable> AsRef<[T]> for MemoryOwner<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: NoUninit + Zeroable> AsMut<[T]> for MemoryOwner<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: NoUninit + Zeroable> std::fmt::Debug for MemoryOwner<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryOwner")
            .field("size", &self.size)
            .field("disposed", &self.disposed)
            .finish()
    }
}

// SAFETY: the owner is the sole referent of its block, so sending it moves
// that exclusive access along with it.
unsafe impl<T: NoUninit + Zeroable + Send> Send for MemoryOwner<T> {}

// SAFETY: shared references only hand out `&[T]`; all mutation goes through
// `&mut self`.
unsafe impl<T: NoUninit + Zeroable + Sync> Sync for MemoryOwner<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrule_common::error::ErrorKind;

    #[test]
    fn test_empty_owner() {
        let owner = MemoryOwner::<u64>::new();
        assert_eq!(owner.len(), 0);
        assert!(owner.is_empty());
        assert!(!owner.is_disposed());
        assert!(owner.view(..).is_empty());
        let err = owner.element_at(0).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::OutOfRange { index: 0, size: 0 }));
    }

    #[test]
    fn test_with_size_zero_initializes() {
        let owner = MemoryOwner::<u32>::with_size(100);
        assert_eq!(owner.len(), 100);
        assert!(owner.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_element_round_trip() {
        let mut owner = MemoryOwner::<u16>::with_size(8);
        for index in 0..8 {
            owner.set_element(index, index as u16 * 3).unwrap();
        }
        for index in 0..8 {
            assert_eq!(owner.element_at(index).unwrap(), index as u16 * 3);
        }
        let err = owner.element_at(8).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::OutOfRange { index: 8, size: 8 }));
        let err = owner.set_element(9, 1).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::OutOfRange { index: 9, size: 8 }));
    }

    #[test]
    fn test_negative_index_clamps_to_zero() {
        let mut owner = MemoryOwner::<u8>::with_size(4);
        owner.set_element_signed(-5, 0xAB).unwrap();
        assert_eq!(owner.element_at(0).unwrap(), 0xAB);
        assert_eq!(
            owner.element_at_signed(-1).unwrap(),
            owner.element_at(0).unwrap()
        );
    }

    #[test]
    fn test_from_elements() {
        let owner = MemoryOwner::from_elements(&[5u8, 6, 7]);
        assert_eq!(owner.as_slice(), &[5, 6, 7]);
    }

    #[test]
    fn test_reallocate_growth_preserves_and_zeroes() {
        let mut owner = MemoryOwner::<u8>::with_size(4);
        owner.as_mut_slice().copy_from_slice(&[1, 2, 3, 4]);
        owner.reallocate(10).unwrap();
        assert_eq!(owner.as_slice(), &[1, 2, 3, 4, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_reallocate_shrink_preserves_prefix() {
        let mut owner = MemoryOwner::<u8>::with_size(6);
        owner.as_mut_slice().copy_from_slice(&[1, 2, 3, 4, 5, 6]);
        owner.reallocate(3).unwrap();
        assert_eq!(owner.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_reallocate_to_zero_keeps_owner_usable() {
        let mut owner = MemoryOwner::<u32>::with_size(5);
        owner.reallocate(0).unwrap();
        assert!(owner.is_empty());
        assert!(!owner.is_disposed());
        owner.reallocate(3).unwrap();
        assert_eq!(owner.len(), 3);
        assert!(owner.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let mut owner = MemoryOwner::<u8>::with_size(16);
        owner.dispose();
        assert!(owner.is_disposed());
        assert_eq!(owner.len(), 0);
        assert!(owner.view(..).is_empty());
        owner.dispose();
        assert!(owner.is_disposed());
    }

    #[test]
    fn test_disposed_operations_fail() {
        let mut owner = MemoryOwner::<u8>::with_size(4);
        owner.dispose();
        assert!(matches!(
            owner.element_at(0).unwrap_err().kind(),
            ErrorKind::Disposed { .. }
        ));
        assert!(matches!(
            owner.set_element(0, 1).unwrap_err().kind(),
            ErrorKind::Disposed { .. }
        ));
        assert!(matches!(
            owner.reallocate(8).unwrap_err().kind(),
            ErrorKind::Disposed { .. }
        ));
    }

    #[test]
    fn test_copy_between_disposed_owners_is_noop() {
        let mut src = MemoryOwner::<u8>::with_size(4);
        src.as_mut_slice().copy_from_slice(&[1, 2, 3, 4]);
        let mut dst = MemoryOwner::<u8>::with_size(4);
        dst.dispose();
        src.copy_to(&mut dst, 0, 0, 4).unwrap();
        assert_eq!(dst.len(), 0);

        let mut dst = MemoryOwner::<u8>::with_size(4);
        src.dispose();
        dst.copy_from(&src, 0, 0, 4).unwrap();
        assert!(dst.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_copy_from_grows_destination() {
        let src = MemoryOwner::from_elements(&[9u8, 8, 7, 6]);
        let mut dst = MemoryOwner::<u8>::with_size(2);
        dst.copy_from(&src, 1, 2, 3).unwrap();
        assert_eq!(dst.as_slice(), &[0, 0, 8, 7, 6]);
    }

    #[test]
    fn test_copy_clamps_count_to_source() {
        let src = MemoryOwner::from_elements(&[1u8, 2, 3]);
        let mut dst = MemoryOwner::<u8>::with_size(8);
        dst.copy_from(&src, 1, 0, 100).unwrap();
        assert_eq!(dst.as_slice(), &[2, 3, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_copy_offsets_past_end_fail() {
        let src = MemoryOwner::from_elements(&[1u8, 2, 3]);
        let mut dst = MemoryOwner::<u8>::with_size(3);
        let err = dst.copy_from(&src, 4, 0, 1).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::OutOfRange { index: 4, size: 3 }));
        let err = dst.copy_from(&src, 0, 4, 1).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::OutOfRange { index: 4, size: 3 }));
        // an offset equal to the size marks the end and is valid
        dst.copy_from(&src, 3, 3, 1).unwrap();
        assert_eq!(dst.len(), 3);
    }

    #[test]
    fn test_copy_from_slice_grows() {
        let mut owner = MemoryOwner::<u8>::new();
        owner.copy_from_slice(&[1, 2, 3, 4], 0, 0, 4).unwrap();
        assert_eq!(owner.as_slice(), &[1, 2, 3, 4]);
        owner.copy_from_slice(&[5, 6], 0, 4, 2).unwrap();
        assert_eq!(owner.as_slice(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_copy_to_slice_clamps_to_destination() {
        let owner = MemoryOwner::from_elements(&[1u8, 2, 3, 4, 5]);
        let mut out = [0u8; 3];
        owner.copy_to_slice(&mut out, 1, 0, 100).unwrap();
        assert_eq!(out, [2, 3, 4]);
        let mut out = [0u8; 4];
        owner.copy_to_slice(&mut out, 3, 2, 100).unwrap();
        assert_eq!(out, [0, 0, 4, 5]);
    }

    #[test]
    fn test_move_within_matches_reference() {
        fastrand::seed(0x0F0F);
        for (src, dst, count) in [
            (0usize, 5usize, 20usize),
            (5, 0, 20),
            (3, 4, 12),
            (10, 2, 30),
            (2, 10, 9),
            (0, 39, 100),
        ] {
            let mut owner = MemoryOwner::<u8>::with_size(40);
            for slot in owner.as_mut_slice() {
                *slot = fastrand::u8(..);
            }
            let mut expected = owner.to_vec(..);
            let effective = count.min(expected.len() - src.max(dst));
            let tmp = expected[src..src + effective].to_vec();
            expected[dst..dst + effective].copy_from_slice(&tmp);

            owner.move_within(src, dst, count);
            assert_eq!(owner.to_vec(..), expected, "move {src}->{dst} x{count}");
        }
    }

    #[test]
    fn test_move_within_ignores_bad_offsets() {
        let mut owner = MemoryOwner::from_elements(&[1u8, 2, 3]);
        owner.move_within(3, 0, 2);
        owner.move_within(0, 3, 2);
        owner.move_within(1, 1, 2);
        assert_eq!(owner.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_fill() {
        let mut owner = MemoryOwner::<u8>::with_size(6);
        owner.fill(7, 2, 0);
        assert_eq!(owner.as_slice(), &[0, 0, 7, 7, 7, 7]);
        owner.fill(1, 0, 2);
        assert_eq!(owner.as_slice(), &[1, 1, 7, 7, 7, 7]);
        owner.fill(9, 4, 100);
        assert_eq!(owner.as_slice(), &[1, 1, 7, 7, 9, 9]);
        owner.fill(3, 6, 1);
        assert_eq!(owner.as_slice(), &[1, 1, 7, 7, 9, 9]);
    }

    #[test]
    fn test_clear() {
        let mut owner = MemoryOwner::from_elements(&[1u8, 2, 3]);
        owner.clear();
        assert_eq!(owner.as_slice(), &[0, 0, 0]);
    }

    #[test]
    fn test_index_of() {
        let owner = MemoryOwner::from_elements(b"the quick brown fox".as_slice());
        assert_eq!(owner.index_of(b"quick", 0), Some(4));
        assert_eq!(owner.index_of(b"the", 0), Some(0));
        assert_eq!(owner.index_of(b"the", 1), None);
        assert_eq!(owner.index_of(b"fox", 0), Some(16));
        assert_eq!(owner.index_of(b"wolf", 0), None);
        assert_eq!(owner.index_of(b"", 0), None);
        assert_eq!(owner.index_of_element(b'q', 0), Some(4));
        assert_eq!(owner.index_of_element(b'q', 5), None);
        assert_eq!(owner.index_of_signed(b"the", -3), Some(0));
        assert_eq!(owner.index_of_element_signed(b't', -1), Some(0));
    }

    #[test]
    fn test_index_of_across_window_boundary() {
        let mut owner = MemoryOwner::<u8>::with_size(64);
        owner.copy_from_slice(&[9, 8, 7], 0, 30, 3).unwrap();
        for window in [3usize, 4, 8, 16, 64] {
            assert_eq!(owner.scan_windows(&[9, 8, 7], 0, window), Some(30));
            assert_eq!(owner.scan_windows(&[9, 8, 7], 31, window), None);
        }
        assert_eq!(owner.index_of(&[9, 8, 7], 0), Some(30));
    }

    #[test]
    fn test_views_clamp() {
        let owner = MemoryOwner::from_elements(&[1u8, 2, 3, 4]);
        assert_eq!(owner.view(1..3), &[2, 3]);
        assert_eq!(owner.view(2..), &[3, 4]);
        assert_eq!(owner.view(..2), &[1, 2]);
        assert_eq!(owner.view(2..100), &[3, 4]);
        assert!(owner.view(9..12).is_empty());
        assert_eq!(owner.to_vec(1..=2), vec![2, 3]);
    }

    #[test]
    fn test_deref_to_slice() {
        let mut owner = MemoryOwner::from_elements(&[3u8, 1, 2]);
        owner.sort_unstable();
        assert_eq!(&owner[..], &[1, 2, 3]);
        assert!(owner.contains(&2));
    }

    #[test]
    fn test_custom_element_struct() {
        #[derive(Clone, Copy, Debug, PartialEq, bytemuck::NoUninit, bytemuck::Zeroable)]
        #[repr(C)]
        struct Pair {
            key: u32,
            value: u32,
        }

        let mut owner = MemoryOwner::<Pair>::with_size(3);
        assert_eq!(owner.element_at(1).unwrap(), Pair { key: 0, value: 0 });
        owner.set_element(1, Pair { key: 7, value: 9 }).unwrap();
        owner.reallocate(5).unwrap();
        assert_eq!(owner.element_at(1).unwrap(), Pair { key: 7, value: 9 });
        assert_eq!(owner.element_at(4).unwrap(), Pair { key: 0, value: 0 });
        assert_eq!(owner.index_of_element(Pair { key: 7, value: 9 }, 0), Some(1));
    }

    #[test]
    fn test_zero_sized_elements_never_allocate() {
        assert_eq!(MemoryOwner::<()>::MAX_SIZE, 0);
        let mut owner = MemoryOwner::<()>::with_size(1000);
        assert!(owner.is_empty());
        owner.reallocate(10).unwrap();
        assert!(owner.is_empty());
    }

    #[test]
    fn test_requested_size_is_capped() {
        assert_eq!(MemoryOwner::<u8>::MAX_SIZE, isize::MAX as usize);
        assert_eq!(MemoryOwner::<u64>::MAX_SIZE, isize::MAX as usize / 8);
    }
}
