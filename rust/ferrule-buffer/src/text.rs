//! Character buffer with native string semantics.
//!
//! [`TextBuffer`] stores text as one `char` per element over a
//! [`MemoryOwner<char>`], so indexing, search and in-place mutation work
//! per character rather than per byte. Case folding is length-preserving:
//! a character whose std mapping would expand stays as it is. Comparisons
//! walk the characters directly and never allocate.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Deref, DerefMut, RangeBounds};

use ferrule_text::case_conversions::CharCaseFold;

use crate::owner::MemoryOwner;

fn is_text_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn compare_chars(
    left: impl Iterator<Item = char>,
    mut right: impl Iterator<Item = char>,
    fold_case: bool,
) -> Ordering {
    for a in left {
        let Some(b) = right.next() else {
            return Ordering::Greater;
        };
        let (a, b) = if fold_case {
            (a.to_lowercase_single(), b.to_lowercase_single())
        } else {
            (a, b)
        };
        match a.cmp(&b) {
            Ordering::Equal => {}
            other => return other,
        }
    }
    if right.next().is_some() {
        Ordering::Less
    } else {
        Ordering::Equal
    }
}

fn chars_match(
    left: impl Iterator<Item = char>,
    mut right: impl Iterator<Item = char>,
    fold_case: bool,
) -> bool {
    for a in left {
        let Some(b) = right.next() else {
            return false;
        };
        let matched = if fold_case {
            a.to_lowercase_single() == b.to_lowercase_single()
        } else {
            a == b
        };
        if !matched {
            return false;
        }
    }
    true
}

/// An owned character block with string operations.
pub struct TextBuffer {
    owner: MemoryOwner<char>,
}

impl TextBuffer {
    /// Creates a text buffer with no allocation behind it.
    pub fn new() -> TextBuffer {
        TextBuffer {
            owner: MemoryOwner::new(),
        }
    }

    /// Allocates a buffer of `size` NUL characters.
    pub fn with_size(size: usize) -> TextBuffer {
        TextBuffer {
            owner: MemoryOwner::with_size(size),
        }
    }

    /// Allocates a buffer holding the characters of `text`.
    pub fn from_str(text: &str) -> TextBuffer {
        let mut owner = MemoryOwner::with_size(text.chars().count());
        for (slot, c) in owner.as_mut_slice().iter_mut().zip(text.chars()) {
            *slot = c;
        }
        TextBuffer { owner }
    }

    /// Unwraps the buffer into its backing owner.
    pub fn into_owner(self) -> MemoryOwner<char> {
        self.owner
    }

    /// True when the buffer has no characters or starts with NUL, the
    /// zero value unwritten slots hold.
    pub fn is_empty(&self) -> bool {
        self.owner.as_slice().first().is_none_or(|&c| c == '\0')
    }

    /// True when the buffer is empty or all spaces, tabs, carriage
    /// returns and line feeds.
    pub fn is_blank(&self) -> bool {
        self.is_empty() || self.owner.iter().all(|&c| is_text_space(c))
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.owner.iter().copied()
    }

    /// Copies a character range out as a `String`, clamping the range to
    /// the buffer.
    pub fn substring(&self, range: impl RangeBounds<usize>) -> String {
        self.owner.view(range).iter().collect()
    }

    /// Removes leading and trailing whitespace in place, shrinking the
    /// allocation to the remaining length.
    pub fn trim(&mut self) {
        let len = self.owner.len();
        if len == 0 {
            return;
        }
        let (start, end) = {
            let view = self.owner.as_slice();
            let mut start = 0;
            let mut end = len;
            while start < end && is_text_space(view[start]) {
                start += 1;
            }
            while end > start && is_text_space(view[end - 1]) {
                end -= 1;
            }
            (start, end)
        };
        let trimmed = end - start;
        if start > 0 && trimmed > 0 {
            self.owner.move_within(start, 0, trimmed);
        }
        if trimmed < len {
            // the owner is alive here, so shrinking cannot fail
            let _ = self.owner.reallocate(trimmed);
        }
    }

    /// Uppercases every character in place, skipping expanding mappings.
    pub fn make_uppercase(&mut self) {
        for c in self.owner.as_mut_slice() {
            *c = c.to_uppercase_single();
        }
    }

    /// Lowercases every character in place, skipping expanding mappings.
    pub fn make_lowercase(&mut self) {
        for c in self.owner.as_mut_slice() {
            *c = c.to_lowercase_single();
        }
    }

    /// Lexicographic comparison against another buffer.
    pub fn compare(&self, other: &TextBuffer) -> Ordering {
        compare_chars(self.chars(), other.chars(), false)
    }

    /// Case-folded lexicographic comparison against another buffer.
    pub fn compare_ignore_case(&self, other: &TextBuffer) -> Ordering {
        compare_chars(self.chars(), other.chars(), true)
    }

    /// Lexicographic comparison against a borrowed string.
    pub fn compare_str(&self, other: &str) -> Ordering {
        compare_chars(self.chars(), other.chars(), false)
    }

    /// Case-folded lexicographic comparison against a borrowed string.
    pub fn compare_str_ignore_case(&self, other: &str) -> Ordering {
        compare_chars(self.chars(), other.chars(), true)
    }

    pub fn eq_ignore_case(&self, other: &TextBuffer) -> bool {
        self.compare_ignore_case(other) == Ordering::Equal
    }

    pub fn eq_str_ignore_case(&self, other: &str) -> bool {
        self.compare_str_ignore_case(other) == Ordering::Equal
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        chars_match(prefix.chars(), self.chars(), false)
    }

    pub fn starts_with_ignore_case(&self, prefix: &str) -> bool {
        chars_match(prefix.chars(), self.chars(), true)
    }

    pub fn ends_with(&self, suffix: &str) -> bool {
        chars_match(suffix.chars().rev(), self.owner.iter().rev().copied(), false)
    }

    pub fn ends_with_ignore_case(&self, suffix: &str) -> bool {
        chars_match(suffix.chars().rev(), self.owner.iter().rev().copied(), true)
    }
}

impl Deref for TextBuffer {
    type Target = MemoryOwner<char>;

    fn deref(&self) -> &MemoryOwner<char> {
        &self.owner
    }
}

impl DerefMut for TextBuffer {
    fn deref_mut(&mut self) -> &mut MemoryOwner<char> {
        &mut self.owner
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> TextBuffer {
        TextBuffer::from_str(text)
    }
}

impl From<MemoryOwner<char>> for TextBuffer {
    fn from(owner: MemoryOwner<char>) -> TextBuffer {
        TextBuffer { owner }
    }
}

impl Default for TextBuffer {
    fn default() -> TextBuffer {
        TextBuffer::new()
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &c in self.owner.iter() {
            fmt::Write::write_char(f, c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextBuffer").field(&self.substring(..)).finish()
    }
}

impl PartialEq for TextBuffer {
    fn eq(&self, other: &TextBuffer) -> bool {
        self.owner.as_slice() == other.owner.as_slice()
    }
}

impl Eq for TextBuffer {}

impl PartialEq<str> for TextBuffer {
    fn eq(&self, other: &str) -> bool {
        self.compare_str(other) == Ordering::Equal
    }
}

impl PartialEq<&str> for TextBuffer {
    fn eq(&self, other: &&str) -> bool {
        self.compare_str(other) == Ordering::Equal
    }
}

impl PartialOrd for TextBuffer {
    fn partial_cmp(&self, other: &TextBuffer) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TextBuffer {
    fn cmp(&self, other: &TextBuffer) -> Ordering {
        self.compare(other)
    }
}
