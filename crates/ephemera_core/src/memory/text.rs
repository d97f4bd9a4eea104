//! # String Arena
//!
//! Text copied in during construction, addressed by spans.

use std::ops::Index;

/// A byte range inside a [`StrArena`].
///
/// Spans always start and end on `char` boundaries of the pushed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextSpan {
    start: u32,
    len: u32,
    generation: u32,
}

impl TextSpan {
    /// Length of the span in bytes.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.len as usize
    }

    /// Returns true if the span covers no bytes.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }
}

/// Append-only text storage for one frame.
///
/// Every `push` copies the text to the end of a retained buffer. Like
/// [`Arena`](crate::Arena), the buffer is rewound on reset and spans from an
/// earlier generation stop resolving.
#[derive(Debug, Default)]
pub struct StrArena {
    buffer: String,
    generation: u32,
}

impl StrArena {
    /// Creates an arena with `capacity` bytes reserved.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
            generation: 0,
        }
    }

    /// Returns the bytes used in this generation.
    #[inline]
    #[must_use]
    pub fn used(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the reserved capacity in bytes.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Copies `text` into the arena.
    ///
    /// # Panics
    ///
    /// Panics if one generation holds more than `u32::MAX` bytes.
    pub fn push(&mut self, text: &str) -> TextSpan {
        let (Ok(start), Ok(len)) = (u32::try_from(self.buffer.len()), u32::try_from(text.len()))
        else {
            panic!("string arena generation {} exceeded u32::MAX bytes", self.generation);
        };
        self.buffer.push_str(text);
        TextSpan {
            start,
            len,
            generation: self.generation,
        }
    }

    /// Resolves a span, returning `None` if it belongs to another generation.
    #[must_use]
    pub fn get(&self, span: TextSpan) -> Option<&str> {
        if span.generation != self.generation {
            return None;
        }
        let start = span.start as usize;
        self.buffer.get(start..start + span.len())
    }

    /// Rewinds the buffer to zero, keeping its allocation.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.generation = self.generation.wrapping_add(1);
    }
}

impl Index<TextSpan> for StrArena {
    type Output = str;

    fn index(&self, span: TextSpan) -> &str {
        match self.get(span) {
            Some(text) => text,
            None => panic!(
                "stale text span {span:?} (current generation {})",
                self.generation
            ),
        }
    }
}
