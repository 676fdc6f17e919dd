//! Text selection representation.

/// A selection as a half-open byte range, normalized so `start <= end`.
///
/// Ranges handed out by a [`TextSurface`](crate::TextSurface) lie on character
/// boundaries of the text they were read from. Ranges built by hand may not;
/// use [`clamp_range`](crate::clamp_range) or [`SelectionRange::get`] before slicing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SelectionRange {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl SelectionRange {
    /// Build a range from two offsets in either order.
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// The whole of `value`.
    #[inline]
    pub fn all(value: &str) -> Self {
        Self::new(0, value.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// The selected substring, or `None` if the range is out of bounds or splits
    /// a character.
    #[inline]
    pub fn get<'a>(&self, value: &'a str) -> Option<&'a str> {
        value.get(self.start..self.end)
    }
}
