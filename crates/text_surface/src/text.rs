//! UTF-8 helpers for range handling.

use crate::selection::SelectionRange;
use std::borrow::Cow;

/// Clamp an arbitrary byte index to a valid UTF-8 character boundary.
///
/// Indices past the end clamp to `s.len()`; indices inside a multi-byte
/// character move back to its start.
///
/// ```
/// use text_surface::clamp_to_char_boundary;
///
/// let s = "a€b"; // '€' is 3 bytes
/// assert_eq!(clamp_to_char_boundary(s, 2), 1);
/// assert_eq!(clamp_to_char_boundary(s, 4), 4);
/// assert_eq!(clamp_to_char_boundary(s, 100), 5);
/// ```
#[inline]
pub fn clamp_to_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Clamp both ends of `range` into `s`.
pub fn clamp_range(s: &str, range: SelectionRange) -> SelectionRange {
    SelectionRange::new(
        clamp_to_char_boundary(s, range.start),
        clamp_to_char_boundary(s, range.end),
    )
}

/// Normalize CRLF and lone CR to LF. Borrows when there is nothing to change.
///
/// ```
/// use text_surface::normalize_newlines;
///
/// assert_eq!(normalize_newlines("a\r\nb\rc"), "a\nb\nc");
/// ```
pub fn normalize_newlines(s: &str) -> Cow<'_, str> {
    if !s.contains('\r') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut it = s.chars().peekable();
    while let Some(ch) = it.next() {
        match ch {
            '\r' => {
                if it.peek() == Some(&'\n') {
                    let _ = it.next();
                }
                out.push('\n');
            }
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_range_snaps_both_ends() {
        let s = "a€b";
        assert_eq!(clamp_range(s, SelectionRange::new(2, 50)), SelectionRange::new(1, 5));
    }

    #[test]
    fn normalize_newlines_borrows_clean_input() {
        assert!(matches!(normalize_newlines("a\nb"), Cow::Borrowed(_)));
        assert_eq!(normalize_newlines("\r\r\n"), "\n\n");
    }
}
