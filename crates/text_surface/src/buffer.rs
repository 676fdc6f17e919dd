//! Plain in-memory text surface.

use crate::selection::SelectionRange;
use crate::surface::TextSurface;
use crate::text::{clamp_range, clamp_to_char_boundary, normalize_newlines};

/// A [`TextSurface`] backed by a `String`, with a caret and optional anchor.
///
/// Used when no real widget can be created, and as the surface in tests.
#[derive(Clone, Debug, Default)]
pub struct BufferSurface {
    value: String,
    /// Caret byte offset, always on a char boundary of `value`.
    caret: usize,
    /// Selection anchor; the selection is `min(anchor, caret)..max(anchor, caret)`.
    anchor: Option<usize>,
    /// Incremented on every text change.
    revision: u64,
    measures: u32,
    destroyed: bool,
}

impl BufferSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        let value = normalize_newlines(text).into_owned();
        let caret = value.len();
        Self {
            value,
            caret,
            ..Self::default()
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn measure_count(&self) -> u32 {
        self.measures
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn caret(&self) -> usize {
        self.caret
    }
}

impl TextSurface for BufferSurface {
    fn text(&self) -> &str {
        &self.value
    }

    fn replace_range(&mut self, range: SelectionRange, replacement: &str) {
        let range = clamp_range(&self.value, range);
        let replacement = normalize_newlines(replacement);
        if self.value.get(range.start..range.end) == Some(replacement.as_ref()) {
            return;
        }
        self.value
            .replace_range(range.start..range.end, replacement.as_ref());
        self.caret = clamp_to_char_boundary(&self.value, range.start + replacement.len());
        self.anchor = None;
        self.revision = self.revision.wrapping_add(1);
    }

    fn selection(&self) -> Option<SelectionRange> {
        let anchor = self.anchor?;
        let range = SelectionRange::new(anchor, self.caret);
        (!range.is_empty()).then_some(range)
    }

    fn select(&mut self, range: SelectionRange) {
        let range = clamp_range(&self.value, range);
        self.caret = range.end;
        self.anchor = (!range.is_empty()).then_some(range.start);
    }

    fn request_measure(&mut self) {
        self.measures += 1;
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }
}
