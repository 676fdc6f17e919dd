//! The editable-text capability consumed by the panel.

use crate::selection::SelectionRange;
use core_types::SurfaceKind;
use std::fmt;

/// An editable text widget.
///
/// The panel only reads text, replaces ranges and reads the selection. Every
/// other editing concern (keystrokes, undo, highlighting) belongs to the widget.
pub trait TextSurface {
    /// Current text.
    fn text(&self) -> &str;

    /// Replace `range` with `replacement`. Out-of-range or mid-character offsets
    /// are clamped by the implementation.
    fn replace_range(&mut self, range: SelectionRange, replacement: &str);

    /// The current non-empty selection, if any.
    fn selection(&self) -> Option<SelectionRange>;

    /// Move the selection. An empty range collapses it to a caret.
    fn select(&mut self, range: SelectionRange);

    /// Replace the whole text.
    fn set_text(&mut self, text: &str) {
        let all = SelectionRange::all(self.text());
        self.replace_range(all, text);
    }

    /// Re-measure layout after the hosting container changed size. Re-measuring a
    /// settled surface must be harmless.
    fn request_measure(&mut self) {}

    /// Release widget resources. Called at most once, right before the surface
    /// is dropped.
    fn destroy(&mut self) {}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceError {
    /// The widget could not be created (missing toolkit, mount point, ...).
    Unavailable(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::Unavailable(reason) => write!(f, "text surface unavailable: {reason}"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Creates live surfaces. Returned surfaces start empty; staged content is
/// flushed into them by [`SurfaceSlot::attach`](crate::SurfaceSlot::attach).
pub trait SurfaceFactory {
    fn create(&mut self, kind: SurfaceKind) -> Result<Box<dyn TextSurface>, SurfaceError>;
}
