//! # text_surface
//!
//! UI-agnostic text surface layer for the code panel.
//!
//! The panel never renders text itself. It talks to an editable widget through
//! three capabilities: read the current text, replace a byte range, and read the
//! selection. This crate provides:
//! - [`TextSurface`]: the capability trait a live widget implements
//! - [`SurfaceFactory`]: creates surfaces on demand, may fail with [`SurfaceError`]
//! - [`SurfaceSlot`]: stages content while no surface exists and flushes it
//!   exactly once when one is attached
//! - [`BufferSurface`]: a plain in-memory surface, used as the fallback when a
//!   factory fails and as the test double
//! - [`SelectionRange`]: a normalized byte range
//!
//! All offsets are UTF-8 byte offsets. Implementations clamp incoming ranges to
//! character boundaries rather than panicking.

mod buffer;
mod selection;
mod slot;
mod surface;
mod text;

pub use buffer::BufferSurface;
pub use selection::SelectionRange;
pub use slot::SurfaceSlot;
pub use surface::{SurfaceError, SurfaceFactory, TextSurface};
pub use text::{clamp_range, clamp_to_char_boundary, normalize_newlines};
