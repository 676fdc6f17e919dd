//! Staging area in front of a text surface that may not exist yet.

use crate::surface::TextSurface;

/// Where a surface's content currently lives.
///
/// Exactly one of the pending buffer and the live surface is authoritative at a
/// time. Staged content moves into the surface once, on [`attach`](Self::attach).
/// After [`destroy_live`](Self::destroy_live) or
/// [`clear_pending`](Self::clear_pending) the slot is released and ignores writes.
pub enum SurfaceSlot {
    Pending(String),
    Live(Box<dyn TextSurface>),
    Released,
}

impl Default for SurfaceSlot {
    fn default() -> Self {
        SurfaceSlot::Pending(String::new())
    }
}

impl std::fmt::Debug for SurfaceSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceSlot::Pending(text) => f.debug_tuple("Pending").field(text).finish(),
            SurfaceSlot::Live(surface) => f.debug_tuple("Live").field(&surface.text()).finish(),
            SurfaceSlot::Released => f.write_str("Released"),
        }
    }
}

impl SurfaceSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_live(&self) -> bool {
        matches!(self, SurfaceSlot::Live(_))
    }

    pub fn is_released(&self) -> bool {
        matches!(self, SurfaceSlot::Released)
    }

    /// Current content: the staged buffer or the live text.
    pub fn content(&self) -> Option<&str> {
        match self {
            SurfaceSlot::Pending(text) => Some(text),
            SurfaceSlot::Live(surface) => Some(surface.text()),
            SurfaceSlot::Released => None,
        }
    }

    /// Stage or write `text`. A live surface is only touched when its text differs.
    /// Returns whether anything changed.
    pub fn set_content(&mut self, text: &str) -> bool {
        match self {
            SurfaceSlot::Pending(buf) => {
                if buf == text {
                    return false;
                }
                buf.clear();
                buf.push_str(text);
                true
            }
            SurfaceSlot::Live(surface) => {
                if surface.text() == text {
                    return false;
                }
                surface.set_text(text);
                true
            }
            SurfaceSlot::Released => false,
        }
    }

    /// Make `surface` live, flushing staged content into it. Refused (and the
    /// offered surface destroyed) unless the slot is still pending.
    pub fn attach(&mut self, mut surface: Box<dyn TextSurface>) -> bool {
        let SurfaceSlot::Pending(staged) = self else {
            surface.destroy();
            return false;
        };
        let staged = std::mem::take(staged);
        if !staged.is_empty() {
            surface.set_text(&staged);
        }
        log::trace!(target: "codepanel.surface", "attached surface, flushed {} bytes", staged.len());
        *self = SurfaceSlot::Live(surface);
        true
    }

    pub fn live(&self) -> Option<&dyn TextSurface> {
        match self {
            SurfaceSlot::Live(surface) => Some(surface.as_ref()),
            _ => None,
        }
    }

    pub fn live_mut(&mut self) -> Option<&mut (dyn TextSurface + 'static)> {
        match self {
            SurfaceSlot::Live(surface) => Some(surface.as_mut()),
            _ => None,
        }
    }

    /// Ask a live surface to re-measure. Pending and released slots ignore this.
    pub fn request_measure(&mut self) -> bool {
        match self.live_mut() {
            Some(surface) => {
                surface.request_measure();
                true
            }
            None => false,
        }
    }

    /// Destroy a live surface and release the slot. Returns whether one was live.
    pub fn destroy_live(&mut self) -> bool {
        if let SurfaceSlot::Live(surface) = self {
            surface.destroy();
            *self = SurfaceSlot::Released;
            return true;
        }
        false
    }

    /// Drop staged content and release the slot.
    pub fn clear_pending(&mut self) {
        if let SurfaceSlot::Pending(_) = self {
            *self = SurfaceSlot::Released;
        }
    }
}
