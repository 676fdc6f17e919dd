//! Markup and style code panel for a visual page builder.
//!
//! The panel shows the selected component of a host editor as formatted markup
//! and style, and writes edits back into the host. Hosts implement [`Host`];
//! text widgets implement [`TextSurface`] and are handed out by a
//! [`SurfaceFactory`].

pub use bus::{Bus, HostEvent, PanelCommand};
pub use core_types::{ComponentId, RuleId, SelectorId, SelectorKey, SurfaceKind};
pub use css::{RuleDescriptor, StyleFormatError, format_style, try_format_style};
pub use html::format_markup;
pub use panel::{
    Applied, CodePanel, ConfigError, DeleteOutcome, Host, HostError, HostOp, MarkupScope,
    MarkupSource, PanelError, PanelOptions, PanelWidths, Selection, SerializedView, Target,
};
pub use text_surface::{
    BufferSurface, SelectionRange, SurfaceError, SurfaceFactory, SurfaceSlot, TextSurface,
};
