//! Code panel core.
//!
//! Reads the selected component of a [`Host`] editor as markup plus generated
//! style, shows both formatted in two text surfaces, and writes edits back:
//! markup replaces the component, style is merged into the host's rule model,
//! and a selection in the style surface can delete the rules it names.

mod applier;
mod error;
mod host;
mod options;
mod panel;
mod resolver;
mod schedule;
mod sections;
mod serializer;
mod snapshot;

#[cfg(test)]
mod test_host;

pub use applier::{Applied, apply_markup, apply_style, id_scoped_rules};
pub use error::PanelError;
pub use host::{Host, HostError, HostOp, MarkupScope, MarkupSource, Selection};
pub use options::{ConfigError, PanelOptions, PanelWidths};
pub use panel::CodePanel;
pub use resolver::{DeleteOutcome, delete_selection, resolve_rule, resolve_rules};
pub use schedule::{DeferredTask, Deferrals};
pub use sections::Sections;
pub use serializer::{SerializedView, Target, serialize};
pub use snapshot::Snapshot;
