//! The host editor as seen by the panel.

use crate::options::PanelWidths;
use core_types::{ComponentId, RuleId, SelectorKey};
use css::RuleDescriptor;
use std::fmt;

/// The currently selected component. `root` marks the tree's wrapper component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub id: ComponentId,
    pub root: bool,
}

/// Where component markup is read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkupSource {
    /// The rendered element, including builder-internal markers.
    Live,
    /// The host's canonical export, free of builder-internal markers.
    Export,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkupScope {
    /// Children only.
    Inner,
    /// The element with its own tag.
    Outer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostOp {
    ReadMarkup,
    UpdateClass,
    ReplaceSubtree,
    ReplaceRoot,
    Select,
    InsertStyleRules,
    RemoveRules,
}

impl fmt::Display for HostOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HostOp::ReadMarkup => "read markup",
            HostOp::UpdateClass => "update class",
            HostOp::ReplaceSubtree => "replace subtree",
            HostOp::ReplaceRoot => "replace root",
            HostOp::Select => "select",
            HostOp::InsertStyleRules => "insert style rules",
            HostOp::RemoveRules => "remove rules",
        };
        f.write_str(name)
    }
}

/// A host capability failed. The panel passes these through untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostError {
    UnknownComponent(ComponentId),
    RootReplaceRejected,
    Rejected { op: HostOp, reason: String },
    InvalidMarkup(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::UnknownComponent(id) => write!(f, "unknown component {id}"),
            HostError::RootReplaceRejected => write!(f, "host rejected replacing the root"),
            HostError::Rejected { op, reason } => write!(f, "host rejected {op}: {reason}"),
            HostError::InvalidMarkup(reason) => write!(f, "invalid markup: {reason}"),
        }
    }
}

impl std::error::Error for HostError {}

/// Capabilities the panel needs from the host editor.
///
/// Mutations are expected to be atomic: an `Err` means nothing changed.
pub trait Host {
    fn selected(&self) -> Option<Selection>;

    fn read_markup(
        &self,
        id: ComponentId,
        source: MarkupSource,
        scope: MarkupScope,
    ) -> Result<String, HostError>;

    /// Remove `class` from the live element. Returns whether it was present.
    fn remove_class(&mut self, id: ComponentId, class: &str) -> Result<bool, HostError>;

    fn add_class(&mut self, id: ComponentId, class: &str) -> Result<(), HostError>;

    /// The component's script body, if it has one.
    fn script(&self, id: ComponentId) -> Result<Option<String>, HostError>;

    /// CSS text for the rules that apply to the component and its descendants.
    fn generate_style(&self, id: ComponentId) -> Result<String, HostError>;

    /// Replace the component with components parsed from `markup`. Returns the
    /// first replacement.
    fn replace_subtree(&mut self, id: ComponentId, markup: &str)
    -> Result<ComponentId, HostError>;

    /// Replace the whole tree's content. Returns the root.
    fn replace_root(&mut self, markup: &str) -> Result<ComponentId, HostError>;

    fn select(&mut self, id: ComponentId) -> Result<(), HostError>;

    /// Parse `style` and merge it into the stylesheet model.
    fn insert_style_rules(&mut self, style: &str) -> Result<(), HostError>;

    fn parse_style_text(&self, style: &str) -> Vec<RuleDescriptor>;

    /// Look up registered selector tokens. `None` if any token is unknown.
    fn resolve_selector(&self, selectors: &[String]) -> Option<SelectorKey>;

    /// Find the rule for a resolved selector, qualified by the descriptor's
    /// state, extra selectors and at-rule.
    fn find_rule(&self, key: &SelectorKey, rule: &RuleDescriptor) -> Option<RuleId>;

    /// Remove rules as one batch. Returns how many were removed.
    fn remove_rules(&mut self, ids: &[RuleId]) -> Result<usize, HostError>;

    /// Layout request for the panel/canvas split. Hosts without a layout ignore it.
    fn resize_panel(&mut self, _widths: &PanelWidths) {}
}
