//! Plain identifier types shared by the panel core and its hosts.

use std::fmt;

/// Identity of a component inside the host's tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub u32);

/// Identity of a stylesheet rule inside the host's rule model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(pub u32);

/// Identity of a single registered selector token (`#id`, `.class`, `tag`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelectorId(pub u32);

/// A resolved compound selector: the sorted set of registered selector ids.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SelectorKey(Vec<SelectorId>);

impl SelectorKey {
    pub fn new(mut ids: Vec<SelectorId>) -> Self {
        ids.sort_unstable();
        ids.dedup();
        Self(ids)
    }

    pub fn ids(&self) -> &[SelectorId] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The two text surfaces owned by the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Markup,
    Style,
}

impl SurfaceKind {
    pub const ALL: [SurfaceKind; 2] = [SurfaceKind::Markup, SurfaceKind::Style];

    pub fn label(self) -> &'static str {
        match self {
            SurfaceKind::Markup => "html",
            SurfaceKind::Style => "css",
        }
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component#{}", self.0)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule#{}", self.0)
    }
}
