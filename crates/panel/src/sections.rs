use core_types::SurfaceKind;

/// Accordion over the two surfaces: exactly one section is expanded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sections {
    active: SurfaceKind,
}

impl Default for Sections {
    fn default() -> Self {
        Sections {
            active: SurfaceKind::Markup,
        }
    }
}

impl Sections {
    pub fn active(&self) -> SurfaceKind {
        self.active
    }

    /// Clicking the expanded section expands the other one; clicking a collapsed
    /// one expands it. Returns the newly active section.
    pub fn toggle(&mut self, clicked: SurfaceKind) -> SurfaceKind {
        self.active = if clicked == self.active {
            other(clicked)
        } else {
            clicked
        };
        self.active
    }
}

fn other(kind: SurfaceKind) -> SurfaceKind {
    match kind {
        SurfaceKind::Markup => SurfaceKind::Style,
        SurfaceKind::Style => SurfaceKind::Markup,
    }
}
