use crate::host::HostError;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelError {
    Host(HostError),
    /// The panel was disposed; it accepts no further work.
    Disposed,
    /// An apply was requested before any component was serialized.
    NoSelection,
}

impl fmt::Display for PanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelError::Host(err) => write!(f, "host error: {err}"),
            PanelError::Disposed => write!(f, "panel is disposed"),
            PanelError::NoSelection => write!(f, "no component selected"),
        }
    }
}

impl std::error::Error for PanelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PanelError::Host(err) => Some(err),
            PanelError::Disposed | PanelError::NoSelection => None,
        }
    }
}

impl From<HostError> for PanelError {
    fn from(err: HostError) -> Self {
        PanelError::Host(err)
    }
}
