use core_types::{ComponentId, SurfaceKind};
use std::sync::mpsc::{Receiver, Sender, channel};

/// Host editor -> panel notifications.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostEvent {
    SelectionChanged {
        selected: Option<ComponentId>,
    },
    ComponentUpdated {
        id: ComponentId,
    },
    // The host left preview mode and restored its own layout.
    PreviewStopped,
}

/// UI shell -> panel actions (buttons, toolbar command, teardown).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelCommand {
    Show,
    Hide,
    Refresh,
    ApplyMarkup,
    ApplyStyle,
    DeleteSelection,
    ToggleSection(SurfaceKind),
    Dispose,
}

pub struct Bus {
    pub cmd_tx: Sender<PanelCommand>,
    pub cmd_rx: Receiver<PanelCommand>,
    pub evt_tx: Sender<HostEvent>, // cloned into the host
    pub evt_rx: Receiver<HostEvent>,
}

impl Bus {
    pub fn new() -> Self {
        let (cmd_tx, cmd_rx) = channel();
        let (evt_tx, evt_rx) = channel();
        Bus {
            cmd_tx,
            cmd_rx,
            evt_tx,
            evt_rx,
        }
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
