use snapzones_store::LayoutId;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use crate::{
    Error, Result,
    event::{PopupModel, Selection, SelectorEvent},
    proximity::ProximityState,
};

/// Sends selector events to the host (renderer and snap executor).
#[derive(Clone)]
pub struct EventDispatcher {
    /// Outgoing event channel.
    tx: UnboundedSender<SelectorEvent>,
}

impl EventDispatcher {
    /// Create a new dispatcher from an event channel.
    pub fn new(tx: UnboundedSender<SelectorEvent>) -> Self {
        Self { tx }
    }

    /// Send a raw event.
    pub fn send(&self, event: SelectorEvent) -> Result<()> {
        self.tx.send(event).map_err(|_| Error::ChannelClosed)
    }

    /// Announce a state change.
    pub fn state_changed(&self, state: ProximityState, proximity: f64) -> Result<()> {
        debug!(state = %state, proximity, "selector_state_changed");
        self.send(SelectorEvent::StateChanged {
            state,
            visible: state.is_visible(),
            proximity,
        })
    }

    /// Send a fresh popup model to the renderer.
    pub fn popup_changed(&self, model: PopupModel) -> Result<()> {
        debug!(
            entries = model.entries.len(),
            rows = model.geometry.rows,
            columns = model.geometry.columns,
            "popup_changed"
        );
        self.send(SelectorEvent::PopupChanged(model))
    }

    /// Announce the hovered layout and zone (either may be `None`).
    pub fn hovered(&self, layout_id: Option<LayoutId>, zone: Option<usize>) -> Result<()> {
        self.send(SelectorEvent::Hovered { layout_id, zone })
    }

    /// Hand a selection to the snap executor.
    pub fn selection_made(&self, selection: Selection) -> Result<()> {
        // Selections are always logged at info level for traceability.
        info!(
            layout = %selection.layout_id,
            zone = selection.zone_index,
            x = selection.target.x,
            y = selection.target.y,
            w = selection.target.w,
            h = selection.target.h,
            "selection_made"
        );
        self.send(SelectorEvent::SelectionMade(selection))
    }
}
