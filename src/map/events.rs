// SPDX-License-Identifier: MPL-2.0
//! Map events and the listener registry.

use super::geo::LatLng;
use super::layer_group::FeatureId;
use std::fmt;

/// Something that happened on a map instance.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Fired before the zoom level changes.
    ZoomStart { from: u8, to: u8 },
    ZoomEnd { zoom: u8 },
    MoveEnd { center: LatLng },
    OverlayAdd { name: String },
    OverlayRemove { name: String },
    BaseLayerChange { name: String },
    PopupOpen { feature: FeatureId },
    PopupClose { feature: FeatureId },
    /// Fired once during teardown, before listeners are dropped.
    Unload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ZoomStart,
    ZoomEnd,
    MoveEnd,
    OverlayAdd,
    OverlayRemove,
    BaseLayerChange,
    PopupOpen,
    PopupClose,
    Unload,
}

impl MapEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            MapEvent::ZoomStart { .. } => EventKind::ZoomStart,
            MapEvent::ZoomEnd { .. } => EventKind::ZoomEnd,
            MapEvent::MoveEnd { .. } => EventKind::MoveEnd,
            MapEvent::OverlayAdd { .. } => EventKind::OverlayAdd,
            MapEvent::OverlayRemove { .. } => EventKind::OverlayRemove,
            MapEvent::BaseLayerChange { .. } => EventKind::BaseLayerChange,
            MapEvent::PopupOpen { .. } => EventKind::PopupOpen,
            MapEvent::PopupClose { .. } => EventKind::PopupClose,
            MapEvent::Unload => EventKind::Unload,
        }
    }
}

/// Handle returned by [`Listeners::on`], used to deregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type Listener = Box<dyn FnMut(&MapEvent) + Send>;

/// Callbacks keyed by event kind, invoked in registration order.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, EventKind, Listener)>,
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

impl Listeners {
    pub fn on(
        &mut self,
        kind: EventKind,
        listener: impl FnMut(&MapEvent) + Send + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, kind, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was already gone.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn emit(&mut self, event: &MapEvent) {
        let kind = event.kind();
        for (_, entry_kind, listener) in &mut self.entries {
            if *entry_kind == kind {
                listener(event);
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn count(&self, kind: EventKind) -> usize {
        self.entries.iter().filter(|(_, k, _)| *k == kind).count()
    }
}
