// SPDX-License-Identifier: MPL-2.0
//! Map controls: the layer selector and the zoom buttons.
//!
//! Controls only hold what they list and where they sit. Whether an overlay
//! is checked is always read back from the map instance, so the control can
//! never disagree with what is drawn.

use super::layer_group::GroupId;
use serde::{Deserialize, Serialize};

/// Corner of the view region a control is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlPosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

/// A named overlay entry in the layer control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayEntry {
    pub name: String,
    pub group: GroupId,
}

/// Base-layer radio list plus overlay checkboxes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerControl {
    base_layers: Vec<String>,
    overlays: Vec<OverlayEntry>,
    position: ControlPosition,
    collapsed: bool,
}

impl LayerControl {
    #[must_use]
    pub fn new(position: ControlPosition) -> Self {
        Self {
            base_layers: Vec::new(),
            overlays: Vec::new(),
            position,
            collapsed: true,
        }
    }

    /// Adds a base layer entry by name.
    pub fn add_base_layer(&mut self, name: impl Into<String>) {
        self.base_layers.push(name.into());
    }

    /// Adds an overlay entry. Re-registering a group renames its entry.
    pub fn add_overlay(&mut self, name: impl Into<String>, group: GroupId) {
        let name = name.into();
        match self.overlays.iter_mut().find(|entry| entry.group == group) {
            Some(entry) => entry.name = name,
            None => self.overlays.push(OverlayEntry { name, group }),
        }
    }

    #[must_use]
    pub fn base_layers(&self) -> &[String] {
        &self.base_layers
    }

    #[must_use]
    pub fn overlays(&self) -> &[OverlayEntry] {
        &self.overlays
    }

    #[must_use]
    pub fn overlay_group(&self, name: &str) -> Option<GroupId> {
        self.overlays
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.group)
    }

    #[must_use]
    pub fn position(&self) -> ControlPosition {
        self.position
    }

    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }
}

/// "+" / "−" zoom buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoomControl {
    position: ControlPosition,
    pub zoom_in_text: &'static str,
    pub zoom_out_text: &'static str,
}

impl ZoomControl {
    #[must_use]
    pub fn new(position: ControlPosition) -> Self {
        Self {
            position,
            zoom_in_text: "+",
            zoom_out_text: "\u{2212}",
        }
    }

    #[must_use]
    pub fn position(&self) -> ControlPosition {
        self.position
    }
}
