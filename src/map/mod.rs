// SPDX-License-Identifier: MPL-2.0
//! Widget-independent map model.
//!
//! Projection, features, layer groups, controls, events and the map instance
//! itself live here. Nothing in this module depends on Iced, so the layer
//! composition and popup rules can be tested without a window.

pub mod control;
pub mod demo;
pub mod events;
pub mod feature;
pub mod geo;
pub mod instance;
pub mod layer_group;
pub mod mount;
pub mod popup;
pub mod style;
pub mod tile_layer;

pub use control::{ControlPosition, LayerControl, ZoomControl};
pub use events::{EventKind, ListenerId, MapEvent};
pub use feature::{Feature, FeatureKind};
pub use geo::{LatLng, LatLngBounds, PixelPoint, ViewSize};
pub use instance::{ClickOutcome, MapInstance, MapOptions, OpenPopup};
pub use layer_group::{FeatureId, GroupId, LayerGroup};
pub use mount::{MountError, MountHandle, MountRegistry, ViewRegionId};
pub use style::{CssColor, PathStyle};
pub use tile_layer::{TileKey, TileLayer, TilePlacement, MAX_TILE_ZOOM};
