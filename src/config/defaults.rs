// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **View**: initial center, zoom range and pan boundary
//! - **Tiles**: base layer source and tile cache size
//! - **Controls**: control placement and popup behavior

use crate::map::ControlPosition;

// ==========================================================================
// View Defaults
// ==========================================================================

/// Initial map center as `[lat, lng]`.
pub const DEFAULT_CENTER: [f64; 2] = [20.0, 0.0];

/// Initial zoom level.
pub const DEFAULT_ZOOM: u8 = 2;

/// Lowest zoom level the view can reach.
pub const DEFAULT_MIN_ZOOM: u8 = 0;

/// Highest zoom level the view can reach.
pub const DEFAULT_MAX_ZOOM: u8 = 18;

/// Deepest zoom level accepted from the config file.
pub const MAX_ZOOM: u8 = crate::map::MAX_TILE_ZOOM;

/// Pan boundary as `[[south, west], [north, east]]`. Wider than the world so
/// the view can scroll past the antimeridian.
pub const DEFAULT_MAX_BOUNDS: [[f64; 2]; 2] = [[-150.0, -240.0], [150.0, 240.0]];

// ==========================================================================
// Tile Defaults
// ==========================================================================

/// Display name of the default base layer.
pub const DEFAULT_TILE_LAYER_NAME: &str = "OpenStreetMap";

/// Default tile endpoint, row before column.
pub const DEFAULT_TILE_URL: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Street_Map/MapServer/tile/{z}/{y}/{x}";

/// Attribution markup shown in the bottom-right corner.
pub const DEFAULT_TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Default number of decoded tiles kept in memory.
pub const DEFAULT_TILE_CACHE_CAPACITY: usize = crate::tiles::DEFAULT_CACHE_CAPACITY;

/// Minimum tile cache capacity.
pub const MIN_TILE_CACHE_CAPACITY: usize = 16;

/// Maximum tile cache capacity.
pub const MAX_TILE_CACHE_CAPACITY: usize = 4096;

// ==========================================================================
// Control Defaults
// ==========================================================================

/// Corner holding the zoom buttons.
pub const DEFAULT_ZOOM_POSITION: ControlPosition = ControlPosition::TopRight;

/// Clicking empty map leaves the popup open.
pub const DEFAULT_CLOSE_POPUP_ON_CLICK: bool = false;
