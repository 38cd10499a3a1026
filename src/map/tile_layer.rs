// SPDX-License-Identifier: MPL-2.0
//! Base tile layers: URL templating and viewport tile coverage.

use super::geo::{self, LatLng, PixelPoint, ViewSize, TILE_SIZE};
use super::popup::RichText;

/// Deepest zoom level a tile layer serves. Keeps `2^zoom` tile indices
/// inside `u32`.
pub const MAX_TILE_ZOOM: u8 = 24;

/// Address of one tile in the XYZ scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileKey {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

/// A tile to draw: which tile, and where its top-left corner lands in world
/// pixels. `origin` is not wrapped, so the same key can appear several times
/// when the view spans more than one world copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePlacement {
    pub key: TileKey,
    pub origin: PixelPoint,
}

#[derive(Debug, Clone)]
pub struct TileLayer {
    name: String,
    url_template: String,
    attribution: RichText,
    subdomains: Vec<String>,
    min_zoom: u8,
    max_zoom: u8,
}

impl TileLayer {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        url_template: impl Into<String>,
        attribution: &str,
    ) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
            attribution: RichText::parse(attribution),
            subdomains: vec!["a".into(), "b".into(), "c".into()],
            min_zoom: 0,
            max_zoom: 18,
        }
    }

    /// Restricts the served zoom levels. Both ends are capped at
    /// [`MAX_TILE_ZOOM`].
    #[must_use]
    pub fn with_zoom_range(mut self, min_zoom: u8, max_zoom: u8) -> Self {
        let min_zoom = min_zoom.min(MAX_TILE_ZOOM);
        let max_zoom = max_zoom.min(MAX_TILE_ZOOM);
        self.min_zoom = min_zoom.min(max_zoom);
        self.max_zoom = max_zoom.max(min_zoom);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    #[must_use]
    pub fn attribution(&self) -> &RichText {
        &self.attribution
    }

    #[must_use]
    pub fn min_zoom(&self) -> u8 {
        self.min_zoom
    }

    #[must_use]
    pub fn max_zoom(&self) -> u8 {
        self.max_zoom
    }

    /// Expands `{z}`, `{x}`, `{y}` and `{s}` in the template.
    #[must_use]
    pub fn tile_url(&self, key: TileKey) -> String {
        let subdomain = if self.subdomains.is_empty() {
            ""
        } else {
            let index = (key.x as usize + key.y as usize) % self.subdomains.len();
            self.subdomains[index].as_str()
        };

        self.url_template
            .replace("{z}", &key.z.to_string())
            .replace("{x}", &key.x.to_string())
            .replace("{y}", &key.y.to_string())
            .replace("{s}", subdomain)
    }

    /// Tiles needed to cover a view of `size` centered on `center` at integer
    /// `zoom`, nearest to the center first.
    ///
    /// Columns wrap around the antimeridian; rows outside the world are
    /// skipped. Nothing is returned outside the layer's zoom range.
    #[must_use]
    pub fn covering_tiles(&self, center: LatLng, zoom: u8, size: ViewSize) -> Vec<TilePlacement> {
        if zoom < self.min_zoom || zoom > self.max_zoom || zoom > MAX_TILE_ZOOM {
            return Vec::new();
        }
        let Some(tiles_per_side) = 1i64.checked_shl(u32::from(zoom)) else {
            return Vec::new();
        };

        let z = f64::from(zoom);
        let center_px = geo::project(center, z);

        let min_col = ((center_px.x - size.width / 2.0) / TILE_SIZE).floor() as i64;
        let max_col = ((center_px.x + size.width / 2.0) / TILE_SIZE).ceil() as i64 - 1;
        let min_row = (((center_px.y - size.height / 2.0) / TILE_SIZE).floor() as i64).max(0);
        let max_row = (((center_px.y + size.height / 2.0) / TILE_SIZE).ceil() as i64 - 1)
            .min(tiles_per_side - 1);

        let mut placements = Vec::new();
        for row in min_row..=max_row {
            for col in min_col..=max_col {
                let wrapped = col.rem_euclid(tiles_per_side);
                placements.push(TilePlacement {
                    key: TileKey {
                        z: zoom,
                        x: wrapped as u32,
                        y: row as u32,
                    },
                    origin: PixelPoint::new(col as f64 * TILE_SIZE, row as f64 * TILE_SIZE),
                });
            }
        }

        let tile_center = |p: &TilePlacement| p.origin.offset(TILE_SIZE / 2.0, TILE_SIZE / 2.0);
        placements.sort_by(|a, b| {
            tile_center(a)
                .distance(center_px)
                .total_cmp(&tile_center(b).distance(center_px))
        });
        placements
    }
}
