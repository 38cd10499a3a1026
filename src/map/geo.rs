// SPDX-License-Identifier: MPL-2.0
//! Geographic primitives and the spherical Web-Mercator projection.
//!
//! Pixel coordinates are "world pixels": at zoom `z` the projected world is a
//! square of `TILE_SIZE * 2^z` pixels whose origin is the north-west corner.
//! Longitudes are not wrapped, so points beyond ±180° project outside the
//! square, which is what lets wide max bounds behave as expected.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Edge length of a map tile in pixels.
pub const TILE_SIZE: f64 = 256.0;

/// Sphere radius used by the Web-Mercator projection (meters).
pub const MERCATOR_RADIUS: f64 = 6_378_137.0;

/// Mean Earth radius used for distances such as circle radii (meters).
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Latitude beyond which Web-Mercator is clamped.
pub const MAX_LATITUDE: f64 = 85.051_128_779_8;

const DEG: f64 = PI / 180.0;

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for LatLng {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<LatLng> for [f64; 2] {
    fn from(latlng: LatLng) -> Self {
        [latlng.lat, latlng.lng]
    }
}

/// Axis-aligned geographic rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    south_west: LatLng,
    north_east: LatLng,
}

impl LatLngBounds {
    /// Builds bounds from two opposite corners, in any order.
    #[must_use]
    pub fn new(a: LatLng, b: LatLng) -> Self {
        Self {
            south_west: LatLng::new(a.lat.min(b.lat), a.lng.min(b.lng)),
            north_east: LatLng::new(a.lat.max(b.lat), a.lng.max(b.lng)),
        }
    }

    /// Smallest bounds containing every point, or `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[LatLng]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self::new(*first, *first);
        for point in rest {
            bounds.extend(*point);
        }
        Some(bounds)
    }

    #[must_use]
    pub fn south_west(&self) -> LatLng {
        self.south_west
    }

    #[must_use]
    pub fn north_east(&self) -> LatLng {
        self.north_east
    }

    #[must_use]
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    #[must_use]
    pub fn contains(&self, point: LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    pub fn extend(&mut self, point: LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }
}

/// A point in world-pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Size of the view region in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSize {
    pub width: f64,
    pub height: f64,
}

impl ViewSize {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for ViewSize {
    fn default() -> Self {
        Self::new(800.0, 650.0)
    }
}

/// Width (and height) of the projected world at `zoom`.
#[must_use]
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * 2f64.powf(zoom)
}

/// Projects a coordinate to world pixels at `zoom`.
#[must_use]
pub fn project(latlng: LatLng, zoom: f64) -> PixelPoint {
    let lat = latlng.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let sin = (lat * DEG).sin();

    let x = MERCATOR_RADIUS * latlng.lng * DEG;
    let y = MERCATOR_RADIUS * ((1.0 + sin) / (1.0 - sin)).ln() / 2.0;

    let scale = 0.5 / (PI * MERCATOR_RADIUS);
    let size = world_size(zoom);
    PixelPoint::new((x * scale + 0.5) * size, (-y * scale + 0.5) * size)
}

/// Inverse of [`project`].
#[must_use]
pub fn unproject(point: PixelPoint, zoom: f64) -> LatLng {
    let scale = 0.5 / (PI * MERCATOR_RADIUS);
    let size = world_size(zoom);
    let x = (point.x / size - 0.5) / scale;
    let y = -(point.y / size - 0.5) / scale;

    LatLng::new(
        (2.0 * (y / MERCATOR_RADIUS).exp().atan() - PI / 2.0) / DEG,
        x / MERCATOR_RADIUS / DEG,
    )
}

/// Projected center and horizontal/vertical pixel radii of a circle of
/// `radius_m` meters around `center`.
///
/// Circles are not round in Mercator space away from the equator, hence the
/// two radii.
#[must_use]
pub fn circle_pixel_radii(center: LatLng, radius_m: f64, zoom: f64) -> (PixelPoint, f64, f64) {
    let lat = center.lat;
    let lng = center.lng;
    let lat_r = (radius_m / EARTH_RADIUS) / DEG;

    let top = project(LatLng::new(lat + lat_r, lng), zoom);
    let bottom = project(LatLng::new(lat - lat_r, lng), zoom);
    let middle = PixelPoint::new((top.x + bottom.x) / 2.0, (top.y + bottom.y) / 2.0);
    let lat2 = unproject(middle, zoom).lat;

    let mut lng_r = (((lat_r * DEG).cos() - (lat * DEG).sin() * (lat2 * DEG).sin())
        / ((lat * DEG).cos() * (lat2 * DEG).cos()))
    .acos()
        / DEG;
    if lng_r.is_nan() || lng_r == 0.0 {
        lng_r = lat_r / (lat * DEG).cos();
    }

    let radius_x = if lng_r.is_nan() {
        0.0
    } else {
        middle.x - project(LatLng::new(lat2, lng - lng_r), zoom).x
    };
    let radius_y = middle.y - top.y;

    (middle, radius_x, radius_y)
}

/// Returns the center to use so that a view of `size` at `zoom` stays inside
/// `bounds`. If the view is larger than the bounds along an axis, the view is
/// centered on the bounds along that axis.
#[must_use]
pub fn limit_center(center: LatLng, zoom: f64, size: ViewSize, bounds: &LatLngBounds) -> LatLng {
    let center_point = project(center, zoom);
    let half_w = size.width / 2.0;
    let half_h = size.height / 2.0;

    let view_min = center_point.offset(-half_w, -half_h);
    let view_max = center_point.offset(half_w, half_h);

    let ne = project(bounds.north_east(), zoom);
    let sw = project(bounds.south_west(), zoom);
    let bounds_min = PixelPoint::new(ne.x.min(sw.x), ne.y.min(sw.y));
    let bounds_max = PixelPoint::new(ne.x.max(sw.x), ne.y.max(sw.y));

    let dx = rebound(bounds_min.x - view_min.x, -(bounds_max.x - view_max.x));
    let dy = rebound(bounds_min.y - view_min.y, -(bounds_max.y - view_max.y));

    if dx.abs() <= 1.0 && dy.abs() <= 1.0 {
        return center;
    }
    unproject(center_point.offset(dx, dy), zoom)
}

fn rebound(left: f64, right: f64) -> f64 {
    if left + right > 0.0 {
        (left - right).round() / 2.0
    } else {
        left.ceil().max(0.0) - right.floor().max(0.0)
    }
}
