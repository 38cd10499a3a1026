// SPDX-License-Identifier: MPL-2.0
//! Drawable map features: markers, circles and polygons.

use super::geo::{self, LatLng, LatLngBounds, PixelPoint};
use super::popup::RichText;
use super::style::PathStyle;

/// Marker icon size in pixels (width, height).
pub const MARKER_ICON_SIZE: (f64, f64) = (25.0, 41.0);

/// Pixel of the icon that sits on the marker's coordinate (the pin tip).
pub const MARKER_ICON_ANCHOR: (f64, f64) = (12.0, 41.0);

/// Offset from the marker coordinate to the tip of its popup.
pub const MARKER_POPUP_ANCHOR: (f64, f64) = (1.0, -34.0);

/// Extra pixels around a path's outline that still count as a hit.
const PATH_CLICK_TOLERANCE: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: LatLng,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: LatLng,
    /// Radius in meters.
    pub radius: f64,
    pub style: PathStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Outer ring, in insertion order. The ring is closed implicitly.
    pub vertices: Vec<LatLng>,
    pub style: PathStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureKind {
    Marker(Marker),
    Circle(Circle),
    Polygon(Polygon),
}

/// A map feature with its optional popup binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    kind: FeatureKind,
    popup: Option<RichText>,
}

impl Feature {
    #[must_use]
    pub fn marker(position: LatLng) -> Self {
        Self::from_kind(FeatureKind::Marker(Marker { position }))
    }

    #[must_use]
    pub fn circle(center: LatLng, radius: f64, style: PathStyle) -> Self {
        Self::from_kind(FeatureKind::Circle(Circle {
            center,
            radius: radius.max(0.0),
            style,
        }))
    }

    #[must_use]
    pub fn polygon(vertices: Vec<LatLng>, style: PathStyle) -> Self {
        Self::from_kind(FeatureKind::Polygon(Polygon { vertices, style }))
    }

    fn from_kind(kind: FeatureKind) -> Self {
        Self { kind, popup: None }
    }

    #[must_use]
    pub fn kind(&self) -> &FeatureKind {
        &self.kind
    }

    #[must_use]
    pub fn is_marker(&self) -> bool {
        matches!(self.kind, FeatureKind::Marker(_))
    }

    #[must_use]
    pub fn popup(&self) -> Option<&RichText> {
        self.popup.as_ref()
    }

    /// Binds (or replaces) the popup shown when the feature is clicked.
    pub fn set_popup(&mut self, markup: &str) {
        self.popup = Some(RichText::parse(markup));
    }

    /// Builder form of [`Feature::set_popup`].
    #[must_use]
    pub fn with_popup(mut self, markup: &str) -> Self {
        self.set_popup(markup);
        self
    }

    /// Updates a circle's radius. Returns `false` for other feature kinds.
    pub fn set_radius(&mut self, radius: f64) -> bool {
        match &mut self.kind {
            FeatureKind::Circle(circle) => {
                circle.radius = radius.max(0.0);
                true
            }
            _ => false,
        }
    }

    /// Where a popup opened without a click position points to.
    #[must_use]
    pub fn anchor(&self) -> LatLng {
        match &self.kind {
            FeatureKind::Marker(marker) => marker.position,
            FeatureKind::Circle(circle) => circle.center,
            FeatureKind::Polygon(polygon) => polygon_center(&polygon.vertices),
        }
    }

    #[must_use]
    pub fn bounds(&self) -> Option<LatLngBounds> {
        match &self.kind {
            FeatureKind::Marker(marker) => LatLngBounds::from_points(&[marker.position]),
            FeatureKind::Circle(circle) => LatLngBounds::from_points(&[circle.center]),
            FeatureKind::Polygon(polygon) => LatLngBounds::from_points(&polygon.vertices),
        }
    }

    /// Whether the world-pixel `point` at `zoom` lands on this feature.
    #[must_use]
    pub fn hit_test(&self, point: PixelPoint, zoom: f64) -> bool {
        match &self.kind {
            FeatureKind::Marker(marker) => {
                let tip = geo::project(marker.position, zoom);
                let left = tip.x - MARKER_ICON_ANCHOR.0;
                let top = tip.y - MARKER_ICON_ANCHOR.1;
                point.x >= left
                    && point.x <= left + MARKER_ICON_SIZE.0
                    && point.y >= top
                    && point.y <= top + MARKER_ICON_SIZE.1
            }
            FeatureKind::Circle(circle) => {
                let (center, rx, ry) = geo::circle_pixel_radii(circle.center, circle.radius, zoom);
                let slack = f64::from(circle.style.weight) / 2.0 + PATH_CLICK_TOLERANCE;
                let rx = rx + slack;
                let ry = ry + slack;
                let dx = (point.x - center.x) / rx;
                let dy = (point.y - center.y) / ry;
                dx * dx + dy * dy <= 1.0
            }
            FeatureKind::Polygon(polygon) => {
                let ring: Vec<PixelPoint> = polygon
                    .vertices
                    .iter()
                    .map(|v| geo::project(*v, zoom))
                    .collect();
                point_in_ring(point, &ring)
            }
        }
    }
}

/// Even-odd point-in-polygon test.
fn point_in_ring(point: PixelPoint, ring: &[PixelPoint]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Area-weighted centroid computed in projected space, falling back to the
/// vertex average for degenerate rings.
fn polygon_center(vertices: &[LatLng]) -> LatLng {
    if vertices.is_empty() {
        return LatLng::new(0.0, 0.0);
    }
    let ring: Vec<PixelPoint> = vertices.iter().map(|v| geo::project(*v, 0.0)).collect();

    let mut area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (p1, p2) = (ring[i], ring[j]);
        let f = p1.y * p2.x - p2.y * p1.x;
        cx += (p1.x + p2.x) * f;
        cy += (p1.y + p2.y) * f;
        area += f * 3.0;
        j = i;
    }

    if area.abs() < f64::EPSILON {
        let n = ring.len() as f64;
        let sx: f64 = ring.iter().map(|p| p.x).sum();
        let sy: f64 = ring.iter().map(|p| p.y).sum();
        return geo::unproject(PixelPoint::new(sx / n, sy / n), 0.0);
    }
    geo::unproject(PixelPoint::new(cx / area, cy / area), 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::style::CssColor;

    fn triangle() -> Feature {
        Feature::polygon(
            vec![
                LatLng::new(51.5074, 0.1278),
                LatLng::new(6.5244, 3.3792),
                LatLng::new(40.7128, -74.006),
            ],
            PathStyle::default(),
        )
    }

    #[test]
    fn marker_hit_box_sits_above_its_tip() {
        let marker = Feature::marker(LatLng::new(51.5, -0.09));
        let tip = geo::project(LatLng::new(51.5, -0.09), 5.0);
        assert!(marker.hit_test(tip.offset(0.0, -20.0), 5.0));
        assert!(!marker.hit_test(tip.offset(0.0, 5.0), 5.0));
        assert!(!marker.hit_test(tip.offset(30.0, -20.0), 5.0));
    }

    #[test]
    fn circle_hit_respects_radius() {
        let center = LatLng::new(51.508, -0.11);
        let circle = Feature::circle(center, 500_000.0, PathStyle::default());
        let (c, rx, _) = geo::circle_pixel_radii(center, 500_000.0, 4.0);
        assert!(circle.hit_test(c, 4.0));
        assert!(circle.hit_test(c.offset(rx * 0.9, 0.0), 4.0));
        assert!(!circle.hit_test(c.offset(rx * 1.5, 0.0), 4.0));
    }

    #[test]
    fn set_radius_only_applies_to_circles() {
        let mut circle = Feature::circle(LatLng::new(0.0, 0.0), 5000.0, PathStyle::default());
        assert!(circle.set_radius(500_000.0));
        match circle.kind() {
            FeatureKind::Circle(c) => assert_eq!(c.radius, 500_000.0),
            other => panic!("expected circle, got {other:?}"),
        }

        let mut marker = Feature::marker(LatLng::new(0.0, 0.0));
        assert!(!marker.set_radius(10.0));
    }

    #[test]
    fn polygon_hit_uses_projected_ring() {
        let polygon = triangle();
        let inside = geo::project(polygon.anchor(), 3.0);
        assert!(polygon.hit_test(inside, 3.0));

        let outside = geo::project(LatLng::new(-40.0, 100.0), 3.0);
        assert!(!polygon.hit_test(outside, 3.0));
    }

    #[test]
    fn polygon_anchor_lies_within_vertex_bounds() {
        let polygon = triangle();
        let bounds = polygon.bounds().expect("polygon has vertices");
        assert!(bounds.contains(polygon.anchor()));
    }

    #[test]
    fn popup_binding_is_replaceable() {
        let mut circle = Feature::circle(
            LatLng::new(0.0, 0.0),
            10.0,
            PathStyle::default().with_color(CssColor::RED),
        )
        .with_popup("first");
        circle.set_popup("I am a circle.");
        assert_eq!(
            circle.popup().map(RichText::plain_text).as_deref(),
            Some("I am a circle.")
        );
    }
}
