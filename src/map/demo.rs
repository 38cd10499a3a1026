// SPDX-License-Identifier: MPL-2.0
//! The seeded demo content shown on every mount.

use super::control::ControlPosition;
use super::events::{EventKind, MapEvent};
use super::feature::Feature;
use super::geo::LatLng;
use super::instance::MapInstance;
use super::layer_group::{FeatureId, GroupId, LayerGroup};
use super::style::{CssColor, PathStyle};

pub const CIRCLES: &str = "circles";
pub const MARKERS: &str = "markers";
pub const POLYGONS: &str = "polygons";

/// Overlay group names, in layer-control order.
pub const OVERLAY_NAMES: [&str; 3] = [CIRCLES, MARKERS, POLYGONS];

pub const MARKER_POSITION: LatLng = LatLng::new(51.5, -0.09);
pub const MARKER_POPUP: &str = "<b>Hello world!</b><br />I am a popup.";

pub const CIRCLE_CENTER: LatLng = LatLng::new(51.508, -0.11);
pub const CIRCLE_INITIAL_RADIUS: f64 = 5000.0;
pub const CIRCLE_RADIUS: f64 = 500_000.0;
pub const CIRCLE_POPUP: &str = "I am a circle.";

pub const POLYGON_VERTICES: [LatLng; 3] = [
    LatLng::new(51.5074, 0.1278),
    LatLng::new(6.5244, 3.3792),
    LatLng::new(40.7128, -74.006),
];
pub const POLYGON_POPUP: &str = "I am a polygon.";

/// Ids of the seeded features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoFeatures {
    pub marker: FeatureId,
    pub circle: FeatureId,
    pub polygon: FeatureId,
}

fn group_id(map: &mut MapInstance, name: &str) -> GroupId {
    match map.group_by_name(name).map(LayerGroup::id) {
        Some(id) => id,
        None => {
            let id = map.create_group(name);
            map.add_layer(id);
            id
        }
    }
}

/// Wires controls and listeners and inserts the demo features.
///
/// Groups named in [`OVERLAY_NAMES`] are expected among the instance's
/// initial overlays; any that are missing are created and shown.
pub fn seed(map: &mut MapInstance, zoom_position: ControlPosition) -> Option<DemoFeatures> {
    let circles = group_id(map, CIRCLES);
    let markers = group_id(map, MARKERS);
    let polygons = group_id(map, POLYGONS);

    map.add_layer_control(ControlPosition::TopRight);
    map.register_overlay(CIRCLES, circles);
    map.register_overlay(MARKERS, markers);
    map.register_overlay(POLYGONS, polygons);

    map.add_zoom_control(zoom_position);
    map.on(EventKind::ZoomStart, |event| {
        if let MapEvent::ZoomStart { from, to } = event {
            tracing::info!(from, to, "ZOOM STARTED");
        }
    });

    let marker = map.add_feature(markers, Feature::marker(MARKER_POSITION))?;
    map.bind_popup(marker, MARKER_POPUP);
    map.open_popup_for(marker);

    let circle_style = PathStyle::default()
        .with_color(CssColor::RED)
        .with_fill_color(CssColor::from_rgb_hex(0xff0033))
        .with_fill_opacity(0.5);
    let circle = map.add_feature(
        circles,
        Feature::circle(CIRCLE_CENTER, CIRCLE_INITIAL_RADIUS, circle_style),
    )?;
    map.set_radius(circle, CIRCLE_RADIUS);
    map.bind_popup(circle, CIRCLE_POPUP);

    let polygon = map.add_feature(
        polygons,
        Feature::polygon(POLYGON_VERTICES.to_vec(), PathStyle::default()),
    )?;
    map.bind_popup(polygon, POLYGON_POPUP);

    tracing::debug!(?marker, ?circle, ?polygon, "demo features seeded");
    Some(DemoFeatures {
        marker,
        circle,
        polygon,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::feature::FeatureKind;
    use crate::map::instance::MapOptions;
    use crate::map::mount::{MountRegistry, ViewRegionId};

    fn seeded() -> (MountRegistry, MapInstance, DemoFeatures) {
        let registry = MountRegistry::new();
        let handle = registry.bind(ViewRegionId::default()).expect("bind");
        let mut map = MapInstance::initialize(
            handle,
            MapOptions {
                overlays: OVERLAY_NAMES.iter().map(ToString::to_string).collect(),
                ..MapOptions::default()
            },
        );
        let ids = seed(&mut map, ControlPosition::TopRight).expect("seeded");
        (registry, map, ids)
    }

    #[test]
    fn circle_keeps_final_radius() {
        let (_registry, map, ids) = seeded();
        match map.feature(ids.circle).map(Feature::kind) {
            Some(FeatureKind::Circle(circle)) => {
                assert_eq!(circle.radius, CIRCLE_RADIUS);
                assert_eq!(circle.style.color, CssColor::RED);
                assert_eq!(circle.style.fill_color, Some("#f03".parse().expect("hex")));
                assert_eq!(circle.style.fill_opacity, 0.5);
            }
            other => panic!("expected circle, got {other:?}"),
        }
    }

    #[test]
    fn marker_popup_is_open() {
        let (_registry, map, ids) = seeded();
        assert_eq!(map.open_popup().map(|p| p.feature), Some(ids.marker));
    }

    #[test]
    fn missing_groups_are_created() {
        let registry = MountRegistry::new();
        let handle = registry.bind(ViewRegionId::default()).expect("bind");
        let mut map = MapInstance::initialize(handle, MapOptions::default());
        seed(&mut map, ControlPosition::TopRight).expect("seeded");
        assert_eq!(map.groups().len(), 3);
        assert!(map.overlay_states().iter().all(|(_, active)| *active));
    }

    #[test]
    fn zoom_start_listener_is_registered() {
        let (_registry, map, _ids) = seeded();
        assert_eq!(map.listener_count(), 1);
    }
}
