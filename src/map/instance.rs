// SPDX-License-Identifier: MPL-2.0
//! The map instance: viewport, layers, controls, popups and listeners for one
//! mounted view.
//!
//! Everything here is independent of Iced. The `ui::map_view` component owns
//! one instance while mounted and translates widget events into the calls
//! below.

use super::control::{ControlPosition, LayerControl, ZoomControl};
use super::events::{EventKind, ListenerId, Listeners, MapEvent};
use super::feature::Feature;
use super::geo::{self, LatLng, LatLngBounds, PixelPoint, ViewSize};
use super::layer_group::{FeatureId, GroupId, LayerGroup};
use super::mount::{MountHandle, ViewRegionId};
use super::tile_layer::{TileLayer, TilePlacement, MAX_TILE_ZOOM};
use std::collections::HashSet;

/// Construction options for a [`MapInstance`].
#[derive(Debug, Clone)]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    /// The view is kept inside these bounds while panning and zooming.
    pub max_bounds: Option<LatLngBounds>,
    /// Whether a zoom control is added at its default position on creation.
    pub zoom_control: bool,
    /// Whether clicking empty map closes the open popup.
    pub close_popup_on_click: bool,
    pub view_size: ViewSize,
    /// Base layers; the first one is active.
    pub base_layers: Vec<TileLayer>,
    /// Overlay groups created with the instance and shown from the start.
    pub overlays: Vec<String>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            center: LatLng::new(0.0, 0.0),
            zoom: 0,
            min_zoom: 0,
            max_zoom: 18,
            max_bounds: None,
            zoom_control: true,
            close_popup_on_click: true,
            view_size: ViewSize::default(),
            base_layers: Vec::new(),
            overlays: Vec::new(),
        }
    }
}

/// The popup currently shown, and where its tip points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenPopup {
    pub feature: FeatureId,
    pub anchor: LatLng,
}

/// What a click on the map resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    PopupOpened(FeatureId),
    PopupClosed(FeatureId),
    /// A feature was hit but has no popup bound.
    FeatureHit(FeatureId),
    Nothing,
}

#[derive(Debug)]
pub struct MapInstance {
    mount: MountHandle,
    center: LatLng,
    zoom: u8,
    min_zoom: u8,
    max_zoom: u8,
    max_bounds: Option<LatLngBounds>,
    close_popup_on_click: bool,
    view_size: ViewSize,
    base_layers: Vec<TileLayer>,
    active_base: Option<usize>,
    groups: Vec<LayerGroup>,
    on_map: HashSet<GroupId>,
    next_group: u32,
    next_feature: u32,
    layer_control: Option<LayerControl>,
    zoom_control: Option<ZoomControl>,
    listeners: Listeners,
    popup: Option<OpenPopup>,
}

impl MapInstance {
    /// Creates an instance bound to the region held by `mount`.
    #[must_use]
    pub fn initialize(mount: MountHandle, options: MapOptions) -> Self {
        let min_zoom = options.min_zoom.min(options.max_zoom).min(MAX_TILE_ZOOM);
        let max_zoom = options.max_zoom.max(options.min_zoom).min(MAX_TILE_ZOOM);
        let active_base = (!options.base_layers.is_empty()).then_some(0);

        let mut instance = Self {
            mount,
            center: options.center,
            zoom: options.zoom.clamp(min_zoom, max_zoom),
            min_zoom,
            max_zoom,
            max_bounds: options.max_bounds,
            close_popup_on_click: options.close_popup_on_click,
            view_size: options.view_size,
            base_layers: options.base_layers,
            active_base,
            groups: Vec::new(),
            on_map: HashSet::new(),
            next_group: 0,
            next_feature: 0,
            layer_control: None,
            zoom_control: options
                .zoom_control
                .then(|| ZoomControl::new(ControlPosition::TopLeft)),
            listeners: Listeners::default(),
            popup: None,
        };

        for name in options.overlays {
            let id = instance.create_group(name);
            instance.on_map.insert(id);
        }
        instance.center = instance.limited(instance.center, instance.zoom);

        tracing::debug!(
            region = %instance.mount.region(),
            zoom = instance.zoom,
            groups = instance.groups.len(),
            "map instance initialized"
        );
        instance
    }

    /// Tears the instance down: closes the popup, notifies `Unload`
    /// listeners, deregisters every listener and releases the view region.
    pub fn destroy(mut self) {
        self.close_popup();
        self.listeners.emit(&MapEvent::Unload);
        self.listeners.clear();
        tracing::debug!(region = %self.mount.region(), "map instance destroyed");
    }

    #[must_use]
    pub fn region(&self) -> &ViewRegionId {
        self.mount.region()
    }

    // ---------------------------------------------------------------------
    // Viewport
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn center(&self) -> LatLng {
        self.center
    }

    #[must_use]
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    #[must_use]
    pub fn min_zoom(&self) -> u8 {
        self.min_zoom
    }

    #[must_use]
    pub fn max_zoom(&self) -> u8 {
        self.max_zoom
    }

    #[must_use]
    pub fn max_bounds(&self) -> Option<LatLngBounds> {
        self.max_bounds
    }

    #[must_use]
    pub fn view_size(&self) -> ViewSize {
        self.view_size
    }

    #[must_use]
    pub fn close_popup_on_click(&self) -> bool {
        self.close_popup_on_click
    }

    pub fn set_view_size(&mut self, size: ViewSize) {
        if size == self.view_size {
            return;
        }
        self.view_size = size;
        self.center = self.limited(self.center, self.zoom);
    }

    /// Changes the zoom level, keeping the center. Returns whether the zoom
    /// actually changed; `ZoomStart` only fires in that case.
    pub fn set_zoom(&mut self, zoom: u8) -> bool {
        let target = zoom.clamp(self.min_zoom, self.max_zoom);
        if target == self.zoom {
            return false;
        }
        self.listeners.emit(&MapEvent::ZoomStart {
            from: self.zoom,
            to: target,
        });
        self.zoom = target;
        self.center = self.limited(self.center, target);
        self.listeners.emit(&MapEvent::ZoomEnd { zoom: target });
        self.listeners.emit(&MapEvent::MoveEnd {
            center: self.center,
        });
        true
    }

    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.zoom.saturating_add(1))
    }

    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.zoom.saturating_sub(1))
    }

    /// Zooms while keeping the coordinate under the view point `(x, y)`
    /// fixed, as a mouse-wheel zoom does.
    pub fn zoom_around(&mut self, zoom: u8, x: f64, y: f64) -> bool {
        let target = zoom.clamp(self.min_zoom, self.max_zoom);
        if target == self.zoom {
            return false;
        }
        let pinned = self.view_to_latlng(x, y);
        let pinned_px = geo::project(pinned, f64::from(target));
        let center_px = pinned_px.offset(
            self.view_size.width / 2.0 - x,
            self.view_size.height / 2.0 - y,
        );
        self.listeners.emit(&MapEvent::ZoomStart {
            from: self.zoom,
            to: target,
        });
        self.zoom = target;
        self.center = self.limited(geo::unproject(center_px, f64::from(target)), target);
        self.listeners.emit(&MapEvent::ZoomEnd { zoom: target });
        self.listeners.emit(&MapEvent::MoveEnd {
            center: self.center,
        });
        true
    }

    /// Moves the view by a screen-pixel offset, staying inside max bounds.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let z = f64::from(self.zoom);
        let moved = geo::unproject(geo::project(self.center, z).offset(dx, dy), z);
        let limited = self.limited(moved, self.zoom);
        if limited != self.center {
            self.center = limited;
            self.listeners.emit(&MapEvent::MoveEnd {
                center: self.center,
            });
        }
    }

    pub fn set_center(&mut self, center: LatLng) {
        self.center = self.limited(center, self.zoom);
        self.listeners.emit(&MapEvent::MoveEnd {
            center: self.center,
        });
    }

    fn limited(&self, center: LatLng, zoom: u8) -> LatLng {
        match &self.max_bounds {
            Some(bounds) => geo::limit_center(center, f64::from(zoom), self.view_size, bounds),
            None => center,
        }
    }

    /// World-pixel position of the view's top-left corner.
    #[must_use]
    pub fn view_origin(&self) -> PixelPoint {
        geo::project(self.center, f64::from(self.zoom))
            .offset(-self.view_size.width / 2.0, -self.view_size.height / 2.0)
    }

    /// Position of `latlng` relative to the view's top-left corner.
    #[must_use]
    pub fn latlng_to_view(&self, latlng: LatLng) -> (f64, f64) {
        let origin = self.view_origin();
        let p = geo::project(latlng, f64::from(self.zoom));
        (p.x - origin.x, p.y - origin.y)
    }

    #[must_use]
    pub fn view_to_latlng(&self, x: f64, y: f64) -> LatLng {
        geo::unproject(self.view_origin().offset(x, y), f64::from(self.zoom))
    }

    // ---------------------------------------------------------------------
    // Base layers
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn base_layers(&self) -> &[TileLayer] {
        &self.base_layers
    }

    #[must_use]
    pub fn active_base_layer(&self) -> Option<&TileLayer> {
        self.active_base.and_then(|index| self.base_layers.get(index))
    }

    /// Switches the active base layer by name. Base layers are exclusive.
    pub fn select_base_layer(&mut self, name: &str) -> bool {
        let Some(index) = self.base_layers.iter().position(|l| l.name() == name) else {
            return false;
        };
        if self.active_base == Some(index) {
            return false;
        }
        self.active_base = Some(index);
        self.listeners.emit(&MapEvent::BaseLayerChange {
            name: name.to_string(),
        });
        true
    }

    /// Tiles of the active base layer covering the current view.
    #[must_use]
    pub fn visible_tiles(&self) -> Vec<TilePlacement> {
        self.active_base_layer()
            .map(|layer| layer.covering_tiles(self.center, self.zoom, self.view_size))
            .unwrap_or_default()
    }

    // ---------------------------------------------------------------------
    // Overlay groups
    // ---------------------------------------------------------------------

    /// Creates an empty group that is not yet on the map.
    pub fn create_group(&mut self, name: impl Into<String>) -> GroupId {
        let id = GroupId(self.next_group);
        self.next_group += 1;
        self.groups.push(LayerGroup::new(id, name));
        id
    }

    #[must_use]
    pub fn groups(&self) -> &[LayerGroup] {
        &self.groups
    }

    #[must_use]
    pub fn group(&self, id: GroupId) -> Option<&LayerGroup> {
        self.groups.iter().find(|g| g.id() == id)
    }

    #[must_use]
    pub fn group_by_name(&self, name: &str) -> Option<&LayerGroup> {
        self.groups.iter().find(|g| g.name() == name)
    }

    #[must_use]
    pub fn has_layer(&self, group: GroupId) -> bool {
        self.on_map.contains(&group)
    }

    /// Shows a group. Returns whether it was hidden before.
    pub fn add_layer(&mut self, group: GroupId) -> bool {
        if self.group(group).is_none() || !self.on_map.insert(group) {
            return false;
        }
        if let Some(name) = self.overlay_name(group) {
            self.listeners.emit(&MapEvent::OverlayAdd { name });
        }
        true
    }

    /// Hides a group, closing the popup if one of its features owns it.
    pub fn remove_layer(&mut self, group: GroupId) -> bool {
        if !self.on_map.remove(&group) {
            return false;
        }
        let popup_in_group = self
            .popup
            .is_some_and(|open| self.group(group).is_some_and(|g| g.contains(open.feature)));
        if popup_in_group {
            self.close_popup();
        }
        if let Some(name) = self.overlay_name(group) {
            self.listeners.emit(&MapEvent::OverlayRemove { name });
        }
        true
    }

    fn overlay_name(&self, group: GroupId) -> Option<String> {
        self.layer_control
            .as_ref()
            .and_then(|control| control.overlays().iter().find(|e| e.group == group))
            .map(|entry| entry.name.clone())
            .or_else(|| self.group(group).map(|g| g.name().to_string()))
    }

    // ---------------------------------------------------------------------
    // Controls
    // ---------------------------------------------------------------------

    /// Installs a layer control listing every base layer.
    pub fn add_layer_control(&mut self, position: ControlPosition) {
        let mut control = LayerControl::new(position);
        for layer in &self.base_layers {
            control.add_base_layer(layer.name());
        }
        self.layer_control = Some(control);
    }

    /// Adds a named toggle entry for `group` to the layer control, creating
    /// the control at its default position if needed.
    pub fn register_overlay(&mut self, name: impl Into<String>, group: GroupId) {
        if self.layer_control.is_none() {
            self.add_layer_control(ControlPosition::default());
        }
        if let Some(control) = self.layer_control.as_mut() {
            control.add_overlay(name, group);
        }
    }

    #[must_use]
    pub fn layer_control(&self) -> Option<&LayerControl> {
        self.layer_control.as_ref()
    }

    pub fn set_layer_control_collapsed(&mut self, collapsed: bool) {
        if let Some(control) = self.layer_control.as_mut() {
            control.set_collapsed(collapsed);
        }
    }

    /// Overlay names with their checked state, in control order.
    #[must_use]
    pub fn overlay_states(&self) -> Vec<(String, bool)> {
        self.layer_control
            .as_ref()
            .map(|control| {
                control
                    .overlays()
                    .iter()
                    .map(|entry| (entry.name.clone(), self.has_layer(entry.group)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Checks or unchecks an overlay by its control name.
    pub fn set_overlay_active(&mut self, name: &str, active: bool) -> bool {
        let Some(group) = self
            .layer_control
            .as_ref()
            .and_then(|control| control.overlay_group(name))
        else {
            return false;
        };
        if active {
            self.add_layer(group)
        } else {
            self.remove_layer(group)
        }
    }

    pub fn toggle_overlay(&mut self, name: &str) -> bool {
        let active = self
            .layer_control
            .as_ref()
            .and_then(|control| control.overlay_group(name))
            .is_some_and(|group| self.has_layer(group));
        self.set_overlay_active(name, !active)
    }

    pub fn add_zoom_control(&mut self, position: ControlPosition) {
        self.zoom_control = Some(ZoomControl::new(position));
    }

    pub fn remove_zoom_control(&mut self) {
        self.zoom_control = None;
    }

    #[must_use]
    pub fn zoom_control(&self) -> Option<&ZoomControl> {
        self.zoom_control.as_ref()
    }

    // ---------------------------------------------------------------------
    // Features
    // ---------------------------------------------------------------------

    /// Inserts `feature` into `group`. It is drawn as soon as the group is on
    /// the map. `None` only for a group id from another instance.
    pub fn add_feature(&mut self, group: GroupId, feature: Feature) -> Option<FeatureId> {
        let id = FeatureId(self.next_feature);
        let target = self.groups.iter_mut().find(|g| g.id() == group)?;
        target.insert(id, feature);
        self.next_feature += 1;
        Some(id)
    }

    /// Removes a feature from whichever group holds it.
    pub fn remove_feature(&mut self, id: FeatureId) -> Option<Feature> {
        if self.popup.is_some_and(|open| open.feature == id) {
            self.close_popup();
        }
        self.groups.iter_mut().find_map(|g| g.remove(id))
    }

    #[must_use]
    pub fn feature(&self, id: FeatureId) -> Option<&Feature> {
        self.groups.iter().find_map(|g| g.get(id))
    }

    fn feature_mut(&mut self, id: FeatureId) -> Option<&mut Feature> {
        self.groups.iter_mut().find_map(|g| g.get_mut(id))
    }

    fn group_of(&self, id: FeatureId) -> Option<GroupId> {
        self.groups.iter().find(|g| g.contains(id)).map(LayerGroup::id)
    }

    #[must_use]
    pub fn is_feature_visible(&self, id: FeatureId) -> bool {
        self.group_of(id).is_some_and(|group| self.has_layer(group))
    }

    /// Binds popup markup to a feature.
    pub fn bind_popup(&mut self, id: FeatureId, markup: &str) -> bool {
        match self.feature_mut(id) {
            Some(feature) => {
                feature.set_popup(markup);
                true
            }
            None => false,
        }
    }

    /// Sets the radius (meters) of a circle feature.
    pub fn set_radius(&mut self, id: FeatureId, radius: f64) -> bool {
        self.feature_mut(id).is_some_and(|f| f.set_radius(radius))
    }

    /// Features that are currently drawn, in paint order: paths first, then
    /// markers on top, each in group then insertion order.
    pub fn visible_features(&self) -> impl Iterator<Item = (FeatureId, &Feature)> + '_ {
        let paths = self
            .visible_groups()
            .flat_map(|g| g.iter())
            .filter(|(_, f)| !f.is_marker());
        let markers = self
            .visible_groups()
            .flat_map(|g| g.iter())
            .filter(|(_, f)| f.is_marker());
        paths.chain(markers)
    }

    fn visible_groups(&self) -> impl Iterator<Item = &LayerGroup> + '_ {
        self.groups
            .iter()
            .filter(move |g| self.on_map.contains(&g.id()))
    }

    /// Topmost visible feature under the view point `(x, y)`.
    #[must_use]
    pub fn feature_at(&self, x: f64, y: f64) -> Option<FeatureId> {
        let origin = self.view_origin();
        let point = origin.offset(x, y);
        let zoom = f64::from(self.zoom);
        let painted: Vec<(FeatureId, &Feature)> = self.visible_features().collect();
        painted
            .into_iter()
            .rev()
            .find(|(_, feature)| feature.hit_test(point, zoom))
            .map(|(id, _)| id)
    }

    // ---------------------------------------------------------------------
    // Popups
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn open_popup(&self) -> Option<OpenPopup> {
        self.popup
    }

    /// Opens the feature's popup at its default anchor.
    pub fn open_popup_for(&mut self, id: FeatureId) -> bool {
        let Some(anchor) = self.feature(id).map(Feature::anchor) else {
            return false;
        };
        self.open_popup_at(id, anchor)
    }

    /// Opens the feature's popup pointing at `anchor`. Only one popup is open
    /// at a time; features without a popup or on hidden groups are ignored.
    pub fn open_popup_at(&mut self, id: FeatureId, anchor: LatLng) -> bool {
        let has_popup = self.feature(id).is_some_and(|f| f.popup().is_some());
        if !has_popup || !self.is_feature_visible(id) {
            return false;
        }
        if self.popup.is_some_and(|open| open.feature != id) {
            self.close_popup();
        }
        self.popup = Some(OpenPopup { feature: id, anchor });
        self.listeners.emit(&MapEvent::PopupOpen { feature: id });
        true
    }

    pub fn close_popup(&mut self) -> Option<FeatureId> {
        let open = self.popup.take()?;
        self.listeners.emit(&MapEvent::PopupClose {
            feature: open.feature,
        });
        Some(open.feature)
    }

    /// Resolves a click at view point `(x, y)`.
    ///
    /// Clicking a marker toggles its popup; clicking a path opens its popup
    /// at the clicked coordinate; clicking empty map closes the popup only
    /// when `close_popup_on_click` is set.
    pub fn click(&mut self, x: f64, y: f64) -> ClickOutcome {
        let Some(id) = self.feature_at(x, y) else {
            if self.close_popup_on_click {
                if let Some(closed) = self.close_popup() {
                    return ClickOutcome::PopupClosed(closed);
                }
            }
            return ClickOutcome::Nothing;
        };

        let Some((is_marker, has_popup)) = self
            .feature(id)
            .map(|f| (f.is_marker(), f.popup().is_some()))
        else {
            return ClickOutcome::Nothing;
        };
        if !has_popup {
            return ClickOutcome::FeatureHit(id);
        }

        if is_marker {
            if self.popup.is_some_and(|open| open.feature == id) {
                self.close_popup();
                ClickOutcome::PopupClosed(id)
            } else {
                self.open_popup_for(id);
                ClickOutcome::PopupOpened(id)
            }
        } else {
            let at = self.view_to_latlng(x, y);
            self.open_popup_at(id, at);
            ClickOutcome::PopupOpened(id)
        }
    }

    // ---------------------------------------------------------------------
    // Listeners
    // ---------------------------------------------------------------------

    pub fn on(
        &mut self,
        kind: EventKind,
        listener: impl FnMut(&MapEvent) + Send + 'static,
    ) -> ListenerId {
        self.listeners.on(kind, listener)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.listeners.off(id)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::mount::MountRegistry;
    use crate::map::style::PathStyle;
    use std::sync::{Arc, Mutex};

    fn instance_with(options: MapOptions) -> (MountRegistry, MapInstance) {
        let registry = MountRegistry::new();
        let handle = registry.bind(ViewRegionId::default()).expect("bind");
        let instance = MapInstance::initialize(handle, options);
        (registry, instance)
    }

    fn world_options() -> MapOptions {
        MapOptions {
            center: LatLng::new(20.0, 0.0),
            zoom: 2,
            max_bounds: Some(LatLngBounds::new(
                LatLng::new(-150.0, -240.0),
                LatLng::new(150.0, 240.0),
            )),
            base_layers: vec![TileLayer::new("OpenStreetMap", "https://t/{z}/{y}/{x}", "")],
            overlays: vec!["circles".into(), "markers".into()],
            ..MapOptions::default()
        }
    }

    #[test]
    fn initial_overlays_are_on_the_map() {
        let (_registry, map) = instance_with(world_options());
        assert_eq!(map.groups().len(), 2);
        assert!(map.groups().iter().all(|g| map.has_layer(g.id())));
        assert_eq!(map.active_base_layer().map(TileLayer::name), Some("OpenStreetMap"));
    }

    #[test]
    fn default_zoom_control_sits_top_left_and_can_be_replaced() {
        let (_registry, mut map) = instance_with(world_options());
        assert_eq!(
            map.zoom_control().map(ZoomControl::position),
            Some(ControlPosition::TopLeft)
        );
        map.add_zoom_control(ControlPosition::TopRight);
        assert_eq!(
            map.zoom_control().map(ZoomControl::position),
            Some(ControlPosition::TopRight)
        );
    }

    #[test]
    fn zoom_start_fires_only_on_change() {
        let (_registry, mut map) = instance_with(MapOptions {
            max_zoom: 3,
            ..world_options()
        });
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        map.on(EventKind::ZoomStart, move |event| {
            if let MapEvent::ZoomStart { from, to } = event {
                sink.lock().expect("lock").push((*from, *to));
            }
        });

        assert!(map.zoom_in());
        assert!(!map.zoom_in());
        assert!(!map.set_zoom(3));
        assert!(map.zoom_out());

        assert_eq!(*seen.lock().expect("lock"), vec![(2, 3), (3, 2)]);
    }

    #[test]
    fn zoom_range_beyond_tile_levels_is_capped() {
        let (_registry, mut map) = instance_with(MapOptions {
            zoom: 64,
            min_zoom: 0,
            max_zoom: 64,
            base_layers: vec![
                TileLayer::new("OpenStreetMap", "https://t/{z}/{y}/{x}", "").with_zoom_range(0, 64),
            ],
            ..world_options()
        });
        assert_eq!(map.max_zoom(), MAX_TILE_ZOOM);
        assert_eq!(map.zoom(), MAX_TILE_ZOOM);
        assert!(!map.zoom_in());
        assert!(!map.visible_tiles().is_empty());
    }

    #[test]
    fn zoom_around_keeps_point_under_cursor() {
        let (_registry, mut map) = instance_with(world_options());
        let (x, y) = (500.0, 300.0);
        let before = map.view_to_latlng(x, y);
        assert!(map.zoom_around(3, x, y));
        let after = map.view_to_latlng(x, y);
        assert!((before.lat - after.lat).abs() < 0.5);
        assert!((before.lng - after.lng).abs() < 0.5);
    }

    #[test]
    fn hiding_group_closes_its_popup_only() {
        let (_registry, mut map) = instance_with(world_options());
        let markers = map.group_by_name("markers").map(LayerGroup::id).expect("group");
        let circles = map.group_by_name("circles").map(LayerGroup::id).expect("group");
        let marker = map
            .add_feature(markers, Feature::marker(LatLng::new(51.5, -0.09)).with_popup("hi"))
            .expect("added");
        map.add_feature(
            circles,
            Feature::circle(LatLng::new(0.0, 0.0), 10.0, PathStyle::default()),
        );

        assert!(map.open_popup_for(marker));
        map.remove_layer(circles);
        assert_eq!(map.open_popup().map(|p| p.feature), Some(marker));

        map.remove_layer(markers);
        assert!(map.open_popup().is_none());
        assert!(!map.is_feature_visible(marker));

        map.add_layer(markers);
        assert!(map.is_feature_visible(marker));
        assert!(map.open_popup().is_none());
    }

    #[test]
    fn features_on_hidden_groups_cannot_open_popups() {
        let (_registry, mut map) = instance_with(world_options());
        let markers = map.group_by_name("markers").map(LayerGroup::id).expect("group");
        let marker = map
            .add_feature(markers, Feature::marker(LatLng::new(0.0, 0.0)).with_popup("x"))
            .expect("added");
        map.remove_layer(markers);
        assert!(!map.open_popup_for(marker));
    }

    #[test]
    fn marker_click_toggles_and_empty_click_keeps_popup_when_disabled() {
        let (_registry, mut map) = instance_with(MapOptions {
            close_popup_on_click: false,
            ..world_options()
        });
        let markers = map.group_by_name("markers").map(LayerGroup::id).expect("group");
        let position = LatLng::new(51.5, -0.09);
        let marker = map
            .add_feature(markers, Feature::marker(position).with_popup("hello"))
            .expect("added");

        let (mx, my) = map.latlng_to_view(position);
        assert_eq!(map.click(mx, my - 20.0), ClickOutcome::PopupOpened(marker));
        assert_eq!(map.click(5.0, 5.0), ClickOutcome::Nothing);
        assert!(map.open_popup().is_some());
        assert_eq!(map.click(mx, my - 20.0), ClickOutcome::PopupClosed(marker));
        assert!(map.open_popup().is_none());
    }

    #[test]
    fn empty_click_closes_popup_when_enabled() {
        let (_registry, mut map) = instance_with(MapOptions {
            close_popup_on_click: true,
            ..world_options()
        });
        let markers = map.group_by_name("markers").map(LayerGroup::id).expect("group");
        let marker = map
            .add_feature(markers, Feature::marker(LatLng::new(51.5, -0.09)).with_popup("x"))
            .expect("added");
        map.open_popup_for(marker);
        assert_eq!(map.click(5.0, 5.0), ClickOutcome::PopupClosed(marker));
    }

    #[test]
    fn path_click_anchors_popup_at_click() {
        let (_registry, mut map) = instance_with(world_options());
        let circles = map.group_by_name("circles").map(LayerGroup::id).expect("group");
        let center = LatLng::new(51.508, -0.11);
        let circle = map
            .add_feature(
                circles,
                Feature::circle(center, 500_000.0, PathStyle::default())
                    .with_popup("I am a circle."),
            )
            .expect("added");

        let (cx, cy) = map.latlng_to_view(center);
        assert_eq!(map.click(cx + 3.0, cy + 3.0), ClickOutcome::PopupOpened(circle));
        let anchor = map.open_popup().expect("open").anchor;
        assert_ne!(anchor, center);
        let (ax, ay) = map.latlng_to_view(anchor);
        assert!((ax - (cx + 3.0)).abs() < 1e-6 && (ay - (cy + 3.0)).abs() < 1e-6);
    }

    #[test]
    fn markers_are_hit_before_paths() {
        let (_registry, mut map) = instance_with(world_options());
        let circles = map.group_by_name("circles").map(LayerGroup::id).expect("group");
        let markers = map.group_by_name("markers").map(LayerGroup::id).expect("group");
        let here = LatLng::new(51.5, -0.09);
        map.add_feature(circles, Feature::circle(here, 500_000.0, PathStyle::default()));
        let marker = map.add_feature(markers, Feature::marker(here)).expect("added");

        let (x, y) = map.latlng_to_view(here);
        assert_eq!(map.feature_at(x, y - 10.0), Some(marker));
    }

    #[test]
    fn pan_stays_inside_bounds() {
        let (_registry, mut map) = instance_with(world_options());
        map.pan_by(0.0, -10_000.0);
        let top = map.view_origin().y;
        assert!(top >= -1.0, "view escaped the top of the world: {top}");
    }

    #[test]
    fn destroy_runs_unload_and_releases_region() {
        let registry = MountRegistry::new();
        let handle = registry.bind(ViewRegionId::default()).expect("bind");
        let mut map = MapInstance::initialize(handle, world_options());
        let unloaded = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&unloaded);
        map.on(EventKind::Unload, move |_| {
            *flag.lock().expect("lock") = true;
        });

        map.destroy();
        assert!(*unloaded.lock().expect("lock"));
        assert_eq!(registry.bound_count(), 0);
    }

    #[test]
    fn overlay_toggle_goes_through_layer_control_names() {
        let (_registry, mut map) = instance_with(world_options());
        let circles = map.group_by_name("circles").map(LayerGroup::id).expect("group");
        map.register_overlay("circles", circles);

        assert!(map.toggle_overlay("circles"));
        assert_eq!(map.overlay_states(), vec![("circles".to_string(), false)]);
        assert!(map.toggle_overlay("circles"));
        assert_eq!(map.overlay_states(), vec![("circles".to_string(), true)]);
        assert!(!map.toggle_overlay("unknown"));
    }
}
