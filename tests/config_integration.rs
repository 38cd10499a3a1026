// SPDX-License-Identifier: MPL-2.0
//! Configuration files feeding the mounted map view.

use iced_atlas::config::{self, Config, DEFAULT_ZOOM, MAX_ZOOM};
use iced_atlas::map::{ControlPosition, LatLng, MountRegistry, ViewRegionId};
use iced_atlas::ui::map_view::{Message, State};
use std::fs;
use tempfile::tempdir;

fn mount_with(config: Config) -> State {
    let mut state = State::new(MountRegistry::new(), ViewRegionId::default(), config);
    let _ = state.handle_message(Message::Mount);
    state
}

#[test]
fn missing_file_yields_defaults_without_warning() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let (config, warning) = config::load_with_override(Some(dir.path().to_path_buf()));

    assert_eq!(config, Config::default());
    assert!(warning.is_none());
}

#[test]
fn invalid_file_yields_defaults_with_warning() {
    let dir = tempdir().expect("Failed to create temporary directory");
    fs::write(dir.path().join("settings.toml"), "[view\nzoom = ").expect("write");

    let (config, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert_eq!(config.view.zoom, DEFAULT_ZOOM);
    assert!(warning.is_some_and(|w| w.contains("settings.toml")));
}

#[test]
fn saved_settings_drive_the_mounted_view() {
    let dir = tempdir().expect("Failed to create temporary directory");

    let mut custom = Config::default();
    custom.view.center = [48.85, 2.35];
    custom.view.zoom = 6;
    custom.view.max_bounds = None;
    custom.tiles.name = "Streets".to_string();
    custom.controls.zoom_position = ControlPosition::BottomLeft;
    config::save_with_override(&custom, Some(dir.path().to_path_buf()))
        .expect("Failed to write config file");

    let (loaded, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert!(warning.is_none());
    assert_eq!(loaded, custom);

    let state = mount_with(loaded);
    let map = state.map().expect("mounted");
    assert_eq!(map.zoom(), 6);
    assert_eq!(map.center(), LatLng::new(48.85, 2.35));
    assert_eq!(map.active_base_layer().map(|l| l.name()), Some("Streets"));
    assert_eq!(
        map.zoom_control().map(|c| c.position()),
        Some(ControlPosition::BottomLeft)
    );
    assert!(map.max_bounds().is_none());
}

#[test]
fn close_popup_on_click_setting_is_honored() {
    let mut custom = Config::default();
    custom.controls.close_popup_on_click = true;
    let mut state = mount_with(custom);
    assert!(state.map().expect("mounted").close_popup_on_click());

    let (x, y) = state
        .map()
        .expect("mounted")
        .latlng_to_view(LatLng::new(-40.0, 100.0));
    let outcome = state.map_mut().expect("mounted").click(x, y);
    assert!(matches!(outcome, iced_atlas::map::ClickOutcome::PopupClosed(_)));
}

#[test]
fn out_of_range_zoom_from_file_mounts_at_deepest_level() {
    let dir = tempdir().expect("Failed to create temporary directory");
    fs::write(
        dir.path().join("settings.toml"),
        "[view]\nzoom = 64\nmax_zoom = 64\n",
    )
    .expect("write");

    let (loaded, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert!(warning.is_none());

    let mut state = mount_with(loaded);
    let map = state.map().expect("mounted");
    assert_eq!(map.zoom(), MAX_ZOOM);
    assert_eq!(map.max_zoom(), MAX_ZOOM);

    let _ = state.handle_message(Message::ZoomIn);
    assert_eq!(state.map().expect("mounted").zoom(), MAX_ZOOM);
}
