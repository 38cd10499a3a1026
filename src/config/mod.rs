// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, loaded from an
//! optional `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[view]` - Initial center and zoom, zoom range, pan boundary
//! - `[tiles]` - Base layer name, URL template, attribution, cache size
//! - `[controls]` - Zoom control position and popup click behavior
//!
//! Every field is optional; missing sections and fields use the values in
//! [`defaults`].
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. `--config-dir` on the command line
//! 3. Set `ICED_ATLAS_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use iced_atlas::config;
//!
//! let (mut config, _warning) = config::load();
//! config.view.zoom = 4;
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::map::{ControlPosition, LatLng, LatLngBounds};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Initial viewport and navigation limits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    /// Initial center as `[lat, lng]`.
    pub center: [f64; 2],
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
    /// Pan boundary as `[[south, west], [north, east]]`. An empty array
    /// (`max_bounds = []`) turns the limit off.
    #[serde(with = "bounds_format")]
    pub max_bounds: Option<[[f64; 2]; 2]>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            max_bounds: Some(DEFAULT_MAX_BOUNDS),
        }
    }
}

impl ViewConfig {
    #[must_use]
    pub fn center(&self) -> LatLng {
        LatLng::from(self.center)
    }

    #[must_use]
    pub fn max_bounds(&self) -> Option<LatLngBounds> {
        self.max_bounds
            .map(|[sw, ne]| LatLngBounds::new(LatLng::from(sw), LatLng::from(ne)))
    }

    /// Zoom range and initial zoom with `min <= zoom <= max <= MAX_ZOOM`
    /// restored.
    #[must_use]
    pub fn zoom_levels(&self) -> (u8, u8, u8) {
        let min = self.min_zoom.min(self.max_zoom).min(MAX_ZOOM);
        let max = self.max_zoom.max(self.min_zoom).min(MAX_ZOOM);
        (min, self.zoom.clamp(min, max), max)
    }
}

/// TOML has no null, so a disabled pan boundary is written as `[]`.
mod bounds_format {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    type Bounds = [[f64; 2]; 2];

    pub fn serialize<S>(bounds: &Option<Bounds>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let corners: &[[f64; 2]] = match bounds {
            Some(corners) => corners,
            None => &[],
        };
        corners.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Bounds>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let corners = Vec::<[f64; 2]>::deserialize(deserializer)?;
        match corners.as_slice() {
            [] => Ok(None),
            [south_west, north_east] => Ok(Some([*south_west, *north_east])),
            other => Err(D::Error::invalid_length(
                other.len(),
                &"an empty array or two [lat, lng] corners",
            )),
        }
    }
}

/// Base tile layer source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TilesConfig {
    pub name: String,
    /// URL template with `{z}`, `{x}`, `{y}` and optional `{s}`.
    pub url: String,
    pub attribution: String,
    /// Number of decoded tiles kept in memory.
    pub cache_capacity: usize,
}

impl Default for TilesConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_TILE_LAYER_NAME.to_string(),
            url: DEFAULT_TILE_URL.to_string(),
            attribution: DEFAULT_TILE_ATTRIBUTION.to_string(),
            cache_capacity: DEFAULT_TILE_CACHE_CAPACITY,
        }
    }
}

impl TilesConfig {
    #[must_use]
    pub fn clamped_cache_capacity(&self) -> usize {
        self.cache_capacity
            .clamp(MIN_TILE_CACHE_CAPACITY, MAX_TILE_CACHE_CAPACITY)
    }
}

/// Control placement and popup behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControlsConfig {
    pub zoom_position: ControlPosition,
    pub close_popup_on_click: bool,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            zoom_position: DEFAULT_ZOOM_POSITION,
            close_popup_on_click: DEFAULT_CLOSE_POPUP_ON_CLICK,
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub view: ViewConfig,

    #[serde(default)]
    pub tiles: TilesConfig,

    #[serde(default)]
    pub controls: ControlsConfig,
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). A missing file is not an
/// error; an unreadable or invalid one yields defaults plus a warning.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    let Some(path) = get_config_path_with_override(base_dir) else {
        return (Config::default(), None);
    };
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return (Config::default(), None);
    }
    match load_from_path(&path) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "config loaded");
            (config, None)
        }
        Err(err) => (
            Config::default(),
            Some(format!("{}: {err}", path.display())),
        ),
    }
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let mut config = Config::default();
        config.view.zoom = 5;
        config.view.max_bounds = None;
        config.tiles.name = "Streets".to_string();
        config.controls.zoom_position = ControlPosition::BottomLeft;
        config.controls.close_popup_on_click = true;

        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn partial_sections_fill_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [view]
            zoom = 7

            [controls]
            zoom_position = "bottom-right"
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.view.zoom, 7);
        assert_eq!(config.view.center, DEFAULT_CENTER);
        assert_eq!(config.view.max_bounds, Some(DEFAULT_MAX_BOUNDS));
        assert_eq!(config.tiles, TilesConfig::default());
        assert_eq!(config.controls.zoom_position, ControlPosition::BottomRight);
        assert!(!config.controls.close_popup_on_click);
    }

    #[test]
    fn empty_file_is_default_config() {
        let config: Config = toml::from_str("").expect("empty toml");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn view_bounds_are_normalized() {
        let view = ViewConfig {
            max_bounds: Some([[150.0, 240.0], [-150.0, -240.0]]),
            ..ViewConfig::default()
        };
        let bounds = view.max_bounds().expect("bounds");
        assert_abs_diff_eq!(bounds.south_west().lat, -150.0);
        assert_abs_diff_eq!(bounds.north_east().lng, 240.0);
    }

    #[test]
    fn inverted_zoom_range_is_repaired() {
        let view = ViewConfig {
            zoom: 9,
            min_zoom: 12,
            max_zoom: 4,
            ..ViewConfig::default()
        };
        assert_eq!(view.zoom_levels(), (4, 9, 12));
    }

    #[test]
    fn zoom_beyond_supported_range_is_capped() {
        let config: Config =
            toml::from_str("[view]\nzoom = 64\nmax_zoom = 64\n").expect("valid toml");
        assert_eq!(config.view.zoom_levels(), (DEFAULT_MIN_ZOOM, MAX_ZOOM, MAX_ZOOM));

        let config: Config =
            toml::from_str("[view]\nmin_zoom = 200\nmax_zoom = 255\n").expect("valid toml");
        assert_eq!(config.view.zoom_levels(), (MAX_ZOOM, MAX_ZOOM, MAX_ZOOM));
    }

    #[test]
    fn zoom_above_max_zoom_is_clamped() {
        let view = ViewConfig {
            zoom: 15,
            max_zoom: 10,
            ..ViewConfig::default()
        };
        assert_eq!(view.zoom_levels(), (DEFAULT_MIN_ZOOM, 10, 10));
    }

    #[test]
    fn absent_bounds_use_default_and_empty_bounds_disable_the_limit() {
        let absent: Config = toml::from_str("[view]\nzoom = 3\n").expect("valid toml");
        assert_eq!(absent.view.max_bounds, Some(DEFAULT_MAX_BOUNDS));

        let disabled: Config = toml::from_str("[view]\nmax_bounds = []\n").expect("valid toml");
        assert_eq!(disabled.view.max_bounds, None);
        assert!(disabled.view.max_bounds().is_none());
    }

    #[test]
    fn disabled_bounds_survive_a_save() {
        let mut config = Config::default();
        config.view.max_bounds = None;

        let serialized = toml::to_string_pretty(&config).expect("serialize");
        let reloaded: Config = toml::from_str(&serialized).expect("reload");
        assert_eq!(reloaded.view.max_bounds, None);
    }

    #[test]
    fn malformed_bounds_are_rejected() {
        let result: std::result::Result<Config, _> =
            toml::from_str("[view]\nmax_bounds = [[0.0, 0.0]]\n");
        assert!(result.is_err());
    }

    #[test]
    fn cache_capacity_is_clamped() {
        let tiles = TilesConfig {
            cache_capacity: 1,
            ..TilesConfig::default()
        };
        assert_eq!(tiles.clamped_cache_capacity(), MIN_TILE_CACHE_CAPACITY);
    }

    #[test]
    fn load_with_override_reports_invalid_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[view]\nzoom = \"high\"")
            .expect("write config");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_some());
    }

    #[test]
    fn load_with_override_missing_file_is_silent() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }
}
