// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::ui::map_view;
use iced::window;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    MapView(map_view::Message),
    /// Window close was requested; the map view is unmounted first.
    WindowCloseRequested(window::Id),
}

/// Runtime flags passed in from the command line.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Optional config directory (from `--config-dir`), overrides the
    /// environment variable and the platform default.
    pub config_dir: Option<String>,
    /// Optional log level (from `--log-level`).
    pub log_level: Option<String>,
}
