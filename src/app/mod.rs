// SPDX-License-Identifier: MPL-2.0
//! Application root state.
//!
//! The `App` struct owns the map view component, loads the configuration on
//! boot and mounts the map. Teardown happens before the window closes so the
//! view region is released and listeners are removed explicitly.

mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::config;
use crate::map::{MountRegistry, ViewRegionId};
use crate::ui::map_view;
use iced::{window, Element, Subscription, Task, Theme};

pub const APP_TITLE: &str = "IcedAtlas";
pub const WINDOW_DEFAULT_HEIGHT: u32 = 650;
pub const WINDOW_DEFAULT_WIDTH: u32 = 800;
pub const MIN_WINDOW_HEIGHT: u32 = 300;
pub const MIN_WINDOW_WIDTH: u32 = 400;

/// Root Iced application state.
#[derive(Debug)]
pub struct App {
    map_view: map_view::State,
}

/// Builds the window settings.
#[allow(clippy::cast_precision_loss)]
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        exit_on_close_request: false,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires the boot function to be `Fn`; flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads the configuration and mounts the map view.
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, warning) =
            config::load_with_override(flags.config_dir.as_ref().map(std::path::PathBuf::from));
        if let Some(warning) = warning {
            tracing::warn!("{warning}");
        }

        let mut app = Self {
            map_view: map_view::State::new(MountRegistry::new(), ViewRegionId::default(), config),
        };
        let task = update::handle_map_view_message(&mut app.map_view, map_view::Message::Mount);
        (app, task)
    }

    #[must_use]
    pub fn map_view(&self) -> &map_view::State {
        &self.map_view
    }

    fn title(&self) -> String {
        APP_TITLE.to_string()
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create_event_subscription()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::MapView(message) => {
                update::handle_map_view_message(&mut self.map_view, message)
            }
            Message::WindowCloseRequested(id) => {
                update::handle_window_close(&mut self.map_view, id)
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        view::view(&self.map_view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_app_mounts_the_map() {
        let dir = tempfile::tempdir().expect("temp dir");
        let (app, _task) = App::new(Flags {
            config_dir: Some(dir.path().to_string_lossy().into_owned()),
            log_level: None,
        });
        assert!(app.map_view().is_mounted());
    }

    #[test]
    fn window_close_unmounts_before_closing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let (mut app, _task) = App::new(Flags {
            config_dir: Some(dir.path().to_string_lossy().into_owned()),
            log_level: None,
        });
        let _ = app.update(Message::WindowCloseRequested(window::Id::unique()));
        assert!(!app.map_view().is_mounted());
        assert_eq!(app.map_view().registry().bound_count(), 0);
    }

    #[test]
    fn window_settings_use_default_size() {
        let settings = window_settings();
        assert_eq!(settings.size.width, 800.0);
        assert_eq!(settings.size.height, 650.0);
        assert!(!settings.exit_on_close_request);
    }
}
