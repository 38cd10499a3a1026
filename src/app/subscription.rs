// SPDX-License-Identifier: MPL-2.0
//! Native event subscriptions.
//!
//! Pointer input reaches the map through its canvas; only window close
//! requests and the Escape key are routed from here.

use super::Message;
use crate::ui::map_view;
use iced::keyboard::{self, key::Named, Key};
use iced::{event, window, Subscription};

pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, window_id| match event {
        event::Event::Window(window::Event::CloseRequested) => {
            Some(Message::WindowCloseRequested(window_id))
        }
        event::Event::Keyboard(keyboard::Event::KeyPressed {
            key: Key::Named(Named::Escape),
            ..
        }) if status == event::Status::Ignored => {
            Some(Message::MapView(map_view::Message::ClosePopup))
        }
        _ => None,
    })
}
