// SPDX-License-Identifier: MPL-2.0
//! Message handlers for the application.

use super::Message;
use crate::ui::map_view::{self, Effect};
use iced::{window, Task};

/// Forwards a message to the map view and applies its effect.
pub fn handle_map_view_message(
    map_view: &mut map_view::State,
    message: map_view::Message,
) -> Task<Message> {
    let (effect, task) = map_view.handle_message(message);
    if let Effect::MountFailed(err) = effect {
        tracing::error!(error = %err, "map view stays unmounted");
    }
    task.map(Message::MapView)
}

/// Tears the map down before the window goes away.
pub fn handle_window_close(map_view: &mut map_view::State, id: window::Id) -> Task<Message> {
    map_view.unmount();
    tracing::info!("window closing");
    window::close(id)
}
