// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.

use super::Message;
use crate::ui::map_view;
use iced::widget::Container;
use iced::{Element, Length};

/// The map view fills the whole window.
pub fn view(map_view: &map_view::State) -> Element<'_, Message> {
    Container::new(map_view.view().map(Message::MapView))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
