// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{
    border,
    palette::{self, BLACK, WHITE},
    radius,
};
use iced::widget::button;
use iced::{Background, Border, Theme};

/// Square white map control button ("+", "−", layer toggle).
pub fn map_control(_theme: &Theme, status: button::Status) -> button::Style {
    let (background, text_color) = match status {
        button::Status::Hovered => (palette::GRAY_100, BLACK),
        button::Status::Pressed => (palette::GRAY_200, BLACK),
        button::Status::Disabled => (palette::GRAY_100, palette::GRAY_400),
        button::Status::Active => (WHITE, BLACK),
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border: Border {
            color: palette::GRAY_200,
            width: border::WIDTH_SM,
            radius: radius::NONE.into(),
        },
        snap: true,
        ..button::Style::default()
    }
}

/// Borderless text button used inside panels (collapse, popup close).
pub fn plain(_theme: &Theme, status: button::Status) -> button::Style {
    let text_color = match status {
        button::Status::Hovered | button::Status::Pressed => palette::GRAY_900,
        button::Status::Disabled => palette::GRAY_200,
        button::Status::Active => palette::GRAY_700,
    };

    button::Style {
        background: None,
        text_color,
        snap: true,
        ..button::Style::default()
    }
}
