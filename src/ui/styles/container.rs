// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{
    border, opacity,
    palette::{self, WHITE},
    radius, shadow,
};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// White rounded panel holding a map control.
pub fn control_panel(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(WHITE)),
        text_color: Some(palette::GRAY_900),
        border: Border {
            color: Color {
                a: opacity::OVERLAY_SUBTLE,
                ..palette::BLACK
            },
            width: border::WIDTH_MD,
            radius: radius::SM.into(),
        },
        shadow: shadow::CONTROL,
        ..Default::default()
    }
}

/// Translucent strip behind the attribution text.
pub fn attribution(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::ATTRIBUTION,
            ..WHITE
        })),
        text_color: Some(palette::GRAY_700),
        ..Default::default()
    }
}

/// Background shown where no tile has been drawn.
pub fn map_background(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::MAP_BACKGROUND)),
        ..Default::default()
    }
}
