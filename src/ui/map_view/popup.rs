// SPDX-License-Identifier: MPL-2.0
//! Popup bubble layout and drawing.
//!
//! The bubble sits above its tip point, centered horizontally, with the close
//! button in its top-right corner. Text width is estimated from character
//! counts so layout stays a pure function that the canvas can use for both
//! drawing and hit-testing.

use crate::map::popup::{RichText, Span};
use crate::ui::design_tokens::{palette, radius, sizing, typography};
use iced::font::{self, Font};
use iced::widget::canvas::{Frame, Path, Stroke, Text};
use iced::{Color, Point, Rectangle, Renderer, Size};

/// Inner padding: top, right, bottom, left.
const PADDING: (f32, f32, f32, f32) = (13.0, 24.0, 13.0, 20.0);

/// Average glyph advance as a fraction of the font size.
const GLYPH_ADVANCE: f32 = 0.55;

const CLOSE_GLYPH_SIZE: f32 = 18.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupLayout {
    /// Point the tip touches, in view coordinates.
    pub tip: Point,
    pub bubble: Rectangle,
    pub close_button: Rectangle,
    pub line_height: f32,
}

impl PopupLayout {
    #[must_use]
    pub fn compute(tip: Point, content: &RichText) -> Self {
        let size = typography::POPUP;
        let line_height = size * typography::LINE_HEIGHT;

        let widest = content
            .lines()
            .iter()
            .map(|line| line.iter().map(|span| span.text.chars().count()).sum::<usize>())
            .max()
            .unwrap_or(0);
        let line_count = content.lines().len().max(1);

        #[allow(clippy::cast_precision_loss)]
        let text_width = widest as f32 * size * GLYPH_ADVANCE;
        let width = (text_width + PADDING.1 + PADDING.3)
            .clamp(sizing::POPUP_MIN_WIDTH, sizing::POPUP_MAX_WIDTH);
        #[allow(clippy::cast_precision_loss)]
        let height = line_count as f32 * line_height + PADDING.0 + PADDING.2;

        let bubble = Rectangle {
            x: tip.x - width / 2.0,
            y: tip.y - sizing::POPUP_TIP - height,
            width,
            height,
        };
        let close_button = Rectangle {
            x: bubble.x + bubble.width - sizing::POPUP_CLOSE,
            y: bubble.y,
            width: sizing::POPUP_CLOSE,
            height: sizing::POPUP_CLOSE,
        };

        Self {
            tip,
            bubble,
            close_button,
            line_height,
        }
    }

    /// Whether `point` falls on the bubble or its tip.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        let tip_zone = Rectangle {
            x: self.tip.x - sizing::POPUP_TIP,
            y: self.tip.y - sizing::POPUP_TIP,
            width: sizing::POPUP_TIP * 2.0,
            height: sizing::POPUP_TIP,
        };
        self.bubble.contains(point) || tip_zone.contains(point)
    }

    #[must_use]
    pub fn close_contains(&self, point: Point) -> bool {
        self.close_button.contains(point)
    }
}

fn span_font(span: &Span) -> Font {
    Font {
        weight: if span.bold {
            font::Weight::Bold
        } else {
            font::Weight::Normal
        },
        style: if span.italic {
            font::Style::Italic
        } else {
            font::Style::Normal
        },
        ..Font::DEFAULT
    }
}

/// Draws the bubble, its tip, the close glyph and the styled text.
pub fn draw(frame: &mut Frame<Renderer>, layout: &PopupLayout, content: &RichText) {
    let size = typography::POPUP;

    let bubble = Path::rounded_rectangle(
        layout.bubble.position(),
        Size::new(layout.bubble.width, layout.bubble.height),
        radius::LG.into(),
    );
    let tip = Path::new(|builder| {
        builder.move_to(Point::new(
            layout.tip.x - sizing::POPUP_TIP,
            layout.tip.y - sizing::POPUP_TIP - 0.5,
        ));
        builder.line_to(layout.tip);
        builder.line_to(Point::new(
            layout.tip.x + sizing::POPUP_TIP,
            layout.tip.y - sizing::POPUP_TIP - 0.5,
        ));
        builder.close();
    });

    let shadow = Color {
        a: 0.2,
        ..palette::BLACK
    };
    frame.stroke(&bubble, Stroke::default().with_width(2.0).with_color(shadow));
    frame.fill(&bubble, palette::WHITE);
    frame.fill(&tip, palette::WHITE);

    frame.fill_text(Text {
        content: "\u{00d7}".to_string(),
        position: Point::new(layout.close_button.x + 7.0, layout.close_button.y + 2.0),
        color: palette::GRAY_700,
        size: CLOSE_GLYPH_SIZE.into(),
        ..Text::default()
    });

    let left = layout.bubble.x + PADDING.3;
    let mut y = layout.bubble.y + PADDING.0;
    for line in content.lines() {
        let mut x = left;
        for span in line {
            frame.fill_text(Text {
                content: span.text.clone(),
                position: Point::new(x, y),
                color: palette::GRAY_900,
                size: size.into(),
                font: span_font(span),
                ..Text::default()
            });
            #[allow(clippy::cast_precision_loss)]
            {
                x += span.text.chars().count() as f32 * size * GLYPH_ADVANCE;
            }
        }
        y += layout.line_height;
    }
}
