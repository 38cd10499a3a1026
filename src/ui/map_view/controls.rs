// SPDX-License-Identifier: MPL-2.0
//! Map controls overlaid on the canvas: zoom buttons, the layer control and
//! the attribution line.
//!
//! Controls are grouped per corner; within a corner the layer control comes
//! first, then the zoom buttons. Each corner becomes one full-size container
//! layer of the map view's stack.

use super::component::Message;
use crate::map::control::{ControlPosition, LayerControl, ZoomControl};
use crate::map::MapInstance;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, checkbox, radio, rule, text, Column, Container};
use iced::{Element, Length};

const CORNERS: [ControlPosition; 4] = [
    ControlPosition::TopLeft,
    ControlPosition::TopRight,
    ControlPosition::BottomLeft,
    ControlPosition::BottomRight,
];

fn alignment(position: ControlPosition) -> (Horizontal, Vertical) {
    match position {
        ControlPosition::TopLeft => (Horizontal::Left, Vertical::Top),
        ControlPosition::TopRight => (Horizontal::Right, Vertical::Top),
        ControlPosition::BottomLeft => (Horizontal::Left, Vertical::Bottom),
        ControlPosition::BottomRight => (Horizontal::Right, Vertical::Bottom),
    }
}

/// One overlay layer per occupied corner, plus the attribution.
pub fn view(map: &MapInstance) -> Vec<Element<'_, Message>> {
    let mut layers = Vec::new();

    for corner in CORNERS {
        let mut column = Column::new().spacing(spacing::MD);
        let mut occupied = false;

        if let Some(control) = map.layer_control().filter(|c| c.position() == corner) {
            column = column.push(layer_control(map, control));
            occupied = true;
        }
        if let Some(control) = map.zoom_control().filter(|c| c.position() == corner) {
            column = column.push(zoom_control(map, control));
            occupied = true;
        }

        if occupied {
            let (horizontal, vertical) = alignment(corner);
            layers.push(
                Container::new(column)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(horizontal)
                    .align_y(vertical)
                    .padding(spacing::MD)
                    .into(),
            );
        }
    }

    if let Some(layer) = map.active_base_layer() {
        let line = Container::new(text(layer.attribution().plain_text()).size(typography::CAPTION))
            .padding([spacing::XXS, spacing::SM])
            .style(styles::container::attribution);
        layers.push(
            Container::new(line)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(Horizontal::Right)
                .align_y(Vertical::Bottom)
                .into(),
        );
    }

    layers
}

fn zoom_control<'a>(map: &MapInstance, control: &'a ZoomControl) -> Element<'a, Message> {
    let glyph_button = |glyph: &'a str, message: Message, enabled: bool| {
        let label = text(glyph)
            .size(typography::CONTROL_GLYPH)
            .width(Length::Fill)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center);
        button(label)
            .width(Length::Fixed(sizing::CONTROL_BUTTON))
            .height(Length::Fixed(sizing::CONTROL_BUTTON))
            .padding(0)
            .on_press_maybe(enabled.then_some(message))
            .style(styles::button::map_control)
    };

    let zoom_in = glyph_button(
        control.zoom_in_text,
        Message::ZoomIn,
        map.zoom() < map.max_zoom(),
    );
    let zoom_out = glyph_button(
        control.zoom_out_text,
        Message::ZoomOut,
        map.zoom() > map.min_zoom(),
    );

    Container::new(Column::new().push(zoom_in).push(zoom_out))
        .style(styles::container::control_panel)
        .into()
}

fn layer_control<'a>(map: &MapInstance, control: &LayerControl) -> Element<'a, Message> {
    if control.is_collapsed() {
        let toggle = button(
            text("Layers")
                .size(typography::BODY)
                .width(Length::Fill)
                .align_x(Horizontal::Center),
        )
        .width(Length::Fixed(sizing::LAYER_TOGGLE * 1.5))
        .height(Length::Fixed(sizing::LAYER_TOGGLE))
        .padding(spacing::XS)
        .on_press(Message::LayerControlExpanded(true))
        .style(styles::button::map_control);
        return Container::new(toggle)
            .style(styles::container::control_panel)
            .into();
    }

    let active_base = map
        .active_base_layer()
        .and_then(|active| map.base_layers().iter().position(|l| l.name() == active.name()));

    let mut bases = Column::new().spacing(spacing::XS);
    for (index, name) in control.base_layers().iter().enumerate() {
        bases = bases.push(
            radio(name.clone(), index, active_base, Message::BaseLayerSelected)
                .size(typography::BODY)
                .text_size(typography::BODY),
        );
    }

    let mut overlays = Column::new().spacing(spacing::XS);
    for (name, active) in map.overlay_states() {
        let toggled = name.clone();
        overlays = overlays.push(
            checkbox(active)
                .label(name)
                .text_size(typography::BODY)
                .on_toggle(move |active| Message::OverlayToggled {
                    name: toggled.clone(),
                    active,
                }),
        );
    }

    let collapse = button(text("\u{00d7}").size(typography::BODY))
        .padding(0)
        .on_press(Message::LayerControlExpanded(false))
        .style(styles::button::plain);

    let body = Column::new()
        .spacing(spacing::SM)
        .push(collapse)
        .push(bases)
        .push(rule::horizontal(1))
        .push(overlays);

    Container::new(body)
        .padding([spacing::SM, spacing::MD])
        .style(styles::container::control_panel)
        .into()
}
