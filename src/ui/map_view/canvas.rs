// SPDX-License-Identifier: MPL-2.0
//! Canvas program drawing tiles, features and the open popup.

use super::component::CanvasMessage;
use super::popup::{self, PopupLayout};
use crate::map::feature::{
    Circle, FeatureKind, Marker, Polygon, MARKER_ICON_ANCHOR, MARKER_ICON_SIZE,
    MARKER_POPUP_ANCHOR,
};
use crate::map::geo::{self, TILE_SIZE};
use crate::map::style::{CssColor, PathStyle};
use crate::map::{MapInstance, ViewSize};
use crate::tiles::{TileCache, TileState};
use crate::ui::design_tokens::palette;
use iced::mouse;
use iced::widget::canvas::{self, Frame, Geometry, Path, Stroke};
use iced::widget::Action;
use iced::{Color, Event, Point, Rectangle, Renderer, Size, Theme};

/// Segments used to approximate a projected circle.
const CIRCLE_SEGMENTS: usize = 72;

/// Wheel delta in pixels that counts as one notch.
const PIXELS_PER_NOTCH: f32 = 50.0;

/// Widget-local state: press tracking and the last size reported upstream.
#[derive(Debug, Default)]
pub struct CanvasState {
    pressed: bool,
    reported_size: Option<Size>,
}

pub struct MapCanvas<'a> {
    pub map: &'a MapInstance,
    pub tiles: &'a TileCache,
}

impl MapCanvas<'_> {
    fn popup_layout(&self) -> Option<(PopupLayout, &crate::map::popup::RichText)> {
        let open = self.map.open_popup()?;
        let feature = self.map.feature(open.feature)?;
        let content = feature.popup()?;
        let (x, y) = self.map.latlng_to_view(open.anchor);
        #[allow(clippy::cast_possible_truncation)]
        let mut tip = Point::new(x as f32, y as f32);
        if feature.is_marker() {
            tip.x += MARKER_POPUP_ANCHOR.0 as f32;
            tip.y += MARKER_POPUP_ANCHOR.1 as f32;
        }
        Some((PopupLayout::compute(tip, content), content))
    }
}

fn local_position(cursor: mouse::Cursor, bounds: Rectangle) -> Option<Point> {
    cursor
        .position()
        .map(|p| Point::new(p.x - bounds.x, p.y - bounds.y))
}

/// What the canvas does with one input event.
#[derive(Debug, Clone, PartialEq)]
enum Response {
    Publish(CanvasMessage),
    Capture,
}

impl MapCanvas<'_> {
    fn respond(
        &self,
        state: &mut CanvasState,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Response> {
        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                if let Some((layout, _)) = self.popup_layout() {
                    if layout.close_contains(position) {
                        return Some(Response::Publish(CanvasMessage::PopupClosePressed));
                    }
                    if layout.contains(position) {
                        return Some(Response::Capture);
                    }
                }
                state.pressed = true;
                Some(Response::Publish(CanvasMessage::Pressed(position)))
            }
            Event::Mouse(mouse::Event::CursorMoved { .. }) if state.pressed => {
                let position = local_position(cursor, bounds)?;
                Some(Response::Publish(CanvasMessage::Moved(position)))
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) if state.pressed => {
                state.pressed = false;
                let position = local_position(cursor, bounds)?;
                Some(Response::Publish(CanvasMessage::Released(position)))
            }
            Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                let position = cursor.position_in(bounds)?;
                let notches = match delta {
                    mouse::ScrollDelta::Lines { y, .. } => *y,
                    mouse::ScrollDelta::Pixels { y, .. } => *y / PIXELS_PER_NOTCH,
                };
                if notches == 0.0 {
                    return None;
                }
                Some(Response::Publish(CanvasMessage::Scrolled { position, notches }))
            }
            _ => None,
        }
    }
}

/// The new size, once, whenever the canvas bounds change.
fn resize(state: &mut CanvasState, size: Size) -> Option<CanvasMessage> {
    if state.reported_size == Some(size) {
        return None;
    }
    state.reported_size = Some(size);
    Some(CanvasMessage::Resized(ViewSize::new(
        f64::from(size.width),
        f64::from(size.height),
    )))
}

impl canvas::Program<CanvasMessage> for MapCanvas<'_> {
    type State = CanvasState;

    // Pointer input wins over a pending resize; the size goes out with the
    // next event that publishes nothing.
    fn update(
        &self,
        state: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<CanvasMessage>> {
        match self.respond(state, event, bounds, cursor) {
            Some(Response::Publish(message)) => Some(Action::publish(message).and_capture()),
            Some(Response::Capture) => Some(Action::capture()),
            None => resize(state, bounds.size()).map(Action::publish),
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), palette::MAP_BACKGROUND);

        draw_tiles(&mut frame, self.map, self.tiles);

        let origin = self.map.view_origin();
        let zoom = f64::from(self.map.zoom());
        for (_, feature) in self.map.visible_features() {
            match feature.kind() {
                FeatureKind::Circle(circle) => draw_circle(&mut frame, circle, origin, zoom),
                FeatureKind::Polygon(polygon) => draw_polygon(&mut frame, polygon, origin, zoom),
                FeatureKind::Marker(marker) => draw_marker(&mut frame, marker, origin, zoom),
            }
        }

        if let Some((layout, content)) = self.popup_layout() {
            popup::draw(&mut frame, &layout, content);
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if state.pressed {
            return mouse::Interaction::Grabbing;
        }
        let Some(position) = cursor.position_in(bounds) else {
            return mouse::Interaction::default();
        };
        let over_feature = self
            .map
            .feature_at(f64::from(position.x), f64::from(position.y))
            .and_then(|id| self.map.feature(id))
            .is_some_and(|f| f.popup().is_some());
        if over_feature {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::Grab
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn to_view(point: geo::PixelPoint, origin: geo::PixelPoint) -> Point {
    Point::new((point.x - origin.x) as f32, (point.y - origin.y) as f32)
}

fn color(css: CssColor, alpha: f32) -> Color {
    Color {
        a: alpha,
        ..Color::from_rgb8(css.r, css.g, css.b)
    }
}

fn paint_path(frame: &mut Frame<Renderer>, path: &Path, style: &PathStyle) {
    if style.fill {
        frame.fill(path, color(style.effective_fill_color(), style.fill_opacity));
    }
    frame.stroke(
        path,
        Stroke::default()
            .with_width(style.weight)
            .with_color(color(style.color, style.opacity)),
    );
}

fn draw_tiles(frame: &mut Frame<Renderer>, map: &MapInstance, tiles: &TileCache) {
    let origin = map.view_origin();
    #[allow(clippy::cast_possible_truncation)]
    let tile_size = Size::new(TILE_SIZE as f32, TILE_SIZE as f32);

    for placement in map.visible_tiles() {
        let top_left = to_view(placement.origin, origin);
        match tiles.peek(&placement.key) {
            Some(TileState::Ready(handle)) => {
                frame.draw_image(
                    Rectangle::new(top_left, tile_size),
                    canvas::Image::new(handle.clone()),
                );
            }
            Some(TileState::Loading) => {
                frame.fill_rectangle(top_left, tile_size, palette::TILE_LOADING);
            }
            Some(TileState::Failed) | None => {}
        }
    }
}

fn draw_circle(frame: &mut Frame<Renderer>, circle: &Circle, origin: geo::PixelPoint, zoom: f64) {
    let (center, rx, ry) = geo::circle_pixel_radii(circle.center, circle.radius, zoom);
    let center = to_view(center, origin);
    #[allow(clippy::cast_possible_truncation)]
    let (rx, ry) = (rx as f32, ry as f32);

    let path = Path::new(|builder| {
        for step in 0..CIRCLE_SEGMENTS {
            #[allow(clippy::cast_precision_loss)]
            let angle = step as f32 / CIRCLE_SEGMENTS as f32 * std::f32::consts::TAU;
            let point = Point::new(center.x + rx * angle.cos(), center.y + ry * angle.sin());
            if step == 0 {
                builder.move_to(point);
            } else {
                builder.line_to(point);
            }
        }
        builder.close();
    });
    paint_path(frame, &path, &circle.style);
}

fn draw_polygon(
    frame: &mut Frame<Renderer>,
    polygon: &Polygon,
    origin: geo::PixelPoint,
    zoom: f64,
) {
    if polygon.vertices.len() < 2 {
        return;
    }
    let path = Path::new(|builder| {
        for (index, vertex) in polygon.vertices.iter().enumerate() {
            let point = to_view(geo::project(*vertex, zoom), origin);
            if index == 0 {
                builder.move_to(point);
            } else {
                builder.line_to(point);
            }
        }
        builder.close();
    });
    paint_path(frame, &path, &polygon.style);
}

/// Pin with a round head and a point at the marker coordinate.
fn draw_marker(frame: &mut Frame<Renderer>, marker: &Marker, origin: geo::PixelPoint, zoom: f64) {
    let tip = to_view(geo::project(marker.position, zoom), origin);
    #[allow(clippy::cast_possible_truncation)]
    let (width, height) = (MARKER_ICON_SIZE.0 as f32, MARKER_ICON_SIZE.1 as f32);
    #[allow(clippy::cast_possible_truncation)]
    let left = tip.x - MARKER_ICON_ANCHOR.0 as f32;
    #[allow(clippy::cast_possible_truncation)]
    let top = tip.y - MARKER_ICON_ANCHOR.1 as f32;

    let head_radius = width / 2.0;
    let head_center = Point::new(left + head_radius, top + head_radius);

    let body = Path::new(|builder| {
        builder.move_to(tip);
        builder.line_to(Point::new(left + 1.5, top + height * 0.42));
        builder.arc(canvas::path::Arc {
            center: head_center,
            radius: head_radius,
            start_angle: iced::Radians(std::f32::consts::PI * 0.85),
            end_angle: iced::Radians(std::f32::consts::PI * 2.15),
        });
        builder.line_to(tip);
        builder.close();
    });
    let shadow = Path::new(|builder| {
        builder.ellipse(canvas::path::arc::Elliptical {
            center: Point::new(tip.x + 6.0, tip.y - 2.0),
            radii: iced::Vector::new(10.0, 3.0),
            rotation: iced::Radians(0.0),
            start_angle: iced::Radians(0.0),
            end_angle: iced::Radians(std::f32::consts::TAU),
        });
    });
    let dot = Path::circle(head_center, head_radius * 0.38);

    frame.fill(
        &shadow,
        Color {
            a: 0.25,
            ..palette::BLACK
        },
    );
    frame.fill(&body, palette::MARKER_BLUE);
    frame.stroke(
        &body,
        Stroke::default()
            .with_width(1.0)
            .with_color(palette::MARKER_BLUE_DARK),
    );
    frame.fill(&dot, palette::WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{MapOptions, MountRegistry, ViewRegionId};

    fn mounted_map() -> (MountRegistry, MapInstance) {
        let registry = MountRegistry::new();
        let handle = registry.bind(ViewRegionId::default()).expect("bind");
        let map = MapInstance::initialize(handle, MapOptions::default());
        (registry, map)
    }

    fn left_press() -> Event {
        Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left))
    }

    #[test]
    fn first_press_after_resize_is_not_dropped() {
        let (_registry, map) = mounted_map();
        let tiles = TileCache::new(16);
        let canvas = MapCanvas {
            map: &map,
            tiles: &tiles,
        };
        let mut state = CanvasState::default();
        let bounds = Rectangle::new(Point::ORIGIN, Size::new(640.0, 480.0));
        let position = Point::new(100.0, 120.0);
        let cursor = mouse::Cursor::Available(position);

        let response = canvas.respond(&mut state, &left_press(), bounds, cursor);
        let expected = Response::Publish(CanvasMessage::Pressed(position));
        assert_eq!(response, Some(expected));
        assert!(state.pressed);
    }

    #[test]
    fn size_is_reported_once_per_change() {
        let mut state = CanvasState::default();
        let size = Size::new(640.0, 480.0);

        assert_eq!(
            resize(&mut state, size),
            Some(CanvasMessage::Resized(ViewSize::new(640.0, 480.0)))
        );
        assert_eq!(resize(&mut state, size), None);
        assert!(resize(&mut state, Size::new(800.0, 480.0)).is_some());
    }

    #[test]
    fn release_without_press_publishes_nothing() {
        let (_registry, map) = mounted_map();
        let tiles = TileCache::new(16);
        let canvas = MapCanvas {
            map: &map,
            tiles: &tiles,
        };
        let mut state = CanvasState::default();
        let bounds = Rectangle::new(Point::ORIGIN, Size::new(640.0, 480.0));
        let cursor = mouse::Cursor::Available(Point::new(10.0, 10.0));
        let release = Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left));

        assert_eq!(canvas.respond(&mut state, &release, bounds, cursor), None);
    }
}
