// SPDX-License-Identifier: MPL-2.0
//! Map view component encapsulating the map instance lifecycle, tile loading
//! and pointer interaction.

use super::canvas::MapCanvas;
use super::controls;
use super::drag::DragState;
use crate::config::Config;
use crate::error::Error;
use crate::map::demo;
use crate::map::{
    ClickOutcome, MapInstance, MapOptions, MountRegistry, TileKey, TileLayer, ViewRegionId,
    ViewSize,
};
use crate::tiles::{self, TileCache};
use crate::ui::styles;
use iced::widget::{image, Canvas, Container, Row, Stack};
use iced::{Element, Length, Point, Task};

/// Events published by the map canvas, in view coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasMessage {
    Resized(ViewSize),
    Pressed(Point),
    Moved(Point),
    Released(Point),
    Scrolled { position: Point, notches: f32 },
    PopupClosePressed,
}

/// Messages emitted by the map view.
#[derive(Debug, Clone)]
pub enum Message {
    Mount,
    Unmount,
    Canvas(CanvasMessage),
    ZoomIn,
    ZoomOut,
    OverlayToggled { name: String, active: bool },
    BaseLayerSelected(usize),
    LayerControlExpanded(bool),
    ClosePopup,
    TileLoaded {
        generation: u64,
        key: TileKey,
        result: Result<image::Handle, Error>,
    },
}

/// Side effects the application should perform after handling a message.
#[derive(Debug, Clone)]
pub enum Effect {
    None,
    /// The view region was already bound; the view stays unmounted.
    MountFailed(Error),
}

/// Whether a map instance currently occupies the view region.
#[derive(Debug)]
pub enum Lifecycle {
    Unmounted,
    Mounted(Box<MapInstance>),
}

/// Complete map view state.
#[derive(Debug)]
pub struct State {
    registry: MountRegistry,
    region: ViewRegionId,
    config: Config,
    lifecycle: Lifecycle,
    /// Bumped on every mount, unmount and base-layer switch so that tile
    /// results from an earlier instance are dropped.
    generation: u64,
    tiles: TileCache,
    client: Option<reqwest::Client>,
    pub drag: DragState,
    view_size: ViewSize,
}

impl State {
    #[must_use]
    pub fn new(registry: MountRegistry, region: ViewRegionId, config: Config) -> Self {
        let tiles = TileCache::new(config.tiles.clamped_cache_capacity());
        Self {
            registry,
            region,
            config,
            lifecycle: Lifecycle::Unmounted,
            generation: 0,
            tiles,
            client: None,
            drag: DragState::default(),
            view_size: ViewSize::default(),
        }
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Mounted(_))
    }

    #[must_use]
    pub fn map(&self) -> Option<&MapInstance> {
        match &self.lifecycle {
            Lifecycle::Mounted(map) => Some(map),
            Lifecycle::Unmounted => None,
        }
    }

    pub fn map_mut(&mut self) -> Option<&mut MapInstance> {
        match &mut self.lifecycle {
            Lifecycle::Mounted(map) => Some(map),
            Lifecycle::Unmounted => None,
        }
    }

    #[must_use]
    pub fn region(&self) -> &ViewRegionId {
        &self.region
    }

    #[must_use]
    pub fn registry(&self) -> &MountRegistry {
        &self.registry
    }

    #[must_use]
    pub fn tiles(&self) -> &TileCache {
        &self.tiles
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn map_options(&self) -> MapOptions {
        let (min_zoom, zoom, max_zoom) = self.config.view.zoom_levels();
        let tiles = &self.config.tiles;
        let base = TileLayer::new(tiles.name.clone(), tiles.url.clone(), &tiles.attribution)
            .with_zoom_range(min_zoom, max_zoom);

        MapOptions {
            center: self.config.view.center(),
            zoom,
            min_zoom,
            max_zoom,
            max_bounds: self.config.view.max_bounds(),
            zoom_control: false,
            close_popup_on_click: self.config.controls.close_popup_on_click,
            view_size: self.view_size,
            base_layers: vec![base],
            overlays: demo::OVERLAY_NAMES.iter().map(ToString::to_string).collect(),
        }
    }

    /// Binds the view region and seeds the demo map. A no-op while mounted.
    pub fn mount(&mut self) -> (Effect, Task<Message>) {
        if self.is_mounted() {
            return (Effect::None, Task::none());
        }

        let handle = match self.registry.bind(self.region.clone()) {
            Ok(handle) => handle,
            Err(err) => {
                tracing::error!(region = %self.region, error = %err, "map mount failed");
                return (Effect::MountFailed(err.into()), Task::none());
            }
        };

        let mut map = MapInstance::initialize(handle, self.map_options());
        if demo::seed(&mut map, self.config.controls.zoom_position).is_none() {
            tracing::warn!("demo features could not be seeded");
        }
        tracing::info!(region = %self.region, zoom = map.zoom(), "map mounted");

        self.lifecycle = Lifecycle::Mounted(Box::new(map));
        self.generation = self.generation.wrapping_add(1);
        self.tiles.clear();
        (Effect::None, self.request_tiles())
    }

    /// Tears the map instance down and releases the view region.
    pub fn unmount(&mut self) {
        let Lifecycle::Mounted(map) = std::mem::replace(&mut self.lifecycle, Lifecycle::Unmounted)
        else {
            return;
        };
        map.destroy();
        self.generation = self.generation.wrapping_add(1);
        self.drag.stop();
        tracing::info!(region = %self.region, "map unmounted");
    }

    /// Starts a fetch for every visible tile that is not yet cached.
    fn request_tiles(&mut self) -> Task<Message> {
        let Lifecycle::Mounted(map) = &self.lifecycle else {
            return Task::none();
        };
        let Some(layer) = map.active_base_layer() else {
            return Task::none();
        };

        if self.client.is_none() {
            match tiles::build_client() {
                Ok(client) => self.client = Some(client),
                Err(err) => {
                    tracing::warn!(error = %err, "tile client unavailable");
                    return Task::none();
                }
            }
        }
        let Some(client) = self.client.as_ref() else {
            return Task::none();
        };

        let generation = self.generation;
        let mut tasks = Vec::new();
        for placement in map.visible_tiles() {
            let key = placement.key;
            if !self.tiles.begin_loading(key) {
                continue;
            }
            let url = layer.tile_url(key);
            tracing::debug!(%url, "requesting tile");
            tasks.push(Task::perform(
                tiles::fetch_tile(client.clone(), url),
                move |result| Message::TileLoaded {
                    generation,
                    key,
                    result,
                },
            ));
        }
        Task::batch(tasks)
    }

    fn after_zoom(&mut self, changed: bool) -> Task<Message> {
        if changed {
            self.request_tiles()
        } else {
            Task::none()
        }
    }

    fn handle_canvas(&mut self, message: CanvasMessage) -> Task<Message> {
        match message {
            CanvasMessage::Resized(size) => {
                self.view_size = size;
                if let Some(map) = self.map_mut() {
                    map.set_view_size(size);
                }
                self.request_tiles()
            }
            CanvasMessage::Pressed(position) => {
                self.drag.start(position);
                Task::none()
            }
            CanvasMessage::Moved(position) => {
                let Some((dx, dy)) = self.drag.drag_to(position) else {
                    return Task::none();
                };
                match self.map_mut() {
                    Some(map) => {
                        map.pan_by(-f64::from(dx), -f64::from(dy));
                        self.request_tiles()
                    }
                    None => Task::none(),
                }
            }
            CanvasMessage::Released(position) => {
                if self.drag.finish(position) {
                    if let Some(map) = self.map_mut() {
                        let outcome = map.click(f64::from(position.x), f64::from(position.y));
                        if outcome != ClickOutcome::Nothing {
                            tracing::debug!(?outcome, "map click");
                        }
                    }
                }
                Task::none()
            }
            CanvasMessage::Scrolled { position, notches } => {
                let Some(map) = self.map_mut() else {
                    return Task::none();
                };
                let target = if notches > 0.0 {
                    map.zoom().saturating_add(1)
                } else {
                    map.zoom().saturating_sub(1)
                };
                let changed = map.zoom_around(target, f64::from(position.x), f64::from(position.y));
                self.after_zoom(changed)
            }
            CanvasMessage::PopupClosePressed => {
                if let Some(map) = self.map_mut() {
                    map.close_popup();
                }
                Task::none()
            }
        }
    }

    pub fn handle_message(&mut self, message: Message) -> (Effect, Task<Message>) {
        match message {
            Message::Mount => self.mount(),
            Message::Unmount => {
                self.unmount();
                (Effect::None, Task::none())
            }
            Message::Canvas(canvas_message) => (Effect::None, self.handle_canvas(canvas_message)),
            Message::ZoomIn => {
                let changed = self.map_mut().is_some_and(MapInstance::zoom_in);
                (Effect::None, self.after_zoom(changed))
            }
            Message::ZoomOut => {
                let changed = self.map_mut().is_some_and(MapInstance::zoom_out);
                (Effect::None, self.after_zoom(changed))
            }
            Message::OverlayToggled { name, active } => {
                if let Some(map) = self.map_mut() {
                    map.set_overlay_active(&name, active);
                }
                (Effect::None, Task::none())
            }
            Message::BaseLayerSelected(index) => {
                let Some(map) = self.map_mut() else {
                    return (Effect::None, Task::none());
                };
                let Some(name) = map.base_layers().get(index).map(|l| l.name().to_string())
                else {
                    return (Effect::None, Task::none());
                };
                if !map.select_base_layer(&name) {
                    return (Effect::None, Task::none());
                }
                self.generation = self.generation.wrapping_add(1);
                self.tiles.clear();
                (Effect::None, self.request_tiles())
            }
            Message::LayerControlExpanded(expanded) => {
                if let Some(map) = self.map_mut() {
                    map.set_layer_control_collapsed(!expanded);
                }
                (Effect::None, Task::none())
            }
            Message::ClosePopup => {
                if let Some(map) = self.map_mut() {
                    map.close_popup();
                }
                (Effect::None, Task::none())
            }
            Message::TileLoaded {
                generation,
                key,
                result,
            } => {
                if generation != self.generation {
                    tracing::trace!(?key, "dropping stale tile");
                    return (Effect::None, Task::none());
                }
                match result {
                    Ok(handle) => self.tiles.finish(key, handle),
                    Err(err) => {
                        tracing::warn!(?key, error = %err, "tile failed to load");
                        self.tiles.fail(key);
                    }
                }
                (Effect::None, Task::none())
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let Some(map) = self.map() else {
            return Container::new(Row::new())
                .width(Length::Fill)
                .height(Length::Fill)
                .style(styles::container::map_background)
                .into();
        };

        let canvas: Element<'_, CanvasMessage> = Canvas::new(MapCanvas {
            map,
            tiles: &self.tiles,
        })
        .width(Length::Fill)
        .height(Length::Fill)
        .into();

        let mut layers = Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(canvas.map(Message::Canvas));
        for overlay in controls::view(map) {
            layers = layers.push(overlay);
        }
        layers.into()
    }
}
