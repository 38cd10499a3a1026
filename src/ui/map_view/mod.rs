// SPDX-License-Identifier: MPL-2.0
//! Map view: the Iced-facing side of the map.
//!
//! [`component::State`] owns the mounted [`crate::map::MapInstance`] and the
//! tile cache. The canvas draws tiles, features and the open popup; the
//! controls module lays out zoom buttons, the layer control and the
//! attribution on top of it.

pub mod canvas;
pub mod component;
pub mod controls;
pub mod drag;
pub mod popup;

pub use component::{CanvasMessage, Effect, Lifecycle, Message, State};
