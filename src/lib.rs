// SPDX-License-Identifier: MPL-2.0
//! `iced_atlas` is an interactive map view built with the Iced GUI framework.
//!
//! It shows a tiled base layer with three togglable overlay groups (circles,
//! markers, polygons), a layer control, zoom buttons and feature popups. The
//! [`map`] module holds the widget-independent map model; [`ui::map_view`]
//! draws it and turns pointer input into map operations.

#![doc(html_root_url = "https://docs.rs/iced_atlas/0.1.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod map;
pub mod tiles;
pub mod ui;

#[cfg(test)]
mod test_utils;
