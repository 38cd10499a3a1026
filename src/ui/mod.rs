// SPDX-License-Identifier: MPL-2.0
//! User interface components and styling.
//!
//! Follows the Elm-style "state down, messages up" pattern: the map view
//! component owns its state and reports side effects to the application.
//!
//! - [`map_view`] - Map canvas, controls and popup
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)

pub mod design_tokens;
pub mod map_view;
pub mod styles;
