// SPDX-License-Identifier: MPL-2.0
//! Centralized styles for the map chrome.

pub mod button;
pub mod container;
