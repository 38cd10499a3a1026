// SPDX-License-Identifier: MPL-2.0
//! Test helpers for coordinate comparisons.
//!
//! Re-exports the `approx` assertion macros; projected coordinates go through
//! several trigonometric steps, so exact equality is never expected.

pub use approx::assert_abs_diff_eq;

use crate::map::LatLng;

/// Tolerance for coordinates that should round-trip through projection.
pub const LATLNG_EPSILON: f64 = 1e-9;

/// Asserts both components of two coordinates are within `epsilon`.
#[track_caller]
pub fn assert_latlng_near(actual: LatLng, expected: LatLng, epsilon: f64) {
    assert!(
        (actual.lat - expected.lat).abs() <= epsilon
            && (actual.lng - expected.lng).abs() <= epsilon,
        "expected {expected:?} within {epsilon}, got {actual:?}"
    );
}
