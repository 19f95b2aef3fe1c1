//! Assertion helpers for throw tests.

use tavla_ui_graphics::{GraphicsLayer, Point};

/// Assert that a value is within `tolerance` of `expected`.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

pub fn assert_point_approx_eq(actual: Point, expected: Point, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
}

/// Assert that a die sits exactly on its rest slot, untilted and unscaled.
pub fn assert_layer_at_rest(layer: GraphicsLayer, msg: &str) {
    assert!(
        layer.is_at_rest(),
        "{}: expected rest transform, got {:?}",
        msg,
        layer
    );
}
