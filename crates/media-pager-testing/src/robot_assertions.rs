//! Assertion helpers for validating engine state in tests.

use media_pager_core::{BrowserEngine, MediaSource};

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

/// Assert the neighbour layout: previous at middle - 1, next at middle + 1.
pub fn assert_slots_adjacent<S: MediaSource>(engine: &BrowserEngine<S>, msg: &str) {
    let [previous, middle, next] = engine.slots();
    assert_approx_eq(
        previous.position(),
        middle.position() - 1.0,
        1e-4,
        &format!("{} - previous position", msg),
    );
    assert_approx_eq(
        next.position(),
        middle.position() + 1.0,
        1e-4,
        &format!("{} - next position", msg),
    );
    assert_eq!(previous.index() + 1, middle.index(), "{}: previous index", msg);
    assert_eq!(middle.index() + 1, next.index(), "{}: next index", msg);
}

/// Assert that the engine is idle with the focused slot centered.
pub fn assert_at_rest<S: MediaSource>(engine: &BrowserEngine<S>, msg: &str) {
    assert!(!engine.is_dragging(), "{}: still dragging", msg);
    assert!(!engine.is_settling(), "{}: still settling", msg);
    assert_eq!(
        engine.window().middle().position(),
        0.0,
        "{}: middle slot not centered",
        msg
    );
    assert_slots_adjacent(engine, msg);
}
