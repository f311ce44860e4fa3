//! Pure position arithmetic: normalization, style clamping, rotation
//! thresholds, and the release snap decision.
//!
//! Positions are measured in item spans, where one span is the view extent
//! plus the gap to the neighbouring item. The middle slot at `0.0` is
//! centered; its neighbours sit at `-1.0` and `1.0`.

use crate::config::BrowserStyle;
use crate::slot::ContentSlot;
use crate::window::Rotation;
use media_pager_foundation::{Point, Size};

/// Largest move, in item spans, a single drag sample may apply. Keeps
/// logical indices far from overflow and positions exact to a whole span.
pub const MAX_SPANS_PER_SAMPLE: f32 = 1_000_000.0;

/// Expresses a raw pixel delta in item spans, per axis.
///
/// An axis whose span is not positive and finite yields `0.0`. Results are
/// limited to [`MAX_SPANS_PER_SAMPLE`] either way.
pub fn normalize(raw_delta: Point, view_size: Size, gap: f32) -> Point {
    let span = view_size.inflate(gap);
    Point::new(
        normalize_component(raw_delta.x, span.width),
        normalize_component(raw_delta.y, span.height),
    )
}

#[inline]
fn normalize_component(delta: f32, span: f32) -> f32 {
    if !(span.is_finite() && span > 0.0) {
        return 0.0;
    }
    let normalized = delta / span;
    if normalized.is_finite() {
        normalized.clamp(-MAX_SPANS_PER_SAMPLE, MAX_SPANS_PER_SAMPLE)
    } else {
        0.0
    }
}

/// Limits a normalized delta so linear browsing never overshoots the ends.
///
/// In linear style the middle slot's position after the move is kept within
/// `[-(N - 1 - index), index]`: at the first item it can not move right of
/// center, at the last item not left of it, and a single oversized delta can
/// not carry focus beyond either end. Carousel deltas pass through unless
/// the collection holds a single item.
pub fn clamp_for_style<I>(
    style: BrowserStyle,
    middle: &ContentSlot<I>,
    normalized_delta: f32,
    item_count: usize,
) -> f32 {
    let count = item_count.max(1);
    if style == BrowserStyle::Carousel && count > 1 {
        return normalized_delta;
    }

    let last = (count - 1) as i64;
    let upper = middle.index() as f32;
    let lower = ((middle.index() - last) as f32).min(upper);
    let position = middle.position();
    let target = (position + normalized_delta).clamp(lower, upper);
    if target == position + normalized_delta {
        normalized_delta
    } else {
        target - position
    }
}

/// Middle-slot positions past which focus has moved to a neighbour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationThresholds {
    forward: f32,
    backward: f32,
}

impl RotationThresholds {
    /// Thresholds for a view of `view_extent` along the drag axis.
    pub fn new(view_extent: f32, gap: f32) -> Self {
        let span = view_extent + gap;
        if !(span.is_finite() && span > 0.0) {
            return Self {
                forward: f32::NEG_INFINITY,
                backward: f32::INFINITY,
            };
        }
        let normalized_gap = gap / span;
        let normalized_center = 0.5 * view_extent / span;
        Self {
            forward: -(normalized_gap + normalized_center),
            backward: 1.0 + normalized_gap - normalized_center,
        }
    }

    /// The middle slot must fall below this to rotate forward.
    pub fn forward(&self) -> f32 {
        self.forward
    }

    /// The middle slot must rise above this to rotate backward.
    pub fn backward(&self) -> f32 {
        self.backward
    }
}

pub fn boundary_crossed<I>(
    middle: &ContentSlot<I>,
    thresholds: &RotationThresholds,
) -> Option<Rotation> {
    let position = middle.position();
    if position < thresholds.forward {
        Some(Rotation::Forward)
    } else if position > thresholds.backward {
        Some(Rotation::Backward)
    } else {
        None
    }
}

/// The single delta that lands exactly one slot at `0.0` after a release.
///
/// Slow, short drags settle back on the middle slot. Otherwise the velocity
/// sign picks a direction: a flick toward the next item commits to it only
/// if the middle slot has already moved that way, and symmetrically for the
/// previous item. A release never skips past a neighbour.
pub fn resolve_snap_target<I>(
    velocity: f32,
    previous: &ContentSlot<I>,
    middle: &ContentSlot<I>,
    next: &ContentSlot<I>,
    min_velocity: f32,
    min_translation: f32,
) -> f32 {
    let position = middle.position();

    if velocity.abs() < min_velocity && position.abs() < min_translation {
        -position
    } else if velocity < 0.0 {
        if position >= 0.0 {
            -position
        } else {
            -next.position()
        }
    } else if position <= 0.0 {
        -position
    } else {
        -previous.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::SlotId;

    fn slot(index: i64, position: f32) -> ContentSlot<()> {
        let mut slot = ContentSlot::new(SlotId::new(1), index);
        slot.position = position;
        slot
    }

    fn neighbours(middle_position: f32) -> [ContentSlot<()>; 3] {
        [
            slot(-1, middle_position - 1.0),
            slot(0, middle_position),
            slot(1, middle_position + 1.0),
        ]
    }

    #[test]
    fn normalize_divides_by_view_plus_gap() {
        let n = normalize(Point::new(-630.0, 105.0), Size::new(1000.0, 2050.0), 50.0);
        assert!((n.x + 0.6).abs() < 1e-6);
        assert!((n.y - 0.05).abs() < 1e-6);
    }

    #[test]
    fn normalize_guards_degenerate_views() {
        assert_eq!(normalize(Point::new(10.0, 10.0), Size::ZERO, 0.0), Point::ZERO);
        let n = normalize(Point::new(f32::INFINITY, 5.0), Size::new(100.0, 100.0), 0.0);
        assert_eq!(n, Point::new(0.0, 0.05));
    }

    #[test]
    fn normalize_limits_a_single_sample() {
        let n = normalize(Point::new(-3.0e10, 3.0e10), Size::new(1000.0, 1000.0), 50.0);
        assert_eq!(n, Point::new(-MAX_SPANS_PER_SAMPLE, MAX_SPANS_PER_SAMPLE));
    }

    #[test]
    fn linear_first_item_cannot_reveal_previous() {
        let middle = slot(0, 0.0);
        assert_eq!(clamp_for_style(BrowserStyle::Linear, &middle, 0.3, 3), 0.0);

        let middle = slot(0, -0.2);
        assert!((clamp_for_style(BrowserStyle::Linear, &middle, 0.5, 3) - 0.2).abs() < 1e-6);
        assert_eq!(clamp_for_style(BrowserStyle::Linear, &middle, -0.3, 3), -0.3);
    }

    #[test]
    fn linear_last_item_cannot_reveal_next() {
        let middle = slot(2, 0.1);
        let delta = clamp_for_style(BrowserStyle::Linear, &middle, -0.4, 3);
        assert!((delta + 0.1).abs() < 1e-6);
        assert_eq!(clamp_for_style(BrowserStyle::Linear, &middle, 0.4, 3), 0.4);
    }

    #[test]
    fn linear_oversized_delta_stops_at_the_last_item() {
        let middle = slot(1, 0.0);
        // only one item lies beyond index 1 in a collection of 3
        assert_eq!(clamp_for_style(BrowserStyle::Linear, &middle, -5.0, 3), -1.0);
    }

    #[test]
    fn carousel_passes_through() {
        let middle = slot(0, 0.0);
        assert_eq!(clamp_for_style(BrowserStyle::Carousel, &middle, 0.3, 3), 0.3);
        assert_eq!(clamp_for_style(BrowserStyle::Carousel, &middle, -7.5, 3), -7.5);
    }

    #[test]
    fn single_item_never_moves() {
        let middle = slot(0, 0.0);
        assert_eq!(clamp_for_style(BrowserStyle::Carousel, &middle, 0.4, 1), 0.0);
        assert_eq!(clamp_for_style(BrowserStyle::Linear, &middle, -0.4, 0), 0.0);
    }

    #[test]
    fn thresholds_for_default_geometry() {
        let t = RotationThresholds::new(1000.0, 50.0);
        assert!((t.forward() + 0.5238095).abs() < 1e-5);
        assert!((t.backward() - 0.5714286).abs() < 1e-5);

        assert_eq!(boundary_crossed(&slot(0, -0.6), &t), Some(Rotation::Forward));
        assert_eq!(boundary_crossed(&slot(0, 0.6), &t), Some(Rotation::Backward));
        assert_eq!(boundary_crossed(&slot(0, -0.5), &t), None);
        assert_eq!(boundary_crossed(&slot(0, 0.55), &t), None);
    }

    #[test]
    fn thresholds_for_empty_view_never_rotate() {
        let t = RotationThresholds::new(0.0, 0.0);
        assert_eq!(boundary_crossed(&slot(0, -100.0), &t), None);
        assert_eq!(boundary_crossed(&slot(0, 100.0), &t), None);
    }

    #[test]
    fn slow_short_release_settles_back() {
        let [p, m, n] = neighbours(0.05);
        let delta = resolve_snap_target(0.0, &p, &m, &n, 15.0, 0.1);
        assert!((delta + 0.05).abs() < 1e-6);
    }

    #[test]
    fn fast_flick_toward_next_commits_when_already_moved() {
        let [p, m, n] = neighbours(-0.2);
        let delta = resolve_snap_target(-20.0, &p, &m, &n, 15.0, 0.1);
        assert!((delta + 0.8).abs() < 1e-6);
    }

    #[test]
    fn flick_against_the_drag_settles_on_middle() {
        let [p, m, n] = neighbours(0.3);
        assert!((resolve_snap_target(-400.0, &p, &m, &n, 15.0, 0.1) + 0.3).abs() < 1e-6);

        let [p, m, n] = neighbours(-0.3);
        assert!((resolve_snap_target(400.0, &p, &m, &n, 15.0, 0.1) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn flick_toward_previous_commits_to_previous() {
        let [p, m, n] = neighbours(0.3);
        let delta = resolve_snap_target(50.0, &p, &m, &n, 15.0, 0.1);
        assert!((delta - 0.7).abs() < 1e-6);
    }

    #[test]
    fn slow_long_drag_resolves_by_direction_of_zero_velocity() {
        // zero velocity counts as "toward previous"
        let [p, m, n] = neighbours(-0.4);
        assert!((resolve_snap_target(0.0, &p, &m, &n, 15.0, 0.1) - 0.4).abs() < 1e-6);
        let [p, m, n] = neighbours(0.4);
        assert!((resolve_snap_target(0.0, &p, &m, &n, 15.0, 0.1) - 0.6).abs() < 1e-6);
    }
}
