//! Release velocity estimation for drags whose platform sample carries none.
//!
//! Samples are kept in a small ring buffer; the velocity is the slope of a
//! recency-weighted least-squares fit over the samples inside the horizon.

use crate::geometry::Point;

/// Ring buffer capacity.
const HISTORY_SIZE: usize = 20;

/// Samples older than this, relative to the newest one, are ignored.
const HORIZON_MS: i64 = 100;

/// A pointer that moved less than `MIN_MOVEMENT` over at least this span is
/// considered stopped.
const ASSUME_STOPPED_MS: i64 = 40;

const MIN_MOVEMENT: f32 = 2.0;

/// Per-sample weight decay, newest sample first.
const RECENCY_DECAY: f32 = 0.95;

#[derive(Clone, Copy, Debug, Default)]
struct TimedSample {
    time_ms: i64,
    value: f32,
}

/// Tracks absolute positions along one axis.
#[derive(Clone, Debug)]
pub struct AxisVelocityTracker {
    samples: [Option<TimedSample>; HISTORY_SIZE],
    head: usize,
}

impl Default for AxisVelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl AxisVelocityTracker {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            head: 0,
        }
    }

    pub fn add_sample(&mut self, time_ms: i64, value: f32) {
        self.head = (self.head + 1) % HISTORY_SIZE;
        self.samples[self.head] = Some(TimedSample { time_ms, value });
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.head = 0;
    }

    /// Estimated velocity in units per second, `0.0` when it cannot be
    /// estimated or the pointer has stopped.
    pub fn velocity(&self) -> f32 {
        let Some(newest) = self.samples[self.head] else {
            return 0.0;
        };

        // (age in ms, value), newest first
        let mut window = [(0.0f32, 0.0f32); HISTORY_SIZE];
        let mut len = 0;
        let mut cursor = self.head;
        let mut oldest = newest;

        while len < HISTORY_SIZE {
            let Some(sample) = self.samples[cursor] else {
                break;
            };
            let age = newest.time_ms - sample.time_ms;
            if age > HORIZON_MS || age < 0 {
                break;
            }
            window[len] = (-(age as f32), sample.value);
            oldest = sample;
            len += 1;
            cursor = (cursor + HISTORY_SIZE - 1) % HISTORY_SIZE;
        }

        if len < 2 {
            return 0.0;
        }

        let span_ms = newest.time_ms - oldest.time_ms;
        if span_ms > ASSUME_STOPPED_MS && (newest.value - oldest.value).abs() < MIN_MOVEMENT {
            return 0.0;
        }

        weighted_slope(&window[..len]) * 1000.0
    }
}

/// Slope of `value = a + b * t` fitted with exponentially decaying weights.
fn weighted_slope(points: &[(f32, f32)]) -> f32 {
    let mut weight = 1.0f32;
    let (mut sw, mut st, mut sx, mut stt, mut stx) = (0.0f32, 0.0f32, 0.0f32, 0.0f32, 0.0f32);

    for &(t, x) in points {
        sw += weight;
        st += weight * t;
        sx += weight * x;
        stt += weight * t * t;
        stx += weight * t * x;
        weight *= RECENCY_DECAY;
    }

    let denom = sw * stt - st * st;
    if denom.abs() < f32::EPSILON {
        return 0.0;
    }
    (sw * stx - st * sx) / denom
}

/// Two-axis tracker fed with absolute drag translations.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    x: AxisVelocityTracker,
    y: AxisVelocityTracker,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sample(&mut self, time_ms: i64, translation: Point) {
        self.x.add_sample(time_ms, translation.x);
        self.y.add_sample(time_ms, translation.y);
    }

    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }

    /// Velocity in logical pixels per second.
    pub fn velocity(&self) -> Point {
        Point::new(self.x.velocity(), self.y.velocity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_single_sample_report_zero() {
        let mut tracker = AxisVelocityTracker::new();
        assert_eq!(tracker.velocity(), 0.0);
        tracker.add_sample(0, 10.0);
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn steady_motion_reports_its_speed() {
        let mut tracker = AxisVelocityTracker::new();
        for i in 0..4 {
            tracker.add_sample(i * 10, i as f32 * 100.0);
        }
        let v = tracker.velocity();
        assert!((v - 10_000.0).abs() < 1_000.0, "expected ~10000, got {v}");
    }

    #[test]
    fn leftward_drag_is_negative() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(0, Point::new(300.0, 0.0));
        tracker.add_sample(10, Point::new(200.0, 0.0));
        tracker.add_sample(20, Point::new(100.0, 0.0));
        let v = tracker.velocity();
        assert!(v.x < 0.0, "expected negative x velocity, got {v:?}");
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn samples_outside_horizon_are_ignored() {
        let mut tracker = AxisVelocityTracker::new();
        tracker.add_sample(0, 0.0);
        tracker.add_sample(150, 100.0);
        tracker.add_sample(160, 200.0);
        tracker.add_sample(170, 300.0);
        let v = tracker.velocity();
        assert!((v - 10_000.0).abs() < 1_000.0, "expected ~10000, got {v}");
    }

    #[test]
    fn stationary_pointer_reports_zero() {
        let mut tracker = AxisVelocityTracker::new();
        tracker.add_sample(0, 50.0);
        tracker.add_sample(30, 50.5);
        tracker.add_sample(60, 51.0);
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn reset_clears_history() {
        let mut tracker = VelocityTracker::new();
        tracker.add_sample(0, Point::ZERO);
        tracker.add_sample(10, Point::new(100.0, 100.0));
        tracker.reset();
        assert_eq!(tracker.velocity(), Point::ZERO);
    }
}
