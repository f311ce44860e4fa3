//! Drag gesture sampling.
//!
//! The platform resolves raw pointer input into a single-finger drag and
//! reports it as a stream of [`DragSample`]s carrying the *absolute*
//! translation since the drag began. [`GestureSampler`] turns that stream into
//! per-sample deltas and a release velocity.
//!
//! # Phase handling
//! 1. **Began**: the reference translation is reset to the sample's
//!    translation, so the first `Changed` sample yields a zero delta.
//! 2. **Changed**: yields `current - reference`, then moves the reference.
//! 3. **Ended / Cancelled / Failed**: all release the drag.
//!
//! Samples that arrive without a preceding `Began` have no reference to
//! measure against and are ignored.

use crate::geometry::Point;
use crate::velocity_tracker::VelocityTracker;

/// Lifecycle phase of a drag sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragPhase {
    Began,
    Changed,
    Ended,
    Cancelled,
    Failed,
}

impl DragPhase {
    /// Whether this phase terminates the drag.
    #[inline]
    pub fn is_release(self) -> bool {
        matches!(self, DragPhase::Ended | DragPhase::Cancelled | DragPhase::Failed)
    }
}

/// One drag sample as delivered by the platform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSample {
    pub phase: DragPhase,
    /// Absolute translation since the drag began, in logical pixels.
    pub translation: Point,
    /// Platform-measured velocity in logical pixels per second, if known.
    pub velocity: Option<Point>,
    /// Monotonic timestamp in milliseconds.
    pub time_ms: i64,
}

impl DragSample {
    pub fn new(phase: DragPhase, translation: Point, time_ms: i64) -> Self {
        Self {
            phase,
            translation,
            velocity: None,
            time_ms,
        }
    }

    pub fn with_velocity(mut self, velocity: Point) -> Self {
        self.velocity = Some(velocity);
        self
    }

    pub fn began(translation: Point, time_ms: i64) -> Self {
        Self::new(DragPhase::Began, translation, time_ms)
    }

    pub fn changed(translation: Point, time_ms: i64) -> Self {
        Self::new(DragPhase::Changed, translation, time_ms)
    }

    pub fn ended(translation: Point, time_ms: i64) -> Self {
        Self::new(DragPhase::Ended, translation, time_ms)
    }
}

/// What the sampler made of one sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SamplerEvent {
    /// A new drag started; the reference translation was reset.
    Began,
    /// Incremental translation since the previous sample.
    Moved(Point),
    /// The drag ended (ended, cancelled, or failed).
    Released { velocity: Point },
    /// The sample arrived outside a drag and was dropped.
    Ignored,
}

/// Converts absolute drag samples into incremental deltas.
#[derive(Clone, Debug, Default)]
pub struct GestureSampler {
    /// Translation of the previous sample; `None` while no drag is active.
    reference: Option<Point>,
    tracker: VelocityTracker,
}

impl GestureSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is currently being tracked.
    pub fn is_active(&self) -> bool {
        self.reference.is_some()
    }

    pub fn sample(&mut self, sample: DragSample) -> SamplerEvent {
        match sample.phase {
            DragPhase::Began => {
                self.reference = Some(sample.translation);
                self.tracker.reset();
                self.tracker.add_sample(sample.time_ms, sample.translation);
                SamplerEvent::Began
            }
            DragPhase::Changed => {
                let Some(reference) = self.reference else {
                    log::debug!("drag sample {:?} without a began phase, ignoring", sample.phase);
                    return SamplerEvent::Ignored;
                };
                self.reference = Some(sample.translation);
                self.tracker.add_sample(sample.time_ms, sample.translation);
                SamplerEvent::Moved(sample.translation - reference)
            }
            DragPhase::Ended | DragPhase::Cancelled | DragPhase::Failed => {
                if self.reference.take().is_none() {
                    log::debug!("drag sample {:?} without a began phase, ignoring", sample.phase);
                    return SamplerEvent::Ignored;
                }
                self.tracker.add_sample(sample.time_ms, sample.translation);
                let velocity = sample.velocity.unwrap_or_else(|| self.tracker.velocity());
                self.tracker.reset();
                SamplerEvent::Released { velocity }
            }
        }
    }

    /// Drops any active drag without producing a release.
    pub fn reset(&mut self) {
        self.reference = None;
        self.tracker.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_change_after_begin_is_zero() {
        let mut sampler = GestureSampler::new();
        assert_eq!(
            sampler.sample(DragSample::began(Point::new(12.0, 3.0), 0)),
            SamplerEvent::Began
        );
        assert_eq!(
            sampler.sample(DragSample::changed(Point::new(12.0, 3.0), 8)),
            SamplerEvent::Moved(Point::ZERO)
        );
    }

    #[test]
    fn changes_yield_incremental_deltas() {
        let mut sampler = GestureSampler::new();
        sampler.sample(DragSample::began(Point::ZERO, 0));
        assert_eq!(
            sampler.sample(DragSample::changed(Point::new(-10.0, 2.0), 8)),
            SamplerEvent::Moved(Point::new(-10.0, 2.0))
        );
        assert_eq!(
            sampler.sample(DragSample::changed(Point::new(-25.0, 2.0), 16)),
            SamplerEvent::Moved(Point::new(-15.0, 0.0))
        );
    }

    #[test]
    fn every_release_phase_releases_with_platform_velocity() {
        for phase in [DragPhase::Ended, DragPhase::Cancelled, DragPhase::Failed] {
            let mut sampler = GestureSampler::new();
            sampler.sample(DragSample::began(Point::ZERO, 0));
            let release = DragSample::new(phase, Point::new(-40.0, 0.0), 16)
                .with_velocity(Point::new(-20.0, 0.0));
            assert_eq!(
                sampler.sample(release),
                SamplerEvent::Released {
                    velocity: Point::new(-20.0, 0.0)
                }
            );
            assert!(!sampler.is_active());
        }
    }

    #[test]
    fn release_without_platform_velocity_uses_tracker() {
        let mut sampler = GestureSampler::new();
        sampler.sample(DragSample::began(Point::ZERO, 0));
        for i in 1..=3 {
            sampler.sample(DragSample::changed(Point::new(-100.0 * i as f32, 0.0), i * 10));
        }
        match sampler.sample(DragSample::ended(Point::new(-400.0, 0.0), 40)) {
            SamplerEvent::Released { velocity } => {
                assert!(velocity.x < -5_000.0, "expected fast leftward fling, got {velocity:?}")
            }
            other => panic!("expected release, got {other:?}"),
        }
    }

    #[test]
    fn samples_outside_a_drag_are_ignored() {
        let mut sampler = GestureSampler::new();
        assert_eq!(
            sampler.sample(DragSample::changed(Point::new(5.0, 0.0), 0)),
            SamplerEvent::Ignored
        );
        assert_eq!(
            sampler.sample(DragSample::ended(Point::new(5.0, 0.0), 8)),
            SamplerEvent::Ignored
        );
        assert!(!sampler.is_active());
    }
}
