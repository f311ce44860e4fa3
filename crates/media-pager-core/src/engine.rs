//! The browser engine: drives the sliding window from drag input.
//!
//! # Overview
//! The engine owns the three-slot [`SlidingWindow`] and connects it to the
//! outside world:
//! - **Drag input** arrives as [`DragSample`]s and is turned into deltas by
//!   the [`GestureSampler`].
//! - **Position arithmetic** lives in [`crate::position`]; the engine only
//!   applies its decisions.
//! - **Content** is requested from the [`MediaSource`] whenever a slot is
//!   relabeled, and applied when deliveries are drained.
//! - **Focus changes** are reported to a weakly held [`FocusObserver`].
//!
//! # Gesture flow
//! 1. **Began**: an in-flight snap is interrupted; the new drag wins.
//! 2. **Changed**: the delta is normalized with the viewport sampled now,
//!    clamped for the browsing style, and applied to every slot. Slots are
//!    rotated for as long as the middle slot sits past a threshold.
//! 3. **Ended / Cancelled / Failed**: a snap delta is resolved and animated
//!    over the configured duration by [`BrowserEngine::on_frame`]. The
//!    rotation check runs once the animation has applied its final step.
//!
//! The engine is single-threaded. Only content deliveries cross threads, and
//! they are queued on a channel until the engine drains them.

use crate::config::BrowserConfig;
use crate::position::{self, RotationThresholds};
use crate::slot::{ContentSlot, SlotId};
use crate::source::{ContentCompletion, ContentDelivery, FocusObserver, MediaSource};
use crate::window::{Rotation, SlidingWindow};
use crate::PagerError;
use media_pager_animation::{Instant, Tween};
use media_pager_foundation::{DragSample, GestureSampler, Point, SamplerEvent, Size};
use smallvec::SmallVec;
use std::cell::Cell;
use std::rc::{Rc, Weak};
use std::sync::mpsc;

/// Residual drift left by incremental animation steps that is absorbed when
/// a snap completes, so the focused slot rests at exactly `0.0`.
const REST_EPSILON: f32 = 1e-3;

/// Rotations performed while applying one delta.
pub type Rotations = SmallVec<[Rotation; 2]>;

/// How the engine responded to a drag sample.
#[derive(Clone, Debug, PartialEq)]
pub enum DragResponse {
    /// The sample arrived outside a drag and changed nothing.
    Ignored,
    Began,
    /// `delta` is the normalized shift actually applied after clamping.
    /// `jumped` is how many items a far move skipped in one relabel before
    /// the single-step `rotations`; positive moves focus forward.
    Moved {
        delta: f32,
        jumped: i64,
        rotations: Rotations,
    },
    /// The drag ended; `snap_delta` is being animated.
    Released { velocity: f32, snap_delta: f32 },
}

/// A resolved release being played out frame by frame.
#[derive(Debug)]
struct SnapAnimation {
    delta: f32,
    /// Started on the first frame after the release.
    tween: Option<Tween>,
    /// Portion of `delta` already applied to the window.
    applied: f32,
}

impl SnapAnimation {
    fn new(delta: f32) -> Self {
        Self {
            delta,
            tween: None,
            applied: 0.0,
        }
    }

    fn remaining(&self) -> f32 {
        self.delta - self.applied
    }
}

pub struct BrowserEngine<S: MediaSource> {
    config: BrowserConfig,
    viewport: Size,
    source: S,
    window: SlidingWindow<S::Image>,
    sampler: GestureSampler,
    snap: Option<SnapAnimation>,
    observer: Option<Weak<dyn FocusObserver>>,
    delivery_tx: mpsc::Sender<ContentDelivery<S::Image>>,
    delivery_rx: mpsc::Receiver<ContentDelivery<S::Image>>,
    /// Set once an empty source has been reported, until it has items again.
    empty_reported: Cell<bool>,
}

impl<S: MediaSource> BrowserEngine<S> {
    /// Creates the engine focused on item `0` and requests content for all
    /// three slots.
    pub fn new(source: S, config: BrowserConfig, viewport: Size) -> Result<Self, PagerError> {
        config.validate()?;
        let (delivery_tx, delivery_rx) = mpsc::channel();
        let mut engine = Self {
            config,
            viewport,
            source,
            window: SlidingWindow::new(),
            sampler: GestureSampler::new(),
            snap: None,
            observer: None,
            delivery_tx,
            delivery_rx,
            empty_reported: Cell::new(false),
        };
        for id in engine.window.order() {
            engine.request_content(id);
        }
        Ok(engine)
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Replaces the configuration. Rejected while a drag is in progress.
    ///
    /// A style change first completes any snap, then re-anchors the window
    /// so linear browsing starts from an in-range index.
    pub fn set_config(&mut self, config: BrowserConfig) -> Result<(), PagerError> {
        if self.is_dragging() {
            return Err(PagerError::GestureInProgress);
        }
        config.validate()?;
        let restyle = config.style != self.config.style;
        if restyle {
            self.finish_settling();
        }
        self.config = config;
        if restyle {
            self.restyle();
        }
        Ok(())
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Updates the view size. Read fresh at every drag update.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn window(&self) -> &SlidingWindow<S::Image> {
        &self.window
    }

    /// Slots ordered `[previous, middle, next]`.
    pub fn slots(&self) -> [&ContentSlot<S::Image>; 3] {
        self.window.slots()
    }

    pub fn set_focus_observer<O: FocusObserver + 'static>(&mut self, observer: &Rc<O>) {
        let weak: Weak<dyn FocusObserver> = Rc::downgrade(observer) as Weak<dyn FocusObserver>;
        self.observer = Some(weak);
    }

    pub fn clear_focus_observer(&mut self) {
        self.observer = None;
    }

    /// Item count from the source, with an empty collection treated as one.
    pub fn item_count(&self) -> usize {
        match self.source.item_count() {
            0 => {
                if !self.empty_reported.replace(true) {
                    log::warn!("media source reported no items, treating it as a single item");
                }
                1
            }
            count => {
                self.empty_reported.set(false);
                count
            }
        }
    }

    /// Effective index of the focused (middle) slot.
    pub fn focused_index(&self) -> usize {
        self.window.middle().effective_index(self.item_count())
    }

    pub fn is_dragging(&self) -> bool {
        self.sampler.is_active()
    }

    /// Whether a released drag is still animating toward its rest position.
    pub fn is_settling(&self) -> bool {
        self.snap.is_some()
    }

    /// Pixel translation of a slot along the drag axis, for the renderer.
    pub fn slot_translation(&self, id: SlotId) -> Point {
        let axis = self.config.direction;
        let span = self.viewport.along(axis) + self.config.gap;
        Point::on_axis(axis, self.window.slot(id).position() * span)
    }

    pub fn handle_drag(&mut self, sample: DragSample) -> DragResponse {
        match self.sampler.sample(sample) {
            SamplerEvent::Began => {
                self.interrupt_snap();
                DragResponse::Began
            }
            SamplerEvent::Moved(raw) => self.drag_by(raw),
            SamplerEvent::Released { velocity } => {
                self.release(velocity.along(self.config.direction))
            }
            SamplerEvent::Ignored => DragResponse::Ignored,
        }
    }

    /// Advances content delivery and any snap animation to `now`.
    ///
    /// Returns `true` while the snap animation is still running.
    pub fn on_frame(&mut self, now: Instant) -> bool {
        self.pump_content();

        let duration = self.config.snap_duration;
        let easing = self.config.easing;
        let Some(snap) = self.snap.as_mut() else {
            return false;
        };
        let target = snap.delta;
        let tween = snap
            .tween
            .get_or_insert_with(|| Tween::start(0.0, target, duration, easing, now));
        let value = tween.value_at(now);
        let finished = tween.is_finished_at(now);
        let step = value - snap.applied;
        snap.applied = value;

        self.window.shift_all(step);
        if finished {
            self.snap = None;
            self.come_to_rest();
        }
        !finished
    }

    /// Jumps any in-flight snap animation to its end.
    pub fn finish_settling(&mut self) {
        if let Some(snap) = self.snap.take() {
            self.window.shift_all(snap.remaining());
            self.come_to_rest();
        }
    }

    /// Applies queued content deliveries. Returns how many were applied.
    pub fn pump_content(&mut self) -> usize {
        let count = self.item_count();
        let mut applied = 0;
        while let Ok(delivery) = self.delivery_rx.try_recv() {
            if delivery.reported != delivery.requested {
                log::warn!(
                    "image for index {} reported as {}, discarding",
                    delivery.requested,
                    delivery.reported
                );
                continue;
            }
            let slot = self.window.slot_mut(delivery.slot);
            let current = slot.effective_index(count);
            if slot.requested != Some(delivery.reported) || current != delivery.reported {
                log::trace!(
                    "stale image {} for slot {:?} now showing {}",
                    delivery.reported,
                    delivery.slot,
                    current
                );
                continue;
            }
            if let Some(image) = delivery.image {
                slot.content = Some(image);
                applied += 1;
            }
        }
        applied
    }

    /// Animates one item forward. Returns `Ok(false)` when there is no next
    /// item to move to.
    pub fn show_next(&mut self) -> Result<bool, PagerError> {
        self.step(Rotation::Forward)
    }

    /// Animates one item backward. Returns `Ok(false)` when there is no
    /// previous item to move to.
    pub fn show_previous(&mut self) -> Result<bool, PagerError> {
        self.step(Rotation::Backward)
    }

    /// Re-reads the collection and refocuses its first item.
    ///
    /// The slots are relabeled `-1, 0, 1` in place, their content dropped,
    /// and every slot refetched.
    pub fn reload(&mut self) {
        let previous_focus = self.focused_index();
        self.snap = None;
        self.sampler.reset();
        self.window.reset();
        for id in self.window.order() {
            self.request_content(id);
        }
        if self.focused_index() != previous_focus {
            self.notify_focus();
        }
    }

    fn restyle(&mut self) {
        let count = self.item_count();
        let carousel = self.config.is_carousel();
        if !carousel {
            let middle = self.window.middle();
            let drift = middle.index() - middle.effective_index(count) as i64;
            if drift != 0 {
                log::debug!("rebasing window by {drift} for linear browsing");
                self.window.rebase(drift);
            }
        }
        for id in self.window.order() {
            let slot = self.window.slot(id);
            let wanted = carousel || slot.is_in_range(count);
            if wanted != slot.requested_index().is_some() {
                self.request_content(id);
            }
        }
    }

    fn step(&mut self, direction: Rotation) -> Result<bool, PagerError> {
        if self.is_dragging() {
            return Err(PagerError::GestureInProgress);
        }
        self.finish_settling();

        let count = self.item_count();
        let middle = self.window.middle();
        let blocked = match direction {
            Rotation::Forward => {
                count <= 1 || (!self.config.is_carousel() && middle.index() >= count as i64 - 1)
            }
            Rotation::Backward => {
                count <= 1 || (!self.config.is_carousel() && middle.index() <= 0)
            }
        };
        if blocked {
            log::debug!("no item to show {direction:?} of {}", self.focused_index());
            return Ok(false);
        }

        let delta = match direction {
            Rotation::Forward => -self.window.next().position(),
            Rotation::Backward => -self.window.previous().position(),
        };
        self.begin_snap(delta);
        Ok(true)
    }

    fn drag_by(&mut self, raw: Point) -> DragResponse {
        let axis = self.config.direction;
        let normalized = position::normalize(raw, self.viewport, self.config.gap).along(axis);
        let delta = position::clamp_for_style(
            self.config.style,
            self.window.middle(),
            normalized,
            self.item_count(),
        );
        log::trace!("drag raw {raw:?} normalized {normalized} applied {delta}");

        self.window.shift_all(delta);
        let (jumped, rotations) = self.settle_rotations();
        DragResponse::Moved {
            delta,
            jumped,
            rotations,
        }
    }

    fn release(&mut self, velocity: f32) -> DragResponse {
        let [previous, middle, next] = self.window.slots();
        let snap_delta = position::resolve_snap_target(
            velocity,
            previous,
            middle,
            next,
            self.config.min_velocity,
            self.config.min_translation,
        );
        log::debug!(
            "release at {} with velocity {velocity}, snapping by {snap_delta}",
            middle.position()
        );
        self.begin_snap(snap_delta);
        DragResponse::Released {
            velocity,
            snap_delta,
        }
    }

    fn begin_snap(&mut self, delta: f32) {
        if delta == 0.0 || self.config.snap_duration.is_zero() {
            self.window.shift_all(delta);
            self.come_to_rest();
            return;
        }
        self.snap = Some(SnapAnimation::new(delta));
    }

    /// Stops an in-flight snap where it is.
    fn interrupt_snap(&mut self) {
        if let Some(snap) = self.snap.take() {
            log::debug!(
                "drag began mid-snap with {} of {} applied",
                snap.applied,
                snap.delta
            );
            self.settle_rotations();
        }
    }

    /// Final step of a snap: rotate if needed, then pin the focused slot.
    fn come_to_rest(&mut self) {
        self.settle_rotations();
        // A gap wider than half the view puts the backward threshold beyond
        // the neighbour's rest position, so hand focus to the nearer slot.
        loop {
            let position = self.window.middle().position();
            let rotation = if position > 0.5 {
                Rotation::Backward
            } else if position < -0.5 {
                Rotation::Forward
            } else {
                break;
            };
            self.rotate_once(rotation);
        }
        let drift = self.window.middle().position();
        if drift != 0.0 && drift.abs() < REST_EPSILON {
            self.window.shift_all(-drift);
        }
    }

    /// Rotates until no threshold is crossed.
    ///
    /// A middle slot two or more spans out is first brought back with one
    /// relabel. In that case the slots are fetched once with their final
    /// labels and focus is reported once.
    fn settle_rotations(&mut self) -> (i64, Rotations) {
        let jumped = self.jump_whole_spans();
        let axis = self.config.direction;
        let thresholds = RotationThresholds::new(self.viewport.along(axis), self.config.gap);
        let mut rotations = Rotations::new();
        while let Some(rotation) = position::boundary_crossed(self.window.middle(), &thresholds) {
            if jumped == 0 {
                self.rotate_once(rotation);
            } else {
                self.window.rotate(rotation);
            }
            rotations.push(rotation);
        }
        if jumped != 0 {
            for id in self.window.order() {
                self.request_content(id);
            }
            self.notify_focus();
        }
        (jumped, rotations)
    }

    /// Leaves the middle slot less than two spans from center. Returns the
    /// number of items skipped.
    fn jump_whole_spans(&mut self) -> i64 {
        let position = self.window.middle().position();
        let whole = position.trunc();
        if !(whole.abs() >= 2.0) {
            return 0;
        }
        let skip = whole - whole.signum();
        let by = -(skip as i64);
        self.window.jump(by, position - skip);
        log::debug!(
            "jumped {by} items, middle slot now index {}",
            self.window.middle().index()
        );
        by
    }

    fn rotate_once(&mut self, rotation: Rotation) {
        let recycled = self.window.rotate(rotation);
        log::debug!(
            "rotated {rotation:?}: slot {:?} now index {}",
            recycled,
            self.window.slot(recycled).index()
        );
        self.request_content(recycled);
        self.notify_focus();
    }

    fn request_content(&mut self, id: SlotId) {
        let count = self.item_count();
        let linear = !self.config.is_carousel();
        let slot = self.window.slot_mut(id);
        slot.content = None;
        if linear && !slot.is_in_range(count) {
            slot.requested = None;
            return;
        }
        let index = slot.effective_index(count);
        slot.requested = Some(index);
        let completion = ContentCompletion::new(id, index, self.delivery_tx.clone());
        self.source.request_image(index, completion);
    }

    fn notify_focus(&self) {
        let Some(observer) = self.observer.as_ref().and_then(Weak::upgrade) else {
            return;
        };
        observer.focus_changed(self.focused_index());
    }
}

impl<S: MediaSource> std::fmt::Debug for BrowserEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserEngine")
            .field("config", &self.config)
            .field("viewport", &self.viewport)
            .field("indices", &self.window.slots().map(|slot| slot.index()))
            .field("positions", &self.window.slots().map(|slot| slot.position()))
            .field("dragging", &self.is_dragging())
            .field("settling", &self.is_settling())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
