//! A test rule that owns an engine over a [`FakeMediaSource`] and drives it
//! with a synthetic clock.

use crate::fake_source::{FakeMediaSource, RecordingFocusObserver};
use media_pager_animation::{Duration, Instant};
use media_pager_core::{BrowserConfig, BrowserEngine, BrowserStyle, DragResponse, PagerError};
use media_pager_foundation::{DragPhase, DragSample, Point, Size};
use std::rc::Rc;

pub const TEST_VIEWPORT: Size = Size::new(1000.0, 800.0);

/// Frame interval used when pumping animations.
pub const FRAME: Duration = Duration::from_millis(16);

/// Upper bound on frames pumped by [`PagerTestRule::settle`].
const MAX_SETTLE_FRAMES: usize = 1_000;

pub struct PagerTestRule {
    engine: BrowserEngine<FakeMediaSource>,
    source: FakeMediaSource,
    observer: Rc<RecordingFocusObserver>,
    started: Instant,
    now: Instant,
    clock_ms: i64,
    translation: Point,
}

impl PagerTestRule {
    pub fn new(item_count: usize, config: BrowserConfig) -> Result<Self, PagerError> {
        Self::with_viewport(item_count, config, TEST_VIEWPORT)
    }

    pub fn with_viewport(
        item_count: usize,
        config: BrowserConfig,
        viewport: Size,
    ) -> Result<Self, PagerError> {
        let source = FakeMediaSource::new(item_count);
        let mut engine = BrowserEngine::new(source.clone(), config, viewport)?;
        let observer = RecordingFocusObserver::new();
        engine.set_focus_observer(&observer);
        let started = Instant::now();
        Ok(Self {
            engine,
            source,
            observer,
            started,
            now: started,
            clock_ms: 0,
            translation: Point::ZERO,
        })
    }

    pub fn carousel(item_count: usize) -> Self {
        Self::with_style(item_count, BrowserStyle::Carousel)
    }

    pub fn linear(item_count: usize) -> Self {
        Self::with_style(item_count, BrowserStyle::Linear)
    }

    fn with_style(item_count: usize, style: BrowserStyle) -> Self {
        Self::new(item_count, BrowserConfig::new().with_style(style))
            .unwrap_or_else(|err| panic!("default config rejected: {err}"))
    }

    pub fn engine(&self) -> &BrowserEngine<FakeMediaSource> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut BrowserEngine<FakeMediaSource> {
        &mut self.engine
    }

    pub fn source(&self) -> &FakeMediaSource {
        &self.source
    }

    pub fn observer(&self) -> &RecordingFocusObserver {
        &self.observer
    }

    pub fn focused_index(&self) -> usize {
        self.engine.focused_index()
    }

    /// Positions of `[previous, middle, next]`.
    pub fn positions(&self) -> [f32; 3] {
        self.engine.slots().map(|slot| slot.position())
    }

    /// Logical indices of `[previous, middle, next]`.
    pub fn indices(&self) -> [i64; 3] {
        self.engine.slots().map(|slot| slot.index())
    }

    /// Pixels per normalized unit along the drag axis.
    pub fn span(&self) -> f32 {
        let config = self.engine.config();
        self.engine.viewport().along(config.direction) + config.gap
    }

    /// Time elapsed on the synthetic clock.
    pub fn elapsed(&self) -> Duration {
        self.now.duration_since(self.started)
    }

    pub fn begin(&mut self) -> DragResponse {
        self.translation = Point::ZERO;
        self.send(DragPhase::Began, None)
    }

    /// Moves the current drag by `pixels` along the configured axis.
    pub fn drag_px(&mut self, pixels: f32) -> DragResponse {
        let direction = self.engine.config().direction;
        self.translation = self.translation + Point::on_axis(direction, pixels);
        self.send(DragPhase::Changed, None)
    }

    /// Moves the current drag by `delta` item spans.
    pub fn drag_by_normalized(&mut self, delta: f32) -> DragResponse {
        let pixels = delta * self.span();
        self.drag_px(pixels)
    }

    /// Ends the current drag with a platform velocity in px/s.
    pub fn release(&mut self, velocity: f32) -> DragResponse {
        let direction = self.engine.config().direction;
        self.send(DragPhase::Ended, Some(Point::on_axis(direction, velocity)))
    }

    pub fn cancel(&mut self) -> DragResponse {
        self.send(DragPhase::Cancelled, Some(Point::ZERO))
    }

    /// A whole gesture: begin, one move of `delta` spans, release.
    pub fn swipe(&mut self, delta: f32, velocity: f32) -> DragResponse {
        self.begin();
        self.drag_by_normalized(delta);
        self.release(velocity)
    }

    /// Advances the clock by `by` and runs one frame.
    pub fn advance(&mut self, by: Duration) -> bool {
        self.now += by;
        self.clock_ms += by.as_millis() as i64;
        self.engine.on_frame(self.now)
    }

    /// Pumps frames until the snap animation finishes. Returns the number
    /// of frames run.
    pub fn settle(&mut self) -> usize {
        let mut frames = 0;
        while self.advance(FRAME) {
            frames += 1;
            assert!(
                frames < MAX_SETTLE_FRAMES,
                "snap animation did not finish after {MAX_SETTLE_FRAMES} frames"
            );
        }
        frames + 1
    }

    /// Completes every pending fetch and applies the deliveries.
    pub fn deliver_all(&mut self) -> usize {
        self.source.complete_all();
        self.engine.pump_content()
    }

    fn send(&mut self, phase: DragPhase, velocity: Option<Point>) -> DragResponse {
        self.clock_ms += FRAME.as_millis() as i64;
        self.now += FRAME;
        let mut sample = DragSample::new(phase, self.translation, self.clock_ms);
        if let Some(velocity) = velocity {
            sample = sample.with_velocity(velocity);
        }
        self.engine.handle_drag(sample)
    }
}
