//! Browser configuration.
//!
//! All values are read at decision time. They may be replaced between drags
//! through [`BrowserEngine::set_config`](crate::BrowserEngine::set_config),
//! never in the middle of one.

use crate::PagerError;
use media_pager_animation::{Duration, Easing};
use media_pager_foundation::Axis;

/// Gap between neighbouring items, in the same units as the viewport.
pub const DEFAULT_GAP: f32 = 50.0;
/// Release velocity (px/s) below which a drag resolves by position alone.
pub const DEFAULT_MIN_VELOCITY: f32 = 15.0;
/// Normalized offset below which a slow release snaps back.
pub const DEFAULT_MIN_TRANSLATION: f32 = 0.1;
pub const DEFAULT_SNAP_DURATION: Duration = Duration::from_millis(300);

/// Navigation semantics at the ends of the collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BrowserStyle {
    /// First and last items are boundaries.
    Linear,
    /// First and last items are adjacent.
    #[default]
    Carousel,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BrowserConfig {
    /// Axis drags are read along.
    pub direction: Axis,
    pub style: BrowserStyle,
    pub gap: f32,
    pub min_velocity: f32,
    pub min_translation: f32,
    /// How long a released drag takes to settle.
    pub snap_duration: Duration,
    pub easing: Easing,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            direction: Axis::Horizontal,
            style: BrowserStyle::Carousel,
            gap: DEFAULT_GAP,
            min_velocity: DEFAULT_MIN_VELOCITY,
            min_translation: DEFAULT_MIN_TRANSLATION,
            snap_duration: DEFAULT_SNAP_DURATION,
            easing: Easing::EaseOut,
        }
    }
}

impl BrowserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_direction(mut self, direction: Axis) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_style(mut self, style: BrowserStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_min_velocity(mut self, min_velocity: f32) -> Self {
        self.min_velocity = min_velocity;
        self
    }

    pub fn with_min_translation(mut self, min_translation: f32) -> Self {
        self.min_translation = min_translation;
        self
    }

    pub fn with_snap_duration(mut self, duration: Duration) -> Self {
        self.snap_duration = duration;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn is_carousel(&self) -> bool {
        self.style == BrowserStyle::Carousel
    }

    pub fn validate(&self) -> Result<(), PagerError> {
        if !is_non_negative(self.gap) {
            return Err(PagerError::InvalidGap(self.gap));
        }
        if !is_non_negative(self.min_velocity) {
            return Err(PagerError::InvalidVelocityThreshold(self.min_velocity));
        }
        if !is_non_negative(self.min_translation) {
            return Err(PagerError::InvalidTranslationThreshold(self.min_translation));
        }
        Ok(())
    }
}

#[inline]
fn is_non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}
