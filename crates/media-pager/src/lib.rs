#![deny(missing_docs)]

//! Gesture-driven media browsing with three recycled content slots.
//!
//! Depend on this crate alone; it re-exports the engine, its input types,
//! and the snap animation primitives.

/// Re-export the engine so applications can depend on a single crate.
pub use media_pager_core::*;

/// Drag input and geometry.
pub use media_pager_foundation::{Axis, DragPhase, DragSample, Point, Size};

/// Snap animation timing.
pub use media_pager_animation::{Duration, Easing, Instant};

/// Convenience imports for media-pager applications.
pub mod prelude {
    pub use crate::{Axis, DragPhase, DragSample, Duration, Easing, Instant, Point, Size};
    pub use media_pager_core::{
        BrowserConfig, BrowserEngine, BrowserStyle, ContentCompletion, DragResponse,
        FocusObserver, MediaSource, PagerError,
    };
}
