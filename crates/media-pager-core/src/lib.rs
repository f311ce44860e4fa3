//! Core engine for gesture-driven media browsing.
//!
//! Three content slots are recycled around a drifting logical index so an
//! arbitrarily long collection can be browsed with a constant number of
//! live views. See [`BrowserEngine`] for the gesture flow.

mod error;

pub mod config;
pub mod engine;
pub mod position;
pub mod slot;
pub mod source;
pub mod window;

pub use config::{BrowserConfig, BrowserStyle};
pub use engine::{BrowserEngine, DragResponse, Rotations};
pub use error::PagerError;
pub use position::RotationThresholds;
pub use slot::{effective_index, ContentSlot, SlotId};
pub use source::{ContentCompletion, FocusObserver, MediaSource};
pub use window::{Rotation, SlidingWindow, SLOT_COUNT};
