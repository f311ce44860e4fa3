//! Foundation types for media-pager: geometry, drag input, and gesture sampling.

pub mod geometry;
pub mod gesture;
pub mod velocity_tracker;

// Re-export commonly used items
pub use geometry::{Axis, Point, Size};
pub use gesture::{DragPhase, DragSample, GestureSampler, SamplerEvent};
pub use velocity_tracker::{AxisVelocityTracker, VelocityTracker};

pub mod prelude {
    pub use crate::geometry::{Axis, Point, Size};
    pub use crate::gesture::{DragPhase, DragSample, GestureSampler, SamplerEvent};
}
