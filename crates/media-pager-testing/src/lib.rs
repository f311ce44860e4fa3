//! Testing utilities and harness for media-pager

pub mod fake_source;
pub mod robot_assertions;
pub mod testing;

pub use fake_source::{FakeMediaSource, RecordingFocusObserver};
pub use testing::PagerTestRule;

pub mod prelude {
    pub use crate::fake_source::*;
    pub use crate::robot_assertions;
    pub use crate::testing::*;
}
