//! Testing utilities and harness for Tavla

pub mod recording;
pub mod robot;
pub mod robot_assertions;

pub use recording::RecordingDrawScope;
pub use robot::{ThrowRobot, FRAME_INTERVAL_MILLIS};
pub use robot_assertions::{assert_approx_eq, assert_layer_at_rest, assert_point_approx_eq};

pub mod prelude {
    pub use crate::recording::RecordingDrawScope;
    pub use crate::robot::*;
    pub use crate::robot_assertions::*;
}
