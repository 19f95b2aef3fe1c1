//! Reference values for the throw gesture.
//!
//! These were tuned by feel rather than derived; [`crate::ThrowConfig`]
//! starts from them and every one can be overridden.

/// Release speed, in position units per millisecond, a swipe must exceed to
/// count as a throw. The upward component must also exceed it.
pub const SWIPE_THRESHOLD: f32 = 3.0;

/// Duration of the linear tween that keeps the dice under the finger.
///
/// Short enough that the die never visibly lags the pointer.
pub const FOLLOW_DURATION_MS: u64 = 67;

/// Scale applied while a die is pressed.
pub const PRESS_SCALE: f32 = 0.95;

/// Maximum drag tilt in degrees, and degrees of tilt per unit/ms of velocity.
pub const MAX_TILT_DEGREES: f32 = 15.0;
pub const TILT_PER_VELOCITY: f32 = 4.0;

/// Each die's direction is rotated by a random angle within ± this many
/// degrees of the release direction.
pub const MAX_PERTURBATION_DEGREES: f32 = 20.0;

/// Flight distance band.
pub const THROW_DISTANCE_MIN: f32 = 250.0;
pub const THROW_DISTANCE_MAX: f32 = 270.0;

/// Wide-dispersion flight distance band.
pub const WIDE_THROW_DISTANCE_MIN: f32 = 200.0;
pub const WIDE_THROW_DISTANCE_MAX: f32 = 300.0;

/// Total spin per throw, in degrees.
pub const MIN_SPIN_DEGREES: f32 = 360.0;
pub const MAX_SPIN_DEGREES: f32 = 1080.0;

/// Flight durations of the first and second die. Offset so they do not land
/// in lockstep.
pub const FLIGHT_DURATIONS_MS: [u64; 2] = [800, 850];

/// Mid-flight shrink target and duration of the bounce.
pub const BOUNCE_SCALE: f32 = 0.6;
pub const BOUNCE_DURATION_MS: u64 = 400;

/// Delay between the throw and the return to rest. Must exceed the longest
/// flight duration.
pub const SETTLE_DELAY_MS: u64 = 1500;

/// Spring back to the rest slot when a drag is not a throw.
pub const CANCEL_SPRING_STIFFNESS: f32 = 300.0;
pub const CANCEL_SPRING_DAMPING: f32 = 20.0;

/// Spring back to the rest slot after a throw has landed.
pub const RESET_SPRING_STIFFNESS: f32 = 200.0;
pub const RESET_SPRING_DAMPING: f32 = 15.0;
