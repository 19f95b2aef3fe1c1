//! Core runtime for the Tavla dice engine.
//!
//! Everything runs on one UI thread. Animations and timers register frame
//! callbacks with the [`Runtime`]; the host drives the loop by draining them
//! once per rendered frame.

mod frame_clock;
mod runtime;

pub use frame_clock::{DelayRegistration, FrameCallbackRegistration, FrameClock};
pub use runtime::{Runtime, RuntimeHandle};

pub type FrameCallbackId = u64;

/// Nanoseconds per millisecond, the unit frame times are converted with.
pub const NANOS_PER_MILLI: u64 = 1_000_000;

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
