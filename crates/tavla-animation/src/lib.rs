//! Animation system for Tavla
//!
//! Time-based tweens with easing curves and spring physics, driven by the
//! runtime's frame clock.

mod animation;

pub use animation::*;
