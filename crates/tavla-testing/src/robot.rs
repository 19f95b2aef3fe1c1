//! Robot-style driver for the dice throw controller.
//!
//! The robot owns a [`Runtime`] and a virtual clock. Pointer events are
//! stamped with the clock and frames are drained at a fixed interval, so
//! every test sees the same timeline.
//!
//! ```
//! use tavla_testing::ThrowRobot;
//! use tavla_foundation::ThrowConfig;
//!
//! let mut robot = ThrowRobot::new(ThrowConfig::default());
//! robot.press(0.0, 0.0);
//! robot.drag_to(0.0, -25.0, 5);
//! robot.release();
//! assert!(robot.advance_until_idle(10_000));
//! ```

use tavla_core::{Runtime, RuntimeHandle, NANOS_PER_MILLI};
use tavla_foundation::{PointerEvent, PointerId, ThrowConfig, ThrowPlanner};
use tavla_ui::{DiceThrow, DieVisualState};
use tavla_ui_graphics::Point;

/// Roughly 60 frames per second.
pub const FRAME_INTERVAL_MILLIS: u64 = 16;

pub struct ThrowRobot {
    runtime: Runtime,
    dice: DiceThrow,
    now_millis: u64,
    pointer: PointerId,
    position: Point,
}

impl ThrowRobot {
    /// Robot with a fixed planner seed.
    pub fn new(config: ThrowConfig) -> Self {
        Self::with_seed(config, 0)
    }

    pub fn with_seed(config: ThrowConfig, seed: u64) -> Self {
        let runtime = Runtime::new();
        let dice = DiceThrow::with_planner(runtime.handle(), ThrowPlanner::with_seed(config, seed));
        Self {
            runtime,
            dice,
            now_millis: 0,
            pointer: 0,
            position: Point::ZERO,
        }
    }

    pub fn dice(&self) -> &DiceThrow {
        &self.dice
    }

    pub fn runtime(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn now_millis(&self) -> u64 {
        self.now_millis
    }

    /// Pointer id used for subsequent events.
    pub fn use_pointer(&mut self, pointer: PointerId) {
        self.pointer = pointer;
    }

    pub fn press(&mut self, x: f32, y: f32) -> bool {
        self.position = Point::new(x, y);
        self.send(PointerEvent::down(self.position, self.now_millis))
    }

    /// Lets `after_millis` pass, then moves the pointer to `(x, y)`.
    pub fn drag_to(&mut self, x: f32, y: f32, after_millis: u64) -> bool {
        self.advance_millis(after_millis);
        self.position = Point::new(x, y);
        self.send(PointerEvent::moved(self.position, self.now_millis))
    }

    /// Press at `from`, then `steps` evenly spaced moves ending at `to`,
    /// `step_millis` apart. The pointer stays down.
    pub fn swipe(&mut self, from: Point, to: Point, steps: u32, step_millis: u64) -> bool {
        if !self.press(from.x, from.y) {
            return false;
        }
        let steps = steps.max(1);
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            let point = from + (to - from) * t;
            self.drag_to(point.x, point.y, step_millis);
        }
        true
    }

    pub fn release(&mut self) -> bool {
        self.send(PointerEvent::up(self.position, self.now_millis))
    }

    pub fn cancel(&mut self) -> bool {
        self.send(PointerEvent::cancel(self.position, self.now_millis))
    }

    pub fn send(&mut self, event: PointerEvent) -> bool {
        self.dice.pointer_input(&event.with_id(self.pointer))
    }

    /// Drains exactly one frame at the current time.
    pub fn frame(&mut self) {
        self.runtime
            .handle()
            .drain_frame_callbacks(self.now_millis * NANOS_PER_MILLI);
    }

    /// Advances the clock, draining a frame every [`FRAME_INTERVAL_MILLIS`]
    /// and one at the final time.
    pub fn advance_millis(&mut self, millis: u64) {
        let target = self.now_millis + millis;
        while self.now_millis < target {
            self.now_millis = (self.now_millis + FRAME_INTERVAL_MILLIS).min(target);
            self.frame();
        }
    }

    /// Pumps frames until nothing is animating and both dice are idle.
    /// Returns `false` if that takes longer than `max_millis`.
    pub fn advance_until_idle(&mut self, max_millis: u64) -> bool {
        let deadline = self.now_millis + max_millis;
        loop {
            let handle = self.runtime.handle();
            if !handle.has_frame_callbacks() && self.dice.state() == DieVisualState::Idle {
                return true;
            }
            if self.now_millis >= deadline {
                log::warn!("robot gave up waiting for idle at {}ms", self.now_millis);
                return false;
            }
            self.advance_millis(FRAME_INTERVAL_MILLIS);
        }
    }

    /// Pumps frames until the controller reaches `state`.
    pub fn advance_until_state(&mut self, state: DieVisualState, max_millis: u64) -> bool {
        let deadline = self.now_millis + max_millis;
        while self.dice.state() != state {
            if self.now_millis >= deadline {
                return false;
            }
            self.advance_millis(FRAME_INTERVAL_MILLIS);
        }
        true
    }
}
