//! Animation system for Tavla
//!
//! Provides time-based animations with easing curves and spring physics.

use std::cell::RefCell;
use std::rc::Rc;

use tavla_core::{FrameCallbackRegistration, FrameClock, RuntimeHandle, NANOS_PER_MILLI};
use tavla_ui_graphics::Point;

/// Trait for types that can be linearly interpolated.
///
/// `fraction` is not clamped: overshooting easings and under-damped springs
/// extrapolate past the target.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for Point {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Point::new(
            self.x.lerp(&target.x, fraction),
            self.y.lerp(&target.y, fraction),
        )
    }
}

/// Easing functions for animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Linear interpolation (no easing).
    LinearEasing,
    /// Arbitrary cubic bezier through (0,0), (x1,y1), (x2,y2), (1,1).
    ///
    /// `x1` and `x2` must lie in [0, 1]; `y1` and `y2` may leave that range
    /// to overshoot.
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Decelerates past the target, then settles back onto it.
    pub const EASE_OUT_BACK: Easing = Easing::CubicBezier(0.34, 1.56, 0.64, 1.0);

    /// Pulls back before starting and overshoots before stopping.
    pub const EASE_IN_OUT_BACK: Easing = Easing::CubicBezier(0.68, -0.55, 0.265, 1.55);

    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        match *self {
            Easing::LinearEasing => fraction,
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, fraction),
        }
    }
}

/// Cubic bezier curve approximation for easing.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    fn sample_curve(a: f32, b: f32, c: f32, t: f32) -> f32 {
        ((a * t + b) * t + c) * t
    }

    fn sample_derivative(a: f32, b: f32, c: f32, t: f32) -> f32 {
        (3.0 * a * t + 2.0 * b) * t + c
    }

    // Newton-Raphson for the parametric `t` whose x matches `fraction`,
    // clamped to [0, 1].
    let mut t = fraction;
    let mut newton_success = false;
    for _ in 0..8 {
        let x = sample_curve(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            newton_success = true;
            break;
        }
        let dx = sample_derivative(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !newton_success {
        let mut t0 = 0.0;
        let mut t1 = 1.0;
        t = fraction;
        for _ in 0..16 {
            let x = sample_curve(ax, bx, cx, t);
            let delta = x - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                t1 = t;
            } else {
                t0 = t;
            }
            t = 0.5 * (t0 + t1);
        }
    }

    sample_curve(ay, by, cy, t)
}

/// Animation specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
}

impl AnimationSpec {
    /// Create a tween animation with duration and easing.
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }

    /// Create a linear tween animation.
    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::LinearEasing)
    }
}

/// Spring animation configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// Damping ratio. 1.0 = critically damped, < 1.0 = under-damped (bouncy), > 1.0 = over-damped.
    pub damping_ratio: f32,
    /// Stiffness constant. Higher values = faster animation.
    pub stiffness: f32,
    /// Velocity threshold to stop animation, in progress fractions per second.
    pub velocity_threshold: f32,
    /// Position threshold to stop animation, as a fraction of the distance.
    pub position_threshold: f32,
}

impl SpringSpec {
    /// Create a spring with default material design values.
    pub fn default_spring() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            velocity_threshold: 0.01,
            position_threshold: 0.001,
        }
    }

    /// Spring of unit mass described by an absolute damping coefficient.
    ///
    /// `damping` is converted to a ratio against critical damping
    /// (`2 * sqrt(stiffness)`).
    pub fn with_damping(stiffness: f32, damping: f32) -> Self {
        let critical = 2.0 * stiffness.max(f32::EPSILON).sqrt();
        Self {
            damping_ratio: damping / critical,
            stiffness,
            ..Self::default_spring()
        }
    }

    /// Absolute damping coefficient for a unit mass.
    pub fn damping(&self) -> f32 {
        2.0 * self.damping_ratio * self.stiffness.sqrt()
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

/// Animation type specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    /// Time-based tween animation.
    Tween(AnimationSpec),
    /// Physics-based spring animation.
    Spring(SpringSpec),
}

/// Integration step for springs, ~60fps.
const SPRING_TIMESTEP_SECS: f32 = 0.016;

/// Frame-driven animated value.
///
/// Both tweens and springs advance a progress fraction from the start value
/// (0.0) to the target (1.0); the value is `start.lerp(target, progress)`.
pub struct Animatable<T: Lerp + Clone + 'static> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

struct AnimatableInner<T: Lerp + Clone + 'static> {
    clock: FrameClock,
    current: T,
    start: T,
    target: T,
    animation_type: AnimationType,
    progress: f32,
    /// Progress fractions per second; springs only.
    velocity: f32,
    start_time_nanos: Option<u64>,
    last_frame_nanos: Option<u64>,
    running: bool,
    on_end: Option<Box<dyn FnOnce() + 'static>>,
    registration: Option<FrameCallbackRegistration>,
}

impl<T: Lerp + Clone + 'static> AnimatableInner<T> {
    fn settle(&mut self) {
        self.current = self.target.clone();
        self.start = self.target.clone();
        self.progress = 1.0;
        self.velocity = 0.0;
        self.start_time_nanos = None;
        self.last_frame_nanos = None;
        self.running = false;
    }
}

impl<T: Lerp + Clone + 'static> Animatable<T> {
    /// Create a new animatable with the given initial value.
    pub fn new(initial: T, runtime: RuntimeHandle) -> Self {
        let inner = AnimatableInner {
            clock: runtime.frame_clock(),
            current: initial.clone(),
            start: initial.clone(),
            target: initial,
            animation_type: AnimationType::Spring(SpringSpec::default()),
            progress: 1.0,
            velocity: 0.0,
            start_time_nanos: None,
            last_frame_nanos: None,
            running: false,
            on_end: None,
            registration: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Animate from the current value to `target`.
    ///
    /// Interrupts any running animation; its completion callback is dropped.
    pub fn animate_to(&self, target: T, animation: AnimationType) {
        self.start_animation(target, animation, None);
    }

    /// Like [`Animatable::animate_to`], running `on_end` once the value has
    /// reached `target`. `on_end` is dropped unrun if the animation is
    /// interrupted.
    pub fn animate_to_then(
        &self,
        target: T,
        animation: AnimationType,
        on_end: impl FnOnce() + 'static,
    ) {
        self.start_animation(target, animation, Some(Box::new(on_end)));
    }

    fn start_animation(
        &self,
        target: T,
        animation: AnimationType,
        on_end: Option<Box<dyn FnOnce() + 'static>>,
    ) {
        let interrupted = {
            let mut inner = self.inner.borrow_mut();

            if let Some(registration) = inner.registration.take() {
                registration.cancel();
            }

            inner.start = inner.current.clone();
            inner.target = target;
            inner.animation_type = animation;
            inner.progress = 0.0;
            inner.velocity = 0.0;
            inner.start_time_nanos = None;
            inner.last_frame_nanos = None;
            inner.running = true;
            std::mem::replace(&mut inner.on_end, on_end)
        };
        if interrupted.is_some() {
            log::trace!("animation interrupted, completion callback dropped");
        }
        drop(interrupted);

        Self::schedule_frame(&self.inner);
    }

    /// Current (possibly mid-animation) value.
    pub fn value(&self) -> T {
        self.inner.borrow().current.clone()
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) {
        let clock = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.clock.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, frame_time_nanos: u64) {
        let mut schedule_next = false;
        let mut finished = None;
        {
            let mut inner = this.borrow_mut();
            inner.registration = None;
            if !inner.running {
                return;
            }

            match inner.animation_type {
                AnimationType::Tween(spec) => {
                    let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
                    let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
                    let duration_nanos = (spec.duration_millis * NANOS_PER_MILLI).max(1);
                    let linear_progress =
                        (elapsed_nanos as f32 / duration_nanos as f32).clamp(0.0, 1.0);

                    if linear_progress >= 1.0 {
                        inner.settle();
                        finished = inner.on_end.take();
                    } else {
                        let progress = spec.easing.transform(linear_progress);
                        inner.progress = progress;
                        inner.current = inner.start.lerp(&inner.target, progress);
                        schedule_next = true;
                    }
                }
                AnimationType::Spring(spec) => {
                    // Damped harmonic oscillator on the progress fraction,
                    // integrated over the time since the previous frame only.
                    let last_time = *inner.last_frame_nanos.get_or_insert(frame_time_nanos);
                    inner.start_time_nanos.get_or_insert(frame_time_nanos);
                    let dt = frame_time_nanos.saturating_sub(last_time) as f32 / 1_000_000_000.0;
                    inner.last_frame_nanos = Some(frame_time_nanos);

                    if dt == 0.0 {
                        schedule_next = true;
                    } else {
                        let stiffness = spec.stiffness;
                        let damping = spec.damping();

                        let mut simulated = 0.0f32;
                        while simulated < dt {
                            let step = SPRING_TIMESTEP_SECS.min(dt - simulated);
                            let displacement = inner.progress - 1.0;
                            let spring_force = -stiffness * displacement - damping * inner.velocity;
                            // Semi-implicit Euler: velocity first, then position.
                            inner.velocity += spring_force * step;
                            inner.progress =
                                (inner.progress + inner.velocity * step).clamp(0.0, 2.0);
                            simulated += step;
                        }

                        let at_rest = inner.velocity.abs() < spec.velocity_threshold;
                        let near_target = (inner.progress - 1.0).abs() < spec.position_threshold;

                        if at_rest && near_target {
                            inner.settle();
                            finished = inner.on_end.take();
                        } else {
                            inner.current = inner.start.lerp(&inner.target, inner.progress);
                            schedule_next = true;
                        }
                    }
                }
            }
        }

        if schedule_next {
            Self::schedule_frame(this);
        }
        if let Some(on_end) = finished {
            on_end();
        }
    }
}

impl<T: Lerp + Clone + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
