use super::*;

use std::cell::Cell;
use std::rc::Rc;
use tavla_core::Runtime;

const FRAME_NANOS: u64 = 16_666_667; // ~60 FPS

/// Drives frames until the runtime goes idle, returning every sampled value.
fn run_frames<T: Lerp + Clone + 'static>(
    runtime: &Runtime,
    animatable: &Animatable<T>,
    max_frames: usize,
) -> Vec<T> {
    let handle = runtime.handle();
    let mut samples = Vec::new();
    let mut frame_time = 0u64;
    for _ in 0..max_frames {
        if !handle.has_frame_callbacks() {
            break;
        }
        frame_time += FRAME_NANOS;
        handle.drain_frame_callbacks(frame_time);
        samples.push(animatable.value());
    }
    samples
}

#[test]
fn tween_interpolates_over_time() {
    let runtime = Runtime::new();
    let animatable = Animatable::new(0.0f32, runtime.handle());

    animatable.animate_to(1.0, AnimationType::Tween(AnimationSpec::linear(300)));
    assert_eq!(animatable.value(), 0.0);
    assert!(animatable.is_running());

    let samples = run_frames(&runtime, &animatable, 64);
    let saw_midpoint = samples.iter().any(|value| *value > 0.0 && *value < 1.0);
    let last = *samples.last().expect("at least one value recorded");
    assert!(saw_midpoint, "animation should report intermediate values");
    assert!(
        (last - 1.0).abs() < f32::EPSILON,
        "animation should end at target"
    );
    assert!(!animatable.is_running());
    assert!(!runtime.handle().has_frame_callbacks());
}

#[test]
fn spring_settles_exactly_on_target() {
    let runtime = Runtime::new();
    let animatable = Animatable::new(Point::new(120.0, -80.0), runtime.handle());
    let finished = Rc::new(Cell::new(false));

    {
        let finished = Rc::clone(&finished);
        animatable.animate_to_then(
            Point::ZERO,
            AnimationType::Spring(SpringSpec::with_damping(200.0, 15.0)),
            move || finished.set(true),
        );
    }

    let samples = run_frames(&runtime, &animatable, 600);
    assert!(finished.get(), "spring should report completion");
    assert_eq!(animatable.value(), Point::ZERO);
    assert!(
        samples.iter().any(|p| p.x < 0.0),
        "under-damped spring should overshoot the origin"
    );
}

#[test]
fn interrupted_animation_drops_completion() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let animatable = Animatable::new(0.0f32, handle.clone());
    let first_done = Rc::new(Cell::new(false));
    let second_done = Rc::new(Cell::new(false));

    {
        let first_done = Rc::clone(&first_done);
        animatable.animate_to_then(
            100.0,
            AnimationType::Tween(AnimationSpec::linear(200)),
            move || first_done.set(true),
        );
    }
    handle.drain_frame_callbacks(FRAME_NANOS);
    handle.drain_frame_callbacks(2 * FRAME_NANOS);
    let midway = animatable.value();
    assert!(midway > 0.0 && midway < 100.0);

    {
        let second_done = Rc::clone(&second_done);
        animatable.animate_to_then(
            0.0,
            AnimationType::Tween(AnimationSpec::linear(50)),
            move || second_done.set(true),
        );
    }
    assert_eq!(animatable.value(), midway, "new animation starts from current value");

    run_frames(&runtime, &animatable, 64);
    assert!(!first_done.get());
    assert!(second_done.get());
    assert_eq!(animatable.value(), 0.0);
}

#[test]
fn easing_linear_is_identity() {
    assert_eq!(Easing::LinearEasing.transform(0.0), 0.0);
    assert_eq!(Easing::LinearEasing.transform(0.5), 0.5);
    assert_eq!(Easing::LinearEasing.transform(1.0), 1.0);
}

#[test]
fn easing_bounds_are_correct() {
    let easings = [
        Easing::LinearEasing,
        Easing::EASE_OUT_BACK,
        Easing::EASE_IN_OUT_BACK,
    ];

    for easing in easings {
        let start = easing.transform(0.0);
        let end = easing.transform(1.0);
        assert!(
            (start - 0.0).abs() < 0.01,
            "Start should be ~0 for {:?}",
            easing
        );
        assert!(
            (end - 1.0).abs() < 0.01,
            "End should be ~1 for {:?}",
            easing
        );
    }
}

#[test]
fn back_easings_overshoot() {
    let peak = (1..100)
        .map(|i| Easing::EASE_OUT_BACK.transform(i as f32 / 100.0))
        .fold(f32::MIN, f32::max);
    assert!(peak > 1.0, "ease-out-back should pass the target, peak {peak}");

    let dip = (1..100)
        .map(|i| Easing::EASE_IN_OUT_BACK.transform(i as f32 / 100.0))
        .fold(f32::MAX, f32::min);
    assert!(dip < 0.0, "ease-in-out-back should pull back first, dip {dip}");
}

#[test]
fn spring_spec_default_is_critically_damped() {
    let spec = SpringSpec::default();
    assert_eq!(spec.damping_ratio, 1.0);
}

#[test]
fn spring_with_damping_converts_to_ratio() {
    let spec = SpringSpec::with_damping(300.0, 20.0);
    let expected = 20.0 / (2.0 * 300.0f32.sqrt());
    assert!((spec.damping_ratio - expected).abs() < 1e-6);
    assert!(spec.damping_ratio < 1.0);
    assert!((spec.damping() - 20.0).abs() < 1e-4);
}
