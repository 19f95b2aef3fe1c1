use super::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const FRAME_NANOS: u64 = 16_000_000;

#[test]
fn frame_callbacks_run_in_registration_order() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let order = Rc::new(RefCell::new(Vec::new()));

    for label in ["first", "second", "third"] {
        let order = Rc::clone(&order);
        handle.register_frame_callback(move |_| order.borrow_mut().push(label));
    }

    assert!(handle.has_frame_callbacks());
    handle.drain_frame_callbacks(FRAME_NANOS);
    assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    assert!(!handle.has_frame_callbacks());
}

#[test]
fn callbacks_registered_while_draining_wait_for_next_frame() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let times = Rc::new(RefCell::new(Vec::new()));

    {
        let times = Rc::clone(&times);
        let inner_handle = handle.clone();
        handle.register_frame_callback(move |time| {
            times.borrow_mut().push(time);
            let times = Rc::clone(&times);
            inner_handle.register_frame_callback(move |time| times.borrow_mut().push(time));
        });
    }

    handle.drain_frame_callbacks(FRAME_NANOS);
    assert_eq!(*times.borrow(), vec![FRAME_NANOS]);
    handle.drain_frame_callbacks(2 * FRAME_NANOS);
    assert_eq!(*times.borrow(), vec![FRAME_NANOS, 2 * FRAME_NANOS]);
}

#[test]
fn dropping_registration_cancels_callback() {
    let runtime = Runtime::new();
    let clock = runtime.handle().frame_clock();
    let fired = Rc::new(Cell::new(false));

    let registration = {
        let fired = Rc::clone(&fired);
        clock.with_frame_nanos(move |_| fired.set(true))
    };
    drop(registration);

    runtime.handle().drain_frame_callbacks(FRAME_NANOS);
    assert!(!fired.get());
}

#[test]
fn frame_millis_converts_from_nanos() {
    let runtime = Runtime::new();
    let clock = runtime.handle().frame_clock();
    let seen = Rc::new(Cell::new(0u64));

    let _registration = {
        let seen = Rc::clone(&seen);
        clock.with_frame_millis(move |millis| seen.set(millis))
    };
    runtime.handle().drain_frame_callbacks(48 * NANOS_PER_MILLI);
    assert_eq!(seen.get(), 48);
}

#[test]
fn delay_fires_once_deadline_passes() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let fired_at = Rc::new(Cell::new(None));

    let registration = {
        let fired_at = Rc::clone(&fired_at);
        let handle = handle.clone();
        handle.frame_clock().with_delay_millis(100, move || {
            fired_at.set(handle.last_frame_nanos());
        })
    };

    let mut time = 0;
    for _ in 0..10 {
        time += FRAME_NANOS;
        handle.drain_frame_callbacks(time);
    }

    // Deadline is 16ms (first frame) + 100ms; first frame at or past it is 128ms.
    assert_eq!(fired_at.get(), Some(128 * NANOS_PER_MILLI));
    assert!(!registration.is_pending());
    assert!(!handle.has_frame_callbacks());
}

#[test]
fn dropped_delay_never_fires() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    let fired = Rc::new(Cell::new(false));

    let registration = {
        let fired = Rc::clone(&fired);
        handle.frame_clock().with_delay_millis(10, move || fired.set(true))
    };
    handle.drain_frame_callbacks(FRAME_NANOS);
    registration.cancel();

    for step in 2..6 {
        handle.drain_frame_callbacks(step * FRAME_NANOS);
    }
    assert!(!fired.get());
    assert!(!handle.has_frame_callbacks());
}

#[test]
fn backwards_frame_time_is_clamped() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    handle.drain_frame_callbacks(50);
    handle.drain_frame_callbacks(10);
    assert_eq!(handle.last_frame_nanos(), Some(50));
}

#[test]
fn handle_outliving_runtime_is_inert() {
    let runtime = Runtime::new();
    let handle = runtime.handle();
    drop(runtime);

    assert_eq!(handle.last_frame_nanos(), None);
    assert!(handle.register_frame_callback(|_| {}).is_none());
    assert!(!handle.has_frame_callbacks());
    handle.drain_frame_callbacks(FRAME_NANOS);
}
