use crate::runtime::RuntimeHandle;
use crate::{FrameCallbackId, NANOS_PER_MILLI};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone)]
pub struct FrameClock {
    runtime: RuntimeHandle,
}

impl FrameClock {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }

    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let runtime = self.runtime.clone();
        match runtime.register_frame_callback(callback) {
            Some(id) => FrameCallbackRegistration::new(runtime, id),
            None => FrameCallbackRegistration::inactive(runtime),
        }
    }

    pub fn with_frame_millis(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        self.with_frame_nanos(move |nanos| {
            let millis = nanos / NANOS_PER_MILLI;
            callback(millis);
        })
    }

    /// Runs `callback` once `delay_millis` have elapsed on the frame clock.
    ///
    /// The deadline is measured from the first frame delivered after this
    /// call, so a continuation registered alongside animations shares their
    /// time origin. Nothing blocks: the clock keeps re-registering for the
    /// next frame until the deadline passes.
    pub fn with_delay_millis(
        &self,
        delay_millis: u64,
        callback: impl FnOnce() + 'static,
    ) -> DelayRegistration {
        let state = Rc::new(RefCell::new(DelayState {
            deadline_nanos: None,
            delay_nanos: delay_millis.saturating_mul(NANOS_PER_MILLI),
            callback: Some(Box::new(callback)),
            registration: None,
        }));
        schedule_delay_frame(self.clone(), &state);
        DelayRegistration { state }
    }
}

struct DelayState {
    deadline_nanos: Option<u64>,
    delay_nanos: u64,
    callback: Option<Box<dyn FnOnce() + 'static>>,
    registration: Option<FrameCallbackRegistration>,
}

fn schedule_delay_frame(clock: FrameClock, state: &Rc<RefCell<DelayState>>) {
    let weak = Rc::downgrade(state);
    let next_clock = clock.clone();
    let registration = clock.with_frame_nanos(move |time| {
        let Some(state) = weak.upgrade() else {
            return;
        };
        let fire = {
            let mut delay = state.borrow_mut();
            delay.registration = None;
            let delay_nanos = delay.delay_nanos;
            let deadline = *delay
                .deadline_nanos
                .get_or_insert_with(|| time.saturating_add(delay_nanos));
            if time >= deadline {
                delay.callback.take()
            } else {
                None
            }
        };
        match fire {
            Some(callback) => callback(),
            None => {
                if state.borrow().callback.is_some() {
                    schedule_delay_frame(next_clock, &state);
                }
            }
        }
    });
    state.borrow_mut().registration = Some(registration);
}

/// Handle to a pending [`FrameClock::with_delay_millis`] continuation.
///
/// Dropping the handle cancels the continuation if it has not fired yet.
pub struct DelayRegistration {
    state: Rc<RefCell<DelayState>>,
}

impl DelayRegistration {
    pub fn is_pending(&self) -> bool {
        self.state.borrow().callback.is_some()
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for DelayRegistration {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        state.callback = None;
        if let Some(registration) = state.registration.take() {
            registration.cancel();
        }
    }
}

pub struct FrameCallbackRegistration {
    runtime: RuntimeHandle,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    fn new(runtime: RuntimeHandle, id: FrameCallbackId) -> Self {
        Self {
            runtime,
            id: Some(id),
        }
    }

    fn inactive(runtime: RuntimeHandle) -> Self {
        Self { runtime, id: None }
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}
