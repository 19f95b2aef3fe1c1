use crate::frame_clock::FrameClock;
use crate::FrameCallbackId;
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct RuntimeInner {
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<u64>,
    last_frame_nanos: Cell<Option<u64>>,
    ui_thread_id: std::thread::ThreadId,
}

impl RuntimeInner {
    fn new() -> Self {
        Self {
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            last_frame_nanos: Cell::new(None),
            ui_thread_id: std::thread::current().id(),
        }
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        // Callbacks that already ran were popped during the drain.
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(last) = self.last_frame_nanos.get() {
            if frame_time_nanos < last {
                log::warn!(
                    "frame time went backwards ({frame_time_nanos} < {last}); using previous frame time"
                );
            }
        }
        let frame_time_nanos = self
            .last_frame_nanos
            .get()
            .map_or(frame_time_nanos, |last| frame_time_nanos.max(last));
        self.last_frame_nanos.set(Some(frame_time_nanos));

        let mut callbacks = self.frame_callbacks.borrow_mut();
        let mut pending: SmallVec<[Box<dyn FnOnce(u64) + 'static>; 16]> =
            SmallVec::with_capacity(callbacks.len());
        while let Some(mut entry) = callbacks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push(callback);
            }
        }
        drop(callbacks);
        log::trace!(
            "draining {} frame callbacks at {frame_time_nanos}ns",
            pending.len()
        );
        for callback in pending {
            callback(frame_time_nanos);
        }
    }
}

/// Owner of the frame scheduler. Dropping it turns every handle into a no-op.
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new()),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.assert_ui_thread();
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    /// Runs every callback queued before this call. Callbacks registered while
    /// draining are deferred to the next frame.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.assert_ui_thread();
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_frame_callbacks())
            .unwrap_or(false)
    }

    /// Time of the most recently drained frame.
    pub fn last_frame_nanos(&self) -> Option<u64> {
        self.inner
            .upgrade()
            .and_then(|inner| inner.last_frame_nanos.get())
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }

    /// Debug-only check that the runtime stays on the thread that created it.
    pub fn assert_ui_thread(&self) {
        if let Some(inner) = self.inner.upgrade() {
            debug_assert_eq!(
                std::thread::current().id(),
                inner.ui_thread_id,
                "runtime touched off its UI thread"
            );
        }
    }
}
