//! Pointer sampling for the throw gesture.
//!
//! Velocity comes from the two most recent samples only. A throw needs a
//! direction and magnitude at the moment of release, not a smoothed trend,
//! so responsiveness wins over filtering here.

use smallvec::SmallVec;
use tavla_ui_graphics::{Point, Velocity};

use crate::input::PointerId;

/// Elapsed-time floor for velocity estimation, so coincident events never
/// divide by zero.
const MIN_SAMPLE_INTERVAL_MS: u64 = 1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub position: Point,
    pub timestamp_millis: u64,
}

/// State of one continuous pointer contact, from press to release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSession {
    pub pointer: PointerId,
    pub pointer_start: Point,
    pub last_sample: PointerSample,
    pub previous_sample: PointerSample,
    pub current_velocity: Velocity,
}

/// Emitted synchronously for every accepted move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureMove {
    pub position: Point,
    pub velocity: Velocity,
}

type MoveObserver = Box<dyn FnMut(&GestureMove) + 'static>;

pub struct GestureSampler {
    session: Option<GestureSession>,
    enabled: bool,
    observers: SmallVec<[MoveObserver; 2]>,
}

impl Default for GestureSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureSampler {
    pub fn new() -> Self {
        Self {
            session: None,
            enabled: true,
            observers: SmallVec::new(),
        }
    }

    /// Gates new contacts. Disabled while a throw animation owns the dice.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Registers an observer for every accepted move.
    pub fn subscribe(&mut self, observer: impl FnMut(&GestureMove) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Arms a session. Returns `false` when contacts are gated or a session
    /// is already active.
    pub fn on_contact_start(
        &mut self,
        pointer: PointerId,
        position: Point,
        timestamp_millis: u64,
    ) -> bool {
        if !self.enabled {
            log::debug!("contact {pointer} ignored: throw in progress");
            return false;
        }
        if let Some(session) = &self.session {
            log::trace!(
                "contact {pointer} ignored: pointer {} already active",
                session.pointer
            );
            return false;
        }

        let sample = PointerSample {
            position,
            timestamp_millis,
        };
        self.session = Some(GestureSession {
            pointer,
            pointer_start: position,
            last_sample: sample,
            previous_sample: sample,
            current_velocity: Velocity::ZERO,
        });
        log::debug!("gesture armed at ({:.1}, {:.1})", position.x, position.y);
        true
    }

    /// Records a move and notifies observers. `None` if `pointer` has no
    /// active session.
    pub fn on_contact_move(
        &mut self,
        pointer: PointerId,
        position: Point,
        timestamp_millis: u64,
    ) -> Option<GestureMove> {
        let session = self.session.as_mut().filter(|s| s.pointer == pointer)?;

        let last_time = session.last_sample.timestamp_millis;
        if timestamp_millis < last_time {
            log::warn!(
                "pointer {pointer} timestamp went backwards ({timestamp_millis} < {last_time})"
            );
        }
        let elapsed = timestamp_millis
            .saturating_sub(last_time)
            .max(MIN_SAMPLE_INTERVAL_MS);

        let velocity = Velocity::from_delta(
            position - session.previous_sample.position,
            elapsed as f32,
        );
        session.previous_sample = session.last_sample;
        session.last_sample = PointerSample {
            position,
            timestamp_millis: timestamp_millis.max(last_time),
        };
        session.current_velocity = velocity;

        let update = GestureMove { position, velocity };
        log::trace!(
            "sample ({:.1}, {:.1}) v=({:.2}, {:.2})",
            position.x,
            position.y,
            velocity.x,
            velocity.y
        );
        for observer in self.observers.iter_mut() {
            observer(&update);
        }
        Some(update)
    }

    /// Ends the session and returns its final velocity.
    pub fn on_contact_end(&mut self, pointer: PointerId) -> Option<Velocity> {
        let session = self.take_session(pointer)?;
        Some(session.current_velocity)
    }

    /// Ends the session without producing a release velocity. Returns whether
    /// a session was active.
    pub fn on_contact_cancel(&mut self, pointer: PointerId) -> bool {
        self.take_session(pointer).is_some()
    }

    fn take_session(&mut self, pointer: PointerId) -> Option<GestureSession> {
        match self.session {
            Some(session) if session.pointer == pointer => self.session.take(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn start_arms_session_at_rest() {
        let mut sampler = GestureSampler::new();
        assert!(sampler.on_contact_start(0, Point::new(4.0, 2.0), 100));

        let session = sampler.session().expect("armed");
        assert_eq!(session.pointer_start, Point::new(4.0, 2.0));
        assert_eq!(session.last_sample, session.previous_sample);
        assert_eq!(session.current_velocity, Velocity::ZERO);
    }

    #[test]
    fn disabled_sampler_rejects_contacts() {
        let mut sampler = GestureSampler::new();
        sampler.set_enabled(false);
        assert!(!sampler.on_contact_start(0, Point::ZERO, 0));
        assert!(!sampler.is_active());
    }

    #[test]
    fn move_without_session_is_ignored() {
        let mut sampler = GestureSampler::new();
        assert_eq!(sampler.on_contact_move(0, Point::new(1.0, 1.0), 10), None);
        assert_eq!(sampler.on_contact_end(0), None);
        assert!(!sampler.on_contact_cancel(0));
    }

    #[test]
    fn velocity_uses_previous_sample_and_last_interval() {
        let mut sampler = GestureSampler::new();
        sampler.on_contact_start(0, Point::ZERO, 0);

        let first = sampler
            .on_contact_move(0, Point::new(0.0, -20.0), 10)
            .expect("active");
        assert_eq!(first.velocity, Velocity::new(0.0, -2.0));

        // Displacement is measured from the sample before last.
        let second = sampler
            .on_contact_move(0, Point::new(0.0, -60.0), 20)
            .expect("active");
        assert_eq!(second.velocity, Velocity::new(0.0, -6.0));
        assert_eq!(
            sampler.session().expect("active").previous_sample.position,
            Point::new(0.0, -20.0)
        );
    }

    #[test]
    fn coincident_events_clamp_interval() {
        let mut sampler = GestureSampler::new();
        sampler.on_contact_start(0, Point::ZERO, 50);
        let update = sampler
            .on_contact_move(0, Point::new(8.0, 0.0), 50)
            .expect("active");
        assert_eq!(update.velocity, Velocity::new(8.0, 0.0));

        // A timestamp from the past is treated the same way.
        let update = sampler
            .on_contact_move(0, Point::new(8.0, 0.0), 40)
            .expect("active");
        assert!(update.velocity.x.is_finite());
    }

    #[test]
    fn observers_see_every_move() {
        let mut sampler = GestureSampler::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = Rc::clone(&seen);
            sampler.subscribe(move |update| seen.borrow_mut().push(update.position));
        }
        sampler.on_contact_start(0, Point::ZERO, 0);
        sampler.on_contact_move(0, Point::new(1.0, 0.0), 5);
        sampler.on_contact_move(0, Point::new(2.0, 0.0), 10);
        assert_eq!(
            *seen.borrow(),
            vec![Point::new(1.0, 0.0), Point::new(2.0, 0.0)]
        );
    }

    #[test]
    fn end_returns_final_velocity_and_clears_session() {
        let mut sampler = GestureSampler::new();
        sampler.on_contact_start(0, Point::ZERO, 0);
        sampler.on_contact_move(0, Point::new(0.0, -50.0), 10);
        assert_eq!(sampler.on_contact_end(0), Some(Velocity::new(0.0, -5.0)));
        assert!(!sampler.is_active());
        assert_eq!(sampler.on_contact_end(0), None);
    }

    #[test]
    fn other_pointers_do_not_disturb_session() {
        let mut sampler = GestureSampler::new();
        sampler.on_contact_start(1, Point::ZERO, 0);
        assert!(!sampler.on_contact_start(2, Point::ZERO, 1));
        assert_eq!(sampler.on_contact_move(2, Point::new(9.0, 9.0), 2), None);
        assert!(!sampler.on_contact_cancel(2));
        assert!(sampler.on_contact_cancel(1));
        assert!(!sampler.is_active());
    }
}
