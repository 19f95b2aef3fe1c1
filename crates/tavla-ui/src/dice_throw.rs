//! Throw animation controller.
//!
//! Each die moves through `Idle -> Following -> InFlight -> Settling -> Idle`,
//! or `Following -> Idle` when a release is not a throw. Pointer capture is
//! off from launch until both dice are back at rest, so at most one throw
//! animates at a time.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tavla_animation::{Animatable, AnimationSpec, AnimationType, Easing};
use tavla_core::{DelayRegistration, FrameClock, RuntimeHandle};
use tavla_foundation::{
    classify, DieFlightPlan, GestureMove, GestureSampler, PointerEvent, PointerEventKind,
    ThrowConfig, ThrowIntent, ThrowPlanner,
};
use tavla_ui_graphics::{GraphicsLayer, Point, Rect, Velocity};

use crate::draw::DiceDrawScope;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DieIndex {
    First,
    Second,
}

impl DieIndex {
    pub const ALL: [DieIndex; 2] = [DieIndex::First, DieIndex::Second];

    pub fn index(self) -> usize {
        match self {
            DieIndex::First => 0,
            DieIndex::Second => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DieVisualState {
    Idle,
    Following,
    InFlight,
    Settling,
}

impl DieVisualState {
    /// Whether a throw owns the die and new contacts are refused.
    pub fn is_throwing(self) -> bool {
        matches!(self, DieVisualState::InFlight | DieVisualState::Settling)
    }
}

/// Reset springs per die: offset, rotation, scale.
const RESET_ANIMATIONS: u8 = 3;

struct DieAnimation {
    offset: Animatable<Point>,
    rotation: Animatable<f32>,
    scale: Animatable<f32>,
    tilt_x: f32,
    tilt_y: f32,
    state: DieVisualState,
    resets_pending: u8,
}

impl DieAnimation {
    fn new(runtime: &RuntimeHandle) -> Self {
        Self {
            offset: Animatable::new(Point::ZERO, runtime.clone()),
            rotation: Animatable::new(0.0, runtime.clone()),
            scale: Animatable::new(1.0, runtime.clone()),
            tilt_x: 0.0,
            tilt_y: 0.0,
            state: DieVisualState::Idle,
            resets_pending: 0,
        }
    }

    fn layer(&self) -> GraphicsLayer {
        let offset = self.offset.value();
        GraphicsLayer {
            translation_x: offset.x,
            translation_y: offset.y,
            rotation_z: self.rotation.value(),
            rotation_x: self.tilt_x,
            rotation_y: self.tilt_y,
            scale: self.scale.value(),
        }
    }

    fn clear_tilt(&mut self) {
        self.tilt_x = 0.0;
        self.tilt_y = 0.0;
    }
}

type ThrownCallback = Box<dyn FnMut() + 'static>;
type SettledCallback = Box<dyn FnMut([Option<u8>; 2]) + 'static>;

struct DiceThrowInner {
    config: ThrowConfig,
    clock: FrameClock,
    sampler: GestureSampler,
    planner: ThrowPlanner,
    dice: [DieAnimation; 2],
    hit_area: Option<Rect>,
    faces: [Option<u8>; 2],
    pending_faces: Option<[u8; 2]>,
    flight_plans: Option<[DieFlightPlan; 2]>,
    flights_pending: u8,
    settle_delay: Option<DelayRegistration>,
    on_thrown: Option<ThrownCallback>,
    on_settled: Option<SettledCallback>,
}

/// Drives both dice from pointer input to rest.
///
/// Cloning yields another handle to the same controller, so host callbacks
/// may capture one and call back in (for example to hand over face values
/// from `on_thrown`).
#[derive(Clone)]
pub struct DiceThrow {
    inner: Rc<RefCell<DiceThrowInner>>,
}

impl DiceThrow {
    pub fn new(runtime: RuntimeHandle, config: ThrowConfig) -> Self {
        let planner = ThrowPlanner::new(config.clone());
        Self::with_planner(runtime, planner)
    }

    /// Controller whose dispersion comes from `planner`; tests pass a seeded
    /// one.
    pub fn with_planner(runtime: RuntimeHandle, planner: ThrowPlanner) -> Self {
        let inner = DiceThrowInner {
            config: planner.config().clone(),
            clock: runtime.frame_clock(),
            sampler: GestureSampler::new(),
            planner,
            dice: [DieAnimation::new(&runtime), DieAnimation::new(&runtime)],
            hit_area: None,
            faces: [None, None],
            pending_faces: None,
            flight_plans: None,
            flights_pending: 0,
            settle_delay: None,
            on_thrown: None,
            on_settled: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    pub fn config(&self) -> ThrowConfig {
        self.inner.borrow().config.clone()
    }

    /// Presses outside `area` are ignored. Coordinates are relative to the
    /// container center, like pointer positions.
    pub fn set_hit_area(&self, area: Rect) {
        self.inner.borrow_mut().hit_area = Some(area);
    }

    /// Host roll trigger, called once per confirmed throw gesture.
    pub fn set_on_thrown(&self, callback: impl FnMut() + 'static) {
        self.inner.borrow_mut().on_thrown = Some(Box::new(callback));
    }

    /// Called with the shown faces once both dice are back at rest.
    pub fn set_on_settled(&self, callback: impl FnMut([Option<u8>; 2]) + 'static) {
        self.inner.borrow_mut().on_settled = Some(Box::new(callback));
    }

    /// Observes every accepted pointer move. The observer runs while the
    /// controller is mid-update and must not call back into it.
    pub fn subscribe_moves(&self, observer: impl FnMut(&GestureMove) + 'static) {
        self.inner.borrow_mut().sampler.subscribe(observer);
    }

    /// Feeds one pointer event. Returns whether the controller consumed it.
    pub fn pointer_input(&self, event: &PointerEvent) -> bool {
        let thrown = {
            let mut inner = self.inner.borrow_mut();
            match event.kind {
                PointerEventKind::Down => return inner.press(event),
                PointerEventKind::Move => return inner.drag(event),
                PointerEventKind::Cancel => {
                    if !inner.sampler.on_contact_cancel(event.id) {
                        return false;
                    }
                    log::debug!("pointer {} cancelled, dice return to rest", event.id);
                    inner.spring_back();
                    false
                }
                PointerEventKind::Up => {
                    let Some(velocity) = inner.sampler.on_contact_end(event.id) else {
                        return false;
                    };
                    let intent = classify(velocity, inner.config.swipe_threshold);
                    if intent.is_throw() {
                        log::info!(
                            "dice thrown at {:.2} units/ms ({:.2}, {:.2})",
                            intent.speed,
                            velocity.x,
                            velocity.y
                        );
                        inner.launch(&intent, Rc::downgrade(&self.inner));
                        true
                    } else {
                        inner.spring_back();
                        false
                    }
                }
            }
        };

        if thrown {
            self.fire_thrown();
        }
        true
    }

    /// Throws the dice along `velocity` regardless of the swipe threshold.
    ///
    /// Refused with `None` while a throw is animating. An active drag is
    /// abandoned. The host roll trigger is not called: the caller already
    /// knows it threw.
    pub fn throw_dice(&self, velocity: Velocity) -> Option<[DieFlightPlan; 2]> {
        let mut inner = self.inner.borrow_mut();
        if inner.is_throwing() {
            log::debug!("throw ignored: dice are still in play");
            return None;
        }
        if let Some(pointer) = inner.sampler.session().map(|session| session.pointer) {
            inner.sampler.on_contact_cancel(pointer);
        }
        let intent = classify(velocity, inner.config.swipe_threshold);
        Some(inner.launch(&intent, Rc::downgrade(&self.inner)))
    }

    /// Hands over rolled values. Held back while the dice fly and revealed
    /// when they start to settle; shown at once otherwise.
    pub fn set_face_values(&self, values: [u8; 2]) {
        let mut inner = self.inner.borrow_mut();
        if inner.dice.iter().any(|die| die.state == DieVisualState::InFlight) {
            log::debug!("holding {values:?} until the dice land");
            inner.pending_faces = Some(values);
        } else {
            inner.pending_faces = None;
            inner.faces = values.map(Some);
        }
    }

    pub fn faces(&self) -> [Option<u8>; 2] {
        self.inner.borrow().faces
    }

    /// Most advanced state across both dice.
    pub fn state(&self) -> DieVisualState {
        let inner = self.inner.borrow();
        let states = inner.dice.each_ref().map(|die| die.state);
        [
            DieVisualState::InFlight,
            DieVisualState::Settling,
            DieVisualState::Following,
        ]
        .into_iter()
        .find(|state| states.contains(state))
        .unwrap_or(DieVisualState::Idle)
    }

    pub fn die_state(&self, die: DieIndex) -> DieVisualState {
        self.inner.borrow().dice[die.index()].state
    }

    pub fn layer(&self, die: DieIndex) -> GraphicsLayer {
        self.inner.borrow().dice[die.index()].layer()
    }

    /// Plans of the throw in flight. Dropped once both dice have landed.
    pub fn flight_plans(&self) -> Option<[DieFlightPlan; 2]> {
        self.inner.borrow().flight_plans
    }

    pub fn is_interactive(&self) -> bool {
        self.inner.borrow().sampler.is_enabled()
    }

    /// Hands both dice to `scope`. A die the backend cannot draw yet is
    /// skipped for this frame. Returns how many were drawn.
    pub fn draw(&self, scope: &mut impl DiceDrawScope) -> usize {
        let frame = {
            let inner = self.inner.borrow();
            DieIndex::ALL.map(|die| (die, inner.dice[die.index()].layer(), inner.faces[die.index()]))
        };

        let mut drawn = 0;
        for (die, layer, face) in frame {
            match scope.draw_die(die, &layer, face) {
                Ok(()) => drawn += 1,
                Err(err) => log::debug!("skipping frame for {die:?}: {err}"),
            }
        }
        drawn
    }

    fn begin_settle(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.settle_delay = None;
        inner.flight_plans = None;
        inner.flights_pending = 0;
        if let Some(values) = inner.pending_faces.take() {
            inner.faces = values.map(Some);
        }
        log::debug!("dice settling, showing {:?}", inner.faces);

        let spring = AnimationType::Spring(inner.config.reset_spring);
        for die in DieIndex::ALL {
            let animation = &mut inner.dice[die.index()];
            animation.state = DieVisualState::Settling;
            animation.resets_pending = RESET_ANIMATIONS;
            animation.clear_tilt();
            animation.offset.animate_to_then(
                Point::ZERO,
                spring,
                reset_finished(Rc::downgrade(&self.inner), die),
            );
            animation.rotation.animate_to_then(
                0.0,
                spring,
                reset_finished(Rc::downgrade(&self.inner), die),
            );
            animation.scale.animate_to_then(
                1.0,
                spring,
                reset_finished(Rc::downgrade(&self.inner), die),
            );
        }
    }

    fn on_reset_finished(&self, die: DieIndex) {
        let faces = {
            let mut inner = self.inner.borrow_mut();
            let animation = &mut inner.dice[die.index()];
            animation.resets_pending = animation.resets_pending.saturating_sub(1);
            if animation.resets_pending > 0 {
                return;
            }
            animation.state = DieVisualState::Idle;
            log::debug!("{die:?} at rest");

            if inner.dice.iter().any(|d| d.state != DieVisualState::Idle) {
                return;
            }
            inner.sampler.set_enabled(true);
            log::info!("dice settled on {:?}", inner.faces);
            inner.faces
        };
        self.fire_settled(faces);
    }

    fn fire_thrown(&self) {
        let callback = self.inner.borrow_mut().on_thrown.take();
        if let Some(mut callback) = callback {
            callback();
            let mut inner = self.inner.borrow_mut();
            if inner.on_thrown.is_none() {
                inner.on_thrown = Some(callback);
            }
        }
    }

    fn fire_settled(&self, faces: [Option<u8>; 2]) {
        let callback = self.inner.borrow_mut().on_settled.take();
        if let Some(mut callback) = callback {
            callback(faces);
            let mut inner = self.inner.borrow_mut();
            if inner.on_settled.is_none() {
                inner.on_settled = Some(callback);
            }
        }
    }
}

fn flight_finished(weak: Weak<RefCell<DiceThrowInner>>) -> impl FnOnce() + 'static {
    move || {
        if let Some(inner) = weak.upgrade() {
            let mut inner = inner.borrow_mut();
            inner.flights_pending = inner.flights_pending.saturating_sub(1);
            if inner.flights_pending == 0 {
                log::debug!("both dice landed");
                inner.flight_plans = None;
            }
        }
    }
}

fn reset_finished(weak: Weak<RefCell<DiceThrowInner>>, die: DieIndex) -> impl FnOnce() + 'static {
    move || {
        if let Some(inner) = weak.upgrade() {
            DiceThrow { inner }.on_reset_finished(die);
        }
    }
}

impl DiceThrowInner {
    fn is_throwing(&self) -> bool {
        self.dice.iter().any(|die| die.state.is_throwing())
    }

    fn follow_spec(&self) -> AnimationType {
        AnimationType::Tween(AnimationSpec::linear(self.config.follow_duration_ms))
    }

    fn press(&mut self, event: &PointerEvent) -> bool {
        if let Some(area) = self.hit_area {
            if !area.contains(event.position.x, event.position.y) {
                log::trace!("press outside the dice at {:?}", event.position);
                return false;
            }
        }
        if !self
            .sampler
            .on_contact_start(event.id, event.position, event.timestamp_millis)
        {
            return false;
        }

        let follow = self.follow_spec();
        let press_scale = self.config.press_scale;
        for die in self.dice.iter_mut() {
            die.state = DieVisualState::Following;
            die.scale.animate_to(press_scale, follow);
        }
        log::debug!("dice following pointer {}", event.id);
        true
    }

    fn drag(&mut self, event: &PointerEvent) -> bool {
        let Some(update) =
            self.sampler
                .on_contact_move(event.id, event.position, event.timestamp_millis)
        else {
            return false;
        };

        let follow = self.follow_spec();
        let max_tilt = self.config.max_tilt_degrees;
        let tilt_x = (-update.velocity.y * self.config.tilt_per_velocity).clamp(-max_tilt, max_tilt);
        let tilt_y = (update.velocity.x * self.config.tilt_per_velocity).clamp(-max_tilt, max_tilt);
        for die in self.dice.iter_mut() {
            die.offset.animate_to(update.position, follow);
            die.tilt_x = tilt_x;
            die.tilt_y = tilt_y;
        }
        true
    }

    fn spring_back(&mut self) {
        let spring = AnimationType::Spring(self.config.cancel_spring);
        for die in self.dice.iter_mut() {
            die.state = DieVisualState::Idle;
            die.clear_tilt();
            die.offset.animate_to(Point::ZERO, spring);
            die.scale.animate_to(1.0, spring);
        }
        log::debug!("no throw, dice springing back");
    }

    fn launch(
        &mut self,
        intent: &ThrowIntent,
        controller: Weak<RefCell<DiceThrowInner>>,
    ) -> [DieFlightPlan; 2] {
        let plans = self.planner.plan(intent);
        self.sampler.set_enabled(false);

        let bounce = AnimationType::Tween(AnimationSpec::tween(
            self.config.bounce_duration_ms,
            Easing::EASE_IN_OUT_BACK,
        ));
        let bounce_scale = self.config.bounce_scale;
        for (die, plan) in self.dice.iter_mut().zip(plans.iter()) {
            let flight = AnimationType::Tween(AnimationSpec::tween(
                plan.duration_millis(),
                Easing::EASE_OUT_BACK,
            ));
            die.state = DieVisualState::InFlight;
            die.clear_tilt();
            die.offset
                .animate_to_then(plan.target_offset(), flight, flight_finished(controller.clone()));
            die.rotation.animate_to(plan.rotation_degrees, flight);
            die.scale.animate_to(bounce_scale, bounce);
        }
        self.flight_plans = Some(plans);
        self.flights_pending = plans.len() as u8;

        self.settle_delay = Some(
            self.clock
                .with_delay_millis(self.config.settle_delay_ms, move || {
                    if let Some(inner) = controller.upgrade() {
                        DiceThrow { inner }.begin_settle();
                    }
                }),
        );
        log::debug!("dice in flight, settling in {}ms", self.config.settle_delay_ms);
        plans
    }
}

#[cfg(test)]
#[path = "tests/dice_throw_tests.rs"]
mod tests;
