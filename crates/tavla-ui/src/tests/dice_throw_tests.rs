use super::*;
use crate::draw::{DiceDrawList, RenderError};
use std::cell::Cell;
use tavla_core::{Runtime, NANOS_PER_MILLI};

struct Harness {
    runtime: Runtime,
    dice: DiceThrow,
    now: u64,
}

impl Harness {
    fn new() -> Self {
        let runtime = Runtime::new();
        let planner = ThrowPlanner::with_seed(ThrowConfig::default(), 17);
        let dice = DiceThrow::with_planner(runtime.handle(), planner);
        Self {
            runtime,
            dice,
            now: 0,
        }
    }

    fn advance(&mut self, millis: u64) {
        let target = self.now + millis;
        while self.now < target {
            self.now = (self.now + 16).min(target);
            self.runtime
                .handle()
                .drain_frame_callbacks(self.now * NANOS_PER_MILLI);
        }
    }

    fn send(&self, event: PointerEvent) -> bool {
        self.dice.pointer_input(&event)
    }
}

#[test]
fn press_follows_and_scales_down() {
    let mut h = Harness::new();
    assert!(h.send(PointerEvent::down(Point::ZERO, 0)));
    assert_eq!(h.dice.state(), DieVisualState::Following);

    h.advance(100);
    assert!((h.dice.layer(DieIndex::First).scale - 0.95).abs() < 1e-4);

    h.send(PointerEvent::moved(Point::new(10.0, 20.0), 100));
    h.advance(100);
    assert_eq!(
        h.dice.layer(DieIndex::Second).translation(),
        Point::new(10.0, 20.0)
    );
}

#[test]
fn drag_tilts_with_velocity_and_clamps() {
    let mut h = Harness::new();
    h.send(PointerEvent::down(Point::ZERO, 0));
    h.send(PointerEvent::moved(Point::new(20.0, 0.0), 10));
    let layer = h.dice.layer(DieIndex::First);
    assert_eq!(layer.rotation_y, 8.0);
    assert_eq!(layer.rotation_x, 0.0);

    h.send(PointerEvent::moved(Point::new(20.0, -400.0), 20));
    assert_eq!(h.dice.layer(DieIndex::First).rotation_x, 15.0);

    h.send(PointerEvent::cancel(Point::new(20.0, -400.0), 40));
    assert_eq!(h.dice.layer(DieIndex::First).rotation_x, 0.0);
    assert_eq!(h.dice.state(), DieVisualState::Idle);
}

#[test]
fn press_outside_hit_area_is_ignored() {
    let h = Harness::new();
    h.dice.set_hit_area(Rect::from_center_size(
        Point::ZERO,
        tavla_ui_graphics::Size::new(120.0, 60.0),
    ));
    assert!(!h.send(PointerEvent::down(Point::new(100.0, 0.0), 0)));
    assert_eq!(h.dice.state(), DieVisualState::Idle);
    assert!(h.send(PointerEvent::down(Point::new(10.0, 5.0), 0)));
}

#[test]
fn faces_show_immediately_when_idle() {
    let h = Harness::new();
    assert_eq!(h.dice.faces(), [None, None]);
    h.dice.set_face_values([2, 6]);
    assert_eq!(h.dice.faces(), [Some(2), Some(6)]);
}

#[test]
fn faces_are_held_until_settle() {
    let mut h = Harness::new();
    h.dice.throw_dice(Velocity::new(0.0, -5.0)).expect("idle");
    h.dice.set_face_values([4, 1]);
    assert_eq!(h.dice.faces(), [None, None]);

    h.advance(1000);
    assert_eq!(h.dice.state(), DieVisualState::InFlight);
    assert_eq!(h.dice.faces(), [None, None]);

    h.advance(600);
    assert_eq!(h.dice.state(), DieVisualState::Settling);
    assert_eq!(h.dice.faces(), [Some(4), Some(1)]);
    assert!(h.dice.flight_plans().is_none());
}

#[test]
fn flight_plans_are_dropped_once_both_dice_land() {
    let mut h = Harness::new();
    h.dice.throw_dice(Velocity::new(0.0, -5.0)).expect("idle");

    // The first die lands at 816ms, the second at 880ms.
    h.advance(840);
    assert!(h.dice.flight_plans().is_some());

    h.advance(48);
    assert!(h.dice.flight_plans().is_none());
    assert_eq!(h.dice.state(), DieVisualState::InFlight);
}

#[test]
fn throw_dice_is_refused_while_in_play() {
    let mut h = Harness::new();
    assert!(h.dice.throw_dice(Velocity::new(0.0, -5.0)).is_some());
    assert!(h.dice.throw_dice(Velocity::new(0.0, -9.0)).is_none());

    h.advance(1600);
    assert_eq!(h.dice.state(), DieVisualState::Settling);
    assert!(h.dice.throw_dice(Velocity::new(0.0, -9.0)).is_none());
}

#[test]
fn throw_dice_abandons_active_drag() {
    let mut h = Harness::new();
    h.send(PointerEvent::down(Point::ZERO, 0));
    h.send(PointerEvent::moved(Point::new(0.0, 10.0), 10));
    assert!(h.dice.throw_dice(Velocity::new(1.0, -1.0)).is_some());

    // The release of the abandoned drag no longer belongs to anyone.
    assert!(!h.send(PointerEvent::up(Point::new(0.0, 10.0), 20)));
    assert_eq!(h.dice.state(), DieVisualState::InFlight);
    h.advance(16);
}

#[test]
fn thrown_callback_may_call_back_in() {
    let h = Harness::new();
    let calls = Rc::new(Cell::new(0));
    {
        let dice = h.dice.clone();
        let calls = Rc::clone(&calls);
        h.dice.set_on_thrown(move || {
            calls.set(calls.get() + 1);
            dice.set_face_values([6, 5]);
        });
    }

    h.send(PointerEvent::down(Point::ZERO, 0));
    h.send(PointerEvent::moved(Point::new(0.0, -50.0), 10));
    assert!(h.send(PointerEvent::up(Point::new(0.0, -50.0), 10)));

    assert_eq!(calls.get(), 1);
    // Faces wait for the landing.
    assert_eq!(h.dice.faces(), [None, None]);
    assert_eq!(h.dice.inner.borrow().pending_faces, Some([6, 5]));
}

struct HalfMounted;

impl DiceDrawScope for HalfMounted {
    fn draw_die(
        &mut self,
        die: DieIndex,
        _layer: &GraphicsLayer,
        _face: Option<u8>,
    ) -> Result<(), RenderError> {
        match die {
            DieIndex::First => Ok(()),
            DieIndex::Second => Err(RenderError::TargetNotMounted(die)),
        }
    }
}

#[test]
fn draw_skips_unmounted_dice() {
    let h = Harness::new();
    assert_eq!(h.dice.draw(&mut HalfMounted), 1);

    let mut list = DiceDrawList::new();
    h.dice.set_face_values([3, 3]);
    assert_eq!(h.dice.draw(&mut list), 2);
    let primitives = list.into_primitives();
    assert_eq!(primitives[1].die, DieIndex::Second);
    assert_eq!(primitives[1].face, Some(3));
    assert!(primitives[0].layer.is_at_rest());
}

#[test]
fn dropped_controller_cancels_pending_settle() {
    let mut h = Harness::new();
    h.dice.throw_dice(Velocity::new(0.0, -5.0)).expect("idle");
    let dice = std::mem::replace(
        &mut h.dice,
        DiceThrow::new(h.runtime.handle(), ThrowConfig::default()),
    );
    drop(dice);
    h.advance(3000);
    assert!(!h.runtime.handle().has_frame_callbacks());
}
