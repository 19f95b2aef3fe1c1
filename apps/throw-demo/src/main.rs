mod terminal;

use std::cell::Cell;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use tavla_core::{Runtime, NANOS_PER_MILLI};
use tavla_ui::{
    BoardPosition, DiceThrow, DieVisualState, GameSession, Point, PointerEvent, ThrowConfig,
};
use web_time::{Duration, Instant};

use terminal::{print_board, TerminalScope};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const RUN_LIMIT: Duration = Duration::from_secs(10);

/// Upward flick, fast enough to throw.
fn flick_script() -> Vec<(u64, PointerEvent)> {
    vec![
        (0, PointerEvent::down(Point::ZERO, 0)),
        (8, PointerEvent::moved(Point::new(0.0, -20.0), 8)),
        (16, PointerEvent::moved(Point::new(2.0, -60.0), 16)),
        (24, PointerEvent::moved(Point::new(4.0, -110.0), 24)),
        (24, PointerEvent::up(Point::new(4.0, -110.0), 24)),
    ]
}

/// Slow sideways drag that springs back.
fn drag_script() -> Vec<(u64, PointerEvent)> {
    vec![
        (0, PointerEvent::down(Point::ZERO, 0)),
        (100, PointerEvent::moved(Point::new(30.0, 10.0), 100)),
        (200, PointerEvent::moved(Point::new(60.0, 20.0), 200)),
        (300, PointerEvent::up(Point::new(60.0, 20.0), 300)),
    ]
}

fn main() -> Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = ThrowConfig::from_env().context("reading TAVLA_* settings")?;
    let script = match std::env::args().nth(1).as_deref() {
        None | Some("--flick") => flick_script(),
        Some("--drag") => drag_script(),
        Some(other) => bail!("unknown argument {other:?}, expected --flick or --drag"),
    };

    println!("=== Tavla dice throw ===");
    print_board(&BoardPosition::standard());
    println!();

    let runtime = Runtime::new();
    let handle = runtime.handle();
    let dice = DiceThrow::new(handle.clone(), config);
    let mut session = GameSession::new();

    let thrown = Rc::new(Cell::new(false));
    {
        let thrown = Rc::clone(&thrown);
        dice.set_on_thrown(move || thrown.set(true));
    }
    let settled = Rc::new(Cell::new(None));
    {
        let settled = Rc::clone(&settled);
        dice.set_on_settled(move |faces| settled.set(Some(faces)));
    }

    let mut scope = TerminalScope::default();
    let mut pending = script.into_iter().peekable();
    let start = Instant::now();
    loop {
        let now = start.elapsed();
        let now_millis = now.as_millis() as u64;

        while let Some((_, event)) = pending.next_if(|(at, _)| *at <= now_millis) {
            dice.pointer_input(&event);
            if thrown.replace(false) {
                let values = session.roll()?;
                dice.set_face_values(values);
            }
        }

        handle.drain_frame_callbacks(now_millis * NANOS_PER_MILLI);
        scope.next_frame();
        dice.draw(&mut scope);

        if let Some(faces) = settled.get() {
            let at_millis = handle.last_frame_nanos().unwrap_or(0) / NANOS_PER_MILLI;
            log::info!("dice at rest showing {faces:?} after {at_millis}ms");
            break;
        }
        let idle = pending.peek().is_none()
            && !handle.has_frame_callbacks()
            && dice.state() == DieVisualState::Idle;
        if idle {
            log::info!("no throw, dice back at rest");
            break;
        }
        if now > RUN_LIMIT {
            bail!("dice still moving after {RUN_LIMIT:?}");
        }

        std::thread::sleep(FRAME_INTERVAL);
    }

    Ok(())
}
