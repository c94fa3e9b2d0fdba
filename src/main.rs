//! Fret Rush entry point
//!
//! Native builds run a headless autoplay demo (no rendering, full event
//! surface). Wasm builds own the requestAnimationFrame loop, feed keyboard
//! events through the button map into the input queue, and mirror snapshots
//! into the DOM HUD.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::KeyboardEvent;

    use fret_rush::input::Action;
    use fret_rush::sim::{tick, GameEvent, GamePhase, GameState, Snapshot};
    use fret_rush::{ButtonMap, InputEvent, InputQueue, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        queue: InputQueue,
        map: ButtonMap,
        #[allow(dead_code)]
        settings: Settings,
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let seed = js_sys::Date::now() as u64;
        log::info!("Fret Rush starting with seed {seed}");

        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed),
            queue: InputQueue::new(),
            map: ButtonMap::default(),
            settings: Settings::load(),
        }));

        setup_keyboard(game.clone())?;
        start_loop(game);
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match g.map.action(&event.key()) {
                    Some(Action::Lane(lane)) => g.queue.push(InputEvent::LanePressed(lane)),
                    Some(Action::Start) => g.queue.push(InputEvent::StartPressed),
                    None => {}
                }
            });
            window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if let Some(Action::Lane(lane)) = g.map.action(&event.key()) {
                    g.queue.push(InputEvent::LaneReleased(lane));
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn start_loop(game: Rc<RefCell<Game>>) {
        let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let g = f.clone();

        *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now_ms: f64| {
            let (snapshot, events) = {
                let mut gm = game.borrow_mut();
                let gm = &mut *gm;
                tick(&mut gm.state, &mut gm.queue, now_ms);
                (gm.state.snapshot(), gm.state.drain_events())
            };
            update_hud(&snapshot, &events);

            if let Some(window) = web_sys::window() {
                let _ = window
                    .request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
            }
        }) as Box<dyn FnMut(f64)>));

        if let Some(window) = web_sys::window() {
            let _ =
                window.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
        }
    }

    /// Mirror the snapshot into the DOM HUD; best-effort, never feeds back
    fn update_hud(snapshot: &Snapshot, events: &[GameEvent]) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let set = |selector: &str, text: &str| {
            if let Ok(Some(el)) = document.query_selector(selector) {
                el.set_text_content(Some(text));
            }
        };

        set("#hud-score .hud-value", &snapshot.score.to_string());
        set("#hud-combo .hud-value", &format!("{}x", snapshot.combo));
        set(
            "#hud-stats .hud-value",
            &format!(
                "Perfect: {} | Good: {} | Miss: {}",
                snapshot.perfect, snapshot.good, snapshot.missed
            ),
        );
        set(
            "#hud-music .hud-value",
            &format!("{:.1}x", snapshot.music_speed),
        );

        for event in events {
            if let GameEvent::PhaseChanged { phase } = event {
                let text = match phase {
                    GamePhase::Menu => "Press START to play",
                    GamePhase::Playing => "",
                    GamePhase::GameOver => "GAME OVER - press START to retry",
                };
                set("#hud-phase", text);
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(err) = wasm_game::run() {
        log::error!("startup failed: {err:?}");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    env_logger::init();
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Fret Rush (native) starting autoplay demo with seed {seed}");
    run_demo(seed);
}

/// Headless autoplay: a bot presses lanes when notes enter the perfect
/// window, skipping every 4th note so the session eventually ends.
#[cfg(not(target_arch = "wasm32"))]
fn run_demo(seed: u64) {
    use fret_rush::consts::*;
    use fret_rush::sim::{tick, GameEvent, GamePhase, GameState};
    use fret_rush::{InputEvent, InputQueue};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u64 = 100_000;

    let mut state = GameState::new(seed);
    let mut queue = InputQueue::new();
    queue.push(InputEvent::StartPressed);

    let mut pressed: [bool; LANE_COUNT] = [false; LANE_COUNT];
    for frame in 0..MAX_FRAMES {
        let now_ms = frame as f64 * FRAME_MS;

        for (lane, held) in pressed.iter_mut().enumerate() {
            if *held {
                queue.push(InputEvent::LaneReleased(lane));
                *held = false;
            }
        }
        for note in &state.notes {
            if note.id % 4 != 0 && note.distance() < PERFECT_WINDOW && !pressed[note.lane] {
                queue.push(InputEvent::LanePressed(note.lane));
                pressed[note.lane] = true;
            }
        }

        tick(&mut state, &mut queue, now_ms);

        for event in state.drain_events() {
            match event {
                GameEvent::NoteJudged {
                    lane, judgement, ..
                } => log::info!("{judgement:?} in lane {lane}"),
                GameEvent::PressMissed { lane } => log::info!("whiffed press in lane {lane}"),
                GameEvent::SpeedUp { music_speed } => {
                    log::info!("speed up! music now {music_speed:.2}x");
                }
                GameEvent::PhaseChanged { phase } => log::info!("phase: {phase:?}"),
                _ => {}
            }
        }

        if state.phase == GamePhase::GameOver {
            let snapshot = state.snapshot();
            log::info!(
                "final score {} | max combo {} | perfect {} good {} missed {}",
                snapshot.score,
                snapshot.max_combo,
                snapshot.perfect,
                snapshot.good,
                snapshot.missed
            );
            println!(
                "Game over after {:.1}s: score {} ({} perfect, {} good, {} missed)",
                now_ms / 1000.0,
                snapshot.score,
                snapshot.perfect,
                snapshot.good,
                snapshot.missed
            );
            return;
        }
    }
    log::warn!("demo hit the frame cap without finishing");
}
