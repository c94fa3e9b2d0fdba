//! Whole-session tests driving the public API the way a host loop does:
//! push input events, tick with a monotonic clock, drain events.

use proptest::prelude::*;

use fret_rush::consts::*;
use fret_rush::sim::{tick, GameEvent, GamePhase, GameState, Judgement, Note};
use fret_rush::{InputEvent, InputQueue};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn start(state: &mut GameState, queue: &mut InputQueue) {
    queue.push(InputEvent::StartPressed);
    tick(state, queue, 0.0);
    state.drain_events();
}

#[test]
fn perfect_hit_through_the_queue() {
    let mut state = GameState::new(5);
    let mut queue = InputQueue::new();
    start(&mut state, &mut queue);

    let id = state.next_note_id();
    state.notes.push(Note {
        id,
        lane: 0,
        position: HIT_ZONE - state.fall_speed,
    });

    queue.push(InputEvent::LanePressed(0));
    tick(&mut state, &mut queue, FRAME_MS);

    // The press is judged before notes advance, at distance fall_speed;
    // well inside the perfect window either way.
    let snapshot = state.snapshot();
    assert_eq!(snapshot.score, 150);
    assert_eq!(snapshot.combo, 1);
    assert_eq!(snapshot.perfect, 1);
    assert!(state.drain_events().iter().any(|e| matches!(
        e,
        GameEvent::NoteJudged {
            judgement: Judgement::Perfect,
            ..
        }
    )));
}

#[test]
fn autoplay_session_scores_every_note() {
    // A bot that catches every note never misses, so the game keeps running;
    // verify the score identity holds the whole way.
    let mut state = GameState::new(77);
    let mut queue = InputQueue::new();
    start(&mut state, &mut queue);

    let mut pressed = [false; LANE_COUNT];
    for frame in 1..6000u64 {
        for (lane, held) in pressed.iter_mut().enumerate() {
            if *held {
                queue.push(InputEvent::LaneReleased(lane));
                *held = false;
            }
        }
        for note in &state.notes {
            if note.distance() < PERFECT_WINDOW && !pressed[note.lane] {
                queue.push(InputEvent::LanePressed(note.lane));
                pressed[note.lane] = true;
            }
        }
        tick(&mut state, &mut queue, frame as f64 * FRAME_MS);
        state.drain_events();

        let s = state.snapshot();
        assert_eq!(
            s.score,
            u64::from(s.perfect) * PERFECT_SCORE + u64::from(s.good) * GOOD_SCORE
        );
    }

    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.stats.missed, 0);
    assert!(state.stats.perfect > 0, "bot should have hit something");
    assert!(
        state.stats.combo >= state.stats.perfect + state.stats.good - 1,
        "no miss means an unbroken combo modulo in-flight notes"
    );
}

#[test]
fn unattended_session_ends_at_the_miss_limit() {
    let mut state = GameState::new(2024);
    let mut queue = InputQueue::new();
    start(&mut state, &mut queue);

    let mut frame = 0u64;
    while state.phase == GamePhase::Playing {
        frame += 1;
        assert!(frame < 200_000, "session must terminate");
        tick(&mut state, &mut queue, frame as f64 * FRAME_MS);
    }

    let snapshot = state.snapshot();
    assert_eq!(snapshot.phase, GamePhase::GameOver);
    assert_eq!(snapshot.missed, MISS_LIMIT);
    assert_eq!(snapshot.score, 0);

    // Restart resets counters and difficulty but the session keeps going
    queue.push(InputEvent::StartPressed);
    tick(&mut state, &mut queue, (frame + 1) as f64 * FRAME_MS);
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.stats.missed, 0);
    assert_eq!(state.spawn_interval_ms, SPAWN_INTERVAL_START_MS);
    assert_eq!(state.fall_speed, FALL_SPEED_START);
}

proptest! {
    /// After exactly N spawns the ramps sit at max(150, 800 - 8N) and
    /// min(8, 2 + 0.03N), whatever the seed.
    #[test]
    fn ramps_follow_spawn_count(seed in any::<u64>(), frames in 1u64..2500) {
        let mut state = GameState::new(seed);
        let mut queue = InputQueue::new();
        start(&mut state, &mut queue);

        let mut spawns = 0u64;
        for frame in 1..=frames {
            tick(&mut state, &mut queue, frame as f64 * FRAME_MS);
            spawns += state
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::NoteSpawned { .. }))
                .count() as u64;
            if state.phase != GamePhase::Playing {
                break;
            }
        }

        let expected_interval = (SPAWN_INTERVAL_START_MS
            - SPAWN_INTERVAL_STEP_MS * spawns as f64)
            .max(SPAWN_INTERVAL_MIN_MS);
        let expected_speed =
            (FALL_SPEED_START + FALL_SPEED_STEP * spawns as f64).min(FALL_SPEED_MAX);
        prop_assert!((state.spawn_interval_ms - expected_interval).abs() < 1e-9);
        prop_assert!((state.fall_speed - expected_speed).abs() < 1e-9);
    }

    /// `max_combo` never decreases, whatever input arrives.
    #[test]
    fn max_combo_is_monotonic(seed in any::<u64>(), commands in prop::collection::vec(0u8..10, 0..600)) {
        let mut state = GameState::new(seed);
        let mut queue = InputQueue::new();
        let mut max_combo_seen = 0u32;

        for (frame, command) in commands.iter().enumerate() {
            match command {
                1..=4 => queue.push(InputEvent::LanePressed((command - 1) as usize)),
                5..=8 => queue.push(InputEvent::LaneReleased((command - 5) as usize)),
                9 => queue.push(InputEvent::StartPressed),
                _ => {}
            }
            tick(&mut state, &mut queue, frame as f64 * FRAME_MS);
            state.drain_events();

            let snapshot = state.snapshot();
            prop_assert!(snapshot.max_combo >= max_combo_seen);
            max_combo_seen = snapshot.max_combo;
        }
    }

    /// A lane press with no catchable note never changes score or hit
    /// counters and always zeroes the combo.
    #[test]
    fn empty_lane_press_is_harmless(lane in 0usize..LANE_COUNT) {
        let mut state = GameState::new(3);
        let mut queue = InputQueue::new();
        start(&mut state, &mut queue);
        state.stats.combo = 3;
        state.stats.score = 225;

        queue.push(InputEvent::LanePressed(lane));
        tick(&mut state, &mut queue, FRAME_MS);

        let snapshot = state.snapshot();
        prop_assert_eq!(snapshot.combo, 0);
        prop_assert_eq!(snapshot.score, 225);
        prop_assert_eq!(snapshot.perfect, 0);
        prop_assert_eq!(snapshot.good, 0);
    }
}
