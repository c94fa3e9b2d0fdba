//! Per-frame simulation step
//!
//! One `tick` per animation frame: drain the input queue, maybe spawn a note,
//! advance the registry, convert passed notes into misses, and schedule the
//! background music pulse. The host clock supplies `now_ms`; the core never
//! reads time on its own.

use rand::Rng;

use crate::consts::*;
use crate::input::{InputEvent, InputQueue};

use super::judge;
use super::state::{GameEvent, GamePhase, GameState, Judgement};

/// Advance the session by one frame.
///
/// `now_ms` must be monotonically non-decreasing across calls (e.g. the
/// requestAnimationFrame timestamp).
pub fn tick(state: &mut GameState, queue: &mut InputQueue, now_ms: f64) {
    for event in queue.drain() {
        match event {
            InputEvent::StartPressed => match state.phase {
                GamePhase::Menu | GamePhase::GameOver => state.start_game(now_ms),
                GamePhase::Playing => {
                    log::debug!("start press ignored while playing");
                }
            },
            InputEvent::LanePressed(lane) => judge::handle_press(state, lane),
            InputEvent::LaneReleased(lane) => handle_release(state, lane),
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ticks += 1;

    maybe_spawn(state, now_ms);
    advance_notes(state);

    if let Some(pulse) = state.music.pulse(now_ms) {
        state.push_event(GameEvent::MusicPulse {
            melody_hz: pulse.melody_hz,
            bass_hz: pulse.bass_hz,
        });
    }
}

fn handle_release(state: &mut GameState, lane: usize) {
    if state.phase != GamePhase::Playing {
        log::debug!("lane release {lane} dropped (phase {:?})", state.phase);
        return;
    }
    if lane >= LANE_COUNT {
        log::debug!("lane release {lane} dropped (no such lane)");
        return;
    }
    state.held[lane] = false;
}

/// Spawn a note once the (ramping) interval has elapsed, then step both
/// difficulty ramps. At most one spawn per tick.
fn maybe_spawn(state: &mut GameState, now_ms: f64) {
    if now_ms - state.last_spawn_ms <= state.spawn_interval_ms {
        return;
    }

    let lane = state.rng().random_range(0..LANE_COUNT);
    let id = state.next_note_id();
    state.notes.push(super::state::Note {
        id,
        lane,
        position: SPAWN_POSITION,
    });
    state.last_spawn_ms = now_ms;

    state.spawn_interval_ms =
        (state.spawn_interval_ms - SPAWN_INTERVAL_STEP_MS).max(SPAWN_INTERVAL_MIN_MS);
    state.fall_speed = (state.fall_speed + FALL_SPEED_STEP).min(FALL_SPEED_MAX);

    state.push_event(GameEvent::NoteSpawned { note_id: id, lane });

    // Bonus music speed-up roll, cosmetic only
    let chance = state.rng().random_bool(SPAWN_SPEEDUP_CHANCE);
    if chance {
        state.music.increase_speed();
        let music_speed = state.music.speed();
        state.push_event(GameEvent::SpeedUp { music_speed });
    }
}

/// Move every note down the fall axis and turn the ones past the hit zone
/// into passage misses. Ends the game once the miss limit is reached.
fn advance_notes(state: &mut GameState) {
    let fall_speed = state.fall_speed;
    for note in &mut state.notes {
        note.position += fall_speed;
    }
    let mut moved = Vec::with_capacity(state.notes.len());
    for note in &state.notes {
        moved.push(GameEvent::NoteMoved {
            note_id: note.id,
            position: note.position,
        });
    }
    for event in moved {
        state.push_event(event);
    }

    let mut index = 0;
    while index < state.notes.len() {
        if state.notes[index].position <= HIT_ZONE + PASS_MARGIN {
            index += 1;
            continue;
        }
        let note = state.notes.remove(index);
        state.stats.record_passage_miss();
        state.push_event(GameEvent::NoteJudged {
            note_id: note.id,
            lane: note.lane,
            judgement: Judgement::MissByPassage,
        });
        let snapshot = state.snapshot();
        state.push_event(GameEvent::StateChanged { snapshot });
        log::debug!(
            "note {} passed uncaught in lane {} ({} missed)",
            note.id,
            note.lane,
            state.stats.missed
        );

        if state.stats.missed >= MISS_LIMIT {
            state.game_over();
            return;
        }
    }
}
