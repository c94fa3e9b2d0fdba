//! Lane-press judgement
//!
//! Scans the in-flight notes most-recently-spawned first and judges the FIRST
//! note in the pressed lane inside the wide window. This is deliberately
//! first-match rather than nearest-match: when two notes in one lane overlap
//! the newer one is judged even if the older is closer to the hit zone. The
//! behavior is covered by a test rather than silently changed.

use crate::consts::*;

use super::state::{GameEvent, GamePhase, GameState, Judgement};

/// Handle a lane-press input event.
///
/// Out-of-range lanes and presses outside `Playing` are dropped. A press is
/// stateless: double-press without an intervening release is allowed.
pub(crate) fn handle_press(state: &mut GameState, lane: usize) {
    if state.phase != GamePhase::Playing {
        log::debug!("lane press {lane} dropped (phase {:?})", state.phase);
        return;
    }
    if lane >= LANE_COUNT {
        log::debug!("lane press {lane} dropped (no such lane)");
        return;
    }
    state.held[lane] = true;

    // Newest-first scan; Vec order is spawn order.
    let matched = state
        .notes
        .iter()
        .rposition(|note| note.lane == lane && note.distance() < GOOD_WINDOW);

    match matched {
        Some(index) => {
            let note = state.notes.remove(index);
            let judgement = if note.distance() < PERFECT_WINDOW {
                Judgement::Perfect
            } else {
                Judgement::Good
            };
            state.stats.record_hit(judgement);
            state.push_event(GameEvent::NoteJudged {
                note_id: note.id,
                lane,
                judgement,
            });
            log::debug!(
                "{judgement:?} in lane {lane} at distance {:.1}",
                note.distance()
            );

            if judgement == Judgement::Perfect
                && state.stats.perfect.is_multiple_of(PERFECTS_PER_SPEEDUP)
            {
                state.music.increase_speed();
                let music_speed = state.music.speed();
                state.push_event(GameEvent::SpeedUp { music_speed });
            }
        }
        None => {
            state.stats.record_press_miss();
            state.push_event(GameEvent::PressMissed { lane });
        }
    }

    let snapshot = state.snapshot();
    state.push_event(GameEvent::StateChanged { snapshot });
}
