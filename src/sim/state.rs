//! Game state and core simulation types
//!
//! The whole session lives in one explicit [`GameState`] value owned by the
//! loop driver; there is no module-level mutable state.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::music::MusicDirector;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start button
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended after too many missed notes
    GameOver,
}

/// Judgement outcome for a note or a whiffed press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Judgement {
    /// Pressed within the tight window
    Perfect,
    /// Pressed within the wide window
    Good,
    /// Pressed with no note in reach (resets combo, does not count as missed)
    MissByPress,
    /// Note fell past the hit zone unjudged
    MissByPassage,
}

/// A note in flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: u32,
    /// Lane index, fixed at creation
    pub lane: usize,
    /// Distance along the fall axis, advanced every tick
    pub position: f64,
}

impl Note {
    /// Absolute distance from the hit zone
    pub fn distance(&self) -> f64 {
        (self.position - HIT_ZONE).abs()
    }
}

/// Score/combo accumulator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub score: u64,
    pub combo: u32,
    /// Best combo seen at any game over; survives restarts
    pub max_combo: u32,
    pub perfect: u32,
    pub good: u32,
    /// Passage misses only; whiffed presses do not count toward the limit
    pub missed: u32,
}

impl SessionStats {
    /// Zero everything except `max_combo` (new game start)
    pub fn reset(&mut self) {
        let max_combo = self.max_combo;
        *self = Self {
            max_combo,
            ..Self::default()
        };
    }

    /// Apply a successful hit
    pub fn record_hit(&mut self, judgement: Judgement) {
        match judgement {
            Judgement::Perfect => {
                self.score += PERFECT_SCORE;
                self.perfect += 1;
            }
            Judgement::Good => {
                self.score += GOOD_SCORE;
                self.good += 1;
            }
            Judgement::MissByPress | Judgement::MissByPassage => return,
        }
        self.combo += 1;
    }

    /// A note fell past the hit zone unjudged
    pub fn record_passage_miss(&mut self) {
        self.missed += 1;
        self.combo = 0;
    }

    /// A press caught nothing
    pub fn record_press_miss(&mut self) {
        self.combo = 0;
    }

    /// Fold the running combo into `max_combo` (game over)
    pub fn finalize(&mut self) {
        self.max_combo = self.max_combo.max(self.combo);
    }
}

/// Read-only view handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    pub perfect: u32,
    pub good: u32,
    pub missed: u32,
    pub music_speed: f64,
    /// Cosmetic per-lane held flags (button highlight only)
    pub held: [bool; LANE_COUNT],
}

/// Fire-and-forget notifications for the presentation layer.
///
/// Appended during [`tick`](crate::sim::tick) and drained by the host once per
/// frame; nothing here feeds back into gameplay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    PhaseChanged { phase: GamePhase },
    NoteSpawned { note_id: u32, lane: usize },
    NoteMoved { note_id: u32, position: f64 },
    NoteJudged { note_id: u32, lane: usize, judgement: Judgement },
    /// A press in a lane with no catchable note
    PressMissed { lane: usize },
    StateChanged { snapshot: Snapshot },
    /// Music speed multiplier increased
    SpeedUp { music_speed: f64 },
    /// Background music step (melody pitch, bass pitch on alternate pulses)
    MusicPulse { melody_hz: f64, bass_hz: Option<f64> },
}

/// RNG state wrapper so sessions are reproducible from their seed
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete session state (deterministic given seed + input script)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub stats: SessionStats,
    /// Notes in flight, in spawn order
    pub notes: Vec<Note>,
    /// Milliseconds between spawns, shrinking per spawn
    pub spawn_interval_ms: f64,
    /// Fall-axis units per tick, growing per spawn
    pub fall_speed: f64,
    /// Timestamp of the last spawn (host clock, ms)
    pub last_spawn_ms: f64,
    /// Cosmetic held flags, one per lane
    pub held: [bool; LANE_COUNT],
    pub music: MusicDirector,
    /// Ticks spent in `Playing`
    pub time_ticks: u64,
    rng: Pcg32,
    next_id: u32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session sitting at the menu
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Menu,
            stats: SessionStats::default(),
            notes: Vec::new(),
            spawn_interval_ms: SPAWN_INTERVAL_START_MS,
            fall_speed: FALL_SPEED_START,
            last_spawn_ms: 0.0,
            held: [false; LANE_COUNT],
            music: MusicDirector::new(),
            time_ticks: 0,
            rng: RngState::new(seed).to_rng(),
            next_id: 1,
            events: Vec::new(),
        }
    }

    /// Allocate a note ID
    pub fn next_note_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.stats.score,
            combo: self.stats.combo,
            max_combo: self.stats.max_combo,
            perfect: self.stats.perfect,
            good: self.stats.good,
            missed: self.stats.missed,
            music_speed: self.music.speed(),
            held: self.held,
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Enter `Playing`: reset stats (except `max_combo`), difficulty, notes
    /// and music speed. Valid from `Menu` and `GameOver`.
    pub fn start_game(&mut self, now_ms: f64) {
        self.stats.reset();
        self.notes.clear();
        self.spawn_interval_ms = SPAWN_INTERVAL_START_MS;
        self.fall_speed = FALL_SPEED_START;
        self.last_spawn_ms = now_ms;
        self.held = [false; LANE_COUNT];
        self.music.reset();
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
        self.push_event(GameEvent::PhaseChanged {
            phase: GamePhase::Playing,
        });
        let snapshot = self.snapshot();
        self.push_event(GameEvent::StateChanged { snapshot });
    }

    /// Enter `GameOver`, folding the running combo into `max_combo`
    pub fn game_over(&mut self) {
        self.stats.finalize();
        self.phase = GamePhase::GameOver;
        self.push_event(GameEvent::PhaseChanged {
            phase: GamePhase::GameOver,
        });
        let snapshot = self.snapshot();
        self.push_event(GameEvent::StateChanged { snapshot });
    }
}
