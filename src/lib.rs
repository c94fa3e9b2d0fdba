//! Fret Rush - a four-lane falling-note rhythm game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, judgement, scoring)
//! - `input`: Typed input events, bounded queue, button mapping
//! - `music`: Chiptune sequencing state (speed multiplier, pulse scheduler)
//! - `settings`: Presentation/audio preferences

pub mod input;
pub mod music;
pub mod settings;
pub mod sim;

pub use input::{ButtonMap, InputEvent, InputQueue};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Number of lanes (and lane buttons)
    pub const LANE_COUNT: usize = 4;

    /// Fall-axis position where notes spawn
    pub const SPAWN_POSITION: f64 = 100.0;
    /// Fall-axis position of the hit zone
    pub const HIT_ZONE: f64 = 480.0;
    /// Distance past the hit zone after which an unjudged note counts as missed
    pub const PASS_MARGIN: f64 = 50.0;

    /// Perfect window (absolute distance from the hit zone)
    pub const PERFECT_WINDOW: f64 = 25.0;
    /// Good window - also the widest distance a press can catch a note at
    pub const GOOD_WINDOW: f64 = 45.0;

    /// Points per perfect hit
    pub const PERFECT_SCORE: u64 = 150;
    /// Points per good hit
    pub const GOOD_SCORE: u64 = 75;

    /// Passage misses that end the game
    pub const MISS_LIMIT: u32 = 10;

    /// Spawn cadence: interval starts here and shrinks per spawn
    pub const SPAWN_INTERVAL_START_MS: f64 = 800.0;
    pub const SPAWN_INTERVAL_MIN_MS: f64 = 150.0;
    pub const SPAWN_INTERVAL_STEP_MS: f64 = 8.0;

    /// Fall speed: units per tick, grows per spawn
    pub const FALL_SPEED_START: f64 = 2.0;
    pub const FALL_SPEED_MAX: f64 = 8.0;
    pub const FALL_SPEED_STEP: f64 = 0.03;

    /// Cumulative perfect hits per music speed-up
    pub const PERFECTS_PER_SPEEDUP: u32 = 3;
    /// Chance of a bonus music speed-up rolled on each note spawn
    pub const SPAWN_SPEEDUP_CHANCE: f64 = 0.15;
}
