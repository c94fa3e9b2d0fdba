//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per host animation frame, host-supplied clock only
//! - Seeded RNG only
//! - Input consumed from an explicit queue, once per tick
//! - No rendering, audio, or platform dependencies

mod judge;
pub mod state;
pub mod tick;

pub use state::{
    GameEvent, GamePhase, GameState, Judgement, Note, RngState, SessionStats, Snapshot,
};
pub use tick::tick;
