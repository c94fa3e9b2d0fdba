//! Input events, queue, and button mapping
//!
//! The host translates physical signals (keyboard, arcade cabinet) into typed
//! [`InputEvent`]s through a [`ButtonMap`] and pushes them onto a bounded
//! [`InputQueue`]. The simulation drains the queue exactly once per tick, so
//! event ordering is explicit and testable.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::consts::LANE_COUNT;

/// A discrete input event delivered to the core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    LanePressed(usize),
    LaneReleased(usize),
    StartPressed,
}

/// Logical action a physical button code maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Lane(usize),
    Start,
}

/// Maximum queued events per frame; anything beyond is dropped
pub const INPUT_QUEUE_CAPACITY: usize = 64;

/// Bounded queue of input events, drained once per tick
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue an event; drops (with a debug log) when the queue is full
    pub fn push(&mut self, event: InputEvent) {
        if self.events.len() >= INPUT_QUEUE_CAPACITY {
            log::debug!("input queue full, dropping {event:?}");
            return;
        }
        self.events.push(event);
    }

    /// Take all queued events in arrival order
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Physical-code to logical-action configuration table.
///
/// Keys are whatever the host reports: arcade cabinet codes (`P1A`..`P1D`,
/// `START1`) or keyboard keys. Any number of codes may map to one action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonMap {
    bindings: HashMap<String, Action>,
}

impl Default for ButtonMap {
    fn default() -> Self {
        let mut bindings = HashMap::new();
        let lanes: [(&str, [&str; 2]); LANE_COUNT] = [
            ("P1A", ["a", "A"]),
            ("P1B", ["s", "S"]),
            ("P1C", ["d", "D"]),
            ("P1D", ["f", "F"]),
        ];
        for (lane, (code, keys)) in lanes.iter().enumerate() {
            bindings.insert((*code).to_string(), Action::Lane(lane));
            for key in keys {
                bindings.insert((*key).to_string(), Action::Lane(lane));
            }
        }
        for code in ["START1", "Enter", " "] {
            bindings.insert(code.to_string(), Action::Start);
        }
        Self { bindings }
    }
}

impl ButtonMap {
    /// Look up the action for a physical code; unmapped codes yield `None`
    pub fn action(&self, code: &str) -> Option<Action> {
        self.bindings.get(code).copied()
    }

    /// Replace or add a binding
    pub fn bind(&mut self, code: &str, action: Action) {
        self.bindings.insert(code.to_string(), action);
    }

    /// Parse a mapping table from JSON configuration
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
