//! Chiptune sequencing state
//!
//! The presentation layer owns synthesis; this module owns the state that
//! decides *what* to play and *when*: a shared speed multiplier ramped by
//! gameplay, a running sequence counter, and the pitch tables for the looping
//! background theme. All of it is cosmetic, but `perfect`-driven speed-ups
//! make it observable state worth reproducing exactly.

use serde::{Deserialize, Serialize};

/// Milliseconds between background pulses at speed 1.0
pub const BASE_TEMPO_MS: f64 = 200.0;
/// Speed multiplier step per speed-up
pub const SPEED_STEP: f64 = 0.05;
/// Speed multiplier cap
pub const SPEED_MAX: f64 = 3.0;

/// Looping main-theme snippet (Hz)
pub const MELODY_SNIPPET: [f64; 8] = [
    392.00, // G4
    392.00, // G4
    329.63, // E4
    392.00, // G4
    523.25, // C5
    392.00, // G4
    261.63, // C4
    329.63, // E4
];

/// Bass notes, one every other pulse (Hz)
pub const BASS_NOTES: [f64; 4] = [
    130.81, // C3
    146.83, // D3
    164.81, // E3
    174.61, // F3
];

/// Per-lane hit tones (Hz): C4, E4, G4, C5
pub const LANE_TONES: [f64; 4] = [261.63, 329.63, 392.00, 523.25];

/// One step of the background loop
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MusicPulse {
    pub melody_hz: f64,
    pub bass_hz: Option<f64>,
}

/// Background music scheduler and shared speed multiplier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicDirector {
    speed: f64,
    sequence: u64,
    last_pulse_ms: f64,
}

impl Default for MusicDirector {
    fn default() -> Self {
        Self::new()
    }
}

impl MusicDirector {
    pub fn new() -> Self {
        Self {
            speed: 1.0,
            sequence: 0,
            last_pulse_ms: 0.0,
        }
    }

    /// Current speed multiplier (1.0 ..= 3.0)
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Raise the speed multiplier one step, capped
    pub fn increase_speed(&mut self) {
        self.speed = (self.speed + SPEED_STEP).min(SPEED_MAX);
    }

    /// Back to 1.0x and the top of the loop (new game)
    pub fn reset(&mut self) {
        self.speed = 1.0;
        self.sequence = 0;
    }

    /// Emit the next background pulse once the tempo interval has elapsed.
    /// The interval shrinks as the speed multiplier grows.
    pub fn pulse(&mut self, now_ms: f64) -> Option<MusicPulse> {
        if now_ms - self.last_pulse_ms <= BASE_TEMPO_MS / self.speed {
            return None;
        }
        self.last_pulse_ms = now_ms;

        let melody_hz = MELODY_SNIPPET[(self.sequence % MELODY_SNIPPET.len() as u64) as usize];
        let bass_hz = if self.sequence % 2 == 0 {
            Some(BASS_NOTES[((self.sequence / 2) % BASS_NOTES.len() as u64) as usize])
        } else {
            None
        };
        self.sequence += 1;
        Some(MusicPulse { melody_hz, bass_hz })
    }
}

/// Hit tone for a lane, if the index is valid
pub fn lane_tone(lane: usize) -> Option<f64> {
    LANE_TONES.get(lane).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_ramp_caps_at_max() {
        let mut music = MusicDirector::new();
        for _ in 0..100 {
            music.increase_speed();
        }
        assert_eq!(music.speed(), SPEED_MAX);
    }

    #[test]
    fn test_speed_step() {
        let mut music = MusicDirector::new();
        music.increase_speed();
        assert!((music.speed() - 1.05).abs() < 1e-9);
    }

    #[test]
    fn test_reset_restarts_loop() {
        let mut music = MusicDirector::new();
        music.increase_speed();
        let _ = music.pulse(500.0);
        music.reset();
        assert_eq!(music.speed(), 1.0);
        let pulse = music.pulse(2000.0).expect("pulse due");
        assert_eq!(pulse.melody_hz, MELODY_SNIPPET[0]);
    }

    #[test]
    fn test_pulse_cadence_follows_speed() {
        let mut music = MusicDirector::new();
        assert!(music.pulse(100.0).is_none(), "tempo interval not yet up");
        assert!(music.pulse(201.0).is_some());
        assert!(music.pulse(300.0).is_none());

        // At 2.0x the interval halves
        for _ in 0..20 {
            music.increase_speed();
        }
        assert!(music.pulse(402.0).is_some());
    }

    #[test]
    fn test_bass_on_alternate_pulses() {
        let mut music = MusicDirector::new();
        let mut now = 0.0;
        let mut pulses = Vec::new();
        while pulses.len() < 4 {
            now += 250.0;
            if let Some(p) = music.pulse(now) {
                pulses.push(p);
            }
        }
        assert!(pulses[0].bass_hz.is_some());
        assert!(pulses[1].bass_hz.is_none());
        assert!(pulses[2].bass_hz.is_some());
        assert_eq!(pulses[2].bass_hz, Some(BASS_NOTES[1]));
    }

    #[test]
    fn test_lane_tone_bounds() {
        assert_eq!(lane_tone(0), Some(261.63));
        assert_eq!(lane_tone(3), Some(523.25));
        assert_eq!(lane_tone(4), None);
    }
}
