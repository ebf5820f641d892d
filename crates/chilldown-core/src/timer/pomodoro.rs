//! Pomodoro cycle state: phase tracking and session counting.

use serde::{Deserialize, Serialize};

/// Where the timer sits in the Pomodoro cycle.
///
/// `Off` means plain countdown mode; `Work` and `Break` are the two
/// alternating phases of an active cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PomodoroPhase {
    Off,
    Work,
    Break,
}

/// Pomodoro cycle position, persisted across restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroState {
    pub phase: PomodoroPhase,
    /// Completed work sessions in the current cycle history.
    pub session_count: u32,
}

impl PomodoroState {
    pub fn is_pomodoro_mode(&self) -> bool {
        self.phase != PomodoroPhase::Off
    }

    pub fn is_break(&self) -> bool {
        self.phase == PomodoroPhase::Break
    }

    /// Leave pomodoro mode. The cycle position is gone for good; a
    /// later cycle starts counting from zero.
    pub fn clear(&mut self) {
        self.phase = PomodoroPhase::Off;
        self.session_count = 0;
    }
}

impl Default for PomodoroState {
    fn default() -> Self {
        PomodoroState {
            phase: PomodoroPhase::Off,
            session_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_off() {
        let s = PomodoroState::default();
        assert!(!s.is_pomodoro_mode());
        assert!(!s.is_break());
        assert_eq!(s.session_count, 0);
    }

    #[test]
    fn clear_resets_cycle_position() {
        let mut s = PomodoroState {
            phase: PomodoroPhase::Break,
            session_count: 3,
        };
        s.clear();
        assert_eq!(s.phase, PomodoroPhase::Off);
        assert_eq!(s.session_count, 0);
    }

    #[test]
    fn phase_serializes_lowercase() {
        let json = serde_json::to_string(&PomodoroPhase::Work).unwrap();
        assert_eq!(json, "\"work\"");
        let back: PomodoroPhase = serde_json::from_str("\"break\"").unwrap();
        assert_eq!(back, PomodoroPhase::Break);
    }
}
