use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{PomodoroPhase, Time, TimeField};

/// Every state change in the engine produces an Event.
/// Frontends poll or subscribe; each variant carries its wall-clock time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        time: Time,
        at: DateTime<Utc>,
    },
    TimerPaused {
        time: Time,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    TimeAdjusted {
        field: TimeField,
        time: Time,
        at: DateTime<Utc>,
    },
    EditToggled {
        editing: bool,
        at: DateTime<Utc>,
    },
    PresetApplied {
        minutes: u32,
        time: Time,
        at: DateTime<Utc>,
    },
    PomodoroStarted {
        time: Time,
        at: DateTime<Utc>,
    },
    PomodoroStopped {
        at: DateTime<Utc>,
    },
    /// Countdown reached zero. `duration_secs` is the configured length
    /// of the session that just finished, not the wall time spent.
    TimerCompleted {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// A work session finished and the cycle rolled into a break.
    BreakStarted {
        session_count: u32,
        minutes: u32,
        long_break: bool,
        at: DateTime<Utc>,
    },
    /// A break finished and the cycle rolled back into work.
    WorkStarted {
        minutes: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        running: bool,
        editing: bool,
        phase: PomodoroPhase,
        session_count: u32,
        time: Time,
        initial_time: Time,
        /// Fraction of the current countdown already elapsed, 0.0-1.0.
        progress: f64,
        at: DateTime<Utc>,
    },
}
