//! Completion statistics: running totals plus a capped session log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How many individual sessions the log keeps. Older entries are
/// dropped; the running totals keep counting past the cap.
pub const MAX_RETAINED_SESSIONS: usize = 100;

/// One finished countdown, work and break sessions alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEntry {
    pub completed_at: DateTime<Utc>,
    pub duration_secs: u64,
}

/// Accumulated completion history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsLog {
    #[serde(default)]
    pub total_completed: u64,
    #[serde(default)]
    pub total_time_secs: u64,
    #[serde(default)]
    pub last_completed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sessions: Vec<SessionEntry>,
}

impl StatsLog {
    /// Record one finished session of `duration_secs`.
    pub fn record_completion(&mut self, duration_secs: u64, at: DateTime<Utc>) {
        self.total_completed += 1;
        self.total_time_secs += duration_secs;
        self.last_completed = Some(at);
        self.sessions.push(SessionEntry {
            completed_at: at,
            duration_secs,
        });
        if self.sessions.len() > MAX_RETAINED_SESSIONS {
            let excess = self.sessions.len() - MAX_RETAINED_SESSIONS;
            self.sessions.drain(..excess);
        }
    }

    /// Mean session length over everything ever completed, in seconds.
    pub fn average_duration_secs(&self) -> u64 {
        if self.total_completed == 0 {
            0
        } else {
            self.total_time_secs / self.total_completed
        }
    }
}

/// Render a second count as `2h 5m 30s`, omitting leading zero parts.
pub fn format_duration(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}
