mod engine;
mod pomodoro;
mod time;

pub use engine::{TimerEngine, AUTO_RESUME_DELAY, TICK_INTERVAL};
pub use pomodoro::{PomodoroPhase, PomodoroState};
pub use time::{
    AdjustDirection, Time, TimeField, MAX_HOURS, MAX_MINUTES, MAX_SECONDS,
};
