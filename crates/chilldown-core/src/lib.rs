//! # Chilldown Core Library
//!
//! Core logic for the Chilldown ambient timer: a countdown/Pomodoro
//! engine plus the theme and ambient-sound state that surrounds it.
//! Frontends (the CLI binary, a future widget shell) own the event
//! loop, the desktop notifications, and the audio output; this crate
//! owns every state transition and its persistence.
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: countdown state machine with Pomodoro cycling,
//!   driven through a [`Scheduler`] it arms and the task deliveries
//!   fed back into it
//! - [`StateStore`]: SQLite key-value persistence for every field of
//!   widget state; loads validate-or-default, saves are best-effort
//! - [`Config`]: TOML configuration with dot-path get/set
//! - [`StatsLog`]: completion history, capped at the 100 most recent
//!   sessions
//! - [`Theme`] / [`SoundMixer`]: supplementary widget state

pub mod error;
pub mod events;
pub mod notify;
pub mod scheduler;
pub mod sounds;
pub mod stats;
pub mod storage;
pub mod theme;
pub mod timer;

pub use error::{ConfigError, CoreError, Result, StorageError};
pub use events::Event;
pub use notify::{LogNotifier, Notifier, NullNotifier};
pub use scheduler::{ManualScheduler, Scheduler, TaskHandle, TaskKind, TokioScheduler};
pub use sounds::SoundMixer;
pub use stats::StatsLog;
pub use storage::{Config, Database, PomodoroConfig, StateStore};
pub use theme::Theme;
pub use timer::{
    AdjustDirection, PomodoroPhase, PomodoroState, Time, TimeField, TimerEngine,
};
