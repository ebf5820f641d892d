use std::io::{self, Write};

use chilldown_core::stats::format_duration;
use chilldown_core::{
    AdjustDirection, Config, Event, LogNotifier, ManualScheduler, Notifier, NullNotifier,
    PomodoroPhase, StateStore, Time, TimeField, TimerEngine, TokioScheduler,
};
use clap::Subcommand;
use notify_rust::Notification;
use serde::Serialize;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the countdown live until it completes (Ctrl-C pauses)
    Start,
    /// Stop the countdown, keeping the remaining time
    Pause,
    /// Zero the countdown and leave Pomodoro mode
    Reset,
    /// Print current timer state as JSON
    Status,
    /// Toggle edit mode
    Edit,
    /// Step one field of the countdown up or down
    Adjust {
        /// Field to adjust
        #[arg(value_enum)]
        field: FieldArg,
        /// Direction to step
        #[arg(value_enum)]
        direction: DirectionArg,
    },
    /// Load a whole-minute preset duration
    Preset {
        /// Duration in minutes
        minutes: u32,
    },
    /// Pomodoro cycle control
    Pomodoro {
        #[command(subcommand)]
        action: PomodoroAction,
    },
}

#[derive(Subcommand)]
pub enum PomodoroAction {
    /// Enter Pomodoro mode at the top of a fresh cycle
    Start,
    /// Leave Pomodoro mode, keeping the countdown
    Stop,
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum FieldArg {
    Hours,
    Minutes,
    Seconds,
}

impl From<FieldArg> for TimeField {
    fn from(field: FieldArg) -> Self {
        match field {
            FieldArg::Hours => TimeField::Hours,
            FieldArg::Minutes => TimeField::Minutes,
            FieldArg::Seconds => TimeField::Seconds,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum DirectionArg {
    Up,
    Down,
}

impl From<DirectionArg> for AdjustDirection {
    fn from(direction: DirectionArg) -> Self {
        match direction {
            DirectionArg::Up => AdjustDirection::Increment,
            DirectionArg::Down => AdjustDirection::Decrement,
        }
    }
}

/// Desktop notifications via the platform notification service.
struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&mut self, title: &str, body: &str) {
        let _ = Notification::new()
            .summary(title)
            .body(body)
            .appname("chilldown")
            .icon("alarm-clock")
            .show();
    }
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Start => live_countdown(),
        TimerAction::Status => status(),
        other => apply(other),
    }
}

/// Apply one state-changing command and print the resulting event.
fn apply(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    // No live clock behind one-shot commands; armed tasks die with the
    // process and the next `timer start` re-arms from persisted state.
    let mut engine =
        TimerEngine::open_default(Box::new(ManualScheduler::new()), Box::new(NullNotifier))?;

    let event = match action {
        TimerAction::Pause => engine.pause(),
        TimerAction::Reset => engine.reset(),
        TimerAction::Edit => engine.toggle_edit(),
        TimerAction::Adjust { field, direction } => {
            engine.adjust_time(field.into(), direction.into())
        }
        TimerAction::Preset { minutes } => engine.set_preset(minutes),
        TimerAction::Pomodoro {
            action: PomodoroAction::Start,
        } => engine.start_pomodoro(),
        TimerAction::Pomodoro {
            action: PomodoroAction::Stop,
        } => engine.stop_pomodoro(),
        // start and status are dispatched before apply is called
        TimerAction::Start | TimerAction::Status => None,
    };

    match event {
        Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
        None => println!("{}", serde_json::to_string_pretty(&engine.snapshot())?),
    }
    Ok(())
}

/// Timer state as last persisted, without rebuilding an engine.
///
/// Restoring an engine would rewrite the stored running flag; reading
/// the store directly keeps `was_running` intact for the next frontend.
fn status() -> Result<(), Box<dyn std::error::Error>> {
    let store = StateStore::open()?;
    let time = store.load_time().unwrap_or_default();
    let initial_time = store.load_initial_time().unwrap_or(time);
    let pomodoro = store.load_pomodoro().unwrap_or_default();

    #[derive(Serialize)]
    struct TimerStatus {
        time: Time,
        initial_time: Time,
        was_running: bool,
        editing: bool,
        phase: PomodoroPhase,
        session_count: u32,
        progress: f64,
    }

    let initial = initial_time.total_seconds();
    let progress = if initial == 0 {
        0.0
    } else {
        (initial.saturating_sub(time.total_seconds()) as f64 / initial as f64).clamp(0.0, 1.0)
    };

    let status = TimerStatus {
        time,
        initial_time,
        was_running: store.load_running().unwrap_or(false),
        editing: store.load_editing().unwrap_or(false),
        phase: pomodoro.phase,
        session_count: pomodoro.session_count,
        progress,
    };
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

/// Attach to the countdown and drive it until it completes or Ctrl-C.
///
/// In Pomodoro mode the loop keeps following the cycle: each phase
/// transition is announced and the auto-resume task restarts the next
/// countdown through the same delivery channel.
fn live_countdown() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = StateStore::open()?;
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async move {
        let (scheduler, mut deliveries) = TokioScheduler::new();
        let notifier: Box<dyn Notifier> = if config.notifications.enabled {
            Box::new(DesktopNotifier)
        } else {
            Box::new(LogNotifier)
        };
        let mut engine =
            TimerEngine::restore(store, Box::new(scheduler), notifier, config.pomodoro);

        if engine.start().is_none() {
            return Err("nothing to count down; set a duration first".into());
        }
        render_remaining(&engine)?;

        loop {
            tokio::select! {
                delivery = deliveries.recv() => {
                    let Some((handle, kind)) = delivery else { break };
                    let event = engine.handle_task(handle, kind);
                    render_remaining(&engine)?;
                    match event {
                        Some(Event::TimerCompleted { duration_secs, .. }) => {
                            println!();
                            println!("completed after {}", format_duration(duration_secs));
                            break;
                        }
                        Some(Event::BreakStarted { session_count, minutes, long_break, .. }) => {
                            println!();
                            let label = if long_break { "long break" } else { "break" };
                            println!("session {session_count} done, {minutes} minute {label}");
                        }
                        Some(Event::WorkStarted { minutes, .. }) => {
                            println!();
                            println!("break over, {minutes} minute work session");
                        }
                        _ => {}
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    engine.pause();
                    println!();
                    println!("paused at {}", engine.time());
                    break;
                }
            }
        }
        Ok(())
    })
}

fn render_remaining(engine: &TimerEngine) -> io::Result<()> {
    let label = match engine.pomodoro().phase {
        PomodoroPhase::Off => "",
        PomodoroPhase::Work => "work ",
        PomodoroPhase::Break => "break ",
    };
    let mut out = io::stdout();
    write!(out, "\r{label}{}  ", engine.time())?;
    out.flush()
}
