//! Timer engine implementation.
//!
//! The engine is a countdown state machine driven entirely from the
//! outside: it arms tick and auto-resume tasks on a [`Scheduler`] and
//! mutates state when the owner feeds deliveries back through
//! [`TimerEngine::handle_task`]. It never sleeps, spawns, or reads the
//! wall clock for elapsed time.
//!
//! ## State
//!
//! ```text
//! stopped <-> running, with orthogonal editing flag
//! PomodoroPhase: Off | Work | Break
//! ```
//!
//! Every mutation is written through to the [`StateStore`] as it
//! happens. A saved "running" flag is never resumed on restore; a
//! stale countdown coming back to life after a long absence would lie
//! about elapsed time.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::restore(store, scheduler, notifier, settings);
//! engine.start();
//! // For every (handle, kind) the scheduler delivers:
//! engine.handle_task(handle, kind); // Some(Event) on state change
//! ```

use std::time::Duration;

use chrono::Utc;

use super::pomodoro::{PomodoroPhase, PomodoroState};
use super::time::{AdjustDirection, Time, TimeField};
use crate::error::Result;
use crate::events::Event;
use crate::notify::Notifier;
use crate::scheduler::{Scheduler, TaskHandle, TaskKind};
use crate::stats::StatsLog;
use crate::storage::{Config, PomodoroConfig, StateStore};

/// Interval between countdown ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);
/// Pause before a Pomodoro phase transition starts running on its own.
pub const AUTO_RESUME_DELAY: Duration = Duration::from_secs(1);

/// Core countdown engine.
pub struct TimerEngine {
    time: Time,
    initial_time: Time,
    running: bool,
    editing: bool,
    pomodoro: PomodoroState,
    stats: StatsLog,
    settings: PomodoroConfig,
    store: StateStore,
    scheduler: Box<dyn Scheduler>,
    notifier: Box<dyn Notifier>,
    /// Handle of the armed recurring tick, if running.
    tick_task: Option<TaskHandle>,
    /// Handle of the armed one-shot auto-resume, if a phase transition
    /// is waiting to start.
    resume_task: Option<TaskHandle>,
}

impl TimerEngine {
    /// Rebuild the engine from persisted state.
    ///
    /// Unreadable fields fall back to their defaults. The stored
    /// running flag is ignored and rewritten as stopped.
    pub fn restore(
        store: StateStore,
        scheduler: Box<dyn Scheduler>,
        notifier: Box<dyn Notifier>,
        settings: PomodoroConfig,
    ) -> Self {
        let time = store.load_time().unwrap_or_default();
        let initial_time = store.load_initial_time().unwrap_or(time);
        let editing = store.load_editing().unwrap_or(false);
        let pomodoro = store.load_pomodoro().unwrap_or_default();
        let stats = store.load_stats().unwrap_or_default();
        store.save_running(false);
        Self {
            time,
            initial_time,
            running: false,
            editing,
            pomodoro,
            stats,
            settings,
            store,
            scheduler,
            notifier,
            tick_task: None,
            resume_task: None,
        }
    }

    /// Restore an engine from the default on-disk store and config.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the config
    /// file exists but cannot be parsed.
    pub fn open_default(
        scheduler: Box<dyn Scheduler>,
        notifier: Box<dyn Notifier>,
    ) -> Result<Self> {
        let config = Config::load()?;
        let store = StateStore::open()?;
        Ok(Self::restore(store, scheduler, notifier, config.pomodoro))
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn editing(&self) -> bool {
        self.editing
    }

    pub fn time(&self) -> Time {
        self.time
    }

    pub fn initial_time(&self) -> Time {
        self.initial_time
    }

    pub fn pomodoro(&self) -> PomodoroState {
        self.pomodoro
    }

    pub fn stats(&self) -> &StatsLog {
        &self.stats
    }

    pub fn settings(&self) -> &PomodoroConfig {
        &self.settings
    }

    /// 0.0 .. 1.0 fraction of the current countdown already elapsed.
    pub fn progress(&self) -> f64 {
        let initial = self.initial_time.total_seconds();
        if initial == 0 {
            return 0.0;
        }
        let elapsed = initial.saturating_sub(self.time.total_seconds());
        (elapsed as f64 / initial as f64).clamp(0.0, 1.0)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            running: self.running,
            editing: self.editing,
            phase: self.pomodoro.phase,
            session_count: self.pomodoro.session_count,
            time: self.time,
            initial_time: self.initial_time,
            progress: self.progress(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin counting down. No-op at zero or while already running.
    ///
    /// Starting from stopped with a countdown that differs from the
    /// recorded baseline re-captures `initial_time`, so progress is
    /// measured against what actually started.
    pub fn start(&mut self) -> Option<Event> {
        if self.running || self.time.is_zero() {
            return None;
        }
        self.cancel_resume();
        if self.time != self.initial_time {
            self.initial_time = self.time;
            self.store.save_initial_time(&self.initial_time);
        }
        self.running = true;
        self.store.save_running(true);
        self.arm_tick();
        Some(Event::TimerStarted {
            time: self.time,
            at: Utc::now(),
        })
    }

    /// Stop counting down, keeping the remaining time. Also suppresses
    /// a pending auto-resume, so "stop" always means stopped.
    pub fn pause(&mut self) -> Option<Event> {
        self.cancel_resume();
        if !self.running {
            return None;
        }
        self.running = false;
        self.store.save_running(false);
        self.cancel_tick();
        Some(Event::TimerPaused {
            time: self.time,
            at: Utc::now(),
        })
    }

    pub fn toggle(&mut self) -> Option<Event> {
        if self.running {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Stop everything and zero the countdown. Exits Pomodoro mode.
    pub fn reset(&mut self) -> Option<Event> {
        self.cancel_tick();
        self.cancel_resume();
        self.running = false;
        self.time = Time::ZERO;
        self.initial_time = Time::ZERO;
        self.pomodoro.clear();
        self.store.save_running(false);
        self.store.save_time(&self.time);
        self.store.save_initial_time(&self.initial_time);
        self.store.save_pomodoro(&self.pomodoro);
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Step one field of the countdown, wrapping at its boundary.
    /// Rejected while running; an armed tick owns the time value.
    pub fn adjust_time(&mut self, field: TimeField, direction: AdjustDirection) -> Option<Event> {
        if self.running {
            return None;
        }
        self.time.adjust(field, direction);
        self.store.save_time(&self.time);
        Some(Event::TimeAdjusted {
            field,
            time: self.time,
            at: Utc::now(),
        })
    }

    pub fn toggle_edit(&mut self) -> Option<Event> {
        self.editing = !self.editing;
        self.store.save_editing(self.editing);
        Some(Event::EditToggled {
            editing: self.editing,
            at: Utc::now(),
        })
    }

    /// Load a whole-minute preset. Stops the countdown and leaves edit
    /// mode; Pomodoro mode is untouched.
    pub fn set_preset(&mut self, minutes: u32) -> Option<Event> {
        self.cancel_tick();
        self.cancel_resume();
        self.running = false;
        self.editing = false;
        self.set_countdown(Time::from_minutes(minutes));
        self.store.save_running(false);
        self.store.save_editing(false);
        Some(Event::PresetApplied {
            minutes,
            time: self.time,
            at: Utc::now(),
        })
    }

    /// Enter Pomodoro mode at the top of a fresh cycle: work phase,
    /// session count zero, work-length countdown loaded, stopped.
    pub fn start_pomodoro(&mut self) -> Option<Event> {
        self.cancel_tick();
        self.cancel_resume();
        self.running = false;
        self.editing = false;
        self.pomodoro = PomodoroState {
            phase: PomodoroPhase::Work,
            session_count: 0,
        };
        self.set_countdown(Time::from_minutes(self.settings.work_minutes));
        self.store.save_pomodoro(&self.pomodoro);
        self.store.save_running(false);
        self.store.save_editing(false);
        Some(Event::PomodoroStarted {
            time: self.time,
            at: Utc::now(),
        })
    }

    /// Leave Pomodoro mode. The countdown itself is untouched: a
    /// running break keeps counting as a plain timer, but the cycle's
    /// pending auto-resume dies with the mode.
    pub fn stop_pomodoro(&mut self) -> Option<Event> {
        if !self.pomodoro.is_pomodoro_mode() {
            return None;
        }
        self.cancel_resume();
        self.pomodoro.clear();
        self.store.save_pomodoro(&self.pomodoro);
        Some(Event::PomodoroStopped { at: Utc::now() })
    }

    /// Feed one scheduler delivery into the engine.
    ///
    /// Deliveries whose handle no longer matches the armed task are
    /// dropped: a tick or auto-resume already in flight when its task
    /// was canceled must not mutate anything.
    pub fn handle_task(&mut self, handle: TaskHandle, kind: TaskKind) -> Option<Event> {
        match kind {
            TaskKind::Tick => {
                if self.tick_task != Some(handle) {
                    return None;
                }
                self.tick()
            }
            TaskKind::AutoResume => {
                if self.resume_task != Some(handle) {
                    return None;
                }
                self.resume_task = None;
                // the one-shot is spent; disarm it so the scheduler
                // drops its record too
                self.scheduler.cancel(handle);
                self.auto_resume()
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// One second elapsed. Completion fires on the tick that reaches
    /// zero, not one tick later.
    fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        if !self.time.is_zero() {
            self.time.tick_down();
            self.store.save_time(&self.time);
            if !self.time.is_zero() {
                return None;
            }
        }
        Some(self.complete())
    }

    /// The countdown hit zero: stop, record, and either wrap up or
    /// roll the Pomodoro cycle into its next phase.
    fn complete(&mut self) -> Event {
        let at = Utc::now();
        self.running = false;
        self.store.save_running(false);
        self.cancel_tick();

        // Duration is read before the countdown gets overwritten below.
        let duration_secs = self.initial_time.total_seconds();
        self.stats.record_completion(duration_secs, at);
        self.store.save_stats(&self.stats);

        match self.pomodoro.phase {
            PomodoroPhase::Off => {
                self.notifier.notify("Timer Complete", "Time's up!");
                self.set_countdown(Time::ZERO);
                Event::TimerCompleted { duration_secs, at }
            }
            PomodoroPhase::Work => {
                self.pomodoro.session_count += 1;
                let count = self.pomodoro.session_count;
                let (minutes, long_break) = self.settings.break_for(count);
                self.pomodoro.phase = PomodoroPhase::Break;
                self.set_countdown(Time::from_minutes(minutes));
                self.store.save_pomodoro(&self.pomodoro);
                self.notifier.notify(
                    "Break Time!",
                    &format!("Take a {minutes}-minute break. Session {count} completed!"),
                );
                self.arm_resume();
                Event::BreakStarted {
                    session_count: count,
                    minutes,
                    long_break,
                    at,
                }
            }
            PomodoroPhase::Break => {
                self.pomodoro.phase = PomodoroPhase::Work;
                let minutes = self.settings.work_minutes;
                self.set_countdown(Time::from_minutes(minutes));
                self.store.save_pomodoro(&self.pomodoro);
                self.notifier.notify("Work Time!", "Time to focus!");
                self.arm_resume();
                Event::WorkStarted { minutes, at }
            }
        }
    }

    /// The auto-resume delay elapsed: start the new phase's countdown.
    fn auto_resume(&mut self) -> Option<Event> {
        if self.running || self.time.is_zero() {
            return None;
        }
        self.running = true;
        self.store.save_running(true);
        self.arm_tick();
        Some(Event::TimerStarted {
            time: self.time,
            at: Utc::now(),
        })
    }

    fn set_countdown(&mut self, time: Time) {
        self.time = time;
        self.initial_time = time;
        self.store.save_time(&self.time);
        self.store.save_initial_time(&self.initial_time);
    }

    /// Exactly one recurring tick may be armed per engine.
    fn arm_tick(&mut self) {
        self.cancel_tick();
        self.tick_task = Some(self.scheduler.schedule_recurring(TICK_INTERVAL, TaskKind::Tick));
    }

    fn cancel_tick(&mut self) {
        if let Some(handle) = self.tick_task.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn arm_resume(&mut self) {
        self.cancel_resume();
        self.resume_task = Some(
            self.scheduler
                .schedule_once(AUTO_RESUME_DELAY, TaskKind::AutoResume),
        );
    }

    fn cancel_resume(&mut self) {
        if let Some(handle) = self.resume_task.take() {
            self.scheduler.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Notifier;
    use crate::scheduler::ManualScheduler;
    use crate::storage::Database;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct RecordingNotifier(Rc<RefCell<Vec<(String, String)>>>);

    impl RecordingNotifier {
        fn titles(&self) -> Vec<String> {
            self.0.borrow().iter().map(|(t, _)| t.clone()).collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&mut self, title: &str, body: &str) {
            self.0.borrow_mut().push((title.into(), body.into()));
        }
    }

    fn test_engine() -> (TimerEngine, ManualScheduler, RecordingNotifier) {
        test_engine_with(PomodoroConfig::default())
    }

    fn test_engine_with(settings: PomodoroConfig) -> (TimerEngine, ManualScheduler, RecordingNotifier) {
        let store = StateStore::new(Database::open_memory().unwrap());
        let sched = ManualScheduler::new();
        let notifier = RecordingNotifier::default();
        let engine = TimerEngine::restore(
            store,
            Box::new(sched.clone()),
            Box::new(notifier.clone()),
            settings,
        );
        (engine, sched, notifier)
    }

    fn set_seconds(engine: &mut TimerEngine, secs: u32) {
        for _ in 0..secs {
            engine.adjust_time(TimeField::Seconds, AdjustDirection::Increment);
        }
    }

    fn run_ticks(engine: &mut TimerEngine, sched: &ManualScheduler, n: usize) -> Option<Event> {
        let mut last = None;
        for _ in 0..n {
            let task = sched.recurring_tasks()[0];
            last = engine.handle_task(task.handle, task.kind);
        }
        last
    }

    #[test]
    fn start_requires_nonzero_time() {
        let (mut engine, sched, _) = test_engine();
        assert!(engine.start().is_none());
        assert!(!engine.running());
        assert!(sched.tasks().is_empty());
    }

    #[test]
    fn start_captures_baseline_when_time_changed() {
        let (mut engine, _, _) = test_engine();
        set_seconds(&mut engine, 5);
        assert!(engine.start().is_some());
        assert_eq!(engine.initial_time(), Time::new(0, 0, 5));

        // second start while running is a no-op
        assert!(engine.start().is_none());
    }

    #[test]
    fn exactly_one_tick_armed_across_restarts() {
        let (mut engine, sched, _) = test_engine();
        set_seconds(&mut engine, 30);
        engine.start();
        assert_eq!(sched.recurring_tasks().len(), 1);

        engine.pause();
        assert!(sched.recurring_tasks().is_empty());

        engine.start();
        assert_eq!(sched.recurring_tasks().len(), 1);
    }

    #[test]
    fn tick_decrements_once_per_delivery() {
        let (mut engine, sched, _) = test_engine();
        set_seconds(&mut engine, 5);
        engine.start();
        run_ticks(&mut engine, &sched, 2);
        assert_eq!(engine.time(), Time::new(0, 0, 3));
    }

    #[test]
    fn stale_tick_delivery_is_dropped() {
        let (mut engine, sched, _) = test_engine();
        set_seconds(&mut engine, 5);
        engine.start();
        let stale = sched.recurring_tasks()[0];
        engine.pause();

        assert!(engine.handle_task(stale.handle, stale.kind).is_none());
        assert_eq!(engine.time(), Time::new(0, 0, 5));
    }

    #[test]
    fn completion_fires_on_the_reaching_tick() {
        let (mut engine, sched, notifier) = test_engine();
        set_seconds(&mut engine, 5);
        engine.start();

        let event = run_ticks(&mut engine, &sched, 5);
        match event {
            Some(Event::TimerCompleted { duration_secs, .. }) => {
                assert_eq!(duration_secs, 5);
            }
            other => panic!("expected TimerCompleted, got {other:?}"),
        }
        assert!(!engine.running());
        assert!(engine.time().is_zero());
        assert!(engine.initial_time().is_zero());
        assert_eq!(engine.stats().total_completed, 1);
        assert_eq!(engine.stats().sessions[0].duration_secs, 5);
        assert_eq!(notifier.titles(), vec!["Timer Complete"]);
        assert!(sched.recurring_tasks().is_empty());
    }

    #[test]
    fn zero_time_tick_completes_without_underflow() {
        let (mut engine, _, _) = test_engine();
        // a tick arriving with the countdown already at zero completes
        // instead of underflowing
        engine.running = true;
        let event = engine.tick();
        assert!(matches!(
            event,
            Some(Event::TimerCompleted {
                duration_secs: 0,
                ..
            })
        ));
        assert!(!engine.running());
        assert!(engine.time().is_zero());
    }

    #[test]
    fn pause_keeps_remaining_time() {
        let (mut engine, sched, _) = test_engine();
        set_seconds(&mut engine, 10);
        engine.start();
        run_ticks(&mut engine, &sched, 3);
        let paused = engine.pause();

        assert!(matches!(paused, Some(Event::TimerPaused { .. })));
        assert_eq!(engine.time(), Time::new(0, 0, 7));
        assert!(engine.pause().is_none());
    }

    #[test]
    fn toggle_alternates_start_and_pause() {
        let (mut engine, _, _) = test_engine();
        set_seconds(&mut engine, 5);
        assert!(matches!(engine.toggle(), Some(Event::TimerStarted { .. })));
        assert!(matches!(engine.toggle(), Some(Event::TimerPaused { .. })));
        assert!(!engine.running());
    }

    #[test]
    fn adjust_rejected_while_running() {
        let (mut engine, _, _) = test_engine();
        set_seconds(&mut engine, 5);
        engine.start();
        assert!(engine
            .adjust_time(TimeField::Minutes, AdjustDirection::Increment)
            .is_none());
        assert_eq!(engine.time(), Time::new(0, 0, 5));
    }

    #[test]
    fn preset_stops_and_loads_duration() {
        let (mut engine, sched, _) = test_engine();
        set_seconds(&mut engine, 30);
        engine.start();
        engine.toggle_edit();

        let event = engine.set_preset(25);
        assert!(matches!(event, Some(Event::PresetApplied { minutes: 25, .. })));
        assert!(!engine.running());
        assert!(!engine.editing());
        assert_eq!(engine.time(), Time::new(0, 25, 0));
        assert_eq!(engine.initial_time(), Time::new(0, 25, 0));
        assert!(sched.recurring_tasks().is_empty());
    }

    #[test]
    fn preset_leaves_pomodoro_mode_alone() {
        let (mut engine, _, _) = test_engine();
        engine.start_pomodoro();
        engine.set_preset(10);
        assert_eq!(engine.pomodoro().phase, PomodoroPhase::Work);
    }

    #[test]
    fn work_completion_rolls_into_break() {
        let settings = PomodoroConfig {
            work_minutes: 1,
            ..PomodoroConfig::default()
        };
        let (mut engine, sched, notifier) = test_engine_with(settings);
        engine.start_pomodoro();
        assert_eq!(engine.time(), Time::new(0, 1, 0));
        assert!(!engine.running());

        engine.start();
        let event = run_ticks(&mut engine, &sched, 60);
        match event {
            Some(Event::BreakStarted {
                session_count,
                minutes,
                long_break,
                ..
            }) => {
                assert_eq!(session_count, 1);
                assert_eq!(minutes, 5);
                assert!(!long_break);
            }
            other => panic!("expected BreakStarted, got {other:?}"),
        }
        assert_eq!(engine.pomodoro().phase, PomodoroPhase::Break);
        assert_eq!(engine.time(), Time::new(0, 5, 0));
        assert!(!engine.running());
        assert_eq!(notifier.titles(), vec!["Break Time!"]);
        // break completion was logged with the work duration
        assert_eq!(engine.stats().sessions[0].duration_secs, 60);

        // auto-resume armed; firing it starts the break countdown
        let resume = sched.pop_one_shot().unwrap();
        assert_eq!(resume.kind, TaskKind::AutoResume);
        let started = engine.handle_task(resume.handle, resume.kind);
        assert!(matches!(started, Some(Event::TimerStarted { .. })));
        assert!(engine.running());
    }

    #[test]
    fn every_nth_break_is_long() {
        let settings = PomodoroConfig {
            work_minutes: 1,
            short_break_minutes: 1,
            long_break_minutes: 2,
            sessions_before_long_break: 2,
        };
        let (mut engine, sched, _) = test_engine_with(settings);
        engine.start_pomodoro();
        engine.start();

        // session 1: work -> short break
        let event = run_ticks(&mut engine, &sched, 60);
        assert!(matches!(
            event,
            Some(Event::BreakStarted {
                long_break: false,
                minutes: 1,
                ..
            })
        ));
        let resume = sched.pop_one_shot().unwrap();
        engine.handle_task(resume.handle, resume.kind);

        // short break -> work
        let event = run_ticks(&mut engine, &sched, 60);
        assert!(matches!(event, Some(Event::WorkStarted { minutes: 1, .. })));
        let resume = sched.pop_one_shot().unwrap();
        engine.handle_task(resume.handle, resume.kind);

        // session 2: work -> long break
        let event = run_ticks(&mut engine, &sched, 60);
        assert!(matches!(
            event,
            Some(Event::BreakStarted {
                long_break: true,
                minutes: 2,
                session_count: 2,
                ..
            })
        ));
    }

    #[test]
    fn reset_cancels_pending_auto_resume() {
        let settings = PomodoroConfig {
            work_minutes: 1,
            ..PomodoroConfig::default()
        };
        let (mut engine, sched, _) = test_engine_with(settings);
        engine.start_pomodoro();
        engine.start();
        run_ticks(&mut engine, &sched, 60);
        let stale = sched.one_shot_tasks()[0];

        engine.reset();
        assert!(sched.one_shot_tasks().is_empty());
        assert_eq!(engine.pomodoro(), PomodoroState::default());
        assert!(engine.time().is_zero());

        // an in-flight delivery of the canceled task does nothing
        assert!(engine.handle_task(stale.handle, stale.kind).is_none());
        assert!(!engine.running());
    }

    #[test]
    fn manual_start_during_resume_window_wins() {
        let settings = PomodoroConfig {
            work_minutes: 1,
            ..PomodoroConfig::default()
        };
        let (mut engine, sched, _) = test_engine_with(settings);
        engine.start_pomodoro();
        engine.start();
        run_ticks(&mut engine, &sched, 60);
        let stale = sched.one_shot_tasks()[0];

        // user hits start before the auto-resume delay elapses
        assert!(engine.start().is_some());
        assert!(engine.running());
        assert!(sched.one_shot_tasks().is_empty());

        // the stale resume must not double-arm anything
        assert!(engine.handle_task(stale.handle, stale.kind).is_none());
        assert_eq!(sched.recurring_tasks().len(), 1);
    }

    #[test]
    fn pause_during_resume_window_suppresses_resume() {
        let settings = PomodoroConfig {
            work_minutes: 1,
            ..PomodoroConfig::default()
        };
        let (mut engine, sched, _) = test_engine_with(settings);
        engine.start_pomodoro();
        engine.start();
        run_ticks(&mut engine, &sched, 60);
        assert_eq!(sched.one_shot_tasks().len(), 1);

        // not running, so no pause event, but the pending resume dies
        assert!(engine.pause().is_none());
        assert!(sched.one_shot_tasks().is_empty());
    }

    #[test]
    fn consumed_auto_resume_leaves_no_armed_task() {
        let settings = PomodoroConfig {
            work_minutes: 1,
            ..PomodoroConfig::default()
        };
        let (mut engine, sched, _) = test_engine_with(settings);
        engine.start_pomodoro();
        engine.start();
        run_ticks(&mut engine, &sched, 60);

        let resume = sched.one_shot_tasks()[0];
        assert!(engine.handle_task(resume.handle, resume.kind).is_some());
        assert!(engine.running());
        // the spent one-shot must not linger in the scheduler
        assert!(sched.one_shot_tasks().is_empty());
    }

    #[test]
    fn stop_pomodoro_keeps_countdown_running() {
        let (mut engine, sched, _) = test_engine();
        engine.start_pomodoro();
        engine.start();
        run_ticks(&mut engine, &sched, 3);

        let event = engine.stop_pomodoro();
        assert!(matches!(event, Some(Event::PomodoroStopped { .. })));
        assert!(engine.running());
        assert_eq!(engine.pomodoro(), PomodoroState::default());
        assert_eq!(engine.time(), Time::new(0, 24, 57));

        assert!(engine.stop_pomodoro().is_none());
    }

    #[test]
    fn restore_never_resumes_running() {
        let store = StateStore::new(Database::open_memory().unwrap());
        store.save_time(&Time::new(0, 10, 0));
        store.save_running(true);

        let engine = TimerEngine::restore(
            store,
            Box::new(ManualScheduler::new()),
            Box::new(RecordingNotifier::default()),
            PomodoroConfig::default(),
        );
        assert!(!engine.running());
        assert_eq!(engine.time(), Time::new(0, 10, 0));
        // baseline falls back to the saved countdown
        assert_eq!(engine.initial_time(), Time::new(0, 10, 0));
        assert_eq!(engine.store.load_running(), Some(false));
    }

    #[test]
    fn progress_tracks_elapsed_fraction() {
        let (mut engine, sched, _) = test_engine();
        set_seconds(&mut engine, 10);
        assert_eq!(engine.progress(), 0.0);

        engine.start();
        run_ticks(&mut engine, &sched, 5);
        assert!((engine.progress() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn snapshot_reflects_state() {
        let (mut engine, _, _) = test_engine();
        engine.start_pomodoro();
        match engine.snapshot() {
            Event::StateSnapshot {
                running,
                phase,
                time,
                session_count,
                ..
            } => {
                assert!(!running);
                assert_eq!(phase, PomodoroPhase::Work);
                assert_eq!(time, Time::new(0, 25, 0));
                assert_eq!(session_count, 0);
            }
            other => panic!("expected StateSnapshot, got {other:?}"),
        }
    }
}
