//! Scheduling abstraction for timed engine callbacks.
//!
//! The engine never sleeps or spawns on its own. It asks a [`Scheduler`]
//! for recurring ticks and one-shot wakeups, keeps the returned handles,
//! and cancels them when state changes make the pending work stale.
//! [`TokioScheduler`] is the live implementation; [`ManualScheduler`]
//! lets tests and embedders drive time by hand.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;

/// What a scheduled task should do when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Recurring once-per-second countdown tick.
    Tick,
    /// One-shot restart after a Pomodoro phase transition.
    AutoResume,
}

/// Opaque identity of a scheduled task.
///
/// Handles are never reused within one scheduler, so a delivery that
/// arrives after its task was canceled can be recognized and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

impl TaskHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Source of timed callbacks.
///
/// Implementations deliver fired tasks out-of-band (a channel, a queue,
/// a test harness); the trait only covers arming and disarming.
pub trait Scheduler {
    /// Arm a task that fires every `interval` until canceled.
    fn schedule_recurring(&mut self, interval: Duration, task: TaskKind) -> TaskHandle;

    /// Arm a task that fires once after `delay`.
    fn schedule_once(&mut self, delay: Duration, task: TaskKind) -> TaskHandle;

    /// Disarm a task. Unknown or already-fired handles are a no-op.
    fn cancel(&mut self, handle: TaskHandle);
}

// ── Manual scheduler ─────────────────────────────────────────────────────────

/// A pending task recorded by [`ManualScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    pub handle: TaskHandle,
    pub kind: TaskKind,
    pub delay: Duration,
    pub recurring: bool,
}

#[derive(Default)]
struct ManualInner {
    next_id: u64,
    tasks: Vec<ScheduledTask>,
}

/// Records scheduled tasks without any clock behind them.
///
/// Clones share state, so a test can hand one clone to the engine and
/// keep another to inspect what is armed and to simulate firings.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<ManualInner>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every task currently armed, in scheduling order.
    pub fn tasks(&self) -> Vec<ScheduledTask> {
        self.inner.borrow().tasks.clone()
    }

    pub fn recurring_tasks(&self) -> Vec<ScheduledTask> {
        self.inner
            .borrow()
            .tasks
            .iter()
            .filter(|t| t.recurring)
            .copied()
            .collect()
    }

    pub fn one_shot_tasks(&self) -> Vec<ScheduledTask> {
        self.inner
            .borrow()
            .tasks
            .iter()
            .filter(|t| !t.recurring)
            .copied()
            .collect()
    }

    /// Remove and return the oldest armed one-shot, as if it had fired.
    pub fn pop_one_shot(&self) -> Option<ScheduledTask> {
        let mut inner = self.inner.borrow_mut();
        let pos = inner.tasks.iter().position(|t| !t.recurring)?;
        Some(inner.tasks.remove(pos))
    }

    fn arm(&self, kind: TaskKind, delay: Duration, recurring: bool) -> TaskHandle {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let handle = TaskHandle(inner.next_id);
        inner.tasks.push(ScheduledTask {
            handle,
            kind,
            delay,
            recurring,
        });
        handle
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_recurring(&mut self, interval: Duration, task: TaskKind) -> TaskHandle {
        self.arm(task, interval, true)
    }

    fn schedule_once(&mut self, delay: Duration, task: TaskKind) -> TaskHandle {
        self.arm(task, delay, false)
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.inner
            .borrow_mut()
            .tasks
            .retain(|t| t.handle != handle);
    }
}

// ── Tokio scheduler ──────────────────────────────────────────────────────────

/// Live scheduler backed by tokio timers.
///
/// Fired tasks are sent as `(handle, kind)` over the receiver returned
/// from [`TokioScheduler::new`]; the owner forwards them to the engine.
/// Must be created inside a tokio runtime.
pub struct TokioScheduler {
    next_id: u64,
    tx: mpsc::UnboundedSender<(TaskHandle, TaskKind)>,
    tasks: HashMap<u64, JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(TaskHandle, TaskKind)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            TokioScheduler {
                next_id: 0,
                tx,
                tasks: HashMap::new(),
            },
            rx,
        )
    }

    fn next_handle(&mut self) -> TaskHandle {
        self.next_id += 1;
        TaskHandle(self.next_id)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_recurring(&mut self, interval: Duration, task: TaskKind) -> TaskHandle {
        let handle = self.next_handle();
        let tx = self.tx.clone();
        let join = tokio::spawn(async move {
            // interval_at: tokio's plain interval() fires immediately on
            // the first tick, which would deliver a tick at t=0.
            let mut ticker = time::interval_at(time::Instant::now() + interval, interval);
            loop {
                ticker.tick().await;
                if tx.send((handle, task)).is_err() {
                    break;
                }
            }
        });
        self.tasks.insert(handle.id(), join);
        handle
    }

    fn schedule_once(&mut self, delay: Duration, task: TaskKind) -> TaskHandle {
        let handle = self.next_handle();
        let tx = self.tx.clone();
        let join = tokio::spawn(async move {
            time::sleep(delay).await;
            let _ = tx.send((handle, task));
        });
        self.tasks.insert(handle.id(), join);
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        if let Some(join) = self.tasks.remove(&handle.id()) {
            join.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, join) in self.tasks.drain() {
            join.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_handles_are_unique() {
        let mut sched = ManualScheduler::new();
        let a = sched.schedule_recurring(Duration::from_secs(1), TaskKind::Tick);
        let b = sched.schedule_once(Duration::from_secs(1), TaskKind::AutoResume);
        assert_ne!(a, b);
        assert_eq!(sched.tasks().len(), 2);
    }

    #[test]
    fn manual_cancel_removes_task() {
        let mut sched = ManualScheduler::new();
        let tick = sched.schedule_recurring(Duration::from_secs(1), TaskKind::Tick);
        sched.schedule_once(Duration::from_secs(1), TaskKind::AutoResume);

        sched.cancel(tick);
        assert!(sched.recurring_tasks().is_empty());
        assert_eq!(sched.one_shot_tasks().len(), 1);

        // canceling again is a no-op
        sched.cancel(tick);
        assert_eq!(sched.tasks().len(), 1);
    }

    #[test]
    fn manual_pop_one_shot_consumes() {
        let mut sched = ManualScheduler::new();
        sched.schedule_recurring(Duration::from_secs(1), TaskKind::Tick);
        let resume = sched.schedule_once(Duration::from_secs(1), TaskKind::AutoResume);

        let fired = sched.pop_one_shot().unwrap();
        assert_eq!(fired.handle, resume);
        assert_eq!(fired.kind, TaskKind::AutoResume);
        assert!(sched.pop_one_shot().is_none());
    }

    #[test]
    fn manual_clones_share_state() {
        let mut sched = ManualScheduler::new();
        let view = sched.clone();
        sched.schedule_recurring(Duration::from_secs(1), TaskKind::Tick);
        assert_eq!(view.tasks().len(), 1);
    }

    #[tokio::test]
    async fn tokio_recurring_delivers_repeatedly() {
        let (mut sched, mut rx) = TokioScheduler::new();
        let handle = sched.schedule_recurring(Duration::from_millis(10), TaskKind::Tick);

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first, (handle, TaskKind::Tick));
        assert_eq!(second, (handle, TaskKind::Tick));
    }

    #[tokio::test]
    async fn tokio_cancel_stops_delivery() {
        let (mut sched, mut rx) = TokioScheduler::new();
        let handle = sched.schedule_once(Duration::from_millis(20), TaskKind::AutoResume);
        sched.cancel(handle);

        time::sleep(Duration::from_millis(60)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn tokio_one_shot_fires_once() {
        let (mut sched, mut rx) = TokioScheduler::new();
        let handle = sched.schedule_once(Duration::from_millis(10), TaskKind::AutoResume);

        assert_eq!(rx.recv().await.unwrap(), (handle, TaskKind::AutoResume));
        time::sleep(Duration::from_millis(40)).await;
        assert!(rx.try_recv().is_err());
    }
}
