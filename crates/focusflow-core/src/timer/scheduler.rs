//! Drives a [`TimerEngine`] in real time.
//!
//! `FocusTimer` owns at most one tick task. Every command that stops or
//! restarts the countdown bumps an epoch under the engine lock and aborts the
//! current task. A task only ticks while the epoch it was spawned with is
//! still current, so two countdowns can never decrement the same engine.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

use super::engine::TimerEngine;
use super::mode::TimerMode;
use crate::events::Event;

const TICK_PERIOD: Duration = Duration::from_secs(1);

struct Shared {
    engine: TimerEngine,
    epoch: u64,
}

/// Handle to the scheduled per-second task. Dropping it cancels the task.
#[derive(Debug)]
pub struct TickHandle {
    epoch: u64,
    task: JoinHandle<()>,
}

impl TickHandle {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn cancel(self) {
        self.task.abort();
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub struct FocusTimer {
    shared: Arc<Mutex<Shared>>,
    ticker: Option<TickHandle>,
    events: mpsc::UnboundedSender<Event>,
}

impl FocusTimer {
    /// Wrap an engine. The receiver gets ticks and completions published by
    /// the background task.
    pub fn new(engine: TimerEngine) -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (events, rx) = mpsc::unbounded_channel();
        let timer = Self {
            shared: Arc::new(Mutex::new(Shared { engine, epoch: 0 })),
            ticker: None,
            events,
        };
        (timer, rx)
    }

    /// Read engine state under the lock.
    pub fn with_engine<R>(&self, f: impl FnOnce(&TimerEngine) -> R) -> R {
        f(&lock(&self.shared).engine)
    }

    pub fn snapshot(&self) -> Event {
        self.with_engine(TimerEngine::snapshot)
    }

    /// Whether a tick task is currently live.
    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Begin counting down. Must be called inside a tokio runtime.
    ///
    /// A running timer is left alone; otherwise any previous task is
    /// cancelled before the new one is spawned.
    pub fn start(&mut self) -> Option<Event> {
        let (event, epoch) = {
            let mut shared = lock(&self.shared);
            let event = shared.engine.start()?;
            shared.epoch += 1;
            (event, shared.epoch)
        };
        self.cancel_ticker();
        self.ticker = Some(self.spawn_ticker(epoch));
        Some(event)
    }

    pub fn pause(&mut self) -> Option<Event> {
        let event = self.stop_with(|engine| engine.pause());
        self.cancel_ticker();
        event
    }

    pub fn toggle(&mut self) -> Option<Event> {
        if self.with_engine(TimerEngine::is_running) {
            self.pause()
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) -> Event {
        let event = self.stop_with(|engine| engine.reset());
        self.cancel_ticker();
        event
    }

    pub fn change_mode(&mut self, mode: TimerMode) -> Event {
        let event = self.stop_with(|engine| engine.change_mode(mode));
        self.cancel_ticker();
        event
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Run `f` and invalidate the current task in the same critical section.
    fn stop_with<R>(&self, f: impl FnOnce(&mut TimerEngine) -> R) -> R {
        let mut shared = lock(&self.shared);
        shared.epoch += 1;
        f(&mut shared.engine)
    }

    fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            tracing::trace!(epoch = ticker.epoch(), "cancelling tick task");
            ticker.cancel();
        }
    }

    fn spawn_ticker(&self, epoch: u64) -> TickHandle {
        let shared = Arc::clone(&self.shared);
        let events = self.events.clone();
        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            loop {
                interval.tick().await;
                let (ticked, completed) = {
                    let Ok(mut guard) = shared.lock() else {
                        break;
                    };
                    let state = &mut *guard;
                    if state.epoch != epoch || !state.engine.is_running() {
                        break;
                    }
                    let completed = state.engine.tick();
                    let ticked = Event::TimerTicked {
                        mode: state.engine.mode(),
                        remaining_secs: state.engine.remaining_secs(),
                        total_secs: state.engine.total_secs(),
                    };
                    (ticked, completed)
                };
                match completed {
                    Some(done) => {
                        let _ = events.send(done);
                        break;
                    }
                    None => {
                        let _ = events.send(ticked);
                    }
                }
            }
        });
        TickHandle { epoch, task }
    }
}

impl Drop for FocusTimer {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::{ModePresets, NoopListener, RunState};

    fn timer() -> (FocusTimer, mpsc::UnboundedReceiver<Event>) {
        FocusTimer::new(TimerEngine::new(ModePresets::default(), Box::new(NoopListener)))
    }

    async fn elapse(secs: u64) {
        // Land between tick boundaries so ordering with the interval is fixed.
        tokio::time::sleep(Duration::from_millis(secs * 1000 + 500)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn counts_down_once_per_second() {
        let (mut timer, _rx) = timer();
        timer.start();
        elapse(10).await;
        assert_eq!(timer.with_engine(TimerEngine::remaining_secs), 1490);
        assert!(timer.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_start_and_toggle_never_double_count() {
        let (mut timer, _rx) = timer();
        timer.start();
        timer.start();
        timer.toggle();
        timer.toggle();
        timer.start();
        elapse(5).await;
        timer.pause();
        timer.start();
        timer.start();
        elapse(5).await;
        assert_eq!(timer.with_engine(TimerEngine::remaining_secs), 1490);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_stops_the_task() {
        let (mut timer, _rx) = timer();
        timer.start();
        elapse(3).await;
        timer.pause();
        assert!(!timer.is_ticking());
        elapse(30).await;
        assert_eq!(timer.with_engine(TimerEngine::remaining_secs), 1497);
        assert_eq!(timer.with_engine(TimerEngine::run_state), RunState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_and_mode_change_cancel_the_countdown() {
        let (mut timer, _rx) = timer();
        timer.start();
        elapse(3).await;
        timer.reset();
        elapse(3).await;
        assert_eq!(timer.with_engine(TimerEngine::remaining_secs), 1500);

        timer.start();
        elapse(2).await;
        timer.change_mode(TimerMode::ShortBreak);
        elapse(5).await;
        assert_eq!(timer.with_engine(TimerEngine::remaining_secs), 300);
        assert!(!timer.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn completion_is_published_and_task_ends() {
        let (mut timer, mut rx) = timer();
        timer.change_mode(TimerMode::ShortBreak);
        timer.start();
        elapse(300).await;

        let mut ticks = 0;
        let mut completions = Vec::new();
        while let Ok(event) = rx.try_recv() {
            match event {
                Event::TimerTicked { .. } => ticks += 1,
                Event::TimerCompleted { .. } => completions.push(event),
                other => panic!("unexpected event {other:?}"),
            }
        }
        assert_eq!(ticks, 299);
        assert_eq!(completions.len(), 1);
        assert!(!timer.is_ticking());
        assert_eq!(timer.with_engine(TimerEngine::remaining_secs), 300);
        assert_eq!(timer.with_engine(TimerEngine::run_state), RunState::Idle);
    }
}
