use crate::clock::{FrameClock, FrameTime, TimeSource};
use crate::stats::FrameTimer;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Identifies one requested tick. Tokens are never reused by a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickToken(pub u64);

impl fmt::Display for TickToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick#{}", self.0)
    }
}

/// Host-side source of ticks, typically one per display refresh.
///
/// A driver delivers each requested token at most once and never delivers a
/// cancelled one.
pub trait TickDriver {
    fn request_next_tick(&mut self) -> TickToken;
    fn cancel_tick(&mut self, token: TickToken);
}

#[derive(Default)]
struct QueueState {
    next: u64,
    pending: Option<TickToken>,
    wake: Option<Box<dyn Fn()>>,
}

/// Single-slot tick queue. Clones share the slot, so the host keeps one
/// clone to poll while the scheduler drives another.
#[derive(Clone, Default)]
pub struct TickQueue {
    state: Rc<RefCell<QueueState>>,
}

impl TickQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `wake` whenever a tick is requested, e.g. to ask the window for
    /// a redraw.
    pub fn with_wake(wake: impl Fn() + 'static) -> Self {
        let queue = Self::new();
        queue.state.borrow_mut().wake = Some(Box::new(wake));
        queue
    }

    pub fn pending(&self) -> Option<TickToken> {
        self.state.borrow().pending
    }

    /// Hand out the pending token, if any. Each token comes out once.
    pub fn take_due(&self) -> Option<TickToken> {
        self.state.borrow_mut().pending.take()
    }
}

impl TickDriver for TickQueue {
    fn request_next_tick(&mut self) -> TickToken {
        let token = {
            let mut state = self.state.borrow_mut();
            state.next += 1;
            let token = TickToken(state.next);
            state.pending = Some(token);
            token
        };
        if let Some(wake) = &self.state.borrow().wake {
            wake();
        }
        token
    }

    fn cancel_tick(&mut self, token: TickToken) {
        let mut state = self.state.borrow_mut();
        if state.pending == Some(token) {
            state.pending = None;
        }
    }
}

impl fmt::Debug for TickQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickQueue")
            .field("pending", &self.pending())
            .finish()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("scheduler is stopped, {0} ignored")]
    Stopped(TickToken),
    #[error("{got} does not match the pending {expected:?}")]
    StaleToken {
        expected: Option<TickToken>,
        got: TickToken,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Running { pending: Option<TickToken> },
    Stopped,
}

/// How often frame statistics are logged, in ticks.
const STATS_INTERVAL: u64 = 300;

/// Runs one update cycle per delivered tick and re-requests the next.
///
/// Starts RUNNING with the first tick already requested. [`stop`] moves it
/// to STOPPED once and cancels whatever tick is pending.
///
/// [`stop`]: FrameScheduler::stop
pub struct FrameScheduler {
    driver: Box<dyn TickDriver>,
    clock: FrameClock<Box<dyn TimeSource>>,
    state: SchedulerState,
    ticks: u64,
    timer: FrameTimer,
}

impl FrameScheduler {
    pub fn start(mut driver: Box<dyn TickDriver>, time: Box<dyn TimeSource>) -> Self {
        let first = driver.request_next_tick();
        tracing::debug!(%first, "frame scheduler started");
        Self {
            driver,
            clock: FrameClock::new(time),
            state: SchedulerState::Running {
                pending: Some(first),
            },
            ticks: 0,
            timer: FrameTimer::default(),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, SchedulerState::Running { .. })
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn stats(&self) -> &FrameTimer {
        &self.timer
    }

    /// Run one tick for `token`: sample the clock, call `step`, then request
    /// the next tick. A token that is not the pending one runs nothing.
    pub fn run<T>(
        &mut self,
        token: TickToken,
        step: impl FnOnce(FrameTime) -> T,
    ) -> Result<T, SchedulerError> {
        let SchedulerState::Running { pending } = self.state else {
            return Err(SchedulerError::Stopped(token));
        };
        if pending != Some(token) {
            return Err(SchedulerError::StaleToken {
                expected: pending,
                got: token,
            });
        }
        // consumed before the step so a panic there cannot replay it
        self.state = SchedulerState::Running { pending: None };

        let time = self.clock.sample();
        let out = step(time);
        self.ticks += 1;
        if self.ticks > 1 {
            self.timer.record(Duration::from_secs_f32(time.delta));
        }
        if self.ticks % STATS_INTERVAL == 0 {
            let summary = self.timer.summary();
            tracing::debug!(
                ticks = self.ticks,
                fps = summary.fps,
                avg_ms = summary.avg_ms,
                max_ms = summary.max_ms,
                "frame stats"
            );
        }

        let next = self.driver.request_next_tick();
        self.state = SchedulerState::Running {
            pending: Some(next),
        };
        Ok(out)
    }

    /// Stop ticking and cancel the pending request. Returns false if it was
    /// already stopped.
    pub fn stop(&mut self) -> bool {
        let SchedulerState::Running { pending } = self.state else {
            return false;
        };
        if let Some(token) = pending {
            self.driver.cancel_tick(token);
        }
        self.state = SchedulerState::Stopped;
        tracing::debug!(ticks = self.ticks, "frame scheduler stopped");
        true
    }
}

impl Drop for FrameScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameScheduler")
            .field("state", &self.state)
            .field("ticks", &self.ticks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualTime;
    use std::cell::Cell;

    fn scheduler() -> (FrameScheduler, TickQueue, ManualTime) {
        let queue = TickQueue::new();
        let time = ManualTime::new();
        let s = FrameScheduler::start(Box::new(queue.clone()), Box::new(time.clone()));
        (s, queue, time)
    }

    #[test]
    fn start_requests_first_tick() {
        let (s, queue, _) = scheduler();
        assert!(s.is_running());
        assert!(queue.pending().is_some());
        assert_eq!(s.ticks(), 0);
    }

    #[test]
    fn each_tick_reschedules_once() {
        let (mut s, queue, time) = scheduler();
        let mut seen = Vec::new();
        for _ in 0..5 {
            let token = queue.take_due().unwrap();
            s.run(token, |t| seen.push(t)).unwrap();
            time.advance_secs(0.5);
        }
        assert_eq!(s.ticks(), 5);
        assert_eq!(seen[0], FrameTime::default());
        assert!((seen[4].elapsed - 2.0).abs() < 1e-6);
        assert!((seen[4].delta - 0.5).abs() < 1e-6);
        assert!(queue.pending().is_some());
    }

    #[test]
    fn stale_token_runs_nothing() {
        let (mut s, queue, _) = scheduler();
        let first = queue.take_due().unwrap();
        s.run(first, |_| ()).unwrap();
        let ran = Cell::new(false);
        let err = s.run(first, |_| ran.set(true)).unwrap_err();
        assert!(matches!(err, SchedulerError::StaleToken { got, .. } if got == first));
        assert!(!ran.get());
        assert_eq!(s.ticks(), 1);
    }

    #[test]
    fn stop_cancels_pending_tick() {
        let (mut s, queue, _) = scheduler();
        let pending = queue.pending().unwrap();
        assert!(s.stop());
        assert_eq!(s.state(), SchedulerState::Stopped);
        assert_eq!(queue.take_due(), None);

        let ran = Cell::new(false);
        assert_eq!(
            s.run(pending, |_| ran.set(true)),
            Err(SchedulerError::Stopped(pending))
        );
        assert!(!ran.get());
    }

    #[test]
    fn stop_is_idempotent() {
        let (mut s, _, _) = scheduler();
        assert!(s.stop());
        assert!(!s.stop());
    }

    #[test]
    fn dropping_scheduler_cancels() {
        let (s, queue, _) = scheduler();
        drop(s);
        assert_eq!(queue.pending(), None);
    }

    #[test]
    fn wake_fires_per_request() {
        let wakes = Rc::new(Cell::new(0));
        let counter = wakes.clone();
        let queue = TickQueue::with_wake(move || counter.set(counter.get() + 1));
        let mut s = FrameScheduler::start(Box::new(queue.clone()), Box::new(ManualTime::new()));
        let token = queue.take_due().unwrap();
        s.run(token, |_| ()).unwrap();
        assert_eq!(wakes.get(), 2);
    }

    #[test]
    fn tokens_are_never_reused() {
        let mut queue = TickQueue::new();
        let a = queue.request_next_tick();
        queue.cancel_tick(a);
        let b = queue.request_next_tick();
        assert_ne!(a, b);
        assert_eq!(queue.take_due(), Some(b));
        assert_eq!(queue.take_due(), None);
    }
}
