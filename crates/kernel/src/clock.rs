use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A monotonic time source. `now` is measured from an arbitrary fixed origin.
pub trait TimeSource {
    fn now(&self) -> Duration;
}

/// Wall-clock source backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct InstantSource {
    origin: Instant,
}

impl Default for InstantSource {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl TimeSource for InstantSource {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-advanced source for headless runs and tests. Clones share one time.
#[derive(Debug, Clone, Default)]
pub struct ManualTime {
    now: Rc<Cell<Duration>>,
}

impl ManualTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_secs(&self, secs: f32) {
        self.advance(Duration::from_secs_f32(secs));
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Box<T> {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// Time of one tick, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
pub struct FrameTime {
    /// Since the previous tick; zero on the first.
    pub delta: f32,
    /// Since the first tick. Kept in f64 so long runs keep frame resolution.
    pub elapsed: f64,
}

/// Turns a [`TimeSource`] into per-tick delta and elapsed time. The clock
/// starts at the first sample.
#[derive(Debug)]
pub struct FrameClock<S> {
    source: S,
    start: Option<Duration>,
    last: Duration,
}

impl<S: TimeSource> FrameClock<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            start: None,
            last: Duration::ZERO,
        }
    }

    pub fn sample(&mut self) -> FrameTime {
        let now = self.source.now();
        let Some(start) = self.start else {
            self.start = Some(now);
            self.last = now;
            return FrameTime::default();
        };
        // saturating: a source that steps backwards yields a zero delta
        let delta = now.saturating_sub(self.last);
        self.last = now.max(self.last);
        FrameTime {
            delta: delta.as_secs_f32(),
            elapsed: self.last.saturating_sub(start).as_secs_f64(),
        }
    }

    pub fn is_started(&self) -> bool {
        self.start.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_is_zero() {
        let time = ManualTime::new();
        time.advance_secs(12.0);
        let mut clock = FrameClock::new(time.clone());
        assert!(!clock.is_started());
        assert_eq!(clock.sample(), FrameTime::default());
        assert!(clock.is_started());
    }

    #[test]
    fn delta_and_elapsed_track_source() {
        let time = ManualTime::new();
        let mut clock = FrameClock::new(time.clone());
        clock.sample();
        time.advance(Duration::from_millis(250));
        let a = clock.sample();
        assert!((a.delta - 0.25).abs() < 1e-6);
        assert!((a.elapsed - 0.25).abs() < 1e-6);
        time.advance(Duration::from_millis(500));
        let b = clock.sample();
        assert!((b.delta - 0.5).abs() < 1e-6);
        assert!((b.elapsed - 0.75).abs() < 1e-6);
    }

    #[test]
    fn elapsed_resolves_frames_after_a_day() {
        let time = ManualTime::new();
        let mut clock = FrameClock::new(time.clone());
        clock.sample();
        time.set(Duration::from_secs(86_400));
        let a = clock.sample();
        time.advance(Duration::from_micros(16_667));
        let b = clock.sample();
        assert!((b.elapsed - a.elapsed - 0.016_667).abs() < 1e-9);
        assert!((b.delta - 0.016_667).abs() < 1e-6);
    }

    #[test]
    fn backwards_source_never_goes_negative() {
        let time = ManualTime::new();
        time.set(Duration::from_secs(5));
        let mut clock = FrameClock::new(time.clone());
        clock.sample();
        time.set(Duration::from_secs(3));
        let t = clock.sample();
        assert_eq!(t.delta, 0.0);
        assert_eq!(t.elapsed, 0.0);
    }

    #[test]
    fn instant_source_is_monotonic() {
        let source = InstantSource::default();
        let a = source.now();
        let b = source.now();
        assert!(b >= a);
    }
}
