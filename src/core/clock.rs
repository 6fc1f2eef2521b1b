//! Frame clock: elapsed and per-tick delta time in milliseconds.

use super::constants::INITIAL_DELTA_MS;
use super::signal::Signal;
use instant::Instant;

/// Snapshot of frame timing shared with every subsystem for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameClock {
    /// Milliseconds since the clock started.
    pub elapsed: f64,
    /// Milliseconds since the previous tick.
    pub delta: f64,
    /// Monotonic timestamp of the latest tick.
    pub current: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            delta: INITIAL_DELTA_MS,
            current: 0.0,
        }
    }
}

impl FrameClock {
    /// Advance to `now_ms`. A timestamp older than the current one yields a
    /// zero delta so `elapsed` never runs backwards.
    pub fn advance(&mut self, start_ms: f64, now_ms: f64) {
        let now = now_ms.max(self.current);
        self.delta = now - self.current;
        self.current = now;
        self.elapsed = (self.current - start_ms).max(self.elapsed);
    }
}

/// Tick source. Owns the [`FrameClock`] and notifies `tick` subscribers after
/// every advance.
pub struct Clock {
    origin: Instant,
    start_ms: f64,
    frame: FrameClock,
    tick: Signal<FrameClock>,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    pub fn new() -> Self {
        Self::starting_at(0.0)
    }

    /// Clock whose timeline begins at `start_ms` (used with explicit timestamps).
    pub fn starting_at(start_ms: f64) -> Self {
        Self {
            origin: Instant::now(),
            start_ms,
            frame: FrameClock {
                current: start_ms,
                ..FrameClock::default()
            },
            tick: Signal::new(),
        }
    }

    pub fn frame(&self) -> FrameClock {
        self.frame
    }

    pub fn tick_signal(&self) -> &Signal<FrameClock> {
        &self.tick
    }

    /// Milliseconds since this clock was created, from the wall-clock source.
    pub fn now_ms(&self) -> f64 {
        self.start_ms + self.origin.elapsed().as_secs_f64() * 1000.0
    }

    /// Advance using the wall-clock source.
    pub fn tick_now(&mut self) -> FrameClock {
        let now = self.now_ms();
        self.tick_at(now)
    }

    /// Advance to an explicit timestamp and notify subscribers.
    pub fn tick_at(&mut self, now_ms: f64) -> FrameClock {
        self.frame.advance(self.start_ms, now_ms);
        let frame = self.frame;
        self.tick.emit(&frame);
        frame
    }
}
