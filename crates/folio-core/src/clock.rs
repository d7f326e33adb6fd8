//! Monotonic time sources.
//!
//! Every animated surface reads the same shared clock; nothing writes to it.
//! The web frontend uses [`InstantClock`], tests drive a [`ManualClock`].

use instant::Instant;
use std::cell::Cell;
use std::time::Duration;

pub trait Clock {
    /// Time elapsed since the clock's origin.
    fn elapsed(&self) -> Duration;

    fn elapsed_secs(&self) -> f32 {
        self.elapsed().as_secs_f32()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock advanced by hand.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        self.now.get()
    }
}

/// Per-frame timing handed to frame callbacks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the shared clock origin.
    pub elapsed: f32,
    /// Seconds since the previous frame of the same task (0 on the first frame).
    pub delta: f32,
}

/// Tracks the previous sample so each task can derive its own frame delta.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameTimer {
    last: Option<f32>,
}

impl FrameTimer {
    pub fn tick(&mut self, elapsed: f32) -> FrameTime {
        let delta = match self.last {
            Some(prev) => (elapsed - prev).max(0.0),
            None => 0.0,
        };
        self.last = Some(elapsed);
        FrameTime { elapsed, delta }
    }
}
