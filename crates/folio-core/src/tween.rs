//! Time-driven scalar tweens.
//!
//! These cover the one-shot transitions (modal, preloader, headline intro);
//! scroll-driven animation goes through [`crate::timeline`] instead.

use crate::easing::Easing;

/// Eased interpolation of one scalar over a fixed duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration_sec: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: duration_sec.max(0.0),
            elapsed: 0.0,
            easing,
        }
    }

    /// Advance by `dt` seconds and return the new value.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.value()
    }

    pub fn value(&self) -> f32 {
        self.from + (self.to - self.from) * self.easing.apply(self.fraction())
    }

    /// Linear completion in \[0, 1\].
    pub fn fraction(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            self.elapsed / self.duration
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn target(&self) -> f32 {
        self.to
    }
}

/// Staggered entrance for a row of elements (rise + fade in).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stagger {
    pub count: usize,
    pub delay: f32,
    pub each: f32,
    pub duration: f32,
    pub offset_px: f32,
    pub easing: Easing,
}

/// Per-element state sampled from a [`Stagger`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaggerSample {
    pub y_px: f32,
    pub opacity: f32,
}

impl Stagger {
    pub fn sample(&self, index: usize, elapsed: f32) -> StaggerSample {
        let start = self.delay + self.each * index as f32;
        let t = if self.duration <= 0.0 {
            if elapsed >= start {
                1.0
            } else {
                0.0
            }
        } else {
            (elapsed - start) / self.duration
        };
        let k = self.easing.apply(t);
        StaggerSample {
            y_px: self.offset_px * (1.0 - k),
            opacity: k,
        }
    }

    pub fn total_duration(&self) -> f32 {
        let last = self.count.saturating_sub(1) as f32;
        self.delay + self.each * last + self.duration
    }

    pub fn is_finished(&self, elapsed: f32) -> bool {
        elapsed >= self.total_duration()
    }
}
