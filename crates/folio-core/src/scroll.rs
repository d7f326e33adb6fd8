//! Scroll pinning math.
//!
//! A pinned region starts at a document offset and spans a fixed scroll
//! distance. While the page scrolls through that distance the region stays
//! visually frozen and scroll only advances progress.

use crate::error::TimelineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinPhase {
    Before,
    Pinned,
    After,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinRegion {
    start: f32,
    distance: f32,
}

impl PinRegion {
    pub fn new(start: f32, distance: f32) -> Result<Self, TimelineError> {
        if !(distance.is_finite() && distance > 0.0) {
            return Err(TimelineError::InvalidPinDistance(distance));
        }
        Ok(Self { start, distance })
    }

    pub fn start(&self) -> f32 {
        self.start
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Move the region, e.g. after layout changes on resize.
    pub fn set_start(&mut self, start: f32) {
        self.start = start;
    }

    pub fn phase(&self, scroll_offset: f32) -> PinPhase {
        if scroll_offset < self.start {
            PinPhase::Before
        } else if scroll_offset <= self.start + self.distance {
            PinPhase::Pinned
        } else {
            PinPhase::After
        }
    }

    /// Translation that keeps the region frozen in the viewport while pinned.
    pub fn pin_offset(&self, scroll_offset: f32) -> f32 {
        (scroll_offset - self.start).clamp(0.0, self.distance)
    }
}

/// Linear map of scroll offset to \[0, 1\] progress through `region`.
pub fn scroll_progress(scroll_offset: f32, region: &PinRegion) -> f32 {
    if !scroll_offset.is_finite() {
        return 0.0;
    }
    ((scroll_offset - region.start) / region.distance).clamp(0.0, 1.0)
}

/// Lagged follower for scrubbed progress.
///
/// The displayed value approaches the scroll-derived target exponentially and
/// is within ~2% of it after `lag_sec`. A zero lag snaps.
#[derive(Clone, Copy, Debug)]
pub struct ScrubFollower {
    current: f32,
    lag_sec: f32,
}

impl ScrubFollower {
    pub fn new(lag_sec: f32) -> Self {
        Self {
            current: 0.0,
            lag_sec: lag_sec.max(0.0),
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn advance(&mut self, target: f32, dt: f32) -> f32 {
        if self.lag_sec <= 0.0 {
            self.current = target;
            return self.current;
        }
        let tau = self.lag_sec / 4.0;
        let alpha = 1.0 - (-dt.max(0.0) / tau).exp();
        self.current += (target - self.current) * alpha;
        if (target - self.current).abs() < 1e-4 {
            self.current = target;
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_follow_scroll() {
        let r = PinRegion::new(100.0, 1500.0).unwrap();
        assert_eq!(r.phase(0.0), PinPhase::Before);
        assert_eq!(r.phase(100.0), PinPhase::Pinned);
        assert_eq!(r.phase(1600.0), PinPhase::Pinned);
        assert_eq!(r.phase(1601.0), PinPhase::After);
    }

    #[test]
    fn pin_offset_freezes_region() {
        let r = PinRegion::new(100.0, 1500.0).unwrap();
        assert_eq!(r.pin_offset(50.0), 0.0);
        assert_eq!(r.pin_offset(400.0), 300.0);
        assert_eq!(r.pin_offset(5000.0), 1500.0);
    }

    #[test]
    fn zero_lag_snaps() {
        let mut f = ScrubFollower::new(0.0);
        assert_eq!(f.advance(0.7, 0.016), 0.7);
    }
}
