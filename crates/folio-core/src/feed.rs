//! Lazy gallery feed.
//!
//! The feed reveals a growing prefix of a fixed dataset. A load step is
//! started by a sentinel-visibility trigger (rate limited, dropped while a
//! step is pending or once the dataset is exhausted) and completes after a
//! simulated latency. Time is passed in explicitly so the platform can drive
//! completion from a non-blocking timer.

use crate::config::FeedConfig;
use crate::constants::{DEFAULT_DESCRIPTION, PROJECT_IMAGE_VARIANTS};
use std::ops::Range;
use std::rc::Rc;
use std::time::Duration;

/// A gallery entry. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub id: u32,
    pub title: String,
    pub image: String,
    pub description: String,
}

impl Item {
    pub fn new(
        id: u32,
        title: impl Into<String>,
        image: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            image: image.into(),
            description: description.into(),
        }
    }

    /// Description to display; empty descriptions fall back to a stock line.
    pub fn display_description(&self) -> &str {
        if self.description.trim().is_empty() {
            DEFAULT_DESCRIPTION
        } else {
            &self.description
        }
    }
}

/// Built-in project list: `Project #1..=count`, cycling through the image set.
pub fn sample_projects(count: usize) -> Vec<Item> {
    (0..count)
        .map(|i| {
            let n = i + 1;
            Item::new(
                n as u32,
                format!("Project #{}", n),
                format!("/assets/project{}.jpg", i % PROJECT_IMAGE_VARIANTS + 1),
                format!("This is the description for Project #{}.", n),
            )
        })
        .collect()
}

/// Leading-edge throttle: the first call fires, calls inside the cooldown
/// window after a fire are dropped.
#[derive(Clone, Copy, Debug)]
pub struct Throttle {
    cooldown: Duration,
    last_fire: Option<Duration>,
}

impl Throttle {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_fire: None,
        }
    }

    pub fn try_fire(&mut self, now: Duration) -> bool {
        match self.last_fire {
            Some(last) if now.saturating_sub(last) < self.cooldown => false,
            _ => {
                self.last_fire = Some(now);
                true
            }
        }
    }

    /// Record a fire that bypassed `try_fire`.
    pub fn stamp(&mut self, now: Duration) {
        self.last_fire = Some(now);
    }

    /// Earliest time the next call can fire, or `None` if it can fire now.
    pub fn reopens_at(&self, now: Duration) -> Option<Duration> {
        let at = self.last_fire? + self.cooldown;
        (now < at).then_some(at)
    }

    pub fn reset(&mut self) {
        self.last_fire = None;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A load step began and completes at `due`.
    Started { due: Duration },
    /// A step is already pending.
    Pending,
    /// Dropped by the rate limiter.
    Throttled,
    /// Every item is already displayed.
    Exhausted,
}

pub struct FeedController {
    dataset: Rc<[Item]>,
    displayed: usize,
    page_size: usize,
    latency: Duration,
    throttle: Throttle,
    pending_due: Option<Duration>,
    steps_completed: usize,
}

impl FeedController {
    pub fn new(dataset: Vec<Item>, config: &FeedConfig) -> Self {
        Self {
            dataset: dataset.into(),
            displayed: 0,
            page_size: config.page_size.max(1),
            latency: config.latency,
            throttle: Throttle::new(config.cooldown),
            pending_due: None,
            steps_completed: 0,
        }
    }

    /// The default dataset sized per `config`.
    pub fn with_sample_projects(config: &FeedConfig) -> Self {
        Self::new(sample_projects(config.dataset_len), config)
    }

    pub fn dataset(&self) -> &[Item] {
        &self.dataset
    }

    pub fn displayed(&self) -> &[Item] {
        &self.dataset[..self.displayed]
    }

    pub fn displayed_count(&self) -> usize {
        self.displayed
    }

    pub fn is_loading(&self) -> bool {
        self.pending_due.is_some()
    }

    pub fn pending_due(&self) -> Option<Duration> {
        self.pending_due
    }

    pub fn is_exhausted(&self) -> bool {
        self.displayed >= self.dataset.len()
    }

    pub fn steps_completed(&self) -> usize {
        self.steps_completed
    }

    pub fn find(&self, id: u32) -> Option<&Item> {
        self.displayed().iter().find(|it| it.id == id)
    }

    /// Start the first page on mount. Skips the rate limiter but counts as a
    /// fire, so the next sentinel trigger waits out the cooldown.
    pub fn load_first_page(&mut self, now: Duration) -> TriggerOutcome {
        if self.is_exhausted() {
            return TriggerOutcome::Exhausted;
        }
        if self.is_loading() {
            return TriggerOutcome::Pending;
        }
        self.throttle.stamp(now);
        self.begin(now)
    }

    /// When a throttled trigger would next be accepted.
    pub fn trigger_reopens_at(&self, now: Duration) -> Option<Duration> {
        self.throttle.reopens_at(now)
    }

    /// The sentinel near the end of the list became visible.
    pub fn on_sentinel_visible(&mut self, now: Duration) -> TriggerOutcome {
        if self.is_exhausted() {
            return TriggerOutcome::Exhausted;
        }
        if self.is_loading() {
            return TriggerOutcome::Pending;
        }
        if !self.throttle.try_fire(now) {
            log::debug!("[feed] trigger throttled");
            return TriggerOutcome::Throttled;
        }
        self.begin(now)
    }

    fn begin(&mut self, now: Duration) -> TriggerOutcome {
        let due = now + self.latency;
        self.pending_due = Some(due);
        log::debug!("[feed] load step started, {} shown", self.displayed);
        TriggerOutcome::Started { due }
    }

    /// Complete the pending step if its latency has elapsed. Returns the range
    /// of newly displayed dataset indices.
    pub fn poll(&mut self, now: Duration) -> Option<Range<usize>> {
        let due = self.pending_due?;
        if now < due {
            return None;
        }
        self.pending_due = None;
        let from = self.displayed;
        self.displayed = (from + self.page_size).min(self.dataset.len());
        self.steps_completed += 1;
        log::info!(
            "[feed] showing {}/{} items",
            self.displayed,
            self.dataset.len()
        );
        Some(from..self.displayed)
    }

    /// Abandon a pending step without appending (used on teardown).
    pub fn cancel_pending(&mut self) {
        self.pending_due = None;
    }

    /// Replace the dataset and start over from an empty prefix.
    pub fn reset(&mut self, dataset: Vec<Item>) {
        self.dataset = dataset.into();
        self.displayed = 0;
        self.pending_due = None;
        self.steps_completed = 0;
        self.throttle.reset();
    }
}
