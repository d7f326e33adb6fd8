//! Detail modal state machine.
//!
//! `Closed -> Opening -> Open -> Closing -> Closed`. The page scroll lock is
//! held from the moment an item is selected until the exit transition
//! completes, and is released exactly once per cycle through
//! [`ScrollLockGuard`].
//!
//! Selecting while `Opening`/`Open` swaps the item in place. Selecting while
//! `Closing` re-enters `Opening` from the current visual state. Neither path
//! releases the lock.

use crate::config::ModalConfig;
use crate::easing::Easing;
use crate::feed::Item;
use crate::tween::Tween;

/// Page-level scroll lock owned by the host document.
pub trait ScrollLock {
    fn lock(&mut self);
    fn unlock(&mut self);
}

/// Holds the lock for as long as it lives.
pub struct ScrollLockGuard<L: ScrollLock> {
    host: L,
}

impl<L: ScrollLock> ScrollLockGuard<L> {
    pub fn acquire(mut host: L) -> Self {
        host.lock();
        Self { host }
    }
}

impl<L: ScrollLock> Drop for ScrollLockGuard<L> {
    fn drop(&mut self) {
        self.host.unlock();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalPhase {
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalEvent {
    Opened,
    Closed,
}

/// Visual state applied to the overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModalVisual {
    pub opacity: f32,
    pub scale: f32,
}

pub struct ModalController<L: ScrollLock + Clone> {
    host: L,
    lock: Option<ScrollLockGuard<L>>,
    phase: ModalPhase,
    selected: Option<Item>,
    visibility: f32,
    tween: Option<Tween>,
    config: ModalConfig,
}

impl<L: ScrollLock + Clone> ModalController<L> {
    pub fn new(host: L, config: ModalConfig) -> Self {
        Self {
            host,
            lock: None,
            phase: ModalPhase::Closed,
            selected: None,
            visibility: 0.0,
            tween: None,
            config,
        }
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn selected(&self) -> Option<&Item> {
        self.selected.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.phase != ModalPhase::Closed
    }

    /// Whether the overlay should receive pointer events.
    pub fn is_interactive(&self) -> bool {
        matches!(self.phase, ModalPhase::Opening | ModalPhase::Open)
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.lock.is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn visual(&self) -> ModalVisual {
        let v = self.visibility.clamp(0.0, 1.0);
        ModalVisual {
            opacity: v,
            scale: self.config.hidden_scale + (1.0 - self.config.hidden_scale) * v,
        }
    }

    pub fn select(&mut self, item: Item) {
        match self.phase {
            ModalPhase::Closed => {
                self.lock = Some(ScrollLockGuard::acquire(self.host.clone()));
                self.selected = Some(item);
                self.enter();
            }
            ModalPhase::Opening | ModalPhase::Open => {
                if self.selected.as_ref() != Some(&item) {
                    log::debug!("[modal] replacing item in place");
                    self.selected = Some(item);
                }
            }
            ModalPhase::Closing => {
                self.selected = Some(item);
                self.enter();
            }
        }
    }

    fn enter(&mut self) {
        self.phase = ModalPhase::Opening;
        self.tween = Some(Tween::new(
            self.visibility,
            1.0,
            self.config.enter_sec,
            Easing::Power3Out,
        ));
        log::debug!("[modal] opening");
    }

    /// Start the exit transition. No-op while `Closed` or already `Closing`.
    pub fn close(&mut self) -> bool {
        match self.phase {
            ModalPhase::Opening | ModalPhase::Open => {
                self.phase = ModalPhase::Closing;
                self.tween = Some(Tween::new(
                    self.visibility,
                    0.0,
                    self.config.exit_sec,
                    Easing::Power3In,
                ));
                log::debug!("[modal] closing");
                true
            }
            ModalPhase::Closed | ModalPhase::Closing => false,
        }
    }

    /// Keyboard handling; Escape closes. Returns whether the key was consumed.
    pub fn on_key(&mut self, key: &str) -> bool {
        key == "Escape" && self.close()
    }

    /// Clicks on the backdrop itself close; clicks inside the content do not.
    pub fn on_backdrop_click(&mut self, target_is_backdrop: bool) -> bool {
        target_is_backdrop && self.close()
    }

    /// Advance the running transition by `dt` seconds.
    pub fn advance(&mut self, dt: f32) -> Option<ModalEvent> {
        let tween = self.tween.as_mut()?;
        self.visibility = tween.advance(dt);
        if !tween.is_finished() {
            return None;
        }
        self.tween = None;
        match self.phase {
            ModalPhase::Opening => {
                self.phase = ModalPhase::Open;
                Some(ModalEvent::Opened)
            }
            ModalPhase::Closing => {
                self.phase = ModalPhase::Closed;
                self.selected = None;
                self.lock = None;
                log::debug!("[modal] closed, scroll released");
                Some(ModalEvent::Closed)
            }
            ModalPhase::Closed | ModalPhase::Open => None,
        }
    }
}
