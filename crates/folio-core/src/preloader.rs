//! One-shot startup sequence: fill the progress bar, hold, fade the overlay,
//! then report completion exactly once.

use crate::config::PreloaderConfig;
use crate::easing::Easing;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreloaderPhase {
    Filling,
    Holding,
    Fading,
    Finished,
}

#[derive(Clone, Debug)]
pub struct Preloader {
    config: PreloaderConfig,
    elapsed: f32,
    signalled: bool,
}

impl Preloader {
    pub fn new(config: PreloaderConfig) -> Self {
        Self {
            config,
            elapsed: 0.0,
            signalled: false,
        }
    }

    fn fade_start(&self) -> f32 {
        self.config.fill_sec + self.config.hold_sec
    }

    fn total(&self) -> f32 {
        self.fade_start() + self.config.fade_sec
    }

    pub fn phase(&self) -> PreloaderPhase {
        if self.elapsed < self.config.fill_sec {
            PreloaderPhase::Filling
        } else if self.elapsed < self.fade_start() {
            PreloaderPhase::Holding
        } else if self.elapsed < self.total() {
            PreloaderPhase::Fading
        } else {
            PreloaderPhase::Finished
        }
    }

    /// Progress bar fill in \[0, 1\].
    pub fn bar_fraction(&self) -> f32 {
        if self.config.fill_sec <= 0.0 {
            return 1.0;
        }
        Easing::Power2Out.apply(self.elapsed / self.config.fill_sec)
    }

    pub fn overlay_opacity(&self) -> f32 {
        if self.config.fade_sec <= 0.0 {
            return if self.elapsed >= self.fade_start() { 0.0 } else { 1.0 };
        }
        let t = (self.elapsed - self.fade_start()) / self.config.fade_sec;
        1.0 - Easing::Power1Out.apply(t)
    }

    /// Pointer events pass through once the fade has begun.
    pub fn blocks_pointer(&self) -> bool {
        self.elapsed < self.fade_start()
    }

    /// Advance by `dt` seconds. Returns `true` on the single frame the
    /// sequence completes.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt.max(0.0);
        if self.signalled || self.phase() != PreloaderPhase::Finished {
            return false;
        }
        self.signalled = true;
        log::info!("[preloader] finished after {:.2}s", self.elapsed);
        true
    }

    pub fn is_finished(&self) -> bool {
        self.signalled
    }
}
