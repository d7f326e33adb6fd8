//! Controller configuration with defaults taken from [`crate::constants`].

use crate::constants::*;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct FeedConfig {
    pub dataset_len: usize,
    pub page_size: usize,
    pub latency: Duration,
    pub cooldown: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            dataset_len: DATASET_LEN,
            page_size: PAGE_SIZE,
            latency: Duration::from_millis(FEED_LATENCY_MS),
            cooldown: Duration::from_millis(FEED_COOLDOWN_MS),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModalConfig {
    pub enter_sec: f32,
    pub exit_sec: f32,
    pub hidden_scale: f32,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            enter_sec: MODAL_ENTER_SEC,
            exit_sec: MODAL_EXIT_SEC,
            hidden_scale: MODAL_HIDDEN_SCALE,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PreloaderConfig {
    pub fill_sec: f32,
    pub hold_sec: f32,
    pub fade_sec: f32,
}

impl Default for PreloaderConfig {
    fn default() -> Self {
        Self {
            fill_sec: PRELOADER_FILL_SEC,
            hold_sec: PRELOADER_HOLD_SEC,
            fade_sec: PRELOADER_FADE_SEC,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScrollConfig {
    pub pin_distance_px: f32,
    pub scrub_lag_sec: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            pin_distance_px: PIN_DISTANCE_PX,
            scrub_lag_sec: SCRUB_LAG_SEC,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FolioConfig {
    pub feed: FeedConfig,
    pub modal: ModalConfig,
    pub preloader: PreloaderConfig,
    pub scroll: ScrollConfig,
}
