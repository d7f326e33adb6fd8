//! Top-level view state owned by the composition root.
//!
//! The root is the single writer of the feed and modal state; everything
//! else goes through the operations exposed here.

use crate::config::FolioConfig;
use crate::error::{FolioError, SurfaceKind};
use crate::feed::FeedController;
use crate::modal::{ModalController, ScrollLock};

/// A recorded, isolated failure.
#[derive(Debug)]
pub struct Fault {
    pub surface: Option<SurfaceKind>,
    pub error: FolioError,
}

pub struct AppState<L: ScrollLock + Clone> {
    loading: bool,
    pub feed: FeedController,
    pub modal: ModalController<L>,
    faults: Vec<Fault>,
}

impl<L: ScrollLock + Clone> AppState<L> {
    pub fn new(config: &FolioConfig, scroll_lock: L) -> Self {
        Self {
            loading: true,
            feed: FeedController::with_sample_projects(&config.feed),
            modal: ModalController::new(scroll_lock, config.modal.clone()),
            faults: Vec::new(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Clear the loading flag. Returns `true` only the first time.
    pub fn finish_loading(&mut self) -> bool {
        std::mem::replace(&mut self.loading, false)
    }

    /// Select a displayed item by id for the modal. Unknown ids are ignored.
    pub fn open_item(&mut self, id: u32) -> bool {
        match self.feed.find(id).cloned() {
            Some(item) => {
                log::info!("[app] open {}", item.title);
                self.modal.select(item);
                true
            }
            None => {
                log::warn!("[app] open ignored, item {} not displayed", id);
                false
            }
        }
    }

    /// Record a failure without touching any other surface or controller.
    pub fn report_fault(&mut self, error: FolioError) {
        let surface = match &error {
            FolioError::ResourceAcquisition { surface, .. } => Some(*surface),
            _ => None,
        };
        log::warn!("[app] {}", error);
        self.faults.push(Fault { surface, error });
    }

    pub fn faults(&self) -> &[Fault] {
        &self.faults
    }

    /// Whether `surface` failed to start and should render nothing.
    pub fn is_disabled(&self, surface: SurfaceKind) -> bool {
        self.faults.iter().any(|f| f.surface == Some(surface))
    }
}
