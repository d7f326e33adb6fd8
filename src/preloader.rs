use crate::constants::{HEADLINE_WORD_SELECTOR, PRELOADER_BAR_ID, PRELOADER_ID};
use crate::dom;
use crate::frame::RenderTask;
use crate::SharedApp;
use folio_core::constants::{
    HEADLINE_DELAY_SEC, HEADLINE_DURATION_SEC, HEADLINE_OFFSET_PX, HEADLINE_STAGGER_SEC,
};
use folio_core::{Clock, Easing, Preloader, PreloaderConfig, Stagger};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Startup overlay plus the headline word intro, driven by one frame task
/// that stops once both have finished.
pub struct PreloaderView {
    task: RenderTask,
}

impl PreloaderView {
    pub fn mount(
        document: &web::Document,
        app: SharedApp,
        clock: Rc<dyn Clock>,
        config: PreloaderConfig,
    ) -> Self {
        let overlay = dom::element_by_id(document, PRELOADER_ID).ok();
        let bar = dom::element_by_id(document, PRELOADER_BAR_ID).ok();
        if overlay.is_none() {
            log::warn!("[preloader] no #{} element, skipping overlay", PRELOADER_ID);
        }
        let words = headline_words(document);
        let stagger = Stagger {
            count: words.len(),
            delay: HEADLINE_DELAY_SEC,
            each: HEADLINE_STAGGER_SEC,
            duration: HEADLINE_DURATION_SEC,
            offset_px: HEADLINE_OFFSET_PX,
            easing: Easing::Power3Out,
        };
        let mut preloader = Preloader::new(config);
        let mut intro_elapsed = 0.0;

        let task = RenderTask::start(clock, move |time| {
            if !preloader.is_finished() {
                let done = preloader.advance(time.delta);
                if let Some(bar) = &bar {
                    let pct = preloader.bar_fraction() * 100.0;
                    dom::set_style(bar, "width", &format!("{:.2}%", pct));
                }
                if let Some(overlay) = &overlay {
                    dom::set_style(overlay, "opacity", &preloader.overlay_opacity().to_string());
                    if !preloader.blocks_pointer() {
                        dom::set_style(overlay, "pointer-events", "none");
                    }
                    if done {
                        dom::set_style(overlay, "display", "none");
                    }
                }
                if done {
                    app.borrow_mut().finish_loading();
                }
            }

            intro_elapsed += time.delta;
            for (i, word) in words.iter().enumerate() {
                let s = stagger.sample(i, intro_elapsed);
                dom::set_style(word, "opacity", &s.opacity.to_string());
                dom::set_style(word, "transform", &format!("translateY({}px)", s.y_px));
            }
            !(preloader.is_finished() && stagger.is_finished(intro_elapsed))
        });
        Self { task }
    }

    pub fn unmount(&mut self) {
        self.task.cancel();
    }
}

fn headline_words(document: &web::Document) -> Vec<web::HtmlElement> {
    let Ok(list) = document.query_selector_all(HEADLINE_WORD_SELECTOR) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::HtmlElement>().ok())
        .collect()
}
