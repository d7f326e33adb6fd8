use crate::constants::{FEED_SENTINEL_ID, FEED_SPINNER_ID, GALLERY_GRID_ID, SENTINEL_ROOT_MARGIN};
use crate::dom::{self, js_err, Timeout};
use crate::tile::{FaultHandler, OpenHandler, TileView};
use crate::SharedApp;
use fnv::FnvHashMap;
use folio_core::{Clock, TriggerOutcome};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>;

struct GalleryInner {
    app: SharedApp,
    document: web::Document,
    grid: web::HtmlElement,
    sentinel: web::HtmlElement,
    spinner: Option<web::HtmlElement>,
    clock: Rc<dyn Clock>,
    on_open: OpenHandler,
    on_fault: FaultHandler,
    tiles: FnvHashMap<u32, TileView>,
    timer: Option<Timeout>,
    observer: Option<web::IntersectionObserver>,
}

/// Infinite-scroll gallery: grows the tile grid as the sentinel below it
/// comes into view.
pub struct Gallery {
    inner: Rc<RefCell<GalleryInner>>,
    _on_intersect: ObserverCallback,
}

impl Gallery {
    pub fn mount(
        document: &web::Document,
        app: SharedApp,
        clock: Rc<dyn Clock>,
        on_open: OpenHandler,
        on_fault: FaultHandler,
    ) -> anyhow::Result<Self> {
        let grid = dom::element_by_id(document, GALLERY_GRID_ID)?;
        let sentinel = dom::element_by_id(document, FEED_SENTINEL_ID)?;
        let spinner = dom::element_by_id(document, FEED_SPINNER_ID).ok();
        if let Some(s) = &spinner {
            dom::set_style(s, "display", "none");
        }
        let inner = Rc::new(RefCell::new(GalleryInner {
            app,
            document: document.clone(),
            grid,
            sentinel,
            spinner,
            clock,
            on_open,
            on_fault,
            tiles: FnvHashMap::default(),
            timer: None,
            observer: None,
        }));

        let weak = Rc::downgrade(&inner);
        let on_intersect: ObserverCallback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _observer: web::IntersectionObserver| {
                let visible = entries.iter().any(|e| {
                    e.dyn_into::<web::IntersectionObserverEntry>()
                        .is_ok_and(|entry| entry.is_intersecting())
                });
                if visible {
                    trigger(&weak, false);
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);
        let options = web::IntersectionObserverInit::new();
        options.set_root_margin(SENTINEL_ROOT_MARGIN);
        let observer = web::IntersectionObserver::new_with_options(
            on_intersect.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(js_err)?;
        {
            let mut g = inner.borrow_mut();
            observer.observe(&g.sentinel);
            g.observer = Some(observer);
        }

        trigger(&Rc::downgrade(&inner), true);
        Ok(Self {
            inner,
            _on_intersect: on_intersect,
        })
    }

    /// Disconnect the observer, cancel the pending step and remove every tile.
    pub fn unmount(&mut self) {
        let mut g = self.inner.borrow_mut();
        if let Some(observer) = g.observer.take() {
            observer.disconnect();
        }
        g.timer = None;
        g.app.borrow_mut().feed.cancel_pending();
        g.tiles.clear();
        g.show_spinner(false);
    }
}

impl Drop for Gallery {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl GalleryInner {
    fn show_spinner(&self, on: bool) {
        if let Some(s) = &self.spinner {
            if on {
                dom::clear_style(s, "display");
            } else {
                dom::set_style(s, "display", "none");
            }
        }
    }

    fn schedule(&mut self, weak: Weak<RefCell<GalleryInner>>, after: Duration) {
        self.set_timer(Timeout::new(after, move || complete(&weak)));
    }

    fn set_timer(&mut self, timer: anyhow::Result<Timeout>) {
        match timer {
            Ok(t) => {
                if let Some(old) = self.timer.replace(t) {
                    dom::defer_drop(old);
                }
            }
            Err(e) => log::error!("[gallery] could not schedule timer: {}", e),
        }
    }

    /// Re-arm so a sentinel that is still in view triggers again.
    fn reobserve(&self) {
        if let Some(observer) = &self.observer {
            observer.unobserve(&self.sentinel);
            observer.observe(&self.sentinel);
        }
    }
}

fn trigger(weak: &Weak<RefCell<GalleryInner>>, first: bool) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let mut g = inner.borrow_mut();
    if g.observer.is_none() {
        return;
    }
    let now = dom::now();
    let (outcome, reopens) = {
        let mut app = g.app.borrow_mut();
        let outcome = if first {
            app.feed.load_first_page(now)
        } else {
            app.feed.on_sentinel_visible(now)
        };
        (outcome, app.feed.trigger_reopens_at(now))
    };
    match outcome {
        TriggerOutcome::Started { due } => {
            g.show_spinner(true);
            g.schedule(weak.clone(), due.saturating_sub(now));
        }
        // the observer only fires on changes, so look again once the cooldown ends
        TriggerOutcome::Throttled => {
            if let Some(at) = reopens {
                let weak = weak.clone();
                g.set_timer(Timeout::new(at.saturating_sub(now), move || rearm(&weak)));
            }
        }
        TriggerOutcome::Pending | TriggerOutcome::Exhausted => {}
    }
}

fn rearm(weak: &Weak<RefCell<GalleryInner>>) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let mut g = inner.borrow_mut();
    if let Some(t) = g.timer.take() {
        dom::defer_drop(t);
    }
    g.reobserve();
}

fn complete(weak: &Weak<RefCell<GalleryInner>>) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let mut g = inner.borrow_mut();
    // this timer is the one currently executing
    if let Some(t) = g.timer.take() {
        dom::defer_drop(t);
    }
    let now = dom::now();
    let (range, due) = {
        let mut app = g.app.borrow_mut();
        (app.feed.poll(now), app.feed.pending_due())
    };
    let Some(range) = range else {
        if let Some(due) = due {
            g.schedule(weak.clone(), due.saturating_sub(now));
        }
        return;
    };
    g.show_spinner(false);

    let items: Vec<_> = g.app.borrow().feed.dataset()[range].to_vec();
    for item in &items {
        let tile = TileView::new(
            &g.document,
            &g.grid,
            item,
            g.clock.clone(),
            g.on_open.clone(),
            g.on_fault.clone(),
        );
        match tile {
            Ok(t) => {
                g.tiles.insert(item.id, t);
            }
            Err(e) => log::error!("[gallery] tile {} not created: {}", item.id, e),
        }
    }
    g.reobserve();
}
