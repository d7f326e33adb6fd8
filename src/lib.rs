#![cfg(target_arch = "wasm32")]
use folio_core::{AppState, Clock, FolioConfig, FolioError, InstantClock, SurfaceKind, TimelineError};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod background;
mod constants;
mod dom;
mod frame;
mod gallery;
mod hero;
mod modal;
mod mount;
mod pin;
mod preloader;
mod render;
mod shaders;
mod tile;

#[cfg(test)]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

use dom::BodyScrollLock;
use gallery::Gallery;
use hero::HeroMount;
use modal::ModalView;
use mount::SurfaceMount;
use preloader::PreloaderView;
use render::BackgroundSurface;
use tile::{FaultHandler, OpenHandler};

pub(crate) type SharedApp = Rc<RefCell<AppState<BodyScrollLock>>>;

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

/// Everything mounted on the page. Dropping it tears the page down.
struct Page {
    app: SharedApp,
    preloader: PreloaderView,
    modal: Rc<ModalView>,
    gallery: Option<Gallery>,
    hero: Option<HeroMount>,
    background: Option<SurfaceMount<BackgroundSurface>>,
}

impl Page {
    fn report(&self, error: FolioError) {
        self.app.borrow_mut().report_fault(error);
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        // stop every frame task before any GPU resource goes away
        self.preloader.unmount();
        self.modal.unmount();
        if let Some(g) = self.gallery.as_mut() {
            g.unmount();
        }
        if let Some(h) = self.hero.as_mut() {
            h.unmount();
        }
        if let Some(b) = self.background.as_mut() {
            b.unmount();
        }
        log::info!("page unmounted");
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Unmount the whole page: frame tasks, timers, observers, listeners, then GPU resources.
#[wasm_bindgen]
pub fn stop() {
    let page = PAGE.with(|p| p.borrow_mut().take());
    drop(page);
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let config = FolioConfig::default();
    let clock: Rc<dyn Clock> = Rc::new(InstantClock::new());
    let app: SharedApp = Rc::new(RefCell::new(AppState::new(
        &config,
        BodyScrollLock::new(&document),
    )));

    let preloader = PreloaderView::mount(
        &document,
        app.clone(),
        clock.clone(),
        config.preloader.clone(),
    );
    let modal = Rc::new(ModalView::mount(&document, app.clone(), clock.clone())?);

    let on_open: OpenHandler = {
        let app = app.clone();
        let modal = Rc::downgrade(&modal);
        Rc::new(move |id| {
            let opened = app.borrow_mut().open_item(id);
            if let (true, Some(m)) = (opened, modal.upgrade()) {
                m.play();
            }
        })
    };
    let on_fault: FaultHandler = {
        let app = app.clone();
        Rc::new(move |e| app.borrow_mut().report_fault(e))
    };
    let gallery = match Gallery::mount(&document, app.clone(), clock.clone(), on_open, on_fault) {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("[gallery] not mounted: {}", e);
            None
        }
    };

    PAGE.with(|p| {
        *p.borrow_mut() = Some(Page {
            app,
            preloader,
            modal,
            gallery,
            hero: None,
            background: None,
        })
    });

    // GPU surfaces come up independently; a failure disables only that surface.
    {
        let (document, clock) = (document.clone(), clock.clone());
        spawn_local(async move {
            let mounted = background::mount(&document, clock).await;
            attach(SurfaceKind::Background, mounted, |page, m| page.background = Some(m));
        });
    }
    spawn_local(async move {
        let mounted = HeroMount::mount(&document, clock, &config.scroll).await;
        attach(SurfaceKind::Hero, mounted, |page, m| page.hero = Some(m));
    });
    Ok(())
}

/// Store a freshly mounted surface on the page, or record why it failed.
/// A surface that arrives after `stop()` is released immediately.
fn attach<T>(surface: SurfaceKind, mounted: anyhow::Result<T>, store: impl FnOnce(&mut Page, T)) {
    let leftover = PAGE.with(|p| {
        let mut page = p.borrow_mut();
        let Some(page) = page.as_mut() else {
            return mounted.ok();
        };
        match mounted {
            Ok(m) => store(page, m),
            Err(e) => page.report(surface_fault(surface, e)),
        }
        None
    });
    drop(leftover);
}

fn surface_fault(surface: SurfaceKind, e: anyhow::Error) -> FolioError {
    match e.downcast::<TimelineError>() {
        Ok(t) => FolioError::Timeline(t),
        Err(e) => FolioError::ResourceAcquisition {
            surface,
            reason: format!("{:#}", e),
        },
    }
}
