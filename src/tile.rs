use crate::constants::{TILE_CLASS, TILE_FALLBACK_HEIGHT, TILE_FALLBACK_WIDTH, TILE_TITLE_CLASS};
use crate::dom::{self, js_err, EventListener};
use crate::mount::{self, SurfaceMount};
use crate::render::TileSurface;
use folio_core::{Clock, FolioError, Item, SurfaceKind, TextureStatus};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub type OpenHandler = Rc<dyn Fn(u32)>;
pub type FaultHandler = Rc<dyn Fn(FolioError)>;

/// One gallery entry: an accessible button element with its own shader surface.
///
/// The surface is created asynchronously; if the tile is dropped first the
/// surface is released as soon as it arrives.
pub struct TileView {
    el: web::HtmlElement,
    alive: Rc<Cell<bool>>,
    surface: Rc<RefCell<Option<SurfaceMount<TileSurface>>>>,
    _listeners: Vec<EventListener>,
}

impl TileView {
    pub fn new(
        document: &web::Document,
        grid: &web::Element,
        item: &Item,
        clock: Rc<dyn Clock>,
        on_open: OpenHandler,
        on_fault: FaultHandler,
    ) -> anyhow::Result<Self> {
        let el = document
            .create_element("div")
            .map_err(js_err)?
            .dyn_into::<web::HtmlElement>()
            .map_err(|_| anyhow::anyhow!("tile element has the wrong type"))?;
        el.set_class_name(TILE_CLASS);
        _ = el.set_attribute("role", "button");
        _ = el.set_attribute("tabindex", "0");
        _ = el.set_attribute("aria-label", &format!("View details for {}", item.title));
        _ = el.set_attribute("data-id", &item.id.to_string());
        let title = document.create_element("div").map_err(js_err)?;
        title.set_class_name(TILE_TITLE_CLASS);
        title.set_text_content(Some(&item.title));
        el.append_child(&title).map_err(js_err)?;
        grid.append_child(&el).map_err(js_err)?;

        let hover = Rc::new(Cell::new(false));
        let id = item.id;
        let target: &web::EventTarget = el.as_ref();
        let mut listeners = Vec::with_capacity(4);
        let h = hover.clone();
        listeners.push(EventListener::new(target, "pointerenter", move |_| h.set(true))?);
        let h = hover.clone();
        listeners.push(EventListener::new(target, "pointerleave", move |_| h.set(false))?);
        let open = on_open.clone();
        listeners.push(EventListener::new(target, "click", move |_| open(id))?);
        let open = on_open;
        listeners.push(EventListener::new(target, "keydown", move |e| {
            let is_enter = e
                .dyn_ref::<web::KeyboardEvent>()
                .is_some_and(|k| k.key() == "Enter");
            if is_enter {
                e.prevent_default();
                open(id);
            }
        })?);

        let alive = Rc::new(Cell::new(true));
        let surface = Rc::new(RefCell::new(None));
        spawn_local(attach_surface(
            document.clone(),
            el.clone(),
            item.clone(),
            clock,
            hover,
            alive.clone(),
            surface.clone(),
            on_fault,
        ));

        Ok(Self {
            el,
            alive,
            surface,
            _listeners: listeners,
        })
    }
}

impl Drop for TileView {
    fn drop(&mut self) {
        self.alive.set(false);
        self.surface.borrow_mut().take();
        self.el.remove();
    }
}

#[allow(clippy::too_many_arguments)]
async fn attach_surface(
    document: web::Document,
    el: web::HtmlElement,
    item: Item,
    clock: Rc<dyn Clock>,
    hover: Rc<Cell<bool>>,
    alive: Rc<Cell<bool>>,
    slot: Rc<RefCell<Option<SurfaceMount<TileSurface>>>>,
    on_fault: FaultHandler,
) {
    let fallback = (TILE_FALLBACK_WIDTH, TILE_FALLBACK_HEIGHT);
    let viewport = mount::measure_element(&el, fallback);
    let started = async {
        let canvas = dom::append_canvas(&document, &el)?;
        let backend = match TileSurface::new(canvas.clone(), viewport).await {
            Ok(b) => b,
            Err(e) => {
                canvas.remove();
                return Err(e);
            }
        };
        let measure_el = el.clone();
        SurfaceMount::start(
            format!("tile #{}", item.id),
            canvas,
            backend,
            clock,
            move || mount::measure_element(&measure_el, fallback),
            move |surface, _| surface.set_hover(hover.get()),
        )
    }
    .await;
    let mounted = match started {
        Ok(m) => m,
        Err(e) => {
            on_fault(FolioError::ResourceAcquisition {
                surface: SurfaceKind::Tile(item.id),
                reason: e.to_string(),
            });
            return;
        }
    };
    if !alive.get() {
        // tile removed while the context was being created
        drop(mounted);
        return;
    }
    let surface = mounted.surface().clone();
    *slot.borrow_mut() = Some(mounted);

    let status = match load_image(&item.image).await {
        Ok(image) => {
            if !alive.get() {
                return;
            }
            let mut s = surface.borrow_mut();
            match s.backend_mut().map(|b| b.set_image(&image)) {
                Some(Ok(())) => TextureStatus::Ready,
                Some(Err(e)) => {
                    on_fault(asset_fault(&item, e));
                    TextureStatus::Fallback
                }
                None => return,
            }
        }
        Err(e) => {
            on_fault(asset_fault(&item, e));
            TextureStatus::Fallback
        }
    };
    if alive.get() {
        surface.borrow_mut().set_texture_status(status);
    }
}

async fn load_image(src: &str) -> anyhow::Result<web::HtmlImageElement> {
    let image = web::HtmlImageElement::new().map_err(js_err)?;
    image.set_src(src);
    JsFuture::from(image.decode()).await.map_err(js_err)?;
    Ok(image)
}

fn asset_fault(item: &Item, e: anyhow::Error) -> FolioError {
    FolioError::AssetLoad {
        path: item.image.clone(),
        reason: e.to_string(),
    }
}
