use crate::constants::{HERO_MOUNT_ID, HERO_PIN_ID};
use crate::dom::{self, EventListener};
use crate::mount::{self, SurfaceMount};
use crate::pin::PinBinding;
use crate::render::HeroSurface;
use folio_core::{Clock, HeroScene, ScrollConfig, ScrubFollower};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// The pinned hero: scroll pin, scrubbed timeline and the 3D surface.
pub struct HeroMount {
    surface: SurfaceMount<HeroSurface>,
    pin: Option<PinBinding>,
    orbit_input: Vec<EventListener>,
}

impl HeroMount {
    pub async fn mount(
        document: &web::Document,
        clock: Rc<dyn Clock>,
        config: &ScrollConfig,
    ) -> anyhow::Result<Self> {
        let pin_el = dom::element_by_id(document, HERO_PIN_ID)?;
        let container = dom::element_by_id(document, HERO_MOUNT_ID)?;
        let viewport = mount::measure_element(&container, dom::window_size());
        let scene = Rc::new(RefCell::new(HeroScene::new(viewport.aspect())?));
        let pin = PinBinding::new(pin_el, config)?;

        let canvas = dom::append_canvas(document, &container)?;
        let backend = match HeroSurface::new(canvas.clone(), viewport).await {
            Ok(b) => b,
            Err(e) => {
                canvas.remove();
                return Err(e);
            }
        };
        let orbit_input = match wire_orbit(&canvas, &scene) {
            Ok(l) => l,
            Err(e) => {
                canvas.remove();
                return Err(e);
            }
        };
        let target = pin.progress_source();
        let mut follower = ScrubFollower::new(config.scrub_lag_sec);

        let frame_scene = scene.clone();
        let surface = SurfaceMount::start(
            "hero",
            canvas,
            backend,
            clock,
            move || mount::measure_element(&container, dom::window_size()),
            move |surface, time| {
                let progress = follower.advance(target.get(), time.delta);
                let mut scene = frame_scene.borrow_mut();
                scene.set_aspect(surface.viewport().aspect());
                scene.apply_progress(progress);
                scene.advance_idle(time.elapsed, time.delta);
                scene.advance_orbit(time.delta);
                let projection = scene.camera.projection_matrix();
                if let Some(backend) = surface.backend_mut() {
                    backend.set_scene(scene.snapshot(), projection);
                }
            },
        )?;
        Ok(Self {
            surface,
            pin: Some(pin),
            orbit_input,
        })
    }

    /// Stop the surface, then release the orbit listeners and the scroll
    /// pin with its styles.
    pub fn unmount(&mut self) {
        self.surface.unmount();
        self.orbit_input.clear();
        self.pin.take();
    }
}

/// Pointer drag orbits the hero camera; ctrl+wheel (trackpad pinch) zooms.
/// Touch pointers are left to page scrolling.
fn wire_orbit(
    canvas: &web::HtmlCanvasElement,
    scene: &Rc<RefCell<HeroScene>>,
) -> anyhow::Result<Vec<EventListener>> {
    let target: &web::EventTarget = canvas.as_ref();
    let last: Rc<Cell<Option<(i32, f32, f32)>>> = Rc::new(Cell::new(None));
    let mut listeners = Vec::with_capacity(5);

    let (drag, el) = (last.clone(), canvas.clone());
    listeners.push(EventListener::new(target, "pointerdown", move |e| {
        let Some(ev) = e.dyn_ref::<web::PointerEvent>() else {
            return;
        };
        if ev.pointer_type() == "touch" || ev.button() != 0 {
            return;
        }
        drag.set(Some((ev.pointer_id(), ev.client_x() as f32, ev.client_y() as f32)));
        _ = el.set_pointer_capture(ev.pointer_id());
    })?);

    let (drag, el, scene_move) = (last.clone(), canvas.clone(), scene.clone());
    listeners.push(EventListener::new(target, "pointermove", move |e| {
        let Some(ev) = e.dyn_ref::<web::PointerEvent>() else {
            return;
        };
        let Some((id, x, y)) = drag.get() else {
            return;
        };
        if id != ev.pointer_id() {
            return;
        }
        let (nx, ny) = (ev.client_x() as f32, ev.client_y() as f32);
        drag.set(Some((id, nx, ny)));
        let height = el.client_height() as f32;
        scene_move.borrow_mut().orbit_drag(nx - x, ny - y, height);
    })?);

    for event in ["pointerup", "pointercancel"] {
        let (drag, el) = (last.clone(), canvas.clone());
        listeners.push(EventListener::new(target, event, move |e| {
            let Some(ev) = e.dyn_ref::<web::PointerEvent>() else {
                return;
            };
            if drag.get().is_some_and(|(id, _, _)| id == ev.pointer_id()) {
                drag.set(None);
                _ = el.release_pointer_capture(ev.pointer_id());
            }
        })?);
    }

    let scene_wheel = scene.clone();
    listeners.push(EventListener::new(target, "wheel", move |e| {
        let Some(ev) = e.dyn_ref::<web::WheelEvent>() else {
            return;
        };
        // plain wheel keeps scrolling the page through the pin
        if !ev.ctrl_key() {
            return;
        }
        e.prevent_default();
        scene_wheel.borrow_mut().orbit_wheel(ev.delta_y() as f32);
    })?);

    Ok(listeners)
}
