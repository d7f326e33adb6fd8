use crate::dom::{self, EventListener};
use crate::frame::RenderTask;
use folio_core::{Clock, FrameOutcome, FrameTime, ShaderSurface, SurfaceBackend, Viewport};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// A live shader surface: its canvas, its frame task and its resize listener.
///
/// Unmounting cancels the frame task before releasing GPU resources, so no
/// draw can touch a released backend.
pub struct SurfaceMount<B: SurfaceBackend + 'static> {
    label: String,
    canvas: web::HtmlCanvasElement,
    surface: Rc<RefCell<ShaderSurface<B>>>,
    task: RenderTask,
    resize: Option<EventListener>,
}

impl<B: SurfaceBackend + 'static> SurfaceMount<B> {
    /// Start drawing `backend` every frame. `measure` yields the container
    /// size on resize; `prepare` runs before each draw.
    pub fn start(
        label: impl Into<String>,
        canvas: web::HtmlCanvasElement,
        backend: B,
        clock: Rc<dyn Clock>,
        measure: impl Fn() -> Viewport + 'static,
        mut prepare: impl FnMut(&mut ShaderSurface<B>, FrameTime) + 'static,
    ) -> anyhow::Result<Self> {
        let label = label.into();
        let surface = Rc::new(RefCell::new(ShaderSurface::new(backend, measure())));

        let surface_resize = surface.clone();
        let resize = EventListener::on_window("resize", move |_| {
            if let Ok(mut s) = surface_resize.try_borrow_mut() {
                s.resize(measure());
            }
        })?;

        let surface_frame = surface.clone();
        let frame_label = label.clone();
        let task = RenderTask::start(clock, move |time| {
            // busy with an image upload; skip this frame
            let Ok(mut s) = surface_frame.try_borrow_mut() else {
                return true;
            };
            prepare(&mut s, time);
            match s.frame(time.elapsed) {
                Ok(FrameOutcome::Drawn) => true,
                Ok(FrameOutcome::Stopped) => false,
                Err(e) => {
                    log::warn!("[{}] draw failed: {}", frame_label, e);
                    true
                }
            }
        });
        log::info!("[{}] mounted", label);

        Ok(Self {
            label,
            canvas,
            surface,
            task,
            resize: Some(resize),
        })
    }

    pub fn surface(&self) -> &Rc<RefCell<ShaderSurface<B>>> {
        &self.surface
    }

    /// Stop the frame task, drop the listener, release the GPU and detach
    /// the canvas. Idempotent.
    pub fn unmount(&mut self) {
        self.task.cancel();
        if self.resize.take().is_none() {
            return;
        }
        self.surface.borrow_mut().teardown();
        self.canvas.remove();
        log::info!("[{}] unmounted", self.label);
    }
}

impl<B: SurfaceBackend + 'static> Drop for SurfaceMount<B> {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Size of `el` in CSS pixels at the current device pixel ratio, with a
/// fallback for containers not laid out yet.
pub fn measure_element(el: &web::Element, fallback: (f32, f32)) -> Viewport {
    let (mut w, mut h) = (el.client_width() as f32, el.client_height() as f32);
    if w <= 0.0 || h <= 0.0 {
        (w, h) = fallback;
    }
    Viewport::new(w, h, dom::device_pixel_ratio())
}

/// Full window viewport.
pub fn measure_window() -> Viewport {
    let (w, h) = dom::window_size();
    Viewport::new(w, h, dom::device_pixel_ratio())
}
