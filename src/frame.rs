use folio_core::{Clock, FrameTime, FrameTimer};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Tick = Closure<dyn FnMut(f64)>;

/// A `requestAnimationFrame` loop with an explicit cancellation token.
///
/// The callback returns `false` to stop rescheduling. `cancel` withdraws the
/// pending frame synchronously, so no further callback runs after it
/// returns. Dropping the task cancels it and frees the closure; a task must
/// not be dropped from inside its own callback.
pub struct RenderTask {
    cancelled: Rc<Cell<bool>>,
    running: Rc<Cell<bool>>,
    raf_id: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Tick>>>,
}

impl RenderTask {
    pub fn start(clock: Rc<dyn Clock>, mut on_frame: impl FnMut(FrameTime) -> bool + 'static) -> Self {
        let cancelled = Rc::new(Cell::new(false));
        let running = Rc::new(Cell::new(true));
        let raf_id = Rc::new(Cell::new(None));
        let tick: Rc<RefCell<Option<Tick>>> = Rc::new(RefCell::new(None));

        let weak_tick: Weak<RefCell<Option<Tick>>> = Rc::downgrade(&tick);
        let cancelled_tick = cancelled.clone();
        let running_tick = running.clone();
        let raf_tick = raf_id.clone();
        let mut timer = FrameTimer::default();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
            raf_tick.set(None);
            if cancelled_tick.get() {
                running_tick.set(false);
                return;
            }
            let time = timer.tick(clock.elapsed_secs());
            if !on_frame(time) || cancelled_tick.get() {
                running_tick.set(false);
                return;
            }
            if let Some(tick) = weak_tick.upgrade() {
                raf_tick.set(request_frame(&tick));
            }
        }) as Box<dyn FnMut(f64)>));
        raf_id.set(request_frame(&tick));

        Self {
            cancelled,
            running,
            raf_id,
            tick,
        }
    }

    /// Whether the loop will run again.
    pub fn is_running(&self) -> bool {
        self.running.get() && !self.cancelled.get()
    }

    /// Stop the loop. Idempotent.
    pub fn cancel(&self) {
        if self.cancelled.replace(true) {
            return;
        }
        self.running.set(false);
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
    }
}

impl Drop for RenderTask {
    fn drop(&mut self) {
        self.cancel();
        self.tick.borrow_mut().take();
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Tick>>>) -> Option<i32> {
    let window = web::window()?;
    let tick = tick.borrow();
    let closure = tick.as_ref()?;
    window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .ok()
}
