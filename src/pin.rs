use crate::dom::{self, EventListener};
use folio_core::{scroll_progress, PinPhase, PinRegion, ScrollConfig};
use std::cell::Cell;
use std::rc::Rc;
use web_sys as web;

/// Pins an element for a fixed scroll distance and publishes the scroll
/// progress through it.
///
/// The element is held in place with a `translateY` equal to the distance
/// scrolled into the region; a bottom margin of the same distance reserves
/// the scroll length for the following content.
pub struct PinBinding {
    el: web::HtmlElement,
    progress: Rc<Cell<f32>>,
    _scroll: EventListener,
    _resize: EventListener,
}

impl PinBinding {
    pub fn new(el: web::HtmlElement, config: &ScrollConfig) -> anyhow::Result<Self> {
        let region = PinRegion::new(document_top(&el), config.pin_distance_px)?;
        dom::set_style(&el, "margin-bottom", &format!("{}px", region.distance()));
        dom::set_style(&el, "will-change", "transform");
        let region = Rc::new(Cell::new(region));
        let progress = Rc::new(Cell::new(0.0));
        apply(&el, region.get(), &progress);

        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let (el_scroll, region_scroll, progress_scroll) =
            (el.clone(), region.clone(), progress.clone());
        let scroll = EventListener::passive(window.as_ref(), "scroll", move |_| {
            apply(&el_scroll, region_scroll.get(), &progress_scroll);
        })?;

        let (el_resize, region_resize, progress_resize) =
            (el.clone(), region.clone(), progress.clone());
        let resize = EventListener::on_window("resize", move |_| {
            // measure without our own translation applied
            dom::clear_style(&el_resize, "transform");
            let mut r = region_resize.get();
            r.set_start(document_top(&el_resize));
            region_resize.set(r);
            apply(&el_resize, r, &progress_resize);
        })?;

        log::debug!(
            "[pin] start={} distance={}",
            region.get().start(),
            region.get().distance()
        );
        Ok(Self {
            el,
            progress,
            _scroll: scroll,
            _resize: resize,
        })
    }

    /// Scroll-derived progress in \[0, 1\], not yet smoothed. Updated on
    /// every scroll event.
    pub fn progress_source(&self) -> Rc<Cell<f32>> {
        self.progress.clone()
    }
}

impl Drop for PinBinding {
    fn drop(&mut self) {
        dom::clear_style(&self.el, "transform");
        dom::clear_style(&self.el, "margin-bottom");
        dom::clear_style(&self.el, "will-change");
    }
}

fn document_top(el: &web::HtmlElement) -> f32 {
    el.get_bounding_client_rect().top() as f32 + dom::scroll_y()
}

fn apply(el: &web::HtmlElement, region: PinRegion, progress: &Cell<f32>) {
    let y = dom::scroll_y();
    progress.set(scroll_progress(y, &region));
    match region.phase(y) {
        PinPhase::Before => dom::clear_style(el, "transform"),
        PinPhase::Pinned | PinPhase::After => dom::set_style(
            el,
            "transform",
            &format!("translateY({}px)", region.pin_offset(y)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    fn pinned_div() -> web::HtmlElement {
        let document = web::window().unwrap().document().unwrap();
        let el = document
            .create_element("div")
            .unwrap()
            .dyn_into::<web::HtmlElement>()
            .unwrap();
        document.body().unwrap().append_child(&el).unwrap();
        el
    }

    #[wasm_bindgen_test]
    fn releasing_pin_restores_element() {
        let el = pinned_div();
        let mut pin = Some(PinBinding::new(el.clone(), &ScrollConfig::default()).unwrap());
        let style = el.style();
        assert_eq!(style.get_property_value("margin-bottom").unwrap(), "1500px");
        assert_eq!(style.get_property_value("will-change").unwrap(), "transform");

        pin.take();
        assert_eq!(style.get_property_value("margin-bottom").unwrap(), "");
        assert_eq!(style.get_property_value("will-change").unwrap(), "");
        assert_eq!(style.get_property_value("transform").unwrap(), "");
        el.remove();
    }

    #[wasm_bindgen_test]
    fn released_pin_ignores_scroll() {
        let el = pinned_div();
        let pin = PinBinding::new(el.clone(), &ScrollConfig::default()).unwrap();
        let progress = pin.progress_source();
        drop(pin);
        progress.set(-1.0);
        let window = web::window().unwrap();
        window
            .dispatch_event(&web::Event::new("scroll").unwrap())
            .unwrap();
        assert_eq!(progress.get(), -1.0);
        el.remove();
    }
}
