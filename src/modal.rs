use crate::constants::{MODAL_CLOSE_ID, MODAL_DESC_ID, MODAL_ID, MODAL_IMAGE_ID, MODAL_TITLE_ID};
use crate::dom::{self, EventListener};
use crate::frame::RenderTask;
use crate::SharedApp;
use folio_core::{Clock, ModalEvent, ModalVisual};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use web_sys as web;

struct ModalInner {
    app: SharedApp,
    clock: Rc<dyn Clock>,
    overlay: web::HtmlElement,
    content: Option<web::HtmlElement>,
    close_button: Option<web::HtmlElement>,
    image: Option<web::HtmlImageElement>,
    title: Option<web::HtmlElement>,
    description: Option<web::HtmlElement>,
    return_focus: RefCell<Option<web::HtmlElement>>,
    task: RefCell<Option<RenderTask>>,
}

/// DOM side of the detail modal. State lives in the app's `ModalController`;
/// this view renders it and forwards input.
pub struct ModalView {
    inner: Rc<ModalInner>,
    _listeners: Vec<EventListener>,
}

impl ModalView {
    pub fn mount(
        document: &web::Document,
        app: SharedApp,
        clock: Rc<dyn Clock>,
    ) -> anyhow::Result<Self> {
        let overlay = dom::element_by_id(document, MODAL_ID)?;
        let content = overlay
            .first_element_child()
            .and_then(|c| c.dyn_into::<web::HtmlElement>().ok());
        let inner = Rc::new(ModalInner {
            app,
            clock,
            content,
            close_button: dom::element_by_id(document, MODAL_CLOSE_ID).ok(),
            image: document
                .get_element_by_id(MODAL_IMAGE_ID)
                .and_then(|e| e.dyn_into::<web::HtmlImageElement>().ok()),
            title: dom::element_by_id(document, MODAL_TITLE_ID).ok(),
            description: dom::element_by_id(document, MODAL_DESC_ID).ok(),
            overlay,
            return_focus: RefCell::new(None),
            task: RefCell::new(None),
        });
        inner.apply(inner.app.borrow().modal.visual());

        let mut listeners = Vec::with_capacity(3);
        let weak = Rc::downgrade(&inner);
        listeners.push(EventListener::new(document.as_ref(), "keydown", move |e| {
            let Some(key) = e.dyn_ref::<web::KeyboardEvent>().map(|k| k.key()) else {
                return;
            };
            with_inner(&weak, |m| {
                let consumed = m.app.borrow_mut().modal.on_key(&key);
                if consumed {
                    m.play();
                }
            });
        })?);
        let weak = Rc::downgrade(&inner);
        let backdrop = inner.overlay.clone();
        listeners.push(EventListener::new(inner.overlay.as_ref(), "click", move |e| {
            let on_backdrop = e
                .target()
                .is_some_and(|t| js_sys::Object::is(&t, &backdrop));
            with_inner(&weak, |m| {
                let closing = m.app.borrow_mut().modal.on_backdrop_click(on_backdrop);
                if closing {
                    m.play();
                }
            });
        })?);
        if let Some(button) = &inner.close_button {
            let weak = Rc::downgrade(&inner);
            listeners.push(EventListener::new(button.as_ref(), "click", move |e| {
                e.stop_propagation();
                with_inner(&weak, |m| {
                    let closing = m.app.borrow_mut().modal.close();
                    if closing {
                        m.play();
                    }
                });
            })?);
        }

        Ok(Self {
            inner,
            _listeners: listeners,
        })
    }

    /// Render the current selection and run the transition the controller
    /// has started, if any.
    pub fn play(&self) {
        self.inner.play();
    }

    pub fn unmount(&self) {
        if let Some(task) = self.inner.task.borrow_mut().take() {
            task.cancel();
        }
    }
}

impl Drop for ModalView {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn with_inner(weak: &Weak<ModalInner>, f: impl FnOnce(&Rc<ModalInner>)) {
    if let Some(inner) = weak.upgrade() {
        f(&inner);
    }
}

impl ModalInner {
    fn play(self: &Rc<Self>) {
        self.fill();
        if self.overlay.get_attribute("aria-hidden").as_deref() != Some("false") {
            // opening from closed: remember who to return focus to
            *self.return_focus.borrow_mut() = self
                .overlay
                .owner_document()
                .and_then(|d| d.active_element())
                .and_then(|e| e.dyn_into::<web::HtmlElement>().ok());
        }
        self.apply(self.app.borrow().modal.visual());

        let running = self
            .task
            .borrow()
            .as_ref()
            .is_some_and(RenderTask::is_running);
        if running || !self.app.borrow().modal.is_animating() {
            return;
        }
        let weak = Rc::downgrade(self);
        let task = RenderTask::start(self.clock.clone(), move |time| {
            let Some(m) = weak.upgrade() else {
                return false;
            };
            let (event, visual, animating) = {
                let mut app = m.app.borrow_mut();
                let event = app.modal.advance(time.delta);
                (event, app.modal.visual(), app.modal.is_animating())
            };
            m.apply(visual);
            match event {
                Some(ModalEvent::Opened) => m.on_opened(),
                Some(ModalEvent::Closed) => m.on_closed(),
                None => {}
            }
            animating
        });
        // the previous task has already stopped itself
        if let Some(old) = self.task.borrow_mut().replace(task) {
            dom::defer_drop(old);
        }
    }

    fn fill(&self) {
        let app = self.app.borrow();
        let Some(item) = app.modal.selected() else {
            return;
        };
        if let Some(img) = &self.image {
            img.set_src(&item.image);
            img.set_alt(&item.title);
        }
        if let Some(t) = &self.title {
            t.set_text_content(Some(&item.title));
        }
        if let Some(d) = &self.description {
            d.set_text_content(Some(item.display_description()));
        }
    }

    fn apply(&self, visual: ModalVisual) {
        let app = self.app.borrow();
        let modal = &app.modal;
        let visible = modal.is_visible();
        dom::set_style(&self.overlay, "opacity", &visual.opacity.to_string());
        dom::set_style(
            &self.overlay,
            "visibility",
            if visible { "visible" } else { "hidden" },
        );
        dom::set_style(
            &self.overlay,
            "pointer-events",
            if modal.is_interactive() { "auto" } else { "none" },
        );
        _ = self
            .overlay
            .set_attribute("aria-hidden", if visible { "false" } else { "true" });
        if let Some(content) = &self.content {
            dom::set_style(content, "transform", &format!("scale({})", visual.scale));
        }
    }

    fn on_opened(&self) {
        if let Some(button) = &self.close_button {
            _ = button.focus();
        }
    }

    fn on_closed(&self) {
        if let Some(el) = self.return_focus.borrow_mut().take() {
            _ = el.focus();
        }
    }
}
