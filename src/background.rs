use crate::constants::BACKGROUND_MOUNT_ID;
use crate::dom;
use crate::mount::{self, SurfaceMount};
use crate::render::BackgroundSurface;
use folio_core::Clock;
use std::rc::Rc;
use web_sys as web;

/// Mount the full-viewport background. It only reacts to time and window size.
pub async fn mount(
    document: &web::Document,
    clock: Rc<dyn Clock>,
) -> anyhow::Result<SurfaceMount<BackgroundSurface>> {
    let container = dom::element_by_id(document, BACKGROUND_MOUNT_ID)?;
    let viewport = mount::measure_window();
    let canvas = dom::append_canvas(document, &container)?;
    let backend = match BackgroundSurface::new(canvas.clone(), viewport).await {
        Ok(b) => b,
        Err(e) => {
            canvas.remove();
            return Err(e);
        }
    };
    SurfaceMount::start(
        "background",
        canvas,
        backend,
        clock,
        mount::measure_window,
        |_, _| {},
    )
}
