// Host-side tests for shader surface lifecycle using a recording backend.

use folio_core::*;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default, Debug)]
struct Record {
    geometry_allocations: u32,
    configures: Vec<(u32, u32)>,
    draws: Vec<ShaderUniformState>,
    releases: u32,
}

struct RecordingBackend {
    log: Rc<RefCell<Record>>,
    fail_draw: bool,
}

impl RecordingBackend {
    fn new(log: &Rc<RefCell<Record>>) -> Self {
        log.borrow_mut().geometry_allocations += 1;
        Self {
            log: log.clone(),
            fail_draw: false,
        }
    }
}

impl SurfaceBackend for RecordingBackend {
    type Error = String;

    fn configure(&mut self, viewport: Viewport) {
        self.log.borrow_mut().configures.push(viewport.physical_size());
    }

    fn draw(&mut self, uniforms: &ShaderUniformState) -> Result<(), String> {
        if self.fail_draw {
            return Err("lost".into());
        }
        self.log.borrow_mut().draws.push(*uniforms);
        Ok(())
    }

    fn release(self) {
        self.log.borrow_mut().releases += 1;
    }
}

fn surface(log: &Rc<RefCell<Record>>) -> ShaderSurface<RecordingBackend> {
    ShaderSurface::new(RecordingBackend::new(log), Viewport::new(800.0, 600.0, 1.0))
}

#[test]
fn frame_updates_time_before_draw() {
    let log = Rc::new(RefCell::new(Record::default()));
    let mut s = surface(&log);
    assert_eq!(s.frame(1.5), Ok(FrameOutcome::Drawn));
    assert_eq!(s.frame(1.75), Ok(FrameOutcome::Drawn));
    let rec = log.borrow();
    assert_eq!(rec.draws.len(), 2);
    assert_eq!(rec.draws[0].elapsed_time, 1.5);
    assert_eq!(rec.draws[1].elapsed_time, 1.75);
    assert_eq!(s.frames_drawn(), 2);
}

#[test]
fn resize_updates_resolution_without_new_geometry() {
    let log = Rc::new(RefCell::new(Record::default()));
    let mut s = surface(&log);
    assert_eq!(s.uniforms().resolution, (800.0, 600.0));
    assert!(s.resize(Viewport::new(400.0, 300.0, 1.0)));
    assert_eq!(s.uniforms().resolution, (400.0, 300.0));
    s.frame(0.1).unwrap();
    let rec = log.borrow();
    assert_eq!(rec.geometry_allocations, 1);
    assert_eq!(rec.configures, vec![(800, 600), (400, 300)]);
    assert_eq!(rec.draws[0].resolution, (400.0, 300.0));
}

#[test]
fn unchanged_or_empty_resize_is_ignored() {
    let log = Rc::new(RefCell::new(Record::default()));
    let mut s = surface(&log);
    assert!(!s.resize(Viewport::new(800.0, 600.0, 1.0)));
    assert!(!s.resize(Viewport::new(0.0, 300.0, 1.0)));
    assert_eq!(log.borrow().configures.len(), 1);
    assert_eq!(s.viewport().width, 800.0);
}

#[test]
fn pixel_ratio_reaches_backend_but_not_resolution() {
    let log = Rc::new(RefCell::new(Record::default()));
    let mut s = surface(&log);
    s.resize(Viewport::new(400.0, 300.0, 2.0));
    assert_eq!(s.uniforms().resolution, (400.0, 300.0));
    assert_eq!(log.borrow().configures.last(), Some(&(800, 600)));
}

#[test]
fn hover_only_changes_uniform() {
    let log = Rc::new(RefCell::new(Record::default()));
    let mut s = surface(&log);
    s.set_hover(true);
    assert_eq!(s.uniforms().hover, 1.0);
    s.set_hover(false);
    assert_eq!(s.uniforms().hover, 0.0);
    let rec = log.borrow();
    assert!(rec.draws.is_empty());
    assert_eq!(rec.configures.len(), 1);
}

#[test]
fn teardown_is_idempotent_and_stops_drawing() {
    let log = Rc::new(RefCell::new(Record::default()));
    let mut s = surface(&log);
    s.frame(0.0).unwrap();
    s.teardown();
    s.teardown();
    assert_eq!(s.frame(1.0), Ok(FrameOutcome::Stopped));
    assert!(!s.is_live());
    drop(s);
    let rec = log.borrow();
    assert_eq!(rec.releases, 1);
    assert_eq!(rec.draws.len(), 1);
}

#[test]
fn drop_releases_resources() {
    let log = Rc::new(RefCell::new(Record::default()));
    {
        let _s = surface(&log);
    }
    assert_eq!(log.borrow().releases, 1);
}

#[test]
fn draw_errors_surface_to_caller() {
    let log = Rc::new(RefCell::new(Record::default()));
    let mut backend = RecordingBackend::new(&log);
    backend.fail_draw = true;
    let mut s = ShaderSurface::new(backend, Viewport::new(10.0, 10.0, 1.0));
    assert_eq!(s.frame(0.0), Err("lost".to_string()));
    assert_eq!(s.frames_drawn(), 0);
}

#[test]
fn texture_status_reaches_gpu_flag() {
    let log = Rc::new(RefCell::new(Record::default()));
    let mut s = surface(&log);
    s.set_texture_status(TextureStatus::Ready);
    s.frame(0.0).unwrap();
    assert_eq!(log.borrow().draws[0].to_gpu().texture_ready, 1.0);
}
