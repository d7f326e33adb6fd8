// Host-side tests for the modal state machine and scroll lock.

use folio_core::*;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct LockProbe {
    depth: Rc<Cell<i32>>,
    locks: Rc<Cell<u32>>,
    unlocks: Rc<Cell<u32>>,
}

impl ScrollLock for LockProbe {
    fn lock(&mut self) {
        self.depth.set(self.depth.get() + 1);
        self.locks.set(self.locks.get() + 1);
    }
    fn unlock(&mut self) {
        self.depth.set(self.depth.get() - 1);
        self.unlocks.set(self.unlocks.get() + 1);
    }
}

fn item(id: u32) -> Item {
    Item::new(id, format!("Project #{}", id), "/assets/project1.jpg", "desc")
}

fn modal() -> (ModalController<LockProbe>, LockProbe) {
    let probe = LockProbe::default();
    (ModalController::new(probe.clone(), ModalConfig::default()), probe)
}

fn settle(m: &mut ModalController<LockProbe>) -> Vec<ModalEvent> {
    let mut events = Vec::new();
    for _ in 0..200 {
        if let Some(ev) = m.advance(1.0 / 60.0) {
            events.push(ev);
        }
    }
    events
}

#[test]
fn close_while_closed_is_noop() {
    let (mut m, probe) = modal();
    assert!(!m.close());
    assert_eq!(m.phase(), ModalPhase::Closed);
    assert_eq!(probe.locks.get(), 0);
    assert_eq!(probe.unlocks.get(), 0);
}

#[test]
fn full_cycle_locks_and_releases_once() {
    let (mut m, probe) = modal();
    m.select(item(1));
    assert_eq!(m.phase(), ModalPhase::Opening);
    assert!(m.is_scroll_locked());
    assert_eq!(settle(&mut m), vec![ModalEvent::Opened]);
    assert_eq!(m.phase(), ModalPhase::Open);
    assert!(m.close());
    assert_eq!(m.phase(), ModalPhase::Closing);
    assert_eq!(probe.depth.get(), 1, "lock held while closing");
    assert_eq!(settle(&mut m), vec![ModalEvent::Closed]);
    assert_eq!(m.phase(), ModalPhase::Closed);
    assert!(m.selected().is_none());
    assert_eq!(probe.locks.get(), 1);
    assert_eq!(probe.unlocks.get(), 1);
}

#[test]
fn escape_while_open_closes_and_releases_lock_exactly_once() {
    let (mut m, probe) = modal();
    m.select(item(2));
    settle(&mut m);
    assert!(m.on_key("Escape"));
    assert_eq!(m.phase(), ModalPhase::Closing);
    settle(&mut m);
    assert_eq!(m.phase(), ModalPhase::Closed);
    assert!(!m.on_key("Escape"));
    settle(&mut m);
    assert_eq!(probe.unlocks.get(), 1);
    assert_eq!(probe.depth.get(), 0);
}

#[test]
fn other_keys_are_ignored() {
    let (mut m, _) = modal();
    m.select(item(1));
    settle(&mut m);
    assert!(!m.on_key("Enter"));
    assert_eq!(m.phase(), ModalPhase::Open);
}

#[test]
fn backdrop_click_closes_but_content_click_does_not() {
    let (mut m, _) = modal();
    m.select(item(1));
    settle(&mut m);
    assert!(!m.on_backdrop_click(false));
    assert_eq!(m.phase(), ModalPhase::Open);
    assert!(m.on_backdrop_click(true));
    assert_eq!(m.phase(), ModalPhase::Closing);
}

#[test]
fn close_during_opening_reverses_from_current_visual() {
    let (mut m, probe) = modal();
    m.select(item(1));
    m.advance(0.1);
    let mid = m.visual();
    assert!(mid.opacity > 0.0 && mid.opacity < 1.0);
    assert!(m.close());
    assert_eq!(m.phase(), ModalPhase::Closing);
    m.advance(0.0);
    assert!((m.visual().opacity - mid.opacity).abs() < 1e-6, "no jump to fully open");
    m.advance(0.1);
    assert!(m.visual().opacity < mid.opacity);
    assert_eq!(settle(&mut m), vec![ModalEvent::Closed]);
    assert_eq!(probe.unlocks.get(), 1);
}

#[test]
fn selecting_another_item_while_open_replaces_in_place() {
    let (mut m, probe) = modal();
    m.select(item(1));
    settle(&mut m);
    m.select(item(2));
    assert_eq!(m.phase(), ModalPhase::Open);
    assert_eq!(m.selected().map(|i| i.id), Some(2));
    assert_eq!(probe.locks.get(), 1);
    assert_eq!(probe.unlocks.get(), 0);
}

#[test]
fn selecting_while_closing_reopens_without_releasing_lock() {
    let (mut m, probe) = modal();
    m.select(item(1));
    settle(&mut m);
    m.close();
    m.advance(0.1);
    m.select(item(3));
    assert_eq!(m.phase(), ModalPhase::Opening);
    assert_eq!(settle(&mut m), vec![ModalEvent::Opened]);
    assert_eq!(m.selected().map(|i| i.id), Some(3));
    assert_eq!(probe.locks.get(), 1);
    assert_eq!(probe.unlocks.get(), 0);
}

#[test]
fn visible_implies_selected() {
    let (mut m, _) = modal();
    for step in 0..120 {
        if step == 5 {
            m.select(item(1));
        }
        if step == 60 {
            m.close();
        }
        m.advance(1.0 / 60.0);
        if m.is_visible() {
            assert!(m.selected().is_some());
        }
    }
}

#[test]
fn pointer_events_only_while_opening_or_open() {
    let (mut m, _) = modal();
    assert!(!m.is_interactive());
    m.select(item(1));
    assert!(m.is_interactive());
    settle(&mut m);
    m.close();
    assert!(!m.is_interactive());
}
