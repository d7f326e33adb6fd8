// Host-side tests for the lazy gallery feed.

use folio_core::*;
use std::time::Duration;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn feed() -> FeedController {
    FeedController::with_sample_projects(&FeedConfig::default())
}

/// Trigger and let the simulated latency elapse. Returns the completion time.
fn load_step(f: &mut FeedController, at: Duration) -> Duration {
    match f.on_sentinel_visible(at) {
        TriggerOutcome::Started { due } => {
            assert!(f.is_loading());
            assert!(f.poll(due).is_some());
            due
        }
        other => panic!("expected a load step, got {:?}", other),
    }
}

#[test]
fn first_page_shows_eight_items() {
    let mut f = feed();
    assert_eq!(f.displayed_count(), 0);
    let due = match f.load_first_page(ms(0)) {
        TriggerOutcome::Started { due } => due,
        other => panic!("{:?}", other),
    };
    assert_eq!(due, ms(700));
    assert_eq!(f.poll(ms(699)), None);
    assert_eq!(f.poll(ms(700)), Some(0..8));
    assert_eq!(f.displayed_count(), 8);
    assert!(!f.is_loading());
}

#[test]
fn fifty_items_cap_after_six_more_triggers() {
    let mut f = feed();
    f.load_first_page(ms(0));
    f.poll(ms(700));
    let mut now = ms(700);
    for _ in 0..6 {
        now += ms(1500);
        now = load_step(&mut f, now);
    }
    assert_eq!(f.displayed_count(), 50);
    assert!(f.is_exhausted());
}

#[test]
fn exhausted_feed_ignores_triggers() {
    let mut f = FeedController::new(sample_projects(5), &FeedConfig::default());
    load_step(&mut f, ms(0));
    assert_eq!(f.displayed_count(), 5);
    for i in 0..3 {
        assert_eq!(
            f.on_sentinel_visible(ms(10_000 * (i + 1))),
            TriggerOutcome::Exhausted
        );
    }
    assert_eq!(f.displayed_count(), 5);
    assert!(!f.is_loading());
}

#[test]
fn trigger_while_pending_is_dropped() {
    let mut f = feed();
    assert!(matches!(f.on_sentinel_visible(ms(0)), TriggerOutcome::Started { .. }));
    assert_eq!(f.on_sentinel_visible(ms(2000)), TriggerOutcome::Pending);
    f.poll(ms(2000));
    assert_eq!(f.displayed_count(), 8);
}

#[test]
fn triggers_inside_cooldown_are_dropped_not_queued() {
    let mut f = feed();
    load_step(&mut f, ms(0));
    assert_eq!(f.on_sentinel_visible(ms(800)), TriggerOutcome::Throttled);
    assert_eq!(f.on_sentinel_visible(ms(900)), TriggerOutcome::Throttled);
    assert!(f.poll(ms(5000)).is_none());
    assert_eq!(f.displayed_count(), 8);
    assert!(matches!(
        f.on_sentinel_visible(ms(1000)),
        TriggerOutcome::Started { .. }
    ));
}

#[test]
fn first_page_counts_against_rate_bound() {
    let config = FeedConfig {
        latency: Duration::ZERO,
        ..FeedConfig::default()
    };
    let mut f = FeedController::with_sample_projects(&config);
    assert!(matches!(f.load_first_page(ms(0)), TriggerOutcome::Started { .. }));
    assert_eq!(f.poll(ms(0)), Some(0..8));
    assert_eq!(f.on_sentinel_visible(ms(0)), TriggerOutcome::Throttled);
    assert_eq!(f.on_sentinel_visible(ms(999)), TriggerOutcome::Throttled);
    // one step inside the first cooldown window
    assert!(f.steps_completed() <= 1);
    assert_eq!(f.trigger_reopens_at(ms(999)), Some(ms(1000)));
    assert!(matches!(
        f.on_sentinel_visible(ms(1000)),
        TriggerOutcome::Started { .. }
    ));
}

#[test]
fn rapid_triggers_respect_rate_bound() {
    let cooldown = 1000u64;
    let mut f = FeedController::new(sample_projects(500), &FeedConfig::default());
    let mut t = 0u64;
    while t <= 7_300 {
        if let TriggerOutcome::Started { due } = f.on_sentinel_visible(ms(t)) {
            f.poll(due);
        }
        f.poll(ms(t));
        t += 50;
    }
    let elapsed = t - 50;
    assert!(f.steps_completed() as u64 <= elapsed / cooldown + 1);
    assert!(f.steps_completed() > 0);
}

#[test]
fn displayed_is_contiguous_prefix_in_order() {
    let mut f = feed();
    let mut now = ms(0);
    f.load_first_page(now);
    now += ms(700);
    f.poll(now);
    for _ in 0..3 {
        now += ms(1000);
        now = load_step(&mut f, now);
    }
    let ids: Vec<u32> = f.displayed().iter().map(|i| i.id).collect();
    let expected: Vec<u32> = (1..=32).collect();
    assert_eq!(ids, expected);
}

#[test]
fn cancel_pending_abandons_step() {
    let mut f = feed();
    f.load_first_page(ms(0));
    f.cancel_pending();
    assert!(!f.is_loading());
    assert_eq!(f.poll(ms(10_000)), None);
    assert_eq!(f.displayed_count(), 0);
}

#[test]
fn reset_starts_over() {
    let mut f = feed();
    load_step(&mut f, ms(0));
    f.reset(sample_projects(3));
    assert_eq!(f.displayed_count(), 0);
    assert_eq!(f.dataset().len(), 3);
    assert!(matches!(f.on_sentinel_visible(ms(1)), TriggerOutcome::Started { .. }));
}
