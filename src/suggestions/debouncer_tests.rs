//! Tests for debouncer

use super::*;
use proptest::prelude::*;

const TEST_DELAY_MS: u64 = 300;

fn at(base: Instant, ms: u64) -> Instant {
    base + Duration::from_millis(ms)
}

fn debouncer() -> Debouncer<&'static str> {
    Debouncer::new(Duration::from_millis(TEST_DELAY_MS))
}

#[test]
fn test_new_debouncer_has_no_pending() {
    let debouncer = debouncer();
    assert!(!debouncer.has_pending());
    assert!(!debouncer.is_due(Instant::now()));
}

#[test]
fn test_not_due_immediately_after_schedule() {
    let base = Instant::now();
    let mut debouncer = debouncer();
    debouncer.schedule("mi", base);

    assert!(debouncer.has_pending());
    assert_eq!(debouncer.take_due(base), None);
    assert!(debouncer.has_pending());
}

#[test]
fn test_due_after_delay() {
    let base = Instant::now();
    let mut debouncer = debouncer();
    debouncer.schedule("mi", base);

    assert_eq!(debouncer.take_due(at(base, TEST_DELAY_MS)), Some("mi"));
    assert!(!debouncer.has_pending());
    assert_eq!(debouncer.take_due(at(base, TEST_DELAY_MS * 2)), None);
}

#[test]
fn test_schedule_restarts_delay_and_replaces_value() {
    let base = Instant::now();
    let mut debouncer = debouncer();

    debouncer.schedule("m", base);
    debouncer.schedule("mi", at(base, TEST_DELAY_MS / 2));

    assert_eq!(debouncer.take_due(at(base, TEST_DELAY_MS)), None);
    assert_eq!(
        debouncer.take_due(at(base, TEST_DELAY_MS + TEST_DELAY_MS / 2)),
        Some("mi")
    );
}

#[test]
fn test_cancel_drops_pending_value() {
    let base = Instant::now();
    let mut debouncer = debouncer();
    debouncer.schedule("mi", base);
    debouncer.cancel();

    assert!(!debouncer.has_pending());
    assert_eq!(debouncer.take_due(at(base, TEST_DELAY_MS * 10)), None);
}

#[test]
fn test_clock_going_backwards_is_not_due() {
    let base = at(Instant::now(), 1_000);
    let mut debouncer = debouncer();
    debouncer.schedule("mi", base);
    assert!(!debouncer.is_due(base - Duration::from_millis(500)));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A burst of schedules releases exactly the last value, once.
    #[test]
    fn prop_burst_releases_only_last_value(gaps in prop::collection::vec(0u64..TEST_DELAY_MS, 1..20)) {
        let base = Instant::now();
        let mut debouncer: Debouncer<usize> = Debouncer::new(Duration::from_millis(TEST_DELAY_MS));
        let mut now = base;
        let mut released = Vec::new();

        for (i, gap) in gaps.iter().enumerate() {
            now += Duration::from_millis(*gap);
            if let Some(v) = debouncer.take_due(now) {
                released.push(v);
            }
            debouncer.schedule(i, now);
        }
        now += Duration::from_millis(TEST_DELAY_MS);
        if let Some(v) = debouncer.take_due(now) {
            released.push(v);
        }

        prop_assert_eq!(released, vec![gaps.len() - 1]);
    }
}
