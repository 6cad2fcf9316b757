// tests/debounce_property.rs

use std::time::{Duration, Instant};

use proptest::prelude::*;
use sitepipe::watch::Debouncer;

const WINDOW_MS: u64 = 50;

proptest! {
    /// Any burst of changes to one binding, however long, produces exactly
    /// one firing once the window after the last change elapses.
    #[test]
    fn a_burst_coalesces_into_one_firing(
        offsets in prop::collection::vec(0u64..WINDOW_MS, 1..32)
    ) {
        let mut debouncer = Debouncer::new(Duration::from_millis(WINDOW_MS));
        let start = Instant::now();

        // Each change lands within the window opened by the previous one,
        // so the burst never goes quiet mid-way.
        let mut at = start;
        for offset in &offsets {
            at += Duration::from_millis(*offset);
            debouncer.record(0, at);
        }

        // Nothing fires while the last window is still open.
        let due_early = debouncer.take_due(at + Duration::from_millis(WINDOW_MS - 1));
        prop_assert!(due_early.is_empty());

        // Exactly one firing once it closes.
        let due = debouncer.take_due(at + Duration::from_millis(WINDOW_MS));
        prop_assert_eq!(due, vec![0]);
        prop_assert!(debouncer.is_empty());
    }

    /// Recording distinct bindings always yields each of them exactly once,
    /// in index order, once every window has elapsed.
    #[test]
    fn distinct_bindings_each_fire_once(
        bindings in prop::collection::btree_set(0usize..16, 1..8)
    ) {
        let mut debouncer = Debouncer::new(Duration::from_millis(WINDOW_MS));
        let start = Instant::now();

        for binding in &bindings {
            debouncer.record(*binding, start);
        }

        let due = debouncer.take_due(start + Duration::from_millis(WINDOW_MS));
        let expected: Vec<usize> = bindings.into_iter().collect();
        prop_assert_eq!(due, expected);
        prop_assert!(debouncer.is_empty());
    }
}
