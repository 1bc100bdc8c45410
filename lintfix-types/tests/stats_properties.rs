//! Property-based tests for ChangeStats merge laws.
//!
//! These tests verify that:
//! - Totals are independent of the order merge events arrive in
//! - Splitting events into partial maps and absorbing them reproduces
//!   the totals of merging everything into one map

use lintfix_types::stats::ChangeStats;
use proptest::prelude::*;
use std::collections::BTreeMap;

/// Strategy for a batch of merge events over a small label alphabet.
fn arb_events() -> impl Strategy<Value = Vec<(String, u64)>> {
    prop::collection::vec(
        (
            prop::string::string_regex("[a-d]").unwrap(),
            0u64..100,
        ),
        0..32,
    )
}

fn totals_of(stats: &ChangeStats) -> BTreeMap<String, u64> {
    stats.iter().map(|(l, c)| (l.to_string(), c)).collect()
}

proptest! {
    /// Merging the same events in any order yields identical totals.
    #[test]
    fn merge_is_order_independent(events in arb_events(), seed in 0usize..1000) {
        let mut forward = ChangeStats::new();
        for (label, delta) in &events {
            forward.merge(label, *delta);
        }

        // A deterministic shuffle driven by the seed.
        let mut shuffled = events.clone();
        if !shuffled.is_empty() {
            for i in 0..shuffled.len() {
                let j = (seed + i * 7) % shuffled.len();
                shuffled.swap(i, j);
            }
        }
        let mut reordered = ChangeStats::new();
        for (label, delta) in &shuffled {
            reordered.merge(label, *delta);
        }

        prop_assert_eq!(totals_of(&forward), totals_of(&reordered));
        prop_assert_eq!(forward.changed_total(), reordered.changed_total());
    }

    /// absorb over any split of the events equals one combined map.
    #[test]
    fn absorb_matches_single_map(events in arb_events(), split in 0usize..32) {
        let mut whole = ChangeStats::new();
        for (label, delta) in &events {
            whole.merge(label, *delta);
        }

        let cut = split.min(events.len());
        let mut left = ChangeStats::new();
        for (label, delta) in &events[..cut] {
            left.merge(label, *delta);
        }
        let mut right = ChangeStats::new();
        for (label, delta) in &events[cut..] {
            right.merge(label, *delta);
        }

        left.absorb(&right);
        prop_assert_eq!(totals_of(&whole), totals_of(&left));
    }

    /// absorb is commutative on totals.
    #[test]
    fn absorb_is_commutative(a in arb_events(), b in arb_events()) {
        let build = |events: &[(String, u64)]| {
            let mut stats = ChangeStats::new();
            for (label, delta) in events {
                stats.merge(label, *delta);
            }
            stats
        };

        let mut ab = build(&a);
        ab.absorb(&build(&b));

        let mut ba = build(&b);
        ba.absorb(&build(&a));

        prop_assert_eq!(totals_of(&ab), totals_of(&ba));
    }
}
