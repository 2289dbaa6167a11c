use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use rouge_tree::{OracleSet, RbTreeSet};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Generates keys in a range small enough to force duplicates.
fn key_strategy() -> impl Strategy<Value = i64> {
    -5_000i64..5_000i64
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum SetOp {
    Insert(i64),
    Distance(i64, i64),
    Contains(i64),
    First,
}

fn set_op_strategy() -> impl Strategy<Value = SetOp> {
    prop_oneof![
        5 => key_strategy().prop_map(SetOp::Insert),
        3 => (key_strategy(), key_strategy()).prop_map(|(l, r)| SetOp::Distance(l, r)),
        1 => key_strategy().prop_map(SetOp::Contains),
        1 => Just(SetOp::First),
    ]
}

// ─── Literal boundary scenarios ──────────────────────────────────────────────

#[test]
fn empty_tree_distance_is_zero() {
    let set: RbTreeSet<i64> = RbTreeSet::new();
    assert_eq!(set.distance(&0, &10), 0);
}

#[test]
fn distance_counts_half_open_interval() {
    let set = RbTreeSet::from_iter([10, 20, 5, 15]);
    // Keys k with 6 < k <= 25: {10, 15, 20}.
    assert_eq!(set.distance(&6, &25), 3);
}

#[test]
fn distance_over_small_dense_set() {
    let set = RbTreeSet::from_iter(1..=5i64);
    assert_eq!(set.distance(&0, &6), 5);
    assert_eq!(set.distance(&1, &4), 3);
    assert_eq!(set.distance(&2, &2), 0);
}

#[test]
fn inverted_bounds_yield_zero() {
    let set = RbTreeSet::from_iter([1, 2, 3i64]);
    assert_eq!(set.distance(&5, &2), 0);
}

#[test]
fn query_reflects_state_at_issuance() {
    let mut set = RbTreeSet::new();
    assert_eq!(set.distance(&0, &100), 0);

    set.insert(50);
    assert_eq!(set.distance(&0, &100), 1);

    set.insert(60);
    set.insert(70);
    assert_eq!(set.distance(&0, &100), 3);
}

#[test]
fn distance_with_no_key_above_left_bound() {
    let set = RbTreeSet::from_iter([1, 2, 3i64]);
    assert_eq!(set.distance(&3, &100), 0);
    assert_eq!(set.distance(&2, &100), 1);
}

// ─── Idempotence ─────────────────────────────────────────────────────────────

#[test]
fn duplicate_insert_changes_nothing_observable() {
    let mut once = RbTreeSet::new();
    let mut twice = RbTreeSet::new();
    for key in [10, 20, 5, 15i64] {
        assert!(once.insert(key));
        assert!(twice.insert(key));
        assert!(!twice.insert(key));
    }

    assert_eq!(once.len(), twice.len());
    assert_eq!(
        once.iter().collect::<Vec<_>>(),
        twice.iter().collect::<Vec<_>>()
    );
    assert_eq!(once.distance(&6, &25), twice.distance(&6, &25));
}

// ─── Cursor behavior ─────────────────────────────────────────────────────────

#[test]
fn iter_is_sorted_and_fused() {
    let set = RbTreeSet::from_iter([3, 1, 4, 1, 5, 9, 2, 6i64]);
    let keys: Vec<i64> = set.iter().copied().collect();
    assert_eq!(keys, [1, 2, 3, 4, 5, 6, 9]);

    let mut iter = set.iter();
    for _ in 0..set.len() {
        assert!(iter.next().is_some());
    }
    // Advancing a past-the-end cursor stays past the end.
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);
}

#[test]
fn find_positions_the_cursor_at_the_match() {
    let set = RbTreeSet::from_iter([10, 20, 5, 15i64]);

    let tail: Vec<i64> = set.find(&10).copied().collect();
    assert_eq!(tail, [10, 15, 20]);

    assert_eq!(set.find(&11).next(), None);
}

// ─── Copy independence ───────────────────────────────────────────────────────

#[test]
fn mutating_a_clone_leaves_the_original_untouched() {
    let original = RbTreeSet::from_iter([10, 20, 30i64]);
    let mut copy = original.clone();

    copy.insert(25);

    assert!(copy.contains(&25));
    assert!(!original.contains(&25));
    assert_eq!(original.distance(&0, &100), 3);
    assert_eq!(copy.distance(&0, &100), 4);
}

// ─── Randomized differential tests against the oracle ────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Replays a random operation sequence against RbTreeSet, OracleSet, and
    /// std's BTreeSet, asserting identical results at every step.
    #[test]
    fn set_ops_match_the_oracle(ops in proptest::collection::vec(set_op_strategy(), 0..TEST_SIZE)) {
        let mut set: RbTreeSet<i64> = RbTreeSet::new();
        let mut oracle: OracleSet<i64> = OracleSet::new();
        let mut model: BTreeSet<i64> = BTreeSet::new();

        for op in &ops {
            match *op {
                SetOp::Insert(key) => {
                    prop_assert_eq!(set.insert(key), model.insert(key), "insert({})", key);
                    oracle.insert(key);
                }
                SetOp::Distance(left, right) => {
                    prop_assert_eq!(
                        set.distance(&left, &right),
                        oracle.distance(&left, &right),
                        "distance({}, {})", left, right
                    );
                }
                SetOp::Contains(key) => {
                    prop_assert_eq!(set.contains(&key), model.contains(&key), "contains({})", key);
                }
                SetOp::First => {
                    prop_assert_eq!(set.first(), model.first(), "first()");
                }
            }
            prop_assert_eq!(set.len(), model.len());
        }

        let keys: Vec<i64> = set.iter().copied().collect();
        let expected: Vec<i64> = model.iter().copied().collect();
        prop_assert_eq!(keys, expected);
    }

    /// The incremental successor walk must agree with a direct enumeration.
    #[test]
    fn distance_round_trips_through_iteration(
        keys in proptest::collection::vec(key_strategy(), 0..300),
        left in -6_000i64..6_000,
        right in -6_000i64..6_000,
    ) {
        let set = RbTreeSet::from_iter(keys);

        let enumerated = if left > right {
            0
        } else {
            set.iter().filter(|&&k| left < k && k <= right).count()
        };
        prop_assert_eq!(set.distance(&left, &right), enumerated);
    }
}
