#![cfg(feature = "merge")]
//! Property-based tests for the merge algebra.
//!
//! Each adaptor is compared against an eager model built from std
//! collections.

use std::collections::BTreeSet;

use ordkit::merge::{
    SortedIteratorExt, combine, difference, intersection, interleave, interleave_all, merge,
    sorted_distinct, symmetric_difference, union,
};
use ordkit::order::{Natural, NaturalEquivalence};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn sorted_vec() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-15..15_i32, 0..40).prop_map(|mut values| {
        values.sort_unstable();
        values
    })
}

fn sorted_unique_vec() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::btree_set(-15..15_i32, 0..25).prop_map(|set| set.into_iter().collect())
}

// =============================================================================
// Merge Correctness
// Description: merge output is sorted, has |a| + |b| elements and is the
// multiset union of its inputs
// =============================================================================

proptest! {
    #[test]
    fn prop_merge_is_sorted_multiset_union(left in sorted_vec(), right in sorted_vec()) {
        let merged: Vec<i32> = merge(left.clone(), right.clone(), Natural).collect();
        let mut expected = left.clone();
        expected.extend(&right);
        expected.sort_unstable();

        prop_assert_eq!(merged.len(), left.len() + right.len());
        prop_assert_eq!(merged, expected);
    }

    #[test]
    fn prop_merge_with_empty_is_identity(values in sorted_vec()) {
        let empty: Vec<i32> = Vec::new();
        prop_assert_eq!(merge(empty.clone(), values.clone(), Natural).collect::<Vec<_>>(), values.clone());
        prop_assert_eq!(merge(values.clone(), empty, Natural).collect::<Vec<_>>(), values);
    }

    #[test]
    fn prop_merge_is_stable_left_first(left in sorted_vec(), right in sorted_vec()) {
        let tagged_left: Vec<(i32, u8)> = left.iter().map(|value| (*value, 0)).collect();
        let tagged_right: Vec<(i32, u8)> = right.iter().map(|value| (*value, 1)).collect();
        let merged: Vec<(i32, u8)> = tagged_left
            .into_iter()
            .merge_sorted(tagged_right, ordkit::order::by_key(|pair: &(i32, u8)| pair.0))
            .collect();
        prop_assert!(merged.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}

// =============================================================================
// Set Algebra Round-Trip
// Description: cardinalities add up and the three disjoint pieces partition
// the union
// =============================================================================

proptest! {
    #[test]
    fn prop_union_plus_intersection_cardinality(left in sorted_unique_vec(), right in sorted_unique_vec()) {
        let union_count = union(left.clone(), right.clone(), Natural).count();
        let intersection_count = intersection(left.clone(), right.clone(), Natural).count();
        prop_assert_eq!(union_count + intersection_count, left.len() + right.len());
    }

    #[test]
    fn prop_differences_and_intersection_partition_union(left in sorted_unique_vec(), right in sorted_unique_vec()) {
        let left_only: Vec<i32> = difference(left.clone(), right.clone(), Natural).collect();
        let right_only: Vec<i32> = difference(right.clone(), left.clone(), Natural).collect();
        let shared: Vec<i32> = intersection(left.clone(), right.clone(), Natural).collect();
        let symmetric: Vec<i32> = symmetric_difference(left.clone(), right.clone(), Natural).collect();
        let united: Vec<i32> = union(left.clone(), right.clone(), Natural).collect();

        let symmetric_model: Vec<i32> = merge(left_only.clone(), right_only.clone(), Natural).collect();
        prop_assert_eq!(&symmetric, &symmetric_model);

        let reassembled: Vec<i32> = merge(symmetric, shared.clone(), Natural).collect();
        prop_assert_eq!(&reassembled, &united);

        let left_set: BTreeSet<i32> = left.into_iter().collect();
        let right_set: BTreeSet<i32> = right.into_iter().collect();
        prop_assert_eq!(united, left_set.union(&right_set).copied().collect::<Vec<_>>());
        prop_assert_eq!(shared, left_set.intersection(&right_set).copied().collect::<Vec<_>>());
        prop_assert_eq!(left_only, left_set.difference(&right_set).copied().collect::<Vec<_>>());
    }
}

// =============================================================================
// Combine
// Description: every key of either side appears exactly once, in order, and
// matched keys are combined
// =============================================================================

proptest! {
    #[test]
    fn prop_combine_covers_every_key_once(left in sorted_unique_vec(), right in sorted_unique_vec()) {
        let left_pairs: Vec<(i32, i64)> = left.iter().map(|key| (*key, 1)).collect();
        let right_pairs: Vec<(i32, i64)> = right.iter().map(|key| (*key, 10)).collect();
        let combined: Vec<(i32, i64)> = combine(left_pairs, right_pairs, Natural, |a, b| a + b).collect();

        let keys: Vec<i32> = combined.iter().map(|pair| pair.0).collect();
        let expected_keys: Vec<i32> = union(left.clone(), right.clone(), Natural).collect();
        prop_assert_eq!(keys, expected_keys);

        for (key, value) in combined {
            let expected = i64::from(left.contains(&key)) + 10 * i64::from(right.contains(&key));
            prop_assert_eq!(value, expected);
        }
    }
}

// =============================================================================
// Distinct and Interleave
// =============================================================================

proptest! {
    #[test]
    fn prop_sorted_distinct_matches_dedup(values in sorted_vec()) {
        let mut expected = values.clone();
        expected.dedup();
        prop_assert_eq!(sorted_distinct(values, NaturalEquivalence).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn prop_interleave_preserves_every_element(left in sorted_vec(), right in sorted_vec()) {
        let mixed: Vec<i32> = interleave(left.clone(), right.clone()).collect();
        prop_assert_eq!(mixed.len(), left.len() + right.len());

        let common = left.len().min(right.len());
        for index in 0..common {
            prop_assert_eq!(mixed[2 * index], left[index]);
            prop_assert_eq!(mixed[2 * index + 1], right[index]);
        }
    }

    #[test]
    fn prop_interleave_all_preserves_each_subsequence(sequences in prop::collection::vec(sorted_vec(), 0..6)) {
        let mixed: Vec<i32> = interleave_all(sequences.clone()).collect();
        let total: usize = sequences.iter().map(Vec::len).sum();
        prop_assert_eq!(mixed.len(), total);

        let mut sorted_mixed = mixed;
        sorted_mixed.sort_unstable();
        let mut expected: Vec<i32> = sequences.into_iter().flatten().collect();
        expected.sort_unstable();
        prop_assert_eq!(sorted_mixed, expected);
    }
}
