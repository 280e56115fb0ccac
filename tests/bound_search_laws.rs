#![cfg(feature = "search")]
//! Property-based tests for the bound search primitives.
//!
//! Every property is checked against a linear scan over the same sorted
//! input, with duplicates deliberately common.

use ordkit::order::{Natural, Order, Reversed};
use ordkit::search::{
    SearchResult, binary_search, equal_range, equal_range_by, lower_bound, lower_bound_in, rank,
    upper_bound, upper_bound_in,
};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Sorted vectors drawn from a narrow value range so that runs of equal
/// elements appear often.
fn sorted_vec() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-20..20_i32, 0..60).prop_map(|mut values| {
        values.sort_unstable();
        values
    })
}

// =============================================================================
// Bound Invariants
// Description: lower_bound <= upper_bound, and both partition the range
// =============================================================================

proptest! {
    #[test]
    fn prop_lower_bound_not_after_upper_bound(list in sorted_vec(), value in -25..25_i32) {
        prop_assert!(lower_bound(&list, &value, &Natural) <= upper_bound(&list, &value, &Natural));
    }

    #[test]
    fn prop_lower_bound_partitions_less(list in sorted_vec(), value in -25..25_i32) {
        let lower = lower_bound(&list, &value, &Natural);
        for (index, element) in list.iter().enumerate() {
            prop_assert_eq!(index < lower, element < &value);
        }
    }

    #[test]
    fn prop_upper_bound_partitions_greater(list in sorted_vec(), value in -25..25_i32) {
        let upper = upper_bound(&list, &value, &Natural);
        for (index, element) in list.iter().enumerate() {
            prop_assert_eq!(index >= upper, element > &value);
        }
    }

    #[test]
    fn prop_rank_counts_strictly_smaller(list in sorted_vec(), value in -25..25_i32) {
        let expected = list.iter().filter(|element| **element < value).count();
        prop_assert_eq!(rank(&list, &value, &Natural), expected);
    }
}

// =============================================================================
// Equal-Range Correctness
// Description: equal_range is (lower_bound, upper_bound) and covers exactly
// the equal elements
// =============================================================================

proptest! {
    #[test]
    fn prop_equal_range_is_pair_of_bounds(list in sorted_vec(), value in -25..25_i32) {
        let range = equal_range(&list, &value, &Natural);
        prop_assert_eq!(range.start, lower_bound(&list, &value, &Natural));
        prop_assert_eq!(range.end, upper_bound(&list, &value, &Natural));
    }

    #[test]
    fn prop_equal_range_covers_exactly_equal_elements(list in sorted_vec(), value in -25..25_i32) {
        let range = equal_range(&list, &value, &Natural);
        for (index, element) in list.iter().enumerate() {
            prop_assert_eq!(range.contains(&index), *element == value);
        }
    }

    #[test]
    fn prop_finder_agrees_with_order(list in sorted_vec(), value in -25..25_i32) {
        prop_assert_eq!(
            equal_range_by(&list, |element| element.cmp(&value)),
            equal_range(&list, &value, &Natural)
        );
    }
}

// =============================================================================
// Binary Search Encoding
// Description: found means an equal element at the index; not found carries
// the insertion point, and the integer encoding round-trips
// =============================================================================

proptest! {
    #[test]
    fn prop_binary_search_found_or_insertion_point(list in sorted_vec(), value in -25..25_i32) {
        match binary_search(&list, &value, &Natural) {
            SearchResult::Found(index) => prop_assert_eq!(list[index], value),
            SearchResult::NotFound(index) => {
                prop_assert!(!list.contains(&value));
                prop_assert_eq!(index, lower_bound(&list, &value, &Natural));
            }
        }
    }

    #[test]
    fn prop_encoding_decodes_to_same_result(list in sorted_vec(), value in -25..25_i32) {
        let result = binary_search(&list, &value, &Natural);
        let encoded = result.to_encoded().unwrap();
        prop_assert_eq!(SearchResult::from_encoded(encoded), result);
        prop_assert_eq!(encoded < 0, !result.is_found());
    }
}

// =============================================================================
// Order Parameterization
// Description: searching a descending list under Reversed mirrors the
// ascending search
// =============================================================================

proptest! {
    #[test]
    fn prop_reversed_order_mirrors_natural(list in sorted_vec(), value in -25..25_i32) {
        let descending: Vec<i32> = list.iter().rev().copied().collect();
        let order = Reversed(Natural);
        let length = list.len();
        let range = equal_range(&descending, &value, &order);
        let mirrored = equal_range(&list, &value, &Natural);
        prop_assert_eq!(range.start, length - mirrored.end);
        prop_assert_eq!(range.end, length - mirrored.start);
        prop_assert!(descending.windows(2).all(|pair| !order.less(&pair[1], &pair[0])));
    }
}

// =============================================================================
// Windowed Search
// Description: window searches equal full searches over the sub-slice,
// shifted by the window start
// =============================================================================

proptest! {
    #[test]
    fn prop_window_bounds_are_absolute(
        list in sorted_vec(),
        start_seed in 0..64_usize,
        length_seed in 0..64_usize,
        value in -25..25_i32
    ) {
        let start = start_seed.min(list.len());
        let length = length_seed.min(list.len() - start);
        let window = &list[start..start + length];

        prop_assert_eq!(
            lower_bound_in(&list, start, length, &value, &Natural).unwrap(),
            start + lower_bound(window, &value, &Natural)
        );
        prop_assert_eq!(
            upper_bound_in(&list, start, length, &value, &Natural).unwrap(),
            start + upper_bound(window, &value, &Natural)
        );
    }
}
