//! Integration tests for SortedSet and OrderStatistics.
//!
//! These tests walk the public API end to end: construction, queries,
//! set algebra over every operand kind, and comparator-defined identity.

#![cfg(feature = "set")]

use std::cell::Cell;

use ordkit::error::OrderError;
use ordkit::merge::SortedIteratorExt;
use ordkit::order::{Natural, Reversed, by_key, from_fn};
use ordkit::search::{SortedRange, try_binary_search_by};
use ordkit::set::{SequenceTraits, SetOperand, SortedSet, unprobed};
use ordkit::statistics::OrderStatistics;
use rstest::rstest;

/// An iterator that records how many items were pulled from it.
struct Counted<'a, I> {
    inner: I,
    pulled: &'a Cell<usize>,
}

impl<I: Iterator> Iterator for Counted<'_, I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.pulled.set(self.pulled.get() + 1);
        self.inner.next()
    }
}

fn counted<I: IntoIterator>(items: I, pulled: &Cell<usize>) -> Counted<'_, I::IntoIter> {
    Counted {
        inner: items.into_iter(),
        pulled,
    }
}

#[rstest]
fn test_new_creates_empty_set() {
    let set: SortedSet<i32> = SortedSet::new();
    assert!(set.is_empty());
    assert_eq!(set.len(), 0);
    assert!(set.min().unwrap_err().is_no_such_element());
}

#[rstest]
fn test_union_with_overlapping_set() {
    let mut set: SortedSet<i32> = [1, 2, 3].into_iter().collect();
    set.union_with(&[2, 3, 4].into_iter().collect::<SortedSet<i32>>());
    assert_eq!(set.as_slice(), &[1, 2, 3, 4]);
    assert_eq!(set.len(), 4);
}

#[rstest]
fn test_intersect_with_empty_receiver_never_pulls_operand() {
    let pulled = Cell::new(0);
    let mut set: SortedSet<i32> = SortedSet::new();
    set.intersect_with(unprobed(counted(0..1_000, &pulled)));
    assert!(set.is_empty());
    assert_eq!(pulled.get(), 0);
}

#[rstest]
fn test_intersect_with_non_empty_receiver_pulls_operand() {
    let pulled = Cell::new(0);
    let mut set: SortedSet<i32> = [3, 5].into_iter().collect();
    set.intersect_with(unprobed(counted([5, 4, 3, 2], &pulled)));
    assert_eq!(set.as_slice(), &[3, 5]);
    assert!(pulled.get() > 0);
}

#[rstest]
#[case::sorted_set_operand(true)]
#[case::plain_vec_operand(false)]
fn test_except_with_either_path(#[case] use_set: bool) {
    let mut set: SortedSet<i32> = (1..=10).collect();
    let removed = vec![10, 2, 4, 6, 8, 8];
    if use_set {
        set.except_with(removed.into_iter().collect::<SortedSet<i32>>());
    } else {
        set.except_with(removed);
    }
    assert_eq!(set.as_slice(), &[1, 3, 5, 7, 9]);
}

#[rstest]
fn test_operand_probe_reports_capabilities() {
    let set: SortedSet<i32> = [1, 2].into_iter().collect();
    assert_eq!(
        (&set).probe(&Natural),
        SequenceTraits {
            count: Some(2),
            sorted: true,
            unique: true
        }
    );

    let reversed = SortedSet::from_vec_with_order(vec![1, 2], Reversed(Natural));
    assert!((&reversed).probe(&Reversed(Natural)).permits_merge());
}

#[rstest]
fn test_set_identity_follows_case_insensitive_order() {
    let order = from_fn(|left: &String, right: &String| {
        left.to_lowercase().cmp(&right.to_lowercase())
    });
    let mut set = SortedSet::with_order(order);
    assert!(set.add("Rust".to_string()));
    assert!(!set.add("rust".to_string()));
    assert!(set.contains(&"RUST".to_string()));
    assert_eq!(set.get(&"rUsT".to_string()).map(String::as_str), Some("Rust"));

    set.union_with(vec!["go".to_string(), "RUST".to_string()]);
    assert_eq!(set.as_slice(), &["go".to_string(), "Rust".to_string()]);
}

#[rstest]
fn test_order_statistics_scenario() {
    let statistics: OrderStatistics<i32> = [5, 1, 4, 2, 3].into_iter().collect();
    let selected: Vec<i32> = (0..5)
        .map(|rank| *statistics.select(rank).unwrap())
        .collect();
    assert_eq!(selected, vec![1, 2, 3, 4, 5]);
    assert_eq!(statistics.rank(&3), 2);
    assert_eq!(statistics.floor(&3).unwrap(), &3);
    assert_eq!(statistics.ceiling(&4).unwrap(), &4);
}

#[rstest]
fn test_statistics_and_range_operands() {
    let statistics: OrderStatistics<i32> = [2, 2, 3].into_iter().collect();
    let mut set: SortedSet<i32> = [1, 2].into_iter().collect();
    set.union_with(&statistics);
    assert_eq!(set.as_slice(), &[1, 2, 3]);

    let data = [0, 3];
    let range = SortedRange::new(&data, Natural).unwrap();
    assert!(set.overlaps(range));
    set.except_with(range);
    assert_eq!(set.as_slice(), &[1, 2]);
}

#[rstest]
fn test_set_range_queries() {
    let set: SortedSet<i32> = [10, 20, 30, 40].into_iter().collect();
    assert_eq!(set.count_between(&15, &40).unwrap(), 2);
    let between: Vec<i32> = set.enumerate_between(&15, &40).unwrap().copied().collect();
    assert_eq!(between, vec![20, 30]);
    assert!(matches!(
        set.count_between(&40, &15),
        Err(OrderError::InvalidArgument { .. })
    ));
}

#[rstest]
fn test_cursor_between_detects_mutation() {
    let mut set: SortedSet<i32> = [1, 2, 3, 4].into_iter().collect();
    let mut cursor = set.cursor_between(&2, &4).unwrap();
    assert_eq!(set.advance(&mut cursor).unwrap(), Some(&2));
    assert!(set.remove(&1));
    assert!(matches!(
        set.advance(&mut cursor),
        Err(OrderError::ConcurrentModification { .. })
    ));
}

#[rstest]
fn test_set_output_feeds_merge_algebra() {
    let evens: SortedSet<i32> = (0..10).filter(|value| value % 2 == 0).collect();
    let odds: SortedSet<i32> = (0..10).filter(|value| value % 2 == 1).collect();
    let merged: Vec<i32> = evens.iter().merge_sorted(odds.iter(), Natural).copied().collect();
    assert_eq!(merged, (0..10).collect::<Vec<_>>());
}

#[rstest]
fn test_keyed_set_keeps_first_record() {
    let set = SortedSet::from_vec_with_order(
        vec![(2, "second"), (1, "first"), (2, "duplicate")],
        by_key(|record: &(i32, &str)| record.0),
    );
    assert_eq!(set.as_slice(), &[(1, "first"), (2, "second")]);
}

#[rstest]
fn test_faulting_finder_is_reported_not_propagated() {
    let set: SortedSet<i32> = (0..16).collect();
    let result = try_binary_search_by(set.as_slice(), |element: &i32| -> Result<std::cmp::Ordering, String> {
        if *element == 8 {
            panic!("finder exploded")
        }
        Ok(element.cmp(&3))
    });
    match result {
        Err(OrderError::ComparatorFailed(failure)) => {
            assert_eq!(failure.callback(), "binary_search finder");
            assert!(failure.to_string().contains("finder exploded"));
        }
        other => panic!("expected comparator failure, got {other:?}"),
    }
}
