//! Run collapsing over a single sorted sequence.

use std::iter::{Fuse, FusedIterator};

use crate::order::Equivalence;

/// Collapses consecutive equivalent elements to the first of each run.
///
/// The input is expected to be sorted, so equivalent elements are adjacent;
/// on unsorted input only adjacent duplicates are removed. The adaptor holds
/// at most one element that it has read ahead.
///
/// Created by [`sorted_distinct`](super::sorted_distinct).
#[derive(Debug, Clone)]
pub struct SortedDistinct<I: Iterator, E> {
    source: Fuse<I>,
    pending: Option<I::Item>,
    equivalence: E,
}

impl<I: Iterator, E> SortedDistinct<I, E> {
    pub(super) fn new(source: I, equivalence: E) -> Self {
        Self {
            source: source.fuse(),
            pending: None,
            equivalence,
        }
    }
}

impl<I, E> Iterator for SortedDistinct<I, E>
where
    I: Iterator,
    E: Equivalence<I::Item>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let first = self.pending.take().or_else(|| self.source.next())?;
        for candidate in self.source.by_ref() {
            if !self.equivalence.equals(&first, &candidate) {
                self.pending = Some(candidate);
                break;
            }
        }
        Some(first)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = usize::from(self.pending.is_some());
        let (low, high) = self.source.size_hint();
        let low = usize::from(pending == 1 || low > 0);
        (low, high.and_then(|high| high.checked_add(pending)))
    }
}

impl<I, E> FusedIterator for SortedDistinct<I, E>
where
    I: Iterator,
    E: Equivalence<I::Item>,
{
}

/// Collapses runs of successive values into `(start, end)` summaries.
///
/// `is_successor(previous, next)` decides whether `next` extends the current
/// run; `factory(start, end)` builds the summary. A run of one element passes
/// a clone of it as both `start` and `end`.
///
/// Created by [`to_ranges`](super::to_ranges).
#[derive(Debug, Clone)]
pub struct ToRanges<I: Iterator, P, F> {
    values: Fuse<I>,
    pending: Option<I::Item>,
    is_successor: P,
    factory: F,
}

impl<I: Iterator, P, F> ToRanges<I, P, F> {
    pub(super) fn new(values: I, is_successor: P, factory: F) -> Self {
        Self {
            values: values.fuse(),
            pending: None,
            is_successor,
            factory,
        }
    }
}

impl<T, R, I, P, F> Iterator for ToRanges<I, P, F>
where
    T: Clone,
    I: Iterator<Item = T>,
    P: FnMut(&T, &T) -> bool,
    F: FnMut(T, T) -> R,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        let start = self.pending.take().or_else(|| self.values.next())?;
        let mut end: Option<T> = None;
        loop {
            match self.values.next() {
                Some(value) if (self.is_successor)(end.as_ref().unwrap_or(&start), &value) => {
                    end = Some(value);
                }
                other => {
                    self.pending = other;
                    let end = end.unwrap_or_else(|| start.clone());
                    return Some((self.factory)(start, end));
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = usize::from(self.pending.is_some());
        let (low, high) = self.values.size_hint();
        let low = usize::from(pending == 1 || low > 0);
        (low, high.and_then(|high| high.checked_add(pending)))
    }
}

impl<T, R, I, P, F> FusedIterator for ToRanges<I, P, F>
where
    T: Clone,
    I: Iterator<Item = T>,
    P: FnMut(&T, &T) -> bool,
    F: FnMut(T, T) -> R,
{
}

#[cfg(test)]
mod tests {
    use super::super::{sorted_distinct, sorted_distinct_by_order, to_ranges};
    use crate::order::{EquivalenceByKey, NaturalEquivalence, by_key};
    use rstest::rstest;

    #[rstest]
    #[case::runs(vec![1, 1, 2, 3, 3, 3, 4], vec![1, 2, 3, 4])]
    #[case::already_distinct(vec![1, 2, 3], vec![1, 2, 3])]
    #[case::single_run(vec![7, 7, 7], vec![7])]
    #[case::empty(vec![], vec![])]
    fn test_sorted_distinct(#[case] input: Vec<i32>, #[case] expected: Vec<i32>) {
        assert_eq!(
            sorted_distinct(input, NaturalEquivalence).collect::<Vec<_>>(),
            expected
        );
    }

    #[rstest]
    fn test_sorted_distinct_keeps_first_of_run() {
        let words = ["Apple", "apple", "Banana", "BANANA", "cherry"];
        let distinct: Vec<&str> =
            sorted_distinct(words, EquivalenceByKey::new(|word: &&str| word.to_lowercase())).collect();
        assert_eq!(distinct, vec!["Apple", "Banana", "cherry"]);
    }

    #[rstest]
    fn test_sorted_distinct_by_order() {
        let pairs = [(1, 'a'), (1, 'b'), (2, 'c')];
        let distinct: Vec<(i32, char)> =
            sorted_distinct_by_order(pairs, by_key(|pair: &(i32, char)| pair.0)).collect();
        assert_eq!(distinct, vec![(1, 'a'), (2, 'c')]);
    }

    #[rstest]
    fn test_to_ranges_collapses_successors() {
        let ranges: Vec<(i32, i32)> = to_ranges(
            [1, 2, 3, 5, 7, 8],
            |previous: &i32, next: &i32| previous + 1 == *next,
            |start, end| (start, end),
        )
        .collect();
        assert_eq!(ranges, vec![(1, 3), (5, 5), (7, 8)]);
    }

    #[rstest]
    fn test_to_ranges_with_non_numeric_adjacency() {
        let letters = ['a', 'b', 'c', 'x', 'y'];
        let ranges: Vec<String> = to_ranges(
            letters,
            |previous: &char, next: &char| (*previous as u32) + 1 == *next as u32,
            |start, end| format!("{start}-{end}"),
        )
        .collect();
        assert_eq!(ranges, vec!["a-c".to_string(), "x-y".to_string()]);
    }

    #[rstest]
    fn test_to_ranges_empty() {
        let empty: Vec<i32> = Vec::new();
        let mut ranges = to_ranges(empty, |_: &i32, _: &i32| true, |start, end| (start, end));
        assert_eq!(ranges.next(), None);
    }
}
