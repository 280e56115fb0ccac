//! Two-way sorted adaptors: stable merge and the key-set forms.

use std::cmp::Ordering;
use std::iter::FusedIterator;

use super::{Head, head, sum_hints};
use crate::order::Order;

// =============================================================================
// Merge
// =============================================================================

/// Stable multiset union of two sorted sequences.
///
/// On equal elements the left element is emitted first. Once either side is
/// exhausted the other is drained without further comparisons.
///
/// Created by [`merge`](super::merge).
pub struct Merge<A: Iterator, B: Iterator, O> {
    left: Head<A>,
    right: Head<B>,
    order: O,
}

two_input_impls!(Merge { left, right, order });

impl<A: Iterator, B: Iterator, O> Merge<A, B, O> {
    pub(super) fn new(left: A, right: B, order: O) -> Self {
        Self {
            left: head(left),
            right: head(right),
            order,
        }
    }
}

impl<T, A, B, O> Iterator for Merge<A, B, O>
where
    A: Iterator<Item = T>,
    B: Iterator<Item = T>,
    O: Order<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match (self.left.peek(), self.right.peek()) {
            (Some(left), Some(right)) => {
                if self.order.less(right, left) {
                    self.right.next()
                } else {
                    self.left.next()
                }
            }
            (Some(_), None) => self.left.next(),
            (None, _) => self.right.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        sum_hints(self.left.size_hint(), self.right.size_hint())
    }
}

impl<T, A, B, O> FusedIterator for Merge<A, B, O>
where
    A: Iterator<Item = T>,
    B: Iterator<Item = T>,
    O: Order<T>,
{
}

// =============================================================================
// Join
// =============================================================================

/// One step of a sorted join: which side(s) held the current key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Joined<T> {
    /// The key was only on the left.
    Left(T),
    /// The key was only on the right.
    Right(T),
    /// Both sides held an equal key.
    Both(T, T),
}

impl<T> Joined<T> {
    /// Returns the left element if present, otherwise the right one.
    pub fn into_preferred(self) -> T {
        match self {
            Self::Left(item) | Self::Right(item) | Self::Both(item, _) => item,
        }
    }

    /// Returns `true` for [`Joined::Both`].
    #[must_use]
    pub const fn is_both(&self) -> bool {
        matches!(self, Self::Both(..))
    }
}

/// Three-way dispatch over two sorted sequences.
///
/// Every pull compares the two heads and reports whether the smaller key came
/// from the left, the right, or both. The key-set adaptors below are
/// specializations of this loop that differ only in which branches emit.
///
/// Created by [`join`](super::join).
pub struct Join<A: Iterator, B: Iterator, O> {
    left: Head<A>,
    right: Head<B>,
    order: O,
}

two_input_impls!(Join { left, right, order });

impl<A: Iterator, B: Iterator, O> Join<A, B, O> {
    pub(super) fn new(left: A, right: B, order: O) -> Self {
        Self {
            left: head(left),
            right: head(right),
            order,
        }
    }
}

impl<T, A, B, O> Iterator for Join<A, B, O>
where
    A: Iterator<Item = T>,
    B: Iterator<Item = T>,
    O: Order<T>,
{
    type Item = Joined<T>;

    fn next(&mut self) -> Option<Joined<T>> {
        let ordering = match (self.left.peek(), self.right.peek()) {
            (Some(left), Some(right)) => self.order.compare(left, right),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => return None,
        };
        match ordering {
            Ordering::Less => self.left.next().map(Joined::Left),
            Ordering::Greater => self.right.next().map(Joined::Right),
            Ordering::Equal => self
                .left
                .next()
                .zip(self.right.next())
                .map(|(left, right)| Joined::Both(left, right)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (left_low, left_high) = self.left.size_hint();
        let (right_low, right_high) = self.right.size_hint();
        let (_, high) = sum_hints((left_low, left_high), (right_low, right_high));
        (left_low.max(right_low), high)
    }
}

impl<T, A, B, O> FusedIterator for Join<A, B, O>
where
    A: Iterator<Item = T>,
    B: Iterator<Item = T>,
    O: Order<T>,
{
}

// =============================================================================
// Union
// =============================================================================

/// Keys present in either sequence; equal keys yield the left element once.
///
/// Created by [`union`](super::union).
pub struct Union<A: Iterator, B: Iterator, O> {
    join: Join<A, B, O>,
}

two_input_impls!(Union { join });

impl<A: Iterator, B: Iterator, O> Union<A, B, O> {
    pub(super) fn new(left: A, right: B, order: O) -> Self {
        Self {
            join: Join::new(left, right, order),
        }
    }
}

impl<T, A, B, O> Iterator for Union<A, B, O>
where
    A: Iterator<Item = T>,
    B: Iterator<Item = T>,
    O: Order<T>,
{
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.join.next().map(Joined::into_preferred)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.join.size_hint()
    }
}

impl<T, A, B, O> FusedIterator for Union<A, B, O>
where
    A: Iterator<Item = T>,
    B: Iterator<Item = T>,
    O: Order<T>,
{
}

// =============================================================================
// Intersection
// =============================================================================

/// Keys present in both sequences, yielding the left element.
///
/// Stops as soon as either side is exhausted.
///
/// Created by [`intersection`](super::intersection).
pub struct Intersection<A: Iterator, B: Iterator, O> {
    left: Head<A>,
    right: Head<B>,
    order: O,
}

two_input_impls!(Intersection { left, right, order });

impl<A: Iterator, B: Iterator, O> Intersection<A, B, O> {
    pub(super) fn new(left: A, right: B, order: O) -> Self {
        Self {
            left: head(left),
            right: head(right),
            order,
        }
    }
}

impl<T, A, B, O> Iterator for Intersection<A, B, O>
where
    A: Iterator<Item = T>,
    B: Iterator<Item = T>,
    O: Order<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            let left = self.left.peek()?;
            let right = self.right.peek()?;
            match self.order.compare(left, right) {
                Ordering::Less => {
                    self.left.next();
                }
                Ordering::Greater => {
                    self.right.next();
                }
                Ordering::Equal => {
                    self.right.next();
                    return self.left.next();
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let high = match (self.left.size_hint().1, self.right.size_hint().1) {
            (Some(left), Some(right)) => Some(left.min(right)),
            (left, right) => left.or(right),
        };
        (0, high)
    }
}

impl<T, A, B, O> FusedIterator for Intersection<A, B, O>
where
    A: Iterator<Item = T>,
    B: Iterator<Item = T>,
    O: Order<T>,
{
}

// =============================================================================
// Difference
// =============================================================================

/// Keys of the left sequence that are absent from the right one.
///
/// Once the right side is exhausted the rest of the left side is drained
/// without comparisons.
///
/// Created by [`difference`](super::difference).
pub struct Difference<A: Iterator, B: Iterator, O> {
    left: Head<A>,
    right: Head<B>,
    order: O,
}

two_input_impls!(Difference { left, right, order });

impl<A: Iterator, B: Iterator, O> Difference<A, B, O> {
    pub(super) fn new(left: A, right: B, order: O) -> Self {
        Self {
            left: head(left),
            right: head(right),
            order,
        }
    }
}

impl<T, A, B, O> Iterator for Difference<A, B, O>
where
    A: Iterator<Item = T>,
    B: Iterator<Item = T>,
    O: Order<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            let left = self.left.peek()?;
            let Some(right) = self.right.peek() else {
                return self.left.next();
            };
            match self.order.compare(left, right) {
                Ordering::Less => return self.left.next(),
                Ordering::Greater => {
                    self.right.next();
                }
                Ordering::Equal => {
                    self.left.next();
                    self.right.next();
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.left.size_hint().1)
    }
}

impl<T, A, B, O> FusedIterator for Difference<A, B, O>
where
    A: Iterator<Item = T>,
    B: Iterator<Item = T>,
    O: Order<T>,
{
}

// =============================================================================
// SymmetricDifference
// =============================================================================

/// Keys present in exactly one of the two sequences.
///
/// Created by [`symmetric_difference`](super::symmetric_difference).
pub struct SymmetricDifference<A: Iterator, B: Iterator, O> {
    join: Join<A, B, O>,
}

two_input_impls!(SymmetricDifference { join });

impl<A: Iterator, B: Iterator, O> SymmetricDifference<A, B, O> {
    pub(super) fn new(left: A, right: B, order: O) -> Self {
        Self {
            join: Join::new(left, right, order),
        }
    }
}

impl<T, A, B, O> Iterator for SymmetricDifference<A, B, O>
where
    A: Iterator<Item = T>,
    B: Iterator<Item = T>,
    O: Order<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            match self.join.next()? {
                Joined::Left(item) | Joined::Right(item) => return Some(item),
                Joined::Both(..) => {}
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.join.size_hint().1)
    }
}

impl<T, A, B, O> FusedIterator for SymmetricDifference<A, B, O>
where
    A: Iterator<Item = T>,
    B: Iterator<Item = T>,
    O: Order<T>,
{
}

#[cfg(test)]
mod tests {
    use super::super::{difference, intersection, join, merge, symmetric_difference, union};
    use super::*;
    use crate::order::{Natural, Reversed, by_key};
    use rstest::rstest;

    #[rstest]
    fn test_merge_prefers_left_on_ties() {
        let left = [(1, 'a'), (3, 'a'), (5, 'a')];
        let right = [(2, 'b'), (3, 'b'), (4, 'b')];
        let merged: Vec<(i32, char)> =
            merge(left, right, by_key(|pair: &(i32, char)| pair.0)).collect();
        assert_eq!(
            merged,
            vec![(1, 'a'), (2, 'b'), (3, 'a'), (3, 'b'), (4, 'b'), (5, 'a')]
        );
    }

    #[rstest]
    #[case::left_empty(vec![], vec![1, 2], vec![1, 2])]
    #[case::right_empty(vec![1, 2], vec![], vec![1, 2])]
    #[case::both_empty(vec![], vec![], vec![])]
    #[case::disjoint(vec![5, 6], vec![1, 2], vec![1, 2, 5, 6])]
    fn test_merge_edges(#[case] left: Vec<i32>, #[case] right: Vec<i32>, #[case] expected: Vec<i32>) {
        assert_eq!(merge(left, right, Natural).collect::<Vec<_>>(), expected);
    }

    #[rstest]
    fn test_merge_size_hint_is_exact_for_exact_inputs() {
        let merged = merge(vec![1, 2], vec![3], Natural);
        assert_eq!(merged.size_hint(), (3, Some(3)));
    }

    #[rstest]
    fn test_merge_under_reversed_order() {
        let merged: Vec<i32> = merge([5, 3, 1], [4, 2], Reversed(Natural)).collect();
        assert_eq!(merged, vec![5, 4, 3, 2, 1]);
    }

    #[rstest]
    fn test_join_classifies_each_key() {
        let joined: Vec<Joined<i32>> = join([1, 2, 4], [2, 3], Natural).collect();
        assert_eq!(
            joined,
            vec![
                Joined::Left(1),
                Joined::Both(2, 2),
                Joined::Right(3),
                Joined::Left(4)
            ]
        );
    }

    #[rstest]
    fn test_key_set_forms() {
        let left = [1, 2, 3, 5];
        let right = [2, 3, 4];
        assert_eq!(union(left, right, Natural).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_eq!(intersection(left, right, Natural).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(difference(left, right, Natural).collect::<Vec<_>>(), vec![1, 5]);
        assert_eq!(
            symmetric_difference(left, right, Natural).collect::<Vec<_>>(),
            vec![1, 4, 5]
        );
    }

    #[rstest]
    fn test_union_keeps_left_element() {
        let left = [(1, "left")];
        let right = [(1, "right"), (2, "right")];
        let united: Vec<(i32, &str)> = union(left, right, by_key(|pair: &(i32, &str)| pair.0)).collect();
        assert_eq!(united, vec![(1, "left"), (2, "right")]);
    }

    #[rstest]
    fn test_intersection_stops_when_one_side_ends() {
        let mut pulled = 0;
        let right = (10..).inspect(|_| pulled += 1);
        let shared: Vec<i32> = intersection([10, 11], right, Natural).collect();
        assert_eq!(shared, vec![10, 11]);
        assert!(pulled <= 3);
    }

    #[rstest]
    fn test_difference_drains_left_after_right_ends() {
        assert_eq!(
            difference([1, 5, 7, 9], [5], Natural).collect::<Vec<_>>(),
            vec![1, 7, 9]
        );
    }

    #[rstest]
    fn test_clone_resumes_from_buffered_heads() {
        let mut merged = merge(vec![1, 4], vec![2, 3], Natural);
        assert_eq!(merged.next(), Some(1));
        let copy = merged.clone();
        assert_eq!(merged.collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(copy.collect::<Vec<_>>(), vec![2, 3, 4]);

        let shared = intersection(vec![1, 2, 3], vec![2, 3], Natural);
        assert_eq!(shared.clone().count(), 2);
        assert_eq!(shared.collect::<Vec<_>>(), vec![2, 3]);
    }

    #[rstest]
    fn test_debug_shows_pending_heads() {
        let united = union(vec![1], vec![2], Natural);
        let rendered = format!("{united:?}");
        assert!(rendered.starts_with("Union { join: Join { left: "));
        assert!(rendered.ends_with("order: Natural } }"));

        let rest = difference(vec![3], Vec::<i32>::new(), Natural);
        assert!(format!("{rest:?}").starts_with("Difference { left: "));
    }
}
